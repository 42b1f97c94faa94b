use std::sync::LazyLock;

use regex::Regex;

static VAR_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@var (.+)\[\](.+)?").expect("annotation pattern is valid"));

/// Extracts the element type name from a `@var Name[]` annotation.
///
/// Free text may follow the brackets. The name capture is greedy, so
/// `@var Name[][]` yields `Name[]`, and it stops at the end of the line.
/// Returns `None` if the text has no such annotation.
///
/// ```
/// use dto_reflect::info::element_type_in;
///
/// assert_eq!(element_type_in("@var Item[] ordered by id"), Some("Item"));
/// assert_eq!(element_type_in("@var Item"), None);
/// ```
pub fn element_type_in(annotation: &str) -> Option<&str> {
    let name = VAR_ANNOTATION.captures(annotation)?.get(1)?.as_str().trim();
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::element_type_in;

    #[test]
    fn plain_annotation() {
        assert_eq!(element_type_in("@var Item[]"), Some("Item"));
        assert_eq!(element_type_in("@var crate::dto::Item[]"), Some("crate::dto::Item"));
    }

    #[test]
    fn trailing_text_and_other_lines() {
        let doc = "Items of the order.\n@var Item[] sorted by position\nmore text";
        assert_eq!(element_type_in(doc), Some("Item"));
    }

    #[test]
    fn greedy_capture() {
        assert_eq!(element_type_in("@var Item[][]"), Some("Item[]"));
    }

    #[test]
    fn no_match() {
        assert_eq!(element_type_in(""), None);
        assert_eq!(element_type_in("@var Item"), None);
        assert_eq!(element_type_in("@var []"), None);
        assert_eq!(element_type_in("@return Item[]"), None);
    }
}
