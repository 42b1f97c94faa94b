//! Accessor naming convention.
//!
//! A field `foo_bar` is read through `getFooBar` and written through
//! `setFooBar`. Words are separated by `_`, ` ` or `/`; the separators are
//! dropped and the first character of every word is upper-cased. Everything
//! else is kept as-is, so `fooBar` becomes `FooBar`.
//!
//! ```
//! use dto_reflect::naming;
//!
//! assert_eq!(naming::accessor_suffix("foo_bar"), "FooBar");
//! assert_eq!(naming::getter_name("created_at"), "getCreatedAt");
//! assert_eq!(naming::setter_name("path/to file"), "setPathToFile");
//! ```

use alloc::format;
use alloc::string::String;

/// The characters that separate words in a field name.
pub const DELIMITERS: [char; 3] = ['_', ' ', '/'];

/// Converts a field name to the PascalCase suffix of its accessors.
pub fn accessor_suffix(field: &str) -> String {
    let mut suffix = String::with_capacity(field.len());
    for word in field.split(DELIMITERS).filter(|word| !word.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            suffix.extend(first.to_uppercase());
            suffix.push_str(chars.as_str());
        }
    }
    suffix
}

/// Returns the getter name of a field: `get` + [`accessor_suffix`].
#[inline]
pub fn getter_name(field: &str) -> String {
    format!("get{}", accessor_suffix(field))
}

/// Returns the setter name of a field: `set` + [`accessor_suffix`].
#[inline]
pub fn setter_name(field: &str) -> String {
    format!("set{}", accessor_suffix(field))
}
