use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's parsed `Cargo.toml`, used to find how generated code can name
/// one of our runtime crates.
///
/// # Example
///
/// ```rust
/// # use dto_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("dto_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. The crate is listed in `dependencies`: `::crate_name`.
/// 2. The name starts with `dto_` and the caller depends on the facade
///    `dto_mapper`: `::dto_mapper::short_name`
///    (e.g. `dto_reflect` -> `::dto_mapper::reflect`).
/// 3. Steps 1-2 again with `dev-dependencies`.
/// 4. Otherwise `::crate_name`.
///
/// A crate that names itself from its own doc tests and unit tests should add
/// `extern crate self as crate_name;` to its root so rule 4 also holds inside it.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "dto_mapper";
const CRATE_PREFIX: &str = "dto_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map(|path| {
                let mut path = PathBuf::from(path);
                path.push("Cargo.toml");
                assert!(
                    path.exists(),
                    "Cargo manifest does not exist at path {}",
                    path.display(),
                );
                path
            })
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.")
    }

    #[inline(never)]
    fn get_manifest_modified_time(path: &Path) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Self::parse_manifest(manifest)
            .unwrap_or_else(|| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn parse_manifest(source: Box<str>) -> Option<Document<Box<str>>> {
        Document::parse(source).ok()
    }

    #[inline]
    fn parse_str<T: syn::parse::Parse>(path: &str) -> T {
        syn::parse_str(path).unwrap()
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_str(&format!("::{name}")));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            let mut path = Self::parse_str::<syn::Path>(&format!("::{FACADE_NAME}"));
            path.segments.push(Self::parse_str(module));
            return Some(path);
        }
        None
    }

    /// Returns a [`syn::Path`] naming the package `name` from the caller.
    ///
    /// See the type-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(val) = Self::find_in_deps(deps, name)
            {
                return val;
            }
        }

        Self::parse_str(&format!("::{name}"))
    }

    /// Runs `func` with the caller's manifest.
    ///
    /// Manifests are parsed once per path and kept until the file's modified
    /// time changes. Callers should resolve their paths once per macro
    /// invocation and pass them around.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::Manifest;

    fn manifest(source: &str) -> Manifest {
        Manifest {
            manifest: Manifest::parse_manifest(source.into()).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn path_string(path: &syn::Path) -> String {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        let prefix = if path.leading_colon.is_some() { "::" } else { "" };
        format!("{prefix}{}", segments.join("::"))
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\ndto_reflect = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("dto_reflect")), "::dto_reflect");
    }

    #[test]
    fn through_facade() {
        let m = manifest("[dependencies]\ndto_mapper = { path = \"../..\" }\n");
        assert_eq!(
            path_string(&m.get_crate_path("dto_reflect")),
            "::dto_mapper::reflect"
        );
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let m = manifest("[dev-dependencies]\ndto_mapper = \"0.0.1\"\n");
        assert_eq!(
            path_string(&m.get_crate_path("dto_reflect")),
            "::dto_mapper::reflect"
        );

        let empty = manifest("[package]\nname = \"demo\"\n");
        assert_eq!(path_string(&empty.get_crate_path("dto_reflect")), "::dto_reflect");
    }
}
