use std::sync::LazyLock;

use crate::registry::TypeRegistry;

static GLOBAL: LazyLock<TypeRegistry> = LazyLock::new(|| {
    let mut registry = TypeRegistry::new();
    if !registry.auto_register() {
        log::debug!("static registration is unavailable, the global registry is empty");
    }
    registry
});

/// Returns the process-wide registry.
///
/// Built on first access from every auto-registered type (see
/// [`TypeRegistry::auto_register`]) and read-only afterwards. Types that are
/// not auto-registered need a registry of their own.
#[inline]
pub fn global() -> &'static TypeRegistry {
    &GLOBAL
}
