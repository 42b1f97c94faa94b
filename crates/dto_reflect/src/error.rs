use thiserror::Error;

// -----------------------------------------------------------------------------
// IntrospectionError

/// The fields of a type could not be enumerated.
///
/// This is the only error a conversion returns. It aborts the whole call,
/// including every enclosing nested conversion; everything else (unknown keys,
/// missing accessors, values that cannot be coerced) is skipped silently.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IntrospectionError {
    /// The type has no entry in the registry.
    #[error("type `{type_path}` is not registered for mapping")]
    Unregistered { type_path: &'static str },

    /// A type name does not resolve to exactly one registered type.
    #[error("type name `{name}` does not resolve to a registered type")]
    UnresolvedType { name: String },

    /// A field declared as a nested object carries no type reference or hint.
    #[error("field `{field}` of `{type_path}` has no resolvable object type")]
    UntypedField {
        type_path: &'static str,
        field: &'static str,
    },

    /// The type is registered without a constructor, so it cannot be instantiated.
    #[error("type `{type_path}` is registered without a constructor")]
    MissingConstructor { type_path: &'static str },
}
