use crate::info::{Type, element_type_in};
use crate::value::{FieldType, ScalarKind};

// -----------------------------------------------------------------------------
// DeclaredType

/// The declared type of a field, as derived from its Rust type.
///
/// See [`FieldType::declared_type`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclaredType {
    /// A scalar, coerced through [`ScalarKind::coerce`] on input.
    Scalar(ScalarKind),
    /// A nested mappable object.
    ///
    /// `None` when the Rust type does not pin the object type
    /// (`Box<dyn Mappable>`); the field's type hint names it instead.
    Object(Option<Type>),
    /// An array.
    ///
    /// Holds the element type when the elements are mappable objects of a
    /// statically known type. Otherwise the element type comes from the type
    /// hint or annotation, if any.
    Array(Option<Type>),
}

// -----------------------------------------------------------------------------
// FieldInfo

/// Descriptor of one mappable field: name, declared type and annotation.
///
/// # Examples
///
/// ```
/// use dto_reflect::info::{DeclaredType, FieldInfo};
/// use dto_reflect::value::ScalarKind;
///
/// let info = FieldInfo::new::<Option<i64>>("age");
///
/// assert_eq!(info.name(), "age");
/// assert_eq!(info.declared(), DeclaredType::Scalar(ScalarKind::Int));
/// assert_eq!(info.type_name(), "int");
/// ```
#[derive(Clone, Debug)]
pub struct FieldInfo {
    name: &'static str,
    declared: DeclaredType,
    type_hint: Option<&'static str>,
    #[cfg(feature = "doc_annotations")]
    annotation: Option<&'static str>,
}

impl FieldInfo {
    /// Creates a descriptor for the field `name` of Rust type `T`.
    #[inline]
    pub fn new<T: FieldType>(name: &'static str) -> Self {
        Self {
            name,
            declared: T::declared_type(),
            type_hint: None,
            #[cfg(feature = "doc_annotations")]
            annotation: None,
        }
    }

    /// Sets the name of the nested object type (for `Box<dyn Mappable>`
    /// fields) or of the array element type.
    #[inline]
    pub fn with_type_hint(self, type_hint: Option<&'static str>) -> Self {
        Self { type_hint, ..self }
    }

    /// Replaces the annotation text.
    ///
    /// Used by the proc-macro crate.
    #[cfg(feature = "doc_annotations")]
    #[inline]
    pub fn with_annotation(self, annotation: Option<&'static str>) -> Self {
        Self { annotation, ..self }
    }

    /// Returns the field name, which is also the key in a plain mapping.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the [`DeclaredType`].
    #[inline(always)]
    pub const fn declared(&self) -> DeclaredType {
        self.declared
    }

    /// Returns the type hint, if any.
    #[inline(always)]
    pub const fn type_hint(&self) -> Option<&'static str> {
        self.type_hint
    }

    /// Returns the annotation (doc comment) of the field.
    ///
    /// Always `None` without the `doc_annotations` feature.
    #[inline(always)]
    pub const fn annotation(&self) -> Option<&'static str> {
        #[cfg(feature = "doc_annotations")]
        let annotation = self.annotation;
        #[cfg(not(feature = "doc_annotations"))]
        let annotation = None;
        annotation
    }

    /// Returns the declared type name: `bool`, `int`, `float`, `string`,
    /// `mixed`, `array`, or the short name of the nested object type.
    pub fn type_name(&self) -> &'static str {
        match self.declared {
            DeclaredType::Scalar(kind) => kind.name(),
            DeclaredType::Object(Some(ty)) => ty.name(),
            DeclaredType::Object(None) => self.type_hint.unwrap_or("object"),
            DeclaredType::Array(_) => "array",
        }
    }

    /// Returns the element type name of an array field that has no static
    /// element type: the type hint, else the name in a `@var Name[]` annotation.
    pub fn element_name(&self) -> Option<&'static str> {
        match self.declared {
            DeclaredType::Array(_) => self
                .type_hint
                .or_else(|| self.annotation().and_then(element_type_in)),
            _ => None,
        }
    }
}
