use std::collections::{BTreeMap, BTreeSet};

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, Type, Visibility, spanned::Spanned};

use crate::derive_data::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// Accessor names

/// The PascalCase part of the accessor names of a field, following
/// `dto_reflect::naming::accessor_suffix`.
fn accessor_suffix(name: &str) -> String {
    let mut suffix = String::with_capacity(name.len());
    for word in name.split(['_', ' ', '/']).filter(|word| !word.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            suffix.extend(first.to_uppercase());
            suffix.push_str(chars.as_str());
        }
    }
    suffix
}

// -----------------------------------------------------------------------------
// MappableField

/// A field that takes part in mapping.
pub(crate) struct MappableField<'a> {
    /// The Rust field.
    pub(crate) member: &'a Ident,
    pub(crate) ty: &'a Type,
    /// The key in a mapping: the `rename` value, else the field identifier.
    pub(crate) name: String,
    pub(crate) attrs: FieldAttributes,
}

// -----------------------------------------------------------------------------
// MappableStruct

/// A struct deriving `Mappable`.
pub(crate) struct MappableStruct<'a> {
    ident: &'a Ident,
    attrs: TypeAttributes,
    fields: Vec<MappableField<'a>>,
    dto_reflect_path: syn::Path,
}

impl<'a> MappableStruct<'a> {
    pub(crate) fn from_ast(ast: &'a DeriveInput) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "`Mappable` cannot be derived for generic types",
            ));
        }

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`Mappable` can only be derived for structs with named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new(
                    ast.ident.span(),
                    "`Mappable` can only be derived for structs",
                ));
            }
        };

        let attrs = TypeAttributes::parse(&ast.attrs)?;

        let mut names = BTreeSet::new();
        let mut accessors = BTreeMap::new();
        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            // Only private fields are mapped.
            if !matches!(field.vis, Visibility::Inherited) {
                continue;
            }
            let field_attrs = FieldAttributes::parse(&field.attrs)?;
            if field_attrs.skip {
                continue;
            }

            let Some(member) = field.ident.as_ref() else {
                continue;
            };
            let name = match &field_attrs.rename {
                Some(rename) => rename.value(),
                None => member.unraw().to_string(),
            };
            if !names.insert(name.clone()) {
                return Err(syn::Error::new(
                    field.span(),
                    format!("duplicate field name `{name}`"),
                ));
            }
            if let Some(other) = accessors.insert(accessor_suffix(&name), name.clone()) {
                return Err(syn::Error::new(
                    field.span(),
                    format!(
                        "field `{other}` and `{name}` share accessor `get{}`",
                        accessor_suffix(&name),
                    ),
                ));
            }

            fields.push(MappableField {
                member,
                ty: &field.ty,
                name,
                attrs: field_attrs,
            });
        }

        Ok(Self {
            ident: &ast.ident,
            attrs,
            fields,
            dto_reflect_path: crate::path::dto_reflect(),
        })
    }

    #[inline]
    pub(crate) fn ident(&self) -> &Ident {
        self.ident
    }

    #[cfg_attr(not(feature = "auto_register"), allow(dead_code))]
    #[inline]
    pub(crate) fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub(crate) fn fields(&self) -> &[MappableField<'a>] {
        &self.fields
    }

    #[inline]
    pub(crate) fn dto_reflect_path(&self) -> &syn::Path {
        &self.dto_reflect_path
    }

    /// The type name as a string literal.
    pub(crate) fn type_name(&self) -> String {
        self.ident.unraw().to_string()
    }
}
