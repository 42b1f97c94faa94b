use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, Lit, LitBool, LitStr, Meta, spanned::Spanned};

use crate::MAPPER_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// `#[mapper(...)]` attributes on the type.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `#[mapper(auto_register)]`
    pub(crate) auto_register: Option<Span>,
}

impl TypeAttributes {
    pub(crate) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(MAPPER_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("auto_register") {
                    this.auto_register = Some(meta.path.span());
                    Ok(())
                } else {
                    Err(meta.error("unsupported type attribute, expected `auto_register`"))
                }
            })?;
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// `#[mapper(...)]` attributes and doc comments on a field.
#[derive(Debug)]
pub(crate) struct FieldAttributes {
    pub(crate) skip: bool,
    pub(crate) rename: Option<LitStr>,
    pub(crate) getter: bool,
    pub(crate) setter: bool,
    pub(crate) type_hint: Option<LitStr>,
    docs: Vec<String>,
}

impl Default for FieldAttributes {
    fn default() -> Self {
        Self {
            skip: false,
            rename: None,
            getter: true,
            setter: true,
            type_hint: None,
            docs: Vec::new(),
        }
    }
}

impl FieldAttributes {
    pub(crate) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident("doc") {
                this.parse_doc(&attr.meta)?;
            } else if attr.path().is_ident(MAPPER_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(&meta))?;
            }
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("skip") {
            self.skip = true;
        } else if meta.path.is_ident("rename") {
            let name: LitStr = meta.value()?.parse()?;
            if name.value().is_empty() {
                return Err(syn::Error::new(name.span(), "field name cannot be empty"));
            }
            self.rename = Some(name);
        } else if meta.path.is_ident("getter") {
            let value: LitBool = meta.value()?.parse()?;
            self.getter = value.value;
        } else if meta.path.is_ident("setter") {
            let value: LitBool = meta.value()?.parse()?;
            self.setter = value.value;
        } else if meta.path.is_ident("type_hint") {
            self.type_hint = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error(
                "unsupported field attribute, expected `skip`, `rename`, `getter`, `setter` or `type_hint`",
            ));
        }
        Ok(())
    }

    fn parse_doc(&mut self, meta: &Meta) -> syn::Result<()> {
        if let Meta::NameValue(pair) = meta
            && let Expr::Lit(syn::ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) = &pair.value
        {
            let line = lit_str.value();
            let line = line.strip_prefix(' ').unwrap_or(&line);
            self.docs.push(line.to_owned());
            Ok(())
        } else {
            Err(syn::Error::new(
                meta.span(),
                "`#[doc = ...]` expected a string literal value",
            ))
        }
    }

    /// The doc comment lines joined with `\n`, or `None` if there are none.
    #[cfg_attr(not(feature = "doc_annotations"), allow(dead_code))]
    pub(crate) fn doc_string(&self) -> Option<String> {
        let doc = self.docs.join("\n");
        (!doc.trim().is_empty()).then_some(doc)
    }
}
