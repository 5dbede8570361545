//! Supertype references accepted by `#[wrapper(extends = ..., implements(...))]`.

use darling::FromMeta;
use darling::ast::NestedMeta;
use proc_macro2::TokenStream;
use quote::quote;

/// Either a wrapper type whose `type_name()` is used, or a qualified
/// foreign type name for types without a wrapper.
pub(crate) enum TypeRef {
    Wrapper(syn::Path),
    Named(String),
}

impl TypeRef {
    /// Expression evaluating to the referenced `TypeName`.
    pub(crate) fn to_type_name(&self, krate: &TokenStream) -> TokenStream {
        match self {
            Self::Wrapper(path) => quote!(<#path as #krate::Wrapper>::type_name()),
            Self::Named(name) => quote!(#krate::TypeName::parse(#name)),
        }
    }
}

impl FromMeta for TypeRef {
    fn from_string(value: &str) -> darling::Result<Self> {
        Ok(Self::Named(value.to_string()))
    }

    fn from_expr(expr: &syn::Expr) -> darling::Result<Self> {
        match expr {
            syn::Expr::Path(path) => Ok(Self::Wrapper(path.path.clone())),
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(s),
                ..
            }) => Ok(Self::Named(s.value())),
            _ => Err(darling::Error::unexpected_expr_type(expr)),
        }
    }
}

/// `implements(A, "Ns.B", ...)`.
#[derive(Default)]
pub(crate) struct TypeRefList(pub(crate) Vec<TypeRef>);

impl FromMeta for TypeRefList {
    fn from_list(items: &[NestedMeta]) -> darling::Result<Self> {
        let mut errors = darling::Error::accumulator();
        let refs = items
            .iter()
            .filter_map(|item| {
                errors.handle(match item {
                    NestedMeta::Meta(syn::Meta::Path(path)) => Ok(TypeRef::Wrapper(path.clone())),
                    NestedMeta::Lit(syn::Lit::Str(s)) => Ok(TypeRef::Named(s.value())),
                    other => Err(darling::Error::custom(
                        "expected a wrapper type or a qualified type name",
                    )
                    .with_span(other)),
                })
            })
            .collect();
        errors.finish_with(Self(refs))
    }
}
