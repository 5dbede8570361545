//! Derive macro for the `Wrapper` trait.

use crate::type_ref::{TypeRef, TypeRefList};
use darling::{FromDeriveInput, FromField};
use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

#[derive(FromField)]
struct ProxyField {
    ident: Option<syn::Ident>,
}

#[derive(FromDeriveInput)]
#[darling(attributes(wrapper), supports(struct_newtype, struct_named))]
struct WrapperArgs {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<(), ProxyField>,

    namespace: String,
    #[darling(default)]
    name: Option<String>,
    #[darling(default)]
    extends: Option<TypeRef>,
    #[darling(default)]
    implements: TypeRefList,
}

pub(crate) fn derive_wrapper(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let args = match WrapperArgs::from_derive_input(&input) {
        Ok(args) => args,
        Err(err) => return err.write_errors().into(),
    };

    let fields = match &args.data {
        darling::ast::Data::Struct(fields) => &fields.fields,
        darling::ast::Data::Enum(_) => unreachable!("rejected by `supports`"),
    };
    let [field] = fields.as_slice() else {
        return syn::Error::new_spanned(
            &args.ident,
            "a wrapper must have exactly one field holding its `Proxy`",
        )
        .to_compile_error()
        .into();
    };

    let krate = veneer_macro_utils::resolve_crate_path(veneer_macro_utils::VeneerCrate::Interop);

    let name = &args.ident;
    let (impl_generics, ty_generics, where_clause) = args.generics.split_for_impl();

    let namespace = &args.namespace;
    let foreign_name = args.name.clone().unwrap_or_else(|| name.to_string());

    let (construct, access) = match &field.ident {
        Some(ident) => (quote!(Self { #ident: proxy }), quote!(&self.#ident)),
        None => (quote!(Self(proxy)), quote!(&self.0)),
    };

    let supertype = match &args.extends {
        Some(parent) => {
            let parent = parent.to_type_name(&krate);
            quote!(::core::option::Option::Some(#parent))
        }
        None => quote!(::core::option::Option::None),
    };
    let interfaces = args.implements.0.iter().map(|i| i.to_type_name(&krate));

    let expanded = quote! {
        impl #impl_generics #krate::Wrapper for #name #ty_generics #where_clause {
            fn type_name() -> #krate::TypeName {
                static TYPE_NAME: ::std::sync::OnceLock<#krate::TypeName> =
                    ::std::sync::OnceLock::new();
                TYPE_NAME
                    .get_or_init(|| #krate::TypeName::new(#namespace, #foreign_name))
                    .clone()
            }

            fn supertype() -> ::core::option::Option<#krate::TypeName> {
                #supertype
            }

            fn interfaces() -> ::std::vec::Vec<#krate::TypeName> {
                ::std::vec![#(#interfaces),*]
            }

            fn from_proxy(proxy: #krate::Proxy) -> Self {
                ::core::assert_eq!(
                    proxy.declared_type(),
                    &<Self as #krate::Wrapper>::type_name(),
                    "proxy declared type does not match the wrapper"
                );
                #construct
            }

            fn proxy(&self) -> &#krate::Proxy {
                #access
            }
        }
    };

    expanded.into()
}
