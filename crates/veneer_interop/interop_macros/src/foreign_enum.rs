//! Derive macro for the `ForeignEnum` trait.

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

#[derive(FromVariant)]
#[darling(attributes(foreign_enum))]
struct MemberArgs {
    ident: syn::Ident,
    #[darling(default)]
    rename: Option<String>,
}

#[derive(FromDeriveInput)]
#[darling(attributes(foreign_enum), supports(enum_unit))]
struct ForeignEnumArgs {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<MemberArgs, ()>,

    namespace: String,
    #[darling(default)]
    name: Option<String>,
}

pub(crate) fn derive_foreign_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let args = match ForeignEnumArgs::from_derive_input(&input) {
        Ok(args) => args,
        Err(err) => return err.write_errors().into(),
    };

    let darling::ast::Data::Enum(members) = &args.data else {
        unreachable!("rejected by `supports`");
    };

    let krate = veneer_macro_utils::resolve_crate_path(veneer_macro_utils::VeneerCrate::Interop);

    let name = &args.ident;
    let (impl_generics, ty_generics, where_clause) = args.generics.split_for_impl();
    let namespace = &args.namespace;
    let foreign_name = args.name.clone().unwrap_or_else(|| name.to_string());

    let variants: Vec<_> = members.iter().map(|m| &m.ident).collect();
    let member_names: Vec<_> = members
        .iter()
        .map(|m| m.rename.clone().unwrap_or_else(|| m.ident.to_string()))
        .collect();

    let expanded = quote! {
        impl #impl_generics #krate::ForeignEnum for #name #ty_generics #where_clause {
            fn enum_type() -> #krate::TypeName {
                #krate::TypeName::new(#namespace, #foreign_name)
            }

            fn member(&self) -> &'static str {
                match *self {
                    #(Self::#variants => #member_names,)*
                }
            }

            fn from_member(member: &str) -> ::core::option::Option<Self> {
                match member {
                    #(#member_names => ::core::option::Option::Some(Self::#variants),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };

    expanded.into()
}
