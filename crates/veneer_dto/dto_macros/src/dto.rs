//! Derive macro for the `Dto` trait.

use darling::{FromDeriveInput, FromField};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

#[derive(FromField)]
#[darling(attributes(dto))]
struct DtoField {
    ident: Option<syn::Ident>,
    ty: syn::Type,

    #[darling(default)]
    rename: Option<String>,
    #[darling(default)]
    additional: bool,
    #[darling(default, rename = "default")]
    use_default: bool,
}

#[derive(FromDeriveInput)]
#[darling(attributes(dto), supports(struct_named))]
struct DtoArgs {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<(), DtoField>,
}

/// Whether `ty` is spelled `Field<...>` (optionally path-qualified).
fn is_optional(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|seg| seg.ident == "Field"),
        _ => false,
    }
}

/// The `T` of a `Field<T>`.
fn field_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Field" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

struct Declared<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    key: String,
    optional: bool,
    use_default: bool,
}

impl Declared<'_> {
    fn encode(&self, dto: &TokenStream2, json: &TokenStream2) -> TokenStream2 {
        let ident = self.ident;
        let key = &self.key;
        if self.optional {
            quote! {
                match &self.#ident {
                    #dto::Field::Unset => {}
                    #dto::Field::Null => {
                        __map.insert(::std::string::String::from(#key), #json::Value::Null);
                    }
                    #dto::Field::Value(__value) => {
                        __map.insert(
                            ::std::string::String::from(#key),
                            #dto::FieldValue::to_value(__value),
                        );
                    }
                }
            }
        } else {
            quote! {
                __map.insert(
                    ::std::string::String::from(#key),
                    #dto::FieldValue::to_value(&self.#ident),
                );
            }
        }
    }

    fn decode(&self, dto: &TokenStream2, json: &TokenStream2) -> TokenStream2 {
        let ident = self.ident;
        let ty = self.ty;
        let key = &self.key;
        let absent = if self.optional {
            quote!(#dto::Field::Unset)
        } else if self.use_default {
            quote!(::core::default::Default::default())
        } else {
            quote!(return ::core::result::Result::Err(#dto::DtoError::MissingField(
                ::std::string::String::from(#key)
            )))
        };
        let present = if self.optional {
            quote! {
                match __value {
                    #json::Value::Null => #dto::Field::Null,
                    __value => #dto::Field::Value(
                        #dto::FieldValue::from_value(__value).map_err(|e| e.in_field(#key))?
                    ),
                }
            }
        } else {
            quote!(#dto::FieldValue::from_value(__value).map_err(|e| e.in_field(#key))?)
        };
        quote! {
            let #ident: #ty = match __data.shift_remove(#key) {
                ::core::option::Option::None => #absent,
                ::core::option::Option::Some(__value) => #present,
            };
        }
    }
}

pub(crate) fn derive_dto(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let args = match DtoArgs::from_derive_input(&input) {
        Ok(args) => args,
        Err(err) => return err.write_errors().into(),
    };

    let name = &args.ident;

    if !args.generics.params.is_empty() {
        return syn::Error::new_spanned(&args.generics, "generic DTOs are not supported")
            .to_compile_error()
            .into();
    }

    let darling::ast::Data::Struct(fields) = &args.data else {
        unreachable!("rejected by `supports`");
    };

    let mut declared = Vec::new();
    let mut bags = Vec::new();
    for field in &fields.fields {
        let Some(ident) = field.ident.as_ref() else {
            unreachable!("named structs only");
        };
        if field.additional {
            bags.push(ident);
        } else {
            declared.push(Declared {
                ident,
                ty: &field.ty,
                key: field.rename.clone().unwrap_or_else(|| ident.to_string()),
                optional: is_optional(&field.ty),
                use_default: field.use_default,
            });
        }
    }

    let bag = match bags.as_slice() {
        [bag] => *bag,
        [] => {
            return syn::Error::new_spanned(
                name,
                "a DTO needs one `#[dto(additional)]` field of type `AdditionalProperties`",
            )
            .to_compile_error()
            .into();
        }
        [_, extra, ..] => {
            return syn::Error::new_spanned(extra, "only one `#[dto(additional)]` field is allowed")
                .to_compile_error()
                .into();
        }
    };

    let dto = veneer_macro_utils::resolve_crate_path(veneer_macro_utils::VeneerCrate::Dto);
    let private = quote!(#dto::__private);
    let json = quote!(#private::serde_json);
    let serde = quote!(#private::serde);

    // `Field<Option<T>>` and `Field<Value>` would have two null states.
    let non_nullable = declared
        .iter()
        .filter(|d| d.optional)
        .filter_map(|d| field_inner(d.ty))
        .map(|inner| {
            quote! {
                ::core::assert!(
                    !<#inner as #dto::FieldValue>::NULLABLE,
                    "`Field<T>` already has a null state; `T` must not be nullable (use `Field<T>` instead of `Field<Option<T>>`)"
                );
            }
        });

    let keys = declared.iter().map(|d| &d.key);
    let encode = declared.iter().map(|d| d.encode(&dto, &json));
    let decode = declared.iter().map(|d| d.decode(&dto, &json));
    let idents = declared.iter().map(|d| d.ident);

    let expanded = quote! {
        const _: () = {
            #(#non_nullable)*
        };

        impl #dto::Dto for #name {
            const FIELDS: &'static [&'static str] = &[#(#keys),*];

            fn to_mapping(&self) -> #json::Map<::std::string::String, #json::Value> {
                let mut __map = #json::Map::new();
                #(#encode)*
                #dto::merge_additional(&mut __map, &self.#bag);
                __map
            }

            fn from_mapping(
                mut __data: #json::Map<::std::string::String, #json::Value>,
            ) -> ::core::result::Result<Self, #dto::DtoError> {
                #(#decode)*
                let #bag = #private::undeclared(__data);
                ::core::result::Result::Ok(Self {
                    #(#idents,)*
                    #bag,
                })
            }

            fn additional_properties(&self) -> &#dto::AdditionalProperties {
                &self.#bag
            }

            fn additional_properties_mut(&mut self) -> &mut #dto::AdditionalProperties {
                &mut self.#bag
            }
        }

        impl #dto::FieldValue for #name {
            fn to_value(&self) -> #json::Value {
                #dto::Dto::to_json(self)
            }

            fn from_value(value: #json::Value) -> ::core::result::Result<Self, #dto::DtoError> {
                <Self as #dto::Dto>::from_json(value)
            }
        }

        impl ::core::ops::Index<&str> for #name {
            type Output = #json::Value;

            fn index(&self, key: &str) -> &#json::Value {
                &self.#bag[key]
            }
        }

        impl #serde::Serialize for #name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: #serde::Serializer,
            {
                #serde::Serialize::serialize(&#dto::Dto::to_mapping(self), serializer)
            }
        }

        impl<'de> #serde::Deserialize<'de> for #name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: #serde::Deserializer<'de>,
            {
                let map = <#json::Map<::std::string::String, #json::Value> as #serde::Deserialize>::deserialize(deserializer)?;
                <Self as #dto::Dto>::from_mapping(map).map_err(<D::Error as #serde::de::Error>::custom)
            }
        }
    };

    expanded.into()
}
