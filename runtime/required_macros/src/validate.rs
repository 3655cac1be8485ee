//! A derive macro for implementing the `Validate` trait on structs with named fields.
use darling::{
    FromDeriveInput, FromField,
    util::{Flag, Ignored},
};
use proc_macro::TokenStream;
use quote::{quote, quote_spanned};
use syn::{
    DeriveInput, Ident, Meta, Token, Type, ext::IdentExt, parse_macro_input, parse_quote,
    punctuated::Punctuated, spanned::Spanned,
};

#[derive(FromDeriveInput)]
#[darling(attributes(required), supports(struct_named))]
struct ValidateInput {
    ident: Ident,
    generics: syn::Generics,
    data: darling::ast::Data<Ignored, ValidateField>,
    /// The type name used in error messages.
    rename: Option<String>,
    /// The path to the runtime crate.
    #[darling(rename = "crate")]
    krate: Option<syn::Path>,
}

#[derive(FromField)]
#[darling(attributes(required), forward_attrs(serde))]
struct ValidateField {
    ident: Option<Ident>,
    ty: Type,
    attrs: Vec<syn::Attribute>,
    flatten: Flag,
    skip: Flag,
}

// How a field is reported to the walker.
enum FieldKind {
    // `#[serde(flatten)]` or `#[required(flatten)]`.
    Embedded,
    // Spelled `Required<..>`, must implement `RequiredField`.
    Marker,
    // Anything else. Probed for `RequiredField` at compile time.
    Probed,
}

impl ValidateField {
    fn kind(&self) -> FieldKind {
        if self.flatten.is_present() || has_serde_flatten(&self.attrs) {
            FieldKind::Embedded
        } else if is_marker(&self.ty) {
            FieldKind::Marker
        } else {
            FieldKind::Probed
        }
    }
}

pub(super) fn derive_validate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match _derive_validate(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.write_errors().into(),
    }
}

fn _derive_validate(input: DeriveInput) -> Result<proc_macro2::TokenStream, darling::Error> {
    reject_unsupported_shapes(&input)?;
    let input = ValidateInput::from_derive_input(&input)?;
    let struct_ident = &input.ident;
    let Some(fields) = input.data.take_struct() else {
        // Unreachable: other shapes were rejected above.
        return Err(darling::Error::unsupported_shape("enum").with_span(struct_ident));
    };
    let krate = input
        .krate
        .clone()
        .unwrap_or_else(|| parse_quote!(::required));
    let type_name = input
        .rename
        .clone()
        .unwrap_or_else(|| struct_ident.unraw().to_string());

    let mut generics = input.generics.clone();
    let is_generic = !generics.params.is_empty();
    let mut visits = Vec::with_capacity(fields.len());
    for field in fields.iter() {
        if field.skip.is_present() {
            continue;
        }
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let name = field_ident.unraw().to_string();
        let ty = &field.ty;
        let ty_span = ty.span();
        let visit = match field.kind() {
            FieldKind::Embedded => {
                if is_generic {
                    generics
                        .make_where_clause()
                        .predicates
                        .push(parse_quote!(#ty: #krate::Validate));
                }
                quote_spanned! { ty_span =>
                    walker.embedded(#name, &self.#field_ident);
                }
            }
            FieldKind::Marker => {
                if is_generic {
                    generics
                        .make_where_clause()
                        .predicates
                        .push(parse_quote!(#ty: #krate::RequiredField));
                }
                quote_spanned! { ty_span =>
                    walker.field(
                        #name,
                        ::core::option::Option::Some(&self.#field_ident as &dyn #krate::RequiredField),
                    );
                }
            }
            FieldKind::Probed => {
                quote_spanned! { ty_span =>
                    walker.field(
                        #name,
                        (&#krate::__private::Probe(&self.#field_ident)).required_field(),
                    );
                }
            }
        };
        visits.push(visit);
    }

    // Generic types can't be looked up by `TypeId` without knowing their parameters.
    let registration = (!is_generic).then(|| {
        quote! {
            #krate::__private::inventory::submit! {
                #krate::__private::Registration::of::<#struct_ident>()
            }
        }
    });

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Validate for #struct_ident #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn walk_fields<'__required>(&'__required self, walker: &mut #krate::FieldWalker<'__required>) {
                #[allow(unused_imports)]
                use #krate::__private::{PlainProbe as _, RequiredProbe as _};
                #(#visits)*
            }
        }

        #registration
    })
}

/// Only structs with named fields have fields that serde can populate by key.
fn reject_unsupported_shapes(input: &DeriveInput) -> Result<(), darling::Error> {
    let kind = match &input.data {
        syn::Data::Struct(data) => match data.fields {
            syn::Fields::Named(_) => return Ok(()),
            syn::Fields::Unnamed(_) => "tuple structs",
            syn::Fields::Unit => "unit structs",
        },
        syn::Data::Enum(_) => "enums",
        syn::Data::Union(_) => "unions",
    };
    Err(darling::Error::custom(format!(
        "`#[derive(Validate)]` doesn't support {kind}. Use a struct with named fields instead."
    ))
    .with_span(&input.ident))
}

/// Returns `true` if the field type is spelled `Required<..>`, with or without a path prefix.
fn is_marker(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    path.qself.is_none()
        && path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Required")
}

/// Returns `true` if one of the forwarded `#[serde(..)]` attributes contains `flatten`.
fn has_serde_flatten(attrs: &[syn::Attribute]) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("serde"))
        .any(|attr| {
            // Malformed `serde` attributes are reported by serde's own derive.
            attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
                .is_ok_and(|metas| metas.iter().any(|meta| meta.path().is_ident("flatten")))
        })
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{has_serde_flatten, is_marker, reject_unsupported_shapes};

    #[test]
    fn markers_are_recognised_by_their_last_segment() {
        assert!(is_marker(&parse_quote!(Required<String>)));
        assert!(is_marker(&parse_quote!(required::Required<u8>)));
        assert!(!is_marker(&parse_quote!(Option<Required<u8>>)));
        assert!(!is_marker(&parse_quote!(<T as Trait>::Required)));
        assert!(!is_marker(&parse_quote!(&'static str)));
    }

    #[test]
    fn flatten_is_found_among_other_serde_options() {
        let attrs: Vec<syn::Attribute> = vec![
            parse_quote!(#[serde(rename = "x")]),
            parse_quote!(#[serde(default, flatten)]),
        ];
        assert!(has_serde_flatten(&attrs));

        let attrs: Vec<syn::Attribute> = vec![parse_quote!(#[serde(rename = "flatten")])];
        assert!(!has_serde_flatten(&attrs));
    }

    #[test]
    fn only_structs_with_named_fields_are_supported() {
        assert!(reject_unsupported_shapes(&parse_quote!(struct Person { name: String })).is_ok());

        let err = reject_unsupported_shapes(&parse_quote!(struct Point(u8, u8);)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`#[derive(Validate)]` doesn't support tuple structs. Use a struct with named fields instead."
        );
        let err = reject_unsupported_shapes(&parse_quote!(struct Marker;)).unwrap_err();
        assert!(err.to_string().contains("unit structs"));
        let err = reject_unsupported_shapes(&parse_quote!(enum Shape { Circle })).unwrap_err();
        assert!(err.to_string().contains("enums"));
        let err =
            reject_unsupported_shapes(&parse_quote!(union Bits { a: u32, b: f32 })).unwrap_err();
        assert!(err.to_string().contains("unions"));
    }
}
