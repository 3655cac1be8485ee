use proc_macro::TokenStream;

mod validate;

#[proc_macro_derive(Validate, attributes(required))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    validate::derive_validate(input)
}
