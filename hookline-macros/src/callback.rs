//! The `#[callback]` attribute.

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Ident, ItemFn, LitStr, Token, parse::Parse, parse_macro_input};

/// Arguments for the `#[callback]` macro.
pub(crate) struct CallbackArgs {
    pub name: Option<String>,
}

impl Parse for CallbackArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut name = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: LitStr = input.parse()?;
                    name = Some(lit.value());
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(CallbackArgs { name })
    }
}

/// Implementation of the `#[callback]` macro.
pub fn callback_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as CallbackArgs);
    let input = parse_macro_input!(item as ItemFn);

    let fn_name = &input.sig.ident;

    if input.sig.asyncness.is_some() {
        return syn::Error::new_spanned(&input.sig.fn_token, "Callback function must not be async")
            .to_compile_error()
            .into();
    }

    let call_args = match input.sig.inputs.len() {
        0 => quote! {},
        1 => quote! { call },
        _ => {
            return syn::Error::new_spanned(
                &input.sig.inputs,
                "Callback function takes at most one argument: fn(call: &mut Call<'_>)",
            )
            .to_compile_error()
            .into();
        }
    };

    let lookup_name = args.name.unwrap_or_else(|| fn_name.to_string());
    let wrapper = format_ident!("__hookline_callback_{}", fn_name);

    let expanded = quote! {
        #input

        #[allow(non_snake_case, unused_variables)]
        #[doc(hidden)]
        fn #wrapper(call: &mut ::hookline::Call<'_>) -> ::hookline::CallbackResult {
            ::hookline::IntoOutput::into_output(#fn_name(#call_args))
        }

        ::hookline::inventory::submit! {
            ::hookline::NamedFunction::new(#lookup_name, #wrapper)
        }
    };

    TokenStream::from(expanded)
}
