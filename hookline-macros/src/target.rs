//! The `#[target]` attribute.

use proc_macro::TokenStream;
use quote::quote;
use syn::{FnArg, ImplItem, ItemImpl, Visibility, parse_macro_input};

/// Implementation of the `#[target]` macro.
pub fn target_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[target] takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let input = parse_macro_input!(item as ItemImpl);

    if let Some((_, path, _)) = &input.trait_ {
        return syn::Error::new_spanned(path, "#[target] goes on an inherent impl block")
            .to_compile_error()
            .into();
    }

    let mut names = Vec::new();
    let mut arms = Vec::new();

    for item in &input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        if !matches!(method.vis, Visibility::Public(_)) {
            continue;
        }

        // Only `&self` methods are exposed.
        let Some(FnArg::Receiver(receiver)) = method.sig.inputs.first() else {
            continue;
        };
        if receiver.reference.is_none() || receiver.mutability.is_some() {
            continue;
        }

        let ident = &method.sig.ident;
        let call_args = match method.sig.inputs.len() {
            1 => quote! {},
            2 => quote! { call },
            _ => {
                return syn::Error::new_spanned(
                    &method.sig.inputs,
                    "Target methods take `&self` and at most a `&mut Call<'_>`",
                )
                .to_compile_error()
                .into();
            }
        };

        let name = ident.to_string();
        arms.push(quote! {
            #name => ::core::option::Option::Some(
                ::hookline::IntoOutput::into_output(self.#ident(#call_args))
            ),
        });
        names.push(name);
    }

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #input

        impl #impl_generics ::hookline::Target for #self_ty #where_clause {
            fn methods() -> &'static [&'static str] {
                &[#(#names),*]
            }

            #[allow(unused_variables)]
            fn invoke(
                &self,
                method: &str,
                call: &mut ::hookline::Call<'_>,
            ) -> ::core::option::Option<::hookline::CallbackResult> {
                match method {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };

    TokenStream::from(expanded)
}
