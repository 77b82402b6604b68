use proc_macro::TokenStream;

mod callback;
mod target;

/// Make a free function available to `CallbackDescriptor::named`.
///
/// The function takes either nothing or a `&mut Call<'_>` and returns any
/// `IntoOutput`. It is submitted process-wide through `inventory`, under its
/// own name or the one given with `name = "..."`.
///
/// ```rust,ignore
/// #[hookline::callback]
/// fn simple_function_name(call: &mut Call<'_>) -> &'static str {
///     "SimpleFunction"
/// }
///
/// hooks.register("Callback", CallbackDescriptor::named("simple_function_name"), 2);
/// ```
#[proc_macro_attribute]
pub fn callback(attr: TokenStream, item: TokenStream) -> TokenStream {
    callback::callback_impl(attr, item)
}

/// Implement `Target` for a type from an inherent `impl` block.
///
/// Every `pub fn` taking `&self` and optionally a `&mut Call<'_>` becomes a
/// method reachable by name.
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct FooBar;
///
/// #[hookline::target]
/// impl FooBar {
///     pub fn object_based(&self, _call: &mut Call<'_>) -> &'static str {
///         "ObjectMethod"
///     }
/// }
///
/// hooks.register("Callback", CallbackDescriptor::unbound::<FooBar>("object_based"), 4);
/// ```
#[proc_macro_attribute]
pub fn target(attr: TokenStream, item: TokenStream) -> TokenStream {
    target::target_impl(attr, item)
}
