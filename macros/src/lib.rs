//! Procedural macros shared by the rgss crates.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, AttributeArgs, Ident, ItemFn, Lit, Meta, NestedMeta};

/// Levels accepted by `test_traced`.
const LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

/// Run a test function with a `tracing` subscriber that writes to the test harness.
///
/// The log level defaults to `DEBUG` and can be set with `level = "..."` (or a bare string).
/// The test crate must depend on `tracing` and `tracing-subscriber`.
///
/// # Example
///
/// ```ignore
/// use rgss_macros::test_traced;
///
/// #[test_traced(level = "WARN")]
/// fn test_decode() {
///     tracing::warn!("shown");
///     tracing::info!("hidden");
/// }
/// ```
#[proc_macro_attribute]
pub fn test_traced(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as AttributeArgs);
    let input = parse_macro_input!(item as ItemFn);

    // Parse the level
    let mut level = String::from("DEBUG");
    for arg in args {
        let lit = match arg {
            NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("level") => nv.lit,
            NestedMeta::Lit(lit) => lit,
            other => {
                return syn::Error::new_spanned(other, "expected `level = \"...\"`")
                    .to_compile_error()
                    .into();
            }
        };
        match lit {
            Lit::Str(s) => level = s.value().to_uppercase(),
            other => {
                return syn::Error::new_spanned(other, "level must be a string literal")
                    .to_compile_error()
                    .into();
            }
        }
    }
    if !LEVELS.contains(&level.as_str()) {
        return syn::Error::new(
            Span::call_site(),
            format!("unknown level `{level}`, expected one of {LEVELS:?}"),
        )
        .to_compile_error()
        .into();
    }
    let level = Ident::new(&level, Span::call_site());

    // Wrap the body
    let name = &input.sig.ident;
    let attrs = &input.attrs;
    let vis = &input.vis;
    let block = &input.block;
    let expanded = quote! {
        #[test]
        #(#attrs)*
        #vis fn #name() {
            let subscriber = ::tracing_subscriber::fmt()
                .with_test_writer()
                .with_max_level(::tracing::Level::#level)
                .with_line_number(true)
                .finish();
            let dispatcher = ::tracing::Dispatch::new(subscriber);
            ::tracing::dispatcher::with_default(&dispatcher, || #block);
        }
    };
    TokenStream::from(expanded)
}
