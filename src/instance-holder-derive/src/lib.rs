mod attrs;
mod impls;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::Result as SynResult;

/// Gives a trait object type, a struct or an enum its own process-wide
/// `InstanceHolder` and implements `Singleton` for it.
///
/// On a trait `Trait` the holder stores a `dyn Trait`, so the trait needs
/// `Send + Sync` among its supertraits. Generic items are rejected.
#[proc_macro_attribute]
pub fn singleton(attr: TokenStream, item: TokenStream) -> TokenStream {
    match singleton_impl(attr.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn singleton_impl(attr: TokenStream2, item: TokenStream2) -> SynResult<TokenStream2> {
    attrs::parse_attributes(attr)?;
    let expanded = impls::expand_implementation(item)?;
    Ok(expanded)
}
