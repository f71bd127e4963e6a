use proc_macro2::TokenStream as TokenStream2;
use syn::{Error as SynError, Result as SynResult};

pub fn parse_attributes(attr: TokenStream2) -> SynResult<()> {
    if attr.is_empty() {
        Ok(())
    } else {
        Err(SynError::new_spanned(attr, "`#[singleton]` takes no arguments"))
    }
}
