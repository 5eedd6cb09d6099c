#![forbid(unsafe_code)]

extern crate proc_macro;

mod derive_table;

mod attr {
    pub mod attr_util;
}

use proc_macro::TokenStream;

/// Implement `datescope::Table` for a struct.
///
/// ```ignore
/// #[derive(Table)]
/// #[table_name = "people"]
/// #[plural_name = "persons"]
/// pub struct Person;
/// ```
///
/// `#[plural_name]` is optional and defaults to the table name.
#[proc_macro_derive(Table, attributes(table_name, plural_name))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let table_struct = syn::parse_macro_input!(input as derive_table::TableStruct);

    TokenStream::from(derive_table::gen_table(table_struct))
}
