use quote::quote;
use syn::parse::ParseStream;
use syn::spanned::Spanned;

use crate::attr::attr_util;

pub struct TableStruct {
    pub item: syn::ItemStruct,
    pub name: Name,
    pub plural: Option<Name>,
}

/// The value of a `#[key = "value"]` attribute.
pub struct Name(pub syn::LitStr);

impl syn::parse::Parse for TableStruct {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let item: syn::ItemStruct = input.parse()?;

        let attr = attr_util::find_attr(&item.attrs, "table_name")
            .ok_or_else(|| syn::Error::new(item.span(), "#[table_name = \"?\"] not found"))?;
        let name: Name = syn::parse2(attr.tokens.clone())?;

        let plural = match attr_util::find_attr(&item.attrs, "plural_name") {
            Some(attr) => Some(syn::parse2(attr.tokens.clone())?),
            None => None,
        };

        Ok(Self { item, name, plural })
    }
}

impl syn::parse::Parse for Name {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let _: syn::token::Eq = input.parse()?;
        let lit: syn::LitStr = input.parse()?;

        if lit.value().is_empty() {
            return Err(syn::Error::new(lit.span(), "Expected a non-empty name"));
        }

        Ok(Self(lit))
    }
}

pub fn gen_table(table: TableStruct) -> proc_macro2::TokenStream {
    let ident = &table.item.ident;
    let (impl_generics, ty_generics, where_clause) = table.item.generics.split_for_impl();
    let name = &table.name.0;

    let plural = table.plural.as_ref().map(|plural| {
        let plural = &plural.0;
        quote! {
            const PLURAL: &'static str = #plural;
        }
    });

    quote! {
        impl #impl_generics ::datescope::Table for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;

            #plural
        }
    }
}
