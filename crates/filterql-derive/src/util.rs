use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, LitStr, WhereClause};

pub fn where_clause_with_bounds(
    where_clause: Option<&WhereClause>,
    bounds: &[TokenStream],
) -> TokenStream {
    if bounds.is_empty() {
        return where_clause
            .as_ref()
            .map_or_else(|| quote!(), |wc| quote!(#wc));
    }

    if let Some(wc) = where_clause {
        let preds = &wc.predicates;
        quote!(where #preds, #(#bounds),*)
    } else {
        quote!(where #(#bounds),*)
    }
}

///
/// FieldOptions
///
/// Parsed `#[filterql(...)]` options on a field or variant.
///

#[derive(Default)]
pub struct FieldOptions {
    pub skip: bool,
    pub rename: Option<String>,
}

impl FieldOptions {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut options = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("filterql")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    options.skip = true;
                    return Ok(());
                }

                if meta.path.is_ident("rename") {
                    let name: LitStr = meta.value()?.parse()?;
                    if name.value().is_empty() {
                        return Err(meta.error("rename must not be empty"));
                    }
                    options.rename = Some(name.value());
                    return Ok(());
                }

                Err(meta.error("unsupported filterql option, expected `skip` or `rename`"))
            })?;
        }

        Ok(options)
    }
}
