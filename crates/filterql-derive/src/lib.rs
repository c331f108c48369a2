use proc_macro::TokenStream;

mod entity;
mod enum_value;
mod util;

/// Queryable struct: field reads, declared field models, and nesting.
#[proc_macro_derive(Entity, attributes(filterql))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive_entity(input.into()).into()
}

/// Unit-only enum usable as a scalar leaf, matched by name or ordinal.
#[proc_macro_derive(EnumValue, attributes(filterql))]
pub fn derive_enum_value(input: TokenStream) -> TokenStream {
    enum_value::derive_enum_value(input.into()).into()
}
