use crate::util::{FieldOptions, where_clause_with_bounds};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashSet;
use syn::{Data, DeriveInput, Error, Fields, Ident, Type, ext::IdentExt};

///
/// QueryField
///

struct QueryField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    name: String,
}

// derive_entity
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let entity_name = ident.unraw().to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = query_fields(input)?;

    // generic entities: every field type must be queryable and the entity
    // needs a TypeId; concrete (possibly self-referential) entities need no bounds
    let bounds: Vec<TokenStream> = if input.generics.params.is_empty() {
        Vec::new()
    } else {
        fields
            .iter()
            .map(|field| {
                let ty = field.ty;
                quote!(#ty: ::filterql::traits::FieldValue)
            })
            .chain(std::iter::once(quote!(Self: 'static)))
            .collect()
    };
    let where_clause = where_clause_with_bounds(where_clause, &bounds);

    let get_field_arms = fields.iter().map(|field| {
        let field_ident = field.ident;
        let name = &field.name;

        quote! {
            #name => Some(::filterql::traits::FieldValue::to_field(&self.#field_ident)),
        }
    });

    let field_models = fields.iter().map(|field| {
        let ty = field.ty;
        let name = &field.name;

        quote! {
            ::filterql::model::FieldModel::new(
                #name,
                <#ty as ::filterql::traits::FieldValue>::kind(),
            )
        }
    });

    Ok(quote! {
        impl #impl_generics ::filterql::traits::FieldValues for #ident #ty_generics #where_clause {
            fn get_field(&self, field: &str) -> Option<::filterql::value::Field<'_>> {
                match field {
                    #(#get_field_arms)*
                    _ => None,
                }
            }
        }

        impl #impl_generics ::filterql::traits::EntityKind for #ident #ty_generics #where_clause {
            const ENTITY_NAME: &'static str = #entity_name;

            fn field_models() -> Vec<::filterql::model::FieldModel> {
                vec![#(#field_models),*]
            }
        }

        impl #impl_generics ::filterql::traits::FieldValue for #ident #ty_generics #where_clause {
            fn kind() -> ::filterql::model::FieldKind {
                ::filterql::model::FieldKind::Record(::filterql::model::EntityRef::of::<Self>())
            }

            fn to_field(&self) -> ::filterql::value::Field<'_> {
                ::filterql::value::Field::Record(self)
            }
        }
    })
}

fn query_fields(input: &DeriveInput) -> syn::Result<Vec<QueryField<'_>>> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(
            &input.ident,
            "Entity can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(Error::new_spanned(
            &data.fields,
            "Entity can only be derived for structs with named fields",
        ));
    };

    let mut seen = HashSet::new();
    let mut fields = Vec::new();

    for field in &named.named {
        let options = FieldOptions::from_attrs(&field.attrs)?;
        if options.skip {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let name = options.rename.unwrap_or_else(|| ident.unraw().to_string());

        // lookups are case-insensitive, so names must be too
        if !seen.insert(name.to_lowercase()) {
            return Err(Error::new_spanned(
                ident,
                format!("duplicate queryable property name '{name}'"),
            ));
        }

        fields.push(QueryField {
            ident,
            ty: &field.ty,
            name,
        });
    }

    Ok(fields)
}
