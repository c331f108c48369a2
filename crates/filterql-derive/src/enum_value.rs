use crate::util::FieldOptions;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Expr, ExprLit, ExprUnary, Fields, Lit, UnOp, ext::IdentExt};

// derive_enum_value
pub fn derive_enum_value(input: TokenStream) -> TokenStream {
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
    let enum_name = ident.unraw().to_string();

    let Data::Enum(data) = &input.data else {
        return Err(Error::new_spanned(
            ident,
            "EnumValue can only be derived for unit-only enums",
        ));
    };
    if data.variants.is_empty() {
        return Err(Error::new_spanned(
            ident,
            "EnumValue requires at least one variant",
        ));
    }
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "EnumValue cannot be derived for generic enums",
        ));
    }

    let mut next_ordinal: i64 = 0;
    let mut model_variants = Vec::new();
    let mut match_arms = Vec::new();

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new_spanned(
                variant,
                "EnumValue variants cannot carry data",
            ));
        }

        let ordinal = match &variant.discriminant {
            Some((_, expr)) => discriminant(expr)?,
            None => next_ordinal,
        };
        next_ordinal = ordinal.wrapping_add(1);

        let options = FieldOptions::from_attrs(&variant.attrs)?;
        let name = options
            .rename
            .unwrap_or_else(|| variant.ident.unraw().to_string());
        let variant_ident = &variant.ident;

        model_variants.push(quote! {
            ::filterql::model::EnumVariant { name: #name, ordinal: #ordinal }
        });
        match_arms.push(quote! {
            Self::#variant_ident => (#ordinal, #name),
        });
    }

    Ok(quote! {
        impl ::filterql::traits::FieldValue for #ident {
            fn kind() -> ::filterql::model::FieldKind {
                static MODEL: ::filterql::model::EnumModel = ::filterql::model::EnumModel {
                    name: #enum_name,
                    variants: &[#(#model_variants),*],
                };

                ::filterql::model::FieldKind::Scalar(::filterql::model::ScalarType::Enum(&MODEL))
            }

            fn to_field(&self) -> ::filterql::value::Field<'_> {
                let (ordinal, name): (i64, &'static str) = match self {
                    #(#match_arms)*
                };

                ::filterql::value::Field::Value(::filterql::value::Value::Enum(
                    ::filterql::value::ValueEnum::new(ordinal, name),
                ))
            }
        }
    })
}

// integer literal, optionally negated
fn discriminant(expr: &Expr) -> syn::Result<i64> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => int.base10_parse::<i64>(),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => discriminant(expr).map(|value| -value),
        _ => Err(Error::new_spanned(
            expr,
            "EnumValue discriminants must be integer literals",
        )),
    }
}
