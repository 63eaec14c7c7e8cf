//! Procedural macros for wx-dispatch

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Category applied to variants without their own
    #[darling(default)]
    category: Option<String>,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Override the reported name
    #[darling(default)]
    rename: Option<String>,

    /// Explicit category
    #[darling(default)]
    category: Option<String>,

    /// Report no category even if the enum sets a default
    #[darling(default)]
    skip_category: bool,
}

impl ActionVariant {
    fn pattern(&self, enum_name: &syn::Ident) -> proc_macro2::TokenStream {
        let variant = &self.ident;
        match self.fields.style {
            darling::ast::Style::Unit => quote! { #enum_name::#variant },
            darling::ast::Style::Tuple => quote! { #enum_name::#variant(..) },
            darling::ast::Style::Struct => quote! { #enum_name::#variant { .. } },
        }
    }
}

/// Derive macro for the Action trait
///
/// Generates `name()` returning the variant name (or `#[action(rename = "...")]`)
/// and `category()` from `#[action(category = "...")]` on the variant, falling
/// back to a category set on the enum itself.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(category = "ui")]
/// enum MyAction {
///     ToggleTheme,
///     #[action(category = "favorites", rename = "addToFav")]
///     AddToFav { id: u64 },
///     #[action(skip_category)]
///     Unknown,
/// }
///
/// assert_eq!(MyAction::ToggleTheme.category(), Some("ui"));
/// assert_eq!(MyAction::AddToFav { id: 1 }.name(), "addToFav");
/// assert_eq!(MyAction::Unknown.category(), None);
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let name_arms = variants.iter().map(|v| {
        let pattern = v.pattern(name);
        let reported = v.rename.clone().unwrap_or_else(|| v.ident.to_string());
        quote! { #pattern => #reported }
    });

    let category_arms = variants.iter().map(|v| {
        let pattern = v.pattern(name);
        let category = if v.skip_category {
            None
        } else {
            v.category.as_ref().or(opts.category.as_ref())
        };
        match category {
            Some(c) => quote! { #pattern => ::core::option::Option::Some(#c) },
            None => quote! { #pattern => ::core::option::Option::None },
        }
    });

    let expanded = quote! {
        impl #impl_generics wx_dispatch::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }

            fn category(&self) -> ::core::option::Option<&'static str> {
                match self {
                    #(#category_arms),*
                }
            }
        }
    };

    expanded.into()
}
