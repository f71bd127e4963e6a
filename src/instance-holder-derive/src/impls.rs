use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{
    Error as SynError, Generics, Ident, Item, ItemTrait, Result as SynResult, TraitItem,
    Type, TypeParamBound, WherePredicate,
};

#[derive(Debug)]
enum SingletonTarget {
    TraitObject(Ident),
    Type(Ident),
}

pub fn expand_implementation(item: TokenStream2) -> SynResult<TokenStream2> {
    let item = match syn::parse2::<Item>(item) {
        Ok(item) => item,
        Err(err) => {
            return Err(SynError::new(
                err.span(),
                "`#[singleton]` should be annotated on a trait, struct or enum",
            ))
        }
    };

    let target = get_target(&item)?;
    let expanded = expand_singleton_implementation(&target);

    Ok(quote! {
        #item
        #expanded
    })
}

fn get_target(item: &Item) -> SynResult<SingletonTarget> {
    match item {
        Item::Trait(item) => {
            check_generics(&item.generics)?;
            check_trait_object(item)?;
            Ok(SingletonTarget::TraitObject(item.ident.clone()))
        }
        Item::Struct(item) => {
            check_generics(&item.generics)?;
            Ok(SingletonTarget::Type(item.ident.clone()))
        }
        Item::Enum(item) => {
            check_generics(&item.generics)?;
            Ok(SingletonTarget::Type(item.ident.clone()))
        }
        item => Err(SynError::new(
            item.span(),
            "`#[singleton]` should be annotated on a trait, struct or enum",
        )),
    }
}

fn check_generics(generics: &Generics) -> SynResult<()> {
    if generics.params.is_empty() {
        Ok(())
    } else {
        Err(SynError::new(
            generics.params.span(),
            "generic items can't be singletons because their holder is a `static`",
        ))
    }
}

fn check_trait_object(item: &ItemTrait) -> SynResult<()> {
    let associated_type = item.items.iter().find_map(|item| match item {
        TraitItem::Type(ty) => Some(ty),
        _ => None,
    });
    if let Some(ty) = associated_type {
        return Err(SynError::new(
            ty.ident.span(),
            "traits with associated types can't be singletons because `dyn Trait` must name them",
        ));
    }

    let self_bounds = item
        .generics
        .where_clause
        .iter()
        .flat_map(|clause| clause.predicates.iter())
        .filter_map(|predicate| match predicate {
            WherePredicate::Type(predicate) if is_self_type(&predicate.bounded_ty) => {
                Some(predicate.bounds.iter())
            }
            _ => None,
        })
        .flatten();
    let bounds: Vec<_> = item.supertraits.iter().chain(self_bounds).collect();

    if has_trait_bound(&bounds, "Send") && has_trait_bound(&bounds, "Sync") {
        Ok(())
    } else {
        Err(SynError::new(
            item.ident.span(),
            "`#[singleton]` traits need `Send + Sync` bounds because their holder is shared by all threads",
        ))
    }
}

fn is_self_type(ty: &Type) -> bool {
    matches!(ty, Type::Path(ty) if ty.qself.is_none() && ty.path.is_ident("Self"))
}

fn has_trait_bound(bounds: &[&TypeParamBound], name: &str) -> bool {
    bounds.iter().any(|bound| match bound {
        TypeParamBound::Trait(bound) => bound
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == name),
        _ => false,
    })
}

fn expand_singleton_implementation(target: &SingletonTarget) -> TokenStream2 {
    let self_type = match target {
        SingletonTarget::TraitObject(ident) => quote! { dyn #ident },
        SingletonTarget::Type(ident) => quote! { #ident },
    };

    quote! {
        const _: () = {
            static HOLDER: instance_holder::InstanceHolder<#self_type> =
                instance_holder::InstanceHolder::new();

            impl instance_holder::Singleton for #self_type {
                fn holder() -> &'static instance_holder::InstanceHolder<Self> {
                    &HOLDER
                }
            }
        };
    }
}
