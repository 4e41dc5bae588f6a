use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{parse_macro_input, DeriveInput, FnArg, ItemFn, PatType, ReturnType, Type};

mod element;
mod props;

/// What a component function parameter receives.
enum ParamKind {
    Hooks,
    Props { ty: Type, mutable: bool },
}

/// Check if a type names `Hooks`, with or without a path or lifetimes.
fn is_hooks_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Hooks"),
        _ => false,
    }
}

/// Check if the return type is a `Result`, in which case the body's error is
/// propagated out of the update.
fn returns_result(output: &ReturnType) -> bool {
    match output {
        ReturnType::Type(_, ty) => match &**ty {
            Type::Path(type_path) => type_path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "Result"),
            _ => false,
        },
        ReturnType::Default => false,
    }
}

fn classify(arg: &FnArg) -> syn::Result<ParamKind> {
    let FnArg::Typed(PatType { ty, .. }) = arg else {
        return Err(syn::Error::new_spanned(
            arg,
            "component functions cannot take `self`",
        ));
    };
    if is_hooks_type(ty) {
        return Ok(ParamKind::Hooks);
    }
    if let Type::Reference(reference) = &**ty {
        return Ok(ParamKind::Props {
            ty: (*reference.elem).clone(),
            mutable: reference.mutability.is_some(),
        });
    }
    Err(syn::Error::new_spanned(
        ty,
        "component parameters must be `Hooks` or a reference to the props type",
    ))
}

fn expand(func: ItemFn) -> syn::Result<TokenStream2> {
    if !func.sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &func.sig.generics,
            "component functions cannot be generic",
        ));
    }
    if func.sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            func.sig.asyncness,
            "component functions cannot be async; use `use_future` for background work",
        ));
    }

    let mut props_ty: Option<Type> = None;
    let mut call_args = Vec::new();
    for arg in &func.sig.inputs {
        match classify(arg)? {
            ParamKind::Hooks => call_args.push(quote! { _hooks }),
            ParamKind::Props { ty, mutable } => {
                if props_ty.is_some() {
                    return Err(syn::Error::new_spanned(
                        arg,
                        "a component takes at most one props parameter",
                    ));
                }
                props_ty = Some(ty);
                if mutable {
                    call_args.push(quote! { _props });
                } else {
                    call_args.push(quote! { &*_props });
                }
            }
        }
    }

    let props_ty = props_ty.unwrap_or_else(|| syn::parse_quote! { ::hookterm_core::NoProps });
    let name = &func.sig.ident;
    let vis = &func.vis;
    let attrs = &func.attrs;
    let sig_inputs = &func.sig.inputs;
    let sig_output = &func.sig.output;
    let block = &func.block;

    let element = if returns_result(&func.sig.output) {
        quote! { Self::implementation(#(#call_args),*)? }
    } else {
        quote! { Self::implementation(#(#call_args),*) }
    };

    Ok(quote! {
        #(#attrs)*
        #[allow(non_camel_case_types)]
        #vis struct #name;

        impl #name {
            #[allow(non_snake_case)]
            fn implementation(#sig_inputs) #sig_output #block
        }

        impl ::hookterm_core::Component for #name {
            type Props = #props_ty;

            fn new(_props: &Self::Props) -> Self {
                Self
            }

            fn update(
                &mut self,
                _props: &mut Self::Props,
                _hooks: ::hookterm_core::Hooks<'_, '_>,
                updater: &mut ::hookterm_core::ComponentUpdater<'_, '_>,
            ) -> ::hookterm_core::Result<()> {
                updater.set_transparent_layout(true);
                let mut element: ::hookterm_core::AnyElement = ::core::convert::Into::into(#element);
                updater.update_children([&mut element], None)
            }

            fn calc_children_areas(
                &self,
                children: &::hookterm_core::Components,
                _layout_style: &::hookterm_core::LayoutStyle,
                area: ::hookterm_core::ratatui::layout::Rect,
            ) -> ::std::vec::Vec<::hookterm_core::ratatui::layout::Rect> {
                ::std::vec![area; children.len()]
            }
        }
    })
}

/// Turns a function into a [`Component`](../hookterm_core/trait.Component.html).
///
/// The function may take a `Hooks` handle and a reference to its props type,
/// in either order, and returns anything convertible into an `AnyElement`,
/// optionally wrapped in a `Result`. The returned element becomes the
/// component's only child and receives the component's full area.
///
/// ```ignore
/// #[component]
/// fn Greeting(props: &GreetingProps) -> Element<Adapter> {
///     Element::new(AdapterProps::widget(Line::from(format!("hello {}", props.name))))
/// }
/// ```
#[proc_macro_attribute]
pub fn component(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr_tokens = TokenStream2::from(attr);
    if !attr_tokens.is_empty() {
        return syn::Error::new_spanned(attr_tokens, "component takes no arguments")
            .to_compile_error()
            .into();
    }

    let func = parse_macro_input!(item as ItemFn);
    match expand(func) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Declares an element tree.
///
/// Each node is a component type, optionally followed by its props in
/// parentheses and its children in braces. Props not named fall back to
/// `Default`, unless a trailing `..rest` supplies them. `key: value` sets the
/// element key. A child written `#(expr)` may be an element, an `Option`, or
/// any iterable of elements. A child written `$widget` paints a ratatui
/// widget through an `Adapter`.
///
/// ```ignore
/// element!(View(layout: LayoutStyle::default().with_gap(1)) {
///     $Line::from("title"),
///     #(show_footer.then(|| element!(Footer))),
///     #(rows.iter().map(|row| element!(Row(key: row.id, label: row.label.clone())))),
/// })
/// ```
#[proc_macro]
pub fn element(input: TokenStream) -> TokenStream {
    let element = parse_macro_input!(input as element::ElementOrWidget);
    element.to_token_stream().into()
}

/// Checks that a struct can be used as component props and does not use the
/// reserved `key` field name.
#[proc_macro_derive(Props)]
pub fn derive_props(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match props::expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
