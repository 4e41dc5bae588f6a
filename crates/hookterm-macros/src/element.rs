use std::sync::atomic::{AtomicU64, Ordering};

use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{quote, ToTokens};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::token::{Brace, Comma, Paren};
use syn::{braced, parenthesized, Expr, FieldValue, Lit, Member, Token, TypePath};

/// Source of the per-site part of generated keys. Every element written in
/// an `element!` invocation gets its own id, so siblings of the same type
/// declared at different places never share a key.
static NEXT_SITE: AtomicU64 = AtomicU64::new(1);

fn next_site() -> u64 {
    NEXT_SITE.fetch_add(1, Ordering::Relaxed)
}

enum PropsItem {
    Field(FieldValue),
    Rest(Expr),
}

impl PropsItem {
    fn span(&self) -> Span {
        match self {
            PropsItem::Field(field) => field.span(),
            PropsItem::Rest(expr) => expr.span(),
        }
    }

    fn is_key(&self) -> bool {
        matches!(
            self,
            PropsItem::Field(FieldValue { member: Member::Named(ident), .. }) if ident == "key"
        )
    }
}

impl Parse for PropsItem {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Token![..]) {
            input.parse::<Token![..]>()?;
            Ok(PropsItem::Rest(input.parse()?))
        } else {
            Ok(PropsItem::Field(input.parse()?))
        }
    }
}

impl ToTokens for PropsItem {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        match self {
            PropsItem::Field(field) => {
                let member = &field.member;
                let expr = &field.expr;
                // Numeric literals keep their own type; going through `Into`
                // would leave the literal's type ambiguous.
                if matches!(expr, Expr::Lit(lit) if matches!(lit.lit, Lit::Int(_) | Lit::Float(_)))
                {
                    tokens.extend(quote! { #member: #expr });
                } else {
                    tokens.extend(quote! { #member: ::core::convert::Into::into(#expr) });
                }
            }
            PropsItem::Rest(expr) => tokens.extend(quote! { ..#expr }),
        }
    }
}

enum Child {
    Element(ElementOrWidget),
    Expr(Expr),
}

impl Parse for Child {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Token![#]) {
            input.parse::<Token![#]>()?;
            let content;
            parenthesized!(content in input);
            Ok(Child::Expr(content.parse()?))
        } else {
            Ok(Child::Element(input.parse()?))
        }
    }
}

/// `Type(field: value, key: k, ..rest) { children }`
struct ParsedElement {
    ty: TypePath,
    props: Punctuated<PropsItem, Comma>,
    children: Vec<Child>,
    site: u64,
}

impl Parse for ParsedElement {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let ty: TypePath = input.parse()?;

        let props = if input.peek(Paren) {
            let content;
            parenthesized!(content in input);
            Punctuated::parse_terminated(&content)?
        } else {
            Punctuated::new()
        };
        if let Some(position) = props
            .iter()
            .position(|item| matches!(item, PropsItem::Rest(_)))
        {
            if position != props.len() - 1 {
                return Err(syn::Error::new(
                    props[position].span(),
                    "`..rest` must be the last property",
                ));
            }
        }

        let mut children = Vec::new();
        if input.peek(Brace) {
            let content;
            braced!(content in input);
            while !content.is_empty() {
                children.push(content.parse()?);
                if !content.is_empty() {
                    content.parse::<Token![,]>()?;
                }
            }
        }

        Ok(Self {
            ty,
            props,
            children,
            site: next_site(),
        })
    }
}

impl ToTokens for ParsedElement {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let ty = &self.ty;
        let site = self.site;

        let key = self
            .props
            .iter()
            .find_map(|item| match item {
                PropsItem::Field(field) if item.is_key() => {
                    let expr = &field.expr;
                    Some(quote! { ::hookterm_core::ElementKey::new((#site, #expr)) })
                }
                _ => None,
            })
            .unwrap_or_else(|| quote! { ::hookterm_core::ElementKey::new(#site) });

        let assignments: Vec<_> = self.props.iter().filter(|item| !item.is_key()).collect();
        let has_rest = assignments
            .iter()
            .any(|item| matches!(item, PropsItem::Rest(_)));
        let props = if assignments.is_empty() {
            quote! { ::core::default::Default::default() }
        } else if has_rest {
            quote! { Props { #(#assignments),* } }
        } else {
            quote! { Props { #(#assignments,)* ..::core::default::Default::default() } }
        };

        let children = self.children.iter().map(|child| {
            let child = match child {
                Child::Element(element) => element.to_token_stream(),
                Child::Expr(expr) => expr.to_token_stream(),
            };
            quote! {
                ::hookterm_core::extend_with_elements::<_, _, ::hookterm_core::AnyElement>(
                    &mut _props.children,
                    #child,
                );
            }
        });

        tokens.extend(quote! {
            {
                type Props = <#ty as ::hookterm_core::Component>::Props;
                #[allow(unused_mut)]
                let mut _props: Props = #props;
                #(#children)*
                ::hookterm_core::Element::<#ty>::keyed(#key, _props)
            }
        });
    }
}

/// `$widget_expr`: any ratatui widget, wrapped in an `Adapter`.
struct ParsedWidget {
    widget: Expr,
    site: u64,
}

impl ToTokens for ParsedWidget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let widget = &self.widget;
        let site = self.site;
        tokens.extend(quote! {
            ::hookterm_core::Element::<::hookterm_core::components::Adapter>::keyed(
                ::hookterm_core::ElementKey::new(#site),
                ::hookterm_core::components::AdapterProps::widget(#widget),
            )
        });
    }
}

pub(crate) enum ElementOrWidget {
    Element(ParsedElement),
    Widget(ParsedWidget),
}

impl Parse for ElementOrWidget {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Token![$]) {
            input.parse::<Token![$]>()?;
            Ok(ElementOrWidget::Widget(ParsedWidget {
                widget: input.parse()?,
                site: next_site(),
            }))
        } else {
            Ok(ElementOrWidget::Element(input.parse()?))
        }
    }
}

impl ToTokens for ElementOrWidget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        match self {
            ElementOrWidget::Element(element) => element.to_tokens(tokens),
            ElementOrWidget::Widget(widget) => widget.to_tokens(tokens),
        }
    }
}
