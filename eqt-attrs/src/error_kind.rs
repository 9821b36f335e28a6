use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    DeriveInput,
    Expr,
    Ident,
    Result,
    Token,
};

/// One `name = value` pair inside `#[error(...)]`.
struct Tag {
    name: Ident,
    value: Expr,
}

impl Parse for Tag {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse()?;
        input.parse::<Token![=]>()?;
        let value = input.parse()?;
        Ok(Self { name, value })
    }
}

/// The contents of the `error` attribute.
#[derive(Default)]
struct ReportTags {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
    note: Option<Expr>,
}

impl ReportTags {
    /// Collects the tags of every `error` attribute on the item. Unknown and repeated tags are
    /// errors, as is a missing `message`.
    fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut tags = Self::default();
        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("error")) {
            let parsed = attr.parse_args_with(Punctuated::<Tag, Token![,]>::parse_terminated)?;
            for Tag { name, value } in parsed {
                let slot = match name.to_string().as_str() {
                    "message" => &mut tags.message,
                    "labels" => &mut tags.labels,
                    "help" => &mut tags.help,
                    "note" => &mut tags.note,
                    other => {
                        return Err(syn::Error::new_spanned(&name, format!("unknown tag `{}`", other)));
                    },
                };
                if slot.replace(value).is_some() {
                    return Err(syn::Error::new_spanned(&name, format!("`{}` is given more than once", name)));
                }
            }
        }

        if tags.message.is_none() {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "missing `message` tag in `error` attribute",
            ));
        }
        Ok(tags)
    }
}

/// Generates the `ErrorKind` implementation for the given item.
pub fn expand(input: &DeriveInput) -> Result<TokenStream2> {
    if let syn::Data::Enum(_) | syn::Data::Union(_) = input.data {
        return Err(syn::Error::new_spanned(&input.ident, "`ErrorKind` can only be derived for structs"));
    }
    let ReportTags { message, labels, help, note } = ReportTags::from_input(input)?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let labels = labels.map_or_else(|| quote! { [""] }, |labels| quote! { #labels });
    let help = help.map(|help| quote! { builder.set_help(#help); });
    let note = note.map(|note| quote! { builder.set_note(#note); });

    Ok(quote! {
        impl #impl_generics ErrorKind for #name #ty_generics #where_clause {
            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                let offset = spans.first().map_or(0, |span| span.start);
                let labels = #labels
                    .into_iter()
                    .zip(spans)
                    .map(|(text, span)| {
                        let text = text.to_string();
                        let label = ariadne::Label::new((src_id, span.clone()))
                            .with_color(eqt_error::EXPR);
                        if text.is_empty() { label } else { label.with_message(text) }
                    })
                    .collect::<Vec<_>>();

                #[allow(unused_mut)]
                let mut builder = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                    .with_message(#message)
                    .with_labels(labels);
                #help
                #note
                builder.finish()
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    })
}
