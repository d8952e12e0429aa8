//! Merging parameters from the call site, the error and the context
//!
//! Precedence is positional: explicit call-site parameters come first, then
//! the classified error's own parameters, then the context's, then the
//! synthetic `err_type` field. Deduplication keeps the first occurrence of
//! each key, so an explicit parameter overrides an error or context parameter
//! with the same key.

use crate::{chain, find_in_chain, Ctx, Error, Field, KvParam};
use std::collections::HashSet;
use std::error::Error as StdError;

/// Key of the field that carries a classified error's type
pub const ERR_TYPE_KEY: &str = "err_type";

/// Anything a log call can be about
#[derive(Debug, Clone, Copy)]
pub enum Renderable<'a> {
    /// A plain message
    Message(&'a str),
    /// A native error; if a classified [`Error`] sits in its chain it is
    /// rendered as classified
    Native(&'a (dyn StdError + 'static)),
    /// A classified error
    Classified(&'a Error),
}

impl<'a> Renderable<'a> {
    /// Render any `std::error::Error`
    pub fn native(err: &'a (dyn StdError + 'static)) -> Self {
        Renderable::Native(err)
    }
}

impl<'a> From<&'a str> for Renderable<'a> {
    fn from(msg: &'a str) -> Self {
        Renderable::Message(msg)
    }
}

impl<'a> From<&'a String> for Renderable<'a> {
    fn from(msg: &'a String) -> Self {
        Renderable::Message(msg)
    }
}

impl<'a> From<&'a Error> for Renderable<'a> {
    fn from(err: &'a Error) -> Self {
        Renderable::Classified(err)
    }
}

impl<'a> From<&'a anyhow::Error> for Renderable<'a> {
    fn from(err: &'a anyhow::Error) -> Self {
        Renderable::Native(&**err)
    }
}

impl<'a> From<&'a (dyn StdError + 'static)> for Renderable<'a> {
    fn from(err: &'a (dyn StdError + 'static)) -> Self {
        Renderable::Native(err)
    }
}

impl<'a> From<&'a (dyn StdError + Send + Sync + 'static)> for Renderable<'a> {
    fn from(err: &'a (dyn StdError + Send + Sync + 'static)) -> Self {
        Renderable::Native(err)
    }
}

/// Final message and fields, ready for a sink
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub message: String,
    pub fields: Vec<Field>,
}

/// Render `input` with the explicit parameters and the parameters of `ctx`.
///
/// Never fails.
pub fn render(input: Renderable<'_>, explicit: &[KvParam], ctx: &Ctx) -> Rendered {
    let (message, classified) = match input {
        Renderable::Message(msg) => (msg.to_owned(), None),
        Renderable::Classified(err) => (err.to_string(), Some(err)),
        Renderable::Native(err) => (chain_message(err), find_in_chain(err)),
    };

    let fields = match classified {
        Some(err) => {
            let own = err.params();
            let err_type = KvParam::string(ERR_TYPE_KEY, err.err_type().to_string());
            dedup_fields(
                explicit
                    .iter()
                    .chain(own.iter())
                    .chain(ctx.params())
                    .chain(std::iter::once(&err_type)),
            )
        }
        None => dedup_fields(explicit.iter().chain(ctx.params())),
    };

    Rendered { message, fields }
}

/// Resolve parameters into fields, keeping the first occurrence of each key
pub fn dedup_fields<'p, I>(params: I) -> Vec<Field>
where
    I: IntoIterator<Item = &'p KvParam>,
{
    let params = params.into_iter();
    let mut seen: HashSet<&str> = HashSet::with_capacity(params.size_hint().0);
    let mut fields = Vec::with_capacity(params.size_hint().0);
    for param in params {
        if seen.insert(param.key()) {
            fields.push(Field::from_param(param));
        }
    }
    fields
}

/// The messages of a native chain joined with ": ".
///
/// Stops after a classified [`Error`], whose own message already spells out
/// its cause chain.
fn chain_message(err: &(dyn StdError + 'static)) -> String {
    let mut out = String::new();
    for link in chain(err) {
        if !out.is_empty() {
            out.push_str(": ");
        }
        out.push_str(&link.to_string());
        if link.is::<Error>() {
            break;
        }
    }
    out
}
