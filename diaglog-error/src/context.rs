//! Request-scoped diagnostic context
//!
//! A [`Ctx`] is handed down the call tree by reference. Each layer that wants
//! its parameters to show up on later log lines derives a new context with
//! [`Ctx::attach_params`]; sibling branches never see each other's parameters
//! because the parent value is never touched.

use crate::KvParam;
use std::sync::Arc;

/// Immutable carrier of ambient diagnostic parameters.
///
/// Cloning is cheap: the parameter slot is shared until the next attach.
///
/// ```rust
/// use diaglog_error::{Ctx, KvParam};
///
/// let root = Ctx::background();
/// let req = root.attach_params([KvParam::string("request_id", "r-1")]);
///
/// assert!(root.params().is_empty());
/// assert_eq!(req.params()[0].as_str(), "r-1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ctx {
    params: Option<Arc<[KvParam]>>,
}

impl Ctx {
    /// A context with no attached parameters
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context whose parameters are this context's followed by `params`
    pub fn attach_params<I>(&self, params: I) -> Ctx
    where
        I: IntoIterator<Item = KvParam>,
    {
        let merged: Arc<[KvParam]> = self.params().iter().cloned().chain(params).collect();
        Ctx {
            params: Some(merged),
        }
    }

    /// The attached parameters in insertion order; empty if none were attached
    pub fn params(&self) -> &[KvParam] {
        self.params.as_deref().unwrap_or_default()
    }
}

/// Free-function form of [`Ctx::attach_params`]
pub fn attach_params<I>(ctx: &Ctx, params: I) -> Ctx
where
    I: IntoIterator<Item = KvParam>,
{
    ctx.attach_params(params)
}

/// Owned copy of the parameters attached to `ctx`
pub fn read_params(ctx: &Ctx) -> Vec<KvParam> {
    ctx.params().to_vec()
}
