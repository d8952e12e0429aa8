//! Walking error chains
//!
//! A classified [`Error`] does not expose its cause through `source()`
//! (its `Display` already spells the cause out), so these helpers step into
//! [`Error::cause`] explicitly.

use crate::Error;
use std::error::Error as StdError;
use std::iter;

/// Iterate `err` and every error reachable from it, outermost first.
///
/// Links are followed through `source()`, or through [`Error::cause`] for a
/// classified error.
pub fn chain<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    iter::successors(Some(err), |&e| next_link(e))
}

fn next_link<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    match err.downcast_ref::<Error>() {
        Some(classified) => classified.cause(),
        None => err.source(),
    }
}

/// The first classified [`Error`] in the chain of `err`, if any
pub fn find_in_chain<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Error> {
    chain(err).find_map(|e| e.downcast_ref::<Error>())
}

/// Whether two references point at the same error object
pub(crate) fn same_object(a: &(dyn StdError + 'static), b: &(dyn StdError + 'static)) -> bool {
    std::ptr::addr_eq(a as *const dyn StdError, b as *const dyn StdError)
}
