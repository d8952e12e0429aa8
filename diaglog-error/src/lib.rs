//! # diaglog-error
//!
//! Classified errors and typed diagnostic parameters for diaglog.
//!
//! ## Design Philosophy
//!
//! - **KvParam**: a typed key-value unit that ends up as a structured log field
//! - **Ctx**: an immutable per-call-chain context that accumulates KvParams
//! - **ErrType**: know what kind of failure happened, anywhere in a wrap chain
//! - **Error**: a native error plus its ErrType and the KvParams collected on
//!   the way up the stack
//!
//! ## Usage
//!
//! ```rust
//! use diaglog_error::{Ctx, Error, KvParam};
//!
//! fn load(ctx: &Ctx, id: i64) -> Result<(), Error> {
//!     Err(Error::from_msg("row missing")
//!         .with_type("not_found")
//!         .with_params([KvParam::int("id", id)])
//!         .with_ctx(ctx))
//! }
//!
//! let ctx = Ctx::background().attach_params([KvParam::string("request_id", "r-1")]);
//! let err = load(&ctx, 7).unwrap_err().with_msg_wrap("load user");
//! assert_eq!(err.to_string(), "load user: row missing");
//! assert_eq!(err.params().len(), 2);
//! ```
//!
//! ## Principles
//!
//! - Values are immutable; every `with_*` call returns a new value
//! - The type tag is a property of the chain, not of one frame
//! - Parameters are deduplicated only when rendered, first occurrence wins

mod chain;
mod context;
mod err_type;
mod error;
mod kv;

pub use chain::{chain, find_in_chain};
pub use context::{attach_params, read_params, Ctx};
pub use err_type::ErrType;
pub use error::{Error, ResultExt, NIL_CAUSE_MESSAGE};
pub use kv::{KvParam, ParamKind, ParamValue};

/// Result type alias using the classified Error
pub type Result<T> = std::result::Result<T, Error>;
