//! Core error type.
//!
//! Sub-crates define their own error enums; `ct-sim` wraps them all into
//! `SimError` via `From` impls.

use thiserror::Error;

/// Errors produced by `ct-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ct-core`.
pub type CoreResult<T> = Result<T, CoreError>;
