//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they surface it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown transport mode {0:?}")]
    UnknownTransportMode(String),

    #[error("unknown element kind {0:?}")]
    UnknownElementKind(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
