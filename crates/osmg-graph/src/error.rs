//! Graph-subsystem error type.

use std::path::PathBuf;

use thiserror::Error;

use osmg_xml::XmlError;

/// Errors produced by `osmg-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The source could not be fingerprinted.  Raised before any parsing.
    #[error("cannot checksum {}: {source}", path.display())]
    Checksum {
        path:   PathBuf,
        source: std::io::Error,
    },

    /// More nodes, edges or ways than a 32-bit id can number.
    #[error("too many {0} for 32-bit ids")]
    IdOverflow(&'static str),

    #[error("malformed checksum stamp {0:?}")]
    InvalidStamp(String),

    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
