//! Parser error type.  Every variant aborts the whole import.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("<{element}> is missing required attribute {attribute:?}")]
    MissingAttribute {
        element:   String,
        attribute: &'static str,
    },

    #[error("<{element}> attribute {attribute:?} is not a number: {value:?}")]
    InvalidNumber {
        element:   String,
        attribute: &'static str,
        value:     String,
    },

    #[error("document ended inside <{0}>")]
    Truncated(&'static str),

    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("invalid UTF-8 in markup: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type XmlResult<T> = Result<T, XmlError>;
