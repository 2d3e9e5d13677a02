//! `osmg-xml` — streaming OSM XML parser.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`attrs`]   | `Attrs` — attribute map of one start tag                       |
//! | [`handler`] | `ElementHandler` — start/end state machine, `ParseStats`       |
//! | [`reader`]  | `parse_reader`, `parse_file` — drive a `quick-xml` reader      |
//! | [`error`]   | `XmlError`, `XmlResult<T>`                                     |
//!
//! # Feature flags
//!
//! | Flag   | Effect                                                        |
//! |--------|---------------------------------------------------------------|
//! | `gzip` | `parse_file` decompresses `*.gz` inputs (default on).          |
//!
//! The parser holds at most one element in memory.  Every closed `<node>`,
//! `<way>`, or `<relation>` goes straight to the consumer before the next
//! event is read.

pub mod attrs;
pub mod error;
pub mod handler;
pub mod reader;


pub use attrs::Attrs;
pub use error::{XmlError, XmlResult};
pub use handler::{ElementHandler, ParseStats};
pub use reader::{parse_file, parse_reader, parse_str};
