//! Source-file fingerprint.
//!
//! The fingerprint is characters `8..16` of the lower-case hex MD5 digest of
//! the whole file.  It only guards a cached graph against a changed source;
//! nothing relies on it being collision-free.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::{GraphError, GraphResult};

/// Length of a fingerprint in hex characters.
pub const CHECKSUM_LEN: usize = 8;

/// Fingerprint the file at `path`.
///
/// # Errors
///
/// [`GraphError::Checksum`] when the file cannot be opened or read.
pub fn checksum(path: &Path) -> GraphResult<String> {
    let wrap = |source| GraphError::Checksum { path: path.to_path_buf(), source };
    let file = File::open(path).map_err(wrap)?;
    checksum_reader(BufReader::new(file)).map_err(wrap)
}

/// Fingerprint everything `reader` yields.
pub fn checksum_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut context = md5::Context::new();
    io::copy(&mut reader, &mut context)?;
    let hex = format!("{:x}", context.compute());
    Ok(hex[8..8 + CHECKSUM_LEN].to_string())
}
