//! Checksum stamps for cached graphs.
//!
//! A graph cached at `city.graph` is accompanied by `city.graph.md5`, holding
//! the [`checksum`](crate::checksum) of the OSM file it was built from.  On
//! reload the source is fingerprinted again and compared byte for byte; any
//! difference (or a missing stamp) means a full re-import.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::checksum::{checksum, CHECKSUM_LEN};
use crate::{GraphError, GraphResult};

/// Stamp file belonging to the cache at `cache`.
pub fn stamp_path(cache: &Path) -> PathBuf {
    let mut name = cache.as_os_str().to_owned();
    name.push(".md5");
    PathBuf::from(name)
}

/// Record `sum` as the source fingerprint of `cache`.
pub fn write_stamp(cache: &Path, sum: &str) -> GraphResult<()> {
    if !is_checksum(sum) {
        return Err(GraphError::InvalidStamp(sum.to_string()));
    }
    fs::write(stamp_path(cache), sum)?;
    log::debug!("wrote checksum stamp {sum} for {}", cache.display());
    Ok(())
}

/// The fingerprint stored for `cache`, or `None` when no stamp exists.
///
/// # Errors
///
/// [`GraphError::InvalidStamp`] when the stamp is not 8 hex digits.
pub fn read_stamp(cache: &Path) -> GraphResult<Option<String>> {
    let raw = match fs::read_to_string(stamp_path(cache)) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let sum = raw.trim();
    if is_checksum(sum) {
        Ok(Some(sum.to_string()))
    } else {
        Err(GraphError::InvalidStamp(sum.to_string()))
    }
}

/// `true` iff `cache` exists and its stamp matches the current fingerprint
/// of `source`.
///
/// A malformed stamp is logged and treated as stale.  Failing to fingerprint
/// `source` is an error.
pub fn cache_is_valid(source: &Path, cache: &Path) -> GraphResult<bool> {
    if !cache.exists() {
        return Ok(false);
    }
    let stored = match read_stamp(cache) {
        Ok(Some(stored)) => stored,
        Ok(None) => return Ok(false),
        Err(e) => {
            log::warn!("ignoring cache {}: {e}", cache.display());
            return Ok(false);
        }
    };
    let current = checksum(source)?;
    if stored != current {
        log::info!(
            "cache {} is stale (stamp {stored}, source {current})",
            cache.display()
        );
    }
    Ok(stored == current)
}

fn is_checksum(s: &str) -> bool {
    s.len() == CHECKSUM_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}
