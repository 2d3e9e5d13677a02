//! Drive an [`ElementHandler`] from a `quick-xml` event stream.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use osmg_core::OsmElement;
//!
//! let mut elements: Vec<OsmElement> = Vec::new();
//! let stats = osmg_xml::parse_file(Path::new("extract.osm"), &mut elements)?;
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use osmg_core::ElementConsumer;

use crate::{Attrs, ElementHandler, ParseStats, XmlResult};

/// Parse OSM XML from any buffered source, delivering each completed element
/// to `consumer` before reading further.
///
/// # Errors
///
/// Malformed XML, a missing or non-numeric required attribute, or a document
/// that ends inside an element.  No partial result is returned.
pub fn parse_reader<R, C>(source: R, consumer: C) -> XmlResult<ParseStats>
where
    R: BufRead,
    C: ElementConsumer,
{
    let mut reader = Reader::from_reader(source);
    let config = reader.config_mut();
    config.trim_text(true);
    config.expand_empty_elements = true;

    let mut handler = ElementHandler::new(consumer);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let attrs = read_attrs(&e)?;
                handler.start(std::str::from_utf8(e.name().as_ref())?, &attrs)?;
            }
            Event::End(e) => {
                handler.end(std::str::from_utf8(e.name().as_ref())?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let (_, stats) = handler.finish()?;
    Ok(stats)
}

/// Parse an in-memory document.
pub fn parse_str<C: ElementConsumer>(xml: &str, consumer: C) -> XmlResult<ParseStats> {
    parse_reader(xml.as_bytes(), consumer)
}

/// Parse an OSM XML file.  With the `gzip` feature, `*.gz` files are
/// decompressed on the fly.
///
/// The file handle is owned by this call and closed on every exit path.
pub fn parse_file<C: ElementConsumer>(path: &Path, consumer: C) -> XmlResult<ParseStats> {
    log::info!("parsing {}", path.display());
    let file = File::open(path)?;
    let source = open_source(path, file);
    let stats = parse_reader(source, consumer)?;
    log::info!("parsed {}: {stats}", path.display());
    Ok(stats)
}

#[cfg(feature = "gzip")]
fn open_source(path: &Path, file: File) -> Box<dyn BufRead> {
    if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    }
}

#[cfg(not(feature = "gzip"))]
fn open_source(_path: &Path, file: File) -> Box<dyn BufRead> {
    Box::new(BufReader::new(file))
}

fn read_attrs(e: &BytesStart<'_>) -> XmlResult<Attrs> {
    let mut attrs = Attrs::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        attrs.push(key, value.into_owned());
    }
    Ok(attrs)
}
