//! Sample-file generation.
//!
//! Cuts a manageable fixture out of an arbitrarily large export by copying
//! every k-th top-level element, children included, into a fresh `<osm>`
//! document.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use tracing::info;

use osmfr_model::ElementKind;

use crate::error::{IngestError, Result};

/// Copy every `k`-th `node`/`way`/`relation` element of `input` into
/// `output`. Returns the number of elements written.
pub fn write_sample(input: &Path, output: &Path, k: usize) -> Result<usize> {
    let step = k.max(1);
    let file = File::open(input).map_err(|error| IngestError::io(input, error))?;
    let mut reader = Reader::from_reader(BufReader::new(file));

    let out = File::create(output).map_err(|error| IngestError::io(output, error))?;
    let mut writer = Writer::new_with_indent(BufWriter::new(out), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|error| IngestError::io(output, error))?;
    writer
        .write_event(Event::Start(BytesStart::new("osm")))
        .map_err(|error| IngestError::io(output, error))?;

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut index = 0usize;
    let mut written = 0usize;
    let mut copying = false;

    loop {
        buf.clear();
        let position = reader.buffer_position();
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|error| IngestError::xml(position, error))?;
        match event {
            Event::Start(start) => {
                if depth == 1 && !copying && is_top_element(&start) {
                    if index % step == 0 {
                        copying = true;
                        written += 1;
                    }
                    index += 1;
                }
                if copying {
                    writer
                        .write_event(Event::Start(start.into_owned()))
                        .map_err(|error| IngestError::io(output, error))?;
                }
                depth += 1;
            }
            Event::Empty(start) => {
                let selected = if depth == 1 && is_top_element(&start) {
                    let keep = index % step == 0;
                    index += 1;
                    if keep {
                        written += 1;
                    }
                    keep
                } else {
                    copying
                };
                if selected {
                    writer
                        .write_event(Event::Empty(start.into_owned()))
                        .map_err(|error| IngestError::io(output, error))?;
                }
            }
            Event::End(end) => {
                depth = depth.saturating_sub(1);
                if copying {
                    writer
                        .write_event(Event::End(end.into_owned()))
                        .map_err(|error| IngestError::io(output, error))?;
                    if depth == 1 {
                        copying = false;
                    }
                }
            }
            Event::Text(text) => {
                // inner text is whitespace in OSM exports; keep it only while
                // copying so the output stays well-formed either way
                if copying {
                    writer
                        .write_event(Event::Text(text.into_owned()))
                        .map_err(|error| IngestError::io(output, error))?;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("osm")))
        .map_err(|error| IngestError::io(output, error))?;
    info!(written, step, "sample written");
    Ok(written)
}

fn is_top_element(start: &BytesStart<'_>) -> bool {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    ElementKind::from_tag_name(&name).is_some()
}
