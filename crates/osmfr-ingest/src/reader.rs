//! Streaming extraction of tagged records from an OSM document.
//!
//! The reader yields one [`TaggedRecord`] per `node`/`way`/`relation`
//! element, in document order, without holding the document in memory.
//! Relation members are not collected; both processing passes skip
//! relations and only their tags matter for the key census.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

use osmfr_model::{ElementKind, TaggedRecord};

use crate::error::{IngestError, Result};

/// Iterator over the top-level elements of an OSM document.
pub struct RecordReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl RecordReader<BufReader<File>> {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|error| IngestError::io(path, error))?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> RecordReader<R> {
    pub fn from_reader(source: R) -> Self {
        Self {
            reader: Reader::from_reader(source),
            buf: Vec::new(),
        }
    }

    fn next_record(&mut self) -> Result<Option<TaggedRecord>> {
        loop {
            self.buf.clear();
            let position = self.reader.buffer_position();
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|error| IngestError::xml(position, error))?;
            match event {
                Event::Start(start) => {
                    let Some(kind) = element_kind(&start) else {
                        continue;
                    };
                    let mut record = TaggedRecord::new(kind);
                    record.attributes = attributes_of(&start, position)?;
                    drop(start);
                    self.read_children(&mut record)?;
                    trace!(kind = ?record.kind, id = record.id(), "extracted element");
                    return Ok(Some(record));
                }
                Event::Empty(start) => {
                    let Some(kind) = element_kind(&start) else {
                        continue;
                    };
                    let mut record = TaggedRecord::new(kind);
                    record.attributes = attributes_of(&start, position)?;
                    trace!(kind = ?record.kind, id = record.id(), "extracted element");
                    return Ok(Some(record));
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }

    /// Consume children until the element closes, attaching `tag` and `nd`
    /// entries to the record.
    fn read_children(&mut self, record: &mut TaggedRecord) -> Result<()> {
        let mut depth = 0usize;
        loop {
            self.buf.clear();
            let position = self.reader.buffer_position();
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|error| IngestError::xml(position, error))?;
            match event {
                Event::Start(child) => {
                    if depth == 0 {
                        apply_child(&child, position, record)?;
                    }
                    depth += 1;
                }
                Event::Empty(child) => {
                    if depth == 0 {
                        apply_child(&child, position, record)?;
                    }
                }
                Event::End(_) => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                Event::Eof => return Err(IngestError::UnexpectedEof { position }),
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<TaggedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

fn element_kind(start: &BytesStart<'_>) -> Option<ElementKind> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    ElementKind::from_tag_name(&name)
}

fn apply_child(child: &BytesStart<'_>, position: u64, record: &mut TaggedRecord) -> Result<()> {
    match child.local_name().as_ref() {
        b"tag" => {
            let mut key = None;
            let mut value = None;
            for (name, attr_value) in attributes_of(child, position)? {
                match name.as_str() {
                    "k" => key = Some(attr_value),
                    "v" => value = Some(attr_value),
                    _ => {}
                }
            }
            if let (Some(key), Some(value)) = (key, value) {
                record.tags.push((key, value));
            }
        }
        b"nd" => {
            for (name, attr_value) in attributes_of(child, position)? {
                if name == "ref" {
                    record.node_refs.push(attr_value);
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn attributes_of(start: &BytesStart<'_>, position: u64) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|error| IngestError::xml(position, error))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|error| IngestError::xml(position, error))?
            .into_owned();
        out.push((key, value));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6">
  <bounds minlat="-21.4" minlon="55.4" maxlat="-21.1" maxlon="55.8"/>
  <node id="1" lat="-21.29" lon="55.64" version="2" user="fred" uid="331831">
    <tag k="addr:street" v="Rue du Four"/>
    <tag k="addr:city" v="Saint-Joseph"/>
  </node>
  <node id="2" lat="-21.30" lon="55.65"/>
  <way id="10" version="1">
    <nd ref="1"/>
    <nd ref="2"/>
    <tag k="highway" v="residential"/>
  </way>
  <relation id="20">
    <member type="way" ref="10" role="outer"/>
    <tag k="type" v="multipolygon"/>
  </relation>
</osm>
"#;

    #[test]
    fn extracts_elements_in_document_order() {
        let reader = RecordReader::from_reader(SAMPLE.as_bytes());
        let records: Vec<TaggedRecord> =
            reader.collect::<Result<Vec<_>>>().expect("clean parse");
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].kind, ElementKind::Node);
        assert_eq!(records[0].id(), Some("1"));
        assert_eq!(records[0].tag("addr:street"), Some("Rue du Four"));
        assert_eq!(records[1].id(), Some("2"));
        assert!(records[1].tags.is_empty());
        assert_eq!(records[2].kind, ElementKind::Way);
        assert_eq!(records[2].node_refs, vec!["1", "2"]);
        assert_eq!(records[3].kind, ElementKind::Relation);
        assert_eq!(records[3].tag("type"), Some("multipolygon"));
    }

    #[test]
    fn attribute_order_is_preserved() {
        let mut reader = RecordReader::from_reader(SAMPLE.as_bytes());
        let first = reader
            .next()
            .expect("one record")
            .expect("clean parse");
        let keys: Vec<&str> = first.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["id", "lat", "lon", "version", "user", "uid"]);
    }

    #[test]
    fn escaped_values_are_decoded() {
        let doc = r#"<osm><node id="1"><tag k="name" v="Chez P&amp;P"/></node></osm>"#;
        let mut reader = RecordReader::from_reader(doc.as_bytes());
        let record = reader.next().expect("record").expect("clean parse");
        assert_eq!(record.tag("name"), Some("Chez P&P"));
    }

    #[test]
    fn malformed_document_is_fatal() {
        let broken = "<osm><node id=\"1\"><tag k=\"a\" v=\"b\"</node></osm>";
        let reader = RecordReader::from_reader(broken.as_bytes());
        let result: Result<Vec<TaggedRecord>> = reader.collect();
        assert!(result.is_err());
    }

    #[test]
    fn truncated_document_is_fatal() {
        let truncated = "<osm><way id=\"10\"><nd ref=\"1\"/>";
        let reader = RecordReader::from_reader(truncated.as_bytes());
        let result: Result<Vec<TaggedRecord>> = reader.collect();
        assert!(matches!(
            result,
            Err(IngestError::UnexpectedEof { .. }) | Err(IngestError::Xml { .. })
        ));
    }
}
