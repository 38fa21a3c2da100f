//! Line-delimited JSON output.

use std::io::Write;

use osmfr_model::CanonicalRecord;

use crate::error::Result;

/// Write one JSON document per record, in input order. Returns the number
/// of documents written.
pub fn write_json_lines<W, I>(records: I, mut sink: W, pretty: bool) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = CanonicalRecord>,
{
    let mut written = 0usize;
    for record in records {
        if pretty {
            serde_json::to_writer_pretty(&mut sink, &record)?;
        } else {
            serde_json::to_writer(&mut sink, &record)?;
        }
        sink.write_all(b"\n").map_err(serde_json::Error::io)?;
        written += 1;
    }
    Ok(written)
}
