//! CSV writing of the tally and of the per-verdict log.
//!
//! Records are terminated by `\r\n`; a field is wrapped in double quotes
//! only if it contains a comma, a double quote or a line break, with inner
//! quotes doubled.

use crate::analysis::{Tally, VerdictRecord};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const FIELD_SEPARATOR: &[u8] = b",";
const RECORD_TERMINATOR: &[u8] = b"\r\n";
const VERDICT_LOG_HEADER: [&str; 5] = ["tree", "SOI", "A", "B", "relationship"];

// ============================================================================
// QUICK WRITING API (pub)
// ============================================================================
/// Writes the tally to a new CSV file at `path`, one row per key in tally order.
///
/// # Errors
/// Returns an I/O error if the file cannot be created or written.
pub fn write_tally_csv<P: AsRef<Path>>(path: P, tally: &Tally, support_threshold: f64) -> io::Result<()> {
    let file = File::create(path)?;
    CsvWriter::new(file).write_tally(tally, support_threshold)?.finish()
}

/// Writes every verdict to a new CSV file at `path`.
///
/// # Errors
/// Returns an I/O error if the file cannot be created or written.
pub fn write_verdict_log<P: AsRef<Path>>(path: P, verdicts: &[VerdictRecord]) -> io::Result<()> {
    let file = File::create(path)?;
    CsvWriter::new(file).write_verdicts(verdicts)?.finish()
}

/// Returns the column titles of the tally CSV for the given threshold.
pub fn tally_header(support_threshold: f64) -> [String; 8] {
    [
        "SOI".to_string(),
        "A".to_string(),
        "B".to_string(),
        "Trees Analyzed (A, B, SOI present)".to_string(),
        format!("Closer to A (Support > {support_threshold})"),
        format!("Closer to B (Support > {support_threshold})"),
        "Undetermined/Equidistant/Low Support".to_string(),
        "Errors (MRCA issues, etc.)".to_string(),
    ]
}

/// Quotes `field` if it contains a separator, a quote or a line break.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

// =#========================================================================#=
// CSV WRITER
// =#========================================================================#=
/// Buffered writer for the result tables.
///
/// # Example
/// ```
/// use cladetally::analysis::Tally;
/// use cladetally::report::CsvWriter;
///
/// let tally = Tally::from_lists(&["SOI"], &["A"], &["B"]);
/// let mut out = Vec::new();
/// CsvWriter::new(&mut out).write_tally(&tally, 70.0)?.finish()?;
/// assert!(String::from_utf8(out)?.ends_with("SOI,A,B,0,0,0,0,0\r\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct CsvWriter<W: Write> {
    bw: BufWriter<W>,
}

impl<W: Write> CsvWriter<W> {
    /// Creates a new CSV writer on top of `inner`.
    pub fn new(inner: W) -> Self {
        CsvWriter {
            bw: BufWriter::new(inner),
        }
    }

    /// Writes the header and one row per tally entry, returning itself for chaining.
    pub fn write_tally(&mut self, tally: &Tally, support_threshold: f64) -> io::Result<&mut Self> {
        self.record(&tally_header(support_threshold))?;
        for entry in tally.entries() {
            let counts = &entry.counts;
            self.record(&[
                entry.key.soi.clone(),
                entry.key.a.clone(),
                entry.key.b.clone(),
                counts.trees_processed.to_string(),
                counts.closer_to_a.to_string(),
                counts.closer_to_b.to_string(),
                counts.undetermined.to_string(),
                counts.errors.to_string(),
            ])?;
        }
        Ok(self)
    }

    /// Writes the header and one row per verdict, returning itself for chaining.
    pub fn write_verdicts(&mut self, verdicts: &[VerdictRecord]) -> io::Result<&mut Self> {
        self.record(&VERDICT_LOG_HEADER)?;
        for verdict in verdicts {
            self.record(&[
                verdict.tree.as_str(),
                verdict.key.soi.as_str(),
                verdict.key.a.as_str(),
                verdict.key.b.as_str(),
                verdict.relationship.as_str(),
            ])?;
        }
        Ok(self)
    }

    /// Flushes all buffered output.
    pub fn finish(&mut self) -> io::Result<()> {
        self.bw.flush()
    }
}

// ============================================================================
// Little Helpers (private)
// ============================================================================
impl<W: Write> CsvWriter<W> {
    /// Writes one record of escaped fields, returning itself for chaining.
    fn record<S: AsRef<str>>(&mut self, fields: &[S]) -> io::Result<&mut Self> {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.separator()?;
            }
            self.write_all(escape_field(field.as_ref()).as_bytes())?;
        }
        self.terminator()
    }

    /// Appends a byte slice to the [BufWriter], returning itself for chaining.
    fn write_all(&mut self, buf: &[u8]) -> io::Result<&mut Self> {
        self.bw.write_all(buf)?;
        Ok(self)
    }

    fn separator(&mut self) -> io::Result<&mut Self> {
        self.write_all(FIELD_SEPARATOR)
    }

    fn terminator(&mut self) -> io::Result<&mut Self> {
        self.write_all(RECORD_TERMINATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{TripleKey, Verdict};

    fn to_string(write: impl FnOnce(&mut CsvWriter<&mut Vec<u8>>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        let mut writer = CsvWriter::new(&mut out);
        write(&mut writer).unwrap();
        writer.finish().unwrap();
        drop(writer);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("Clematis_repens"), "Clematis_repens");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_tally_header_formats_threshold() {
        let header = tally_header(70.0);
        assert_eq!(header[4], "Closer to A (Support > 70)");
        assert_eq!(tally_header(0.95)[5], "Closer to B (Support > 0.95)");
    }

    #[test]
    fn test_write_tally() {
        let mut tally = Tally::from_lists(&["SOI"], &["A"], &["B1", "B2"]);
        tally.record(&TripleKey::new("SOI", "A", "B1"), Verdict::CloserToA);
        tally.record(&TripleKey::new("SOI", "A", "B1"), Verdict::Undetermined);

        let csv = to_string(|w| w.write_tally(&tally, 70.0).map(|_| ()));
        let lines: Vec<_> = csv.split("\r\n").collect();
        assert_eq!(
            lines[0],
            "SOI,A,B,\"Trees Analyzed (A, B, SOI present)\",Closer to A (Support > 70),\
             Closer to B (Support > 70),Undetermined/Equidistant/Low Support,\
             \"Errors (MRCA issues, etc.)\""
        );
        assert_eq!(lines[1], "SOI,A,B1,2,1,0,1,0");
        assert_eq!(lines[2], "SOI,A,B2,0,0,0,0,0");
        assert_eq!(lines[3], "");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_write_verdicts() {
        let verdicts = vec![VerdictRecord {
            tree: "gene,1_cds".to_string(),
            key: TripleKey::new("S", "A", "B"),
            relationship: Verdict::CloserToB,
        }];
        let csv = to_string(|w| w.write_verdicts(&verdicts).map(|_| ()));
        assert_eq!(csv, "tree,SOI,A,B,relationship\r\n\"gene,1_cds\",S,A,B,closer_to_B\r\n");
    }
}
