//! Export sink: re-serialize the filtered lines to a file.
//!
//! Output is the retained lines verbatim, one per line, in original order,
//! so running the result back through the filter and decoder reproduces the
//! same records. The pipeline treats any failure here as a warning; the
//! chart must still come up.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::filter::RawLine;

/// Write each line followed by `\n` to `out`, flushing at the end.
pub fn export_lines<'a, W: Write>(
    lines: impl Iterator<Item = RawLine<'a>>,
    out: &mut W,
) -> io::Result<()> {
    for line in lines {
        out.write_all(line.text.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Create (or truncate) `path` and write the filtered lines to it.
/// The file handle is released on every exit path.
pub fn export_to_path<'a>(
    path: &Path,
    lines: impl Iterator<Item = RawLine<'a>>,
) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    export_lines(lines, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::record_lines;

    #[test]
    fn writes_lines_in_order_with_terminators() {
        let text = "noise\n{\"a\":1}\n{\"b\":2}\nmore noise\n";
        let mut out = Vec::new();
        export_lines(record_lines(text), &mut out).unwrap();
        assert_eq!(out, b"{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn empty_filter_output_writes_nothing() {
        let mut out = Vec::new();
        export_lines(record_lines("no records here"), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn exported_text_refilters_identically() {
        let text = "boot banner\n{\"a\":1}\ndebug\n{\"b\":2}\n";
        let mut out = Vec::new();
        export_lines(record_lines(text), &mut out).unwrap();

        let exported = String::from_utf8(out).unwrap();
        let original: Vec<_> = record_lines(text).map(|l| l.text.to_owned()).collect();
        let reread: Vec<_> = record_lines(&exported).map(|l| l.text.to_owned()).collect();
        assert_eq!(original, reread);
    }

    #[test]
    fn unwritable_destination_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("missing-subdir").join("out.log");
        let result = export_to_path(&bad, record_lines("{\"a\":1}"));
        assert!(result.is_err());
    }
}
