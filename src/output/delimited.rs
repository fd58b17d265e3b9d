//! Delimited text file output
//!
//! Writes one cell per row: the header first, then each identifier. Cells that
//! contain the delimiter, a quote or a line break are quoted, with embedded
//! quotes doubled.

use crate::config::OutputConfig;
use crate::harvest::Identifier;
use crate::output::traits::{IdSink, OutputResult};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Sink that writes identifiers to a CSV/TSV-style file
#[derive(Debug, Clone)]
pub struct DelimitedFileSink {
    path: PathBuf,
    delimiter: char,
}

impl DelimitedFileSink {
    pub fn new(path: impl Into<PathBuf>, delimiter: char) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.path, config.delimiter_char())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdSink for DelimitedFileSink {
    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    fn write_ids(&self, header: &str, ids: &[Identifier]) -> OutputResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        write_row(&mut writer, &[header], self.delimiter)?;
        for id in ids {
            write_row(&mut writer, &[id.as_str()], self.delimiter)?;
        }
        writer.flush()?;

        Ok(())
    }
}

fn needs_quotes(cell: &str, delimiter: char) -> bool {
    cell.contains(delimiter) || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
}

/// Writes a single delimited row terminated by `\n`
pub fn write_row<W: Write>(w: &mut W, row: &[&str], delimiter: char) -> std::io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", delimiter)?;
        }
        if needs_quotes(cell, delimiter) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\n")
}
