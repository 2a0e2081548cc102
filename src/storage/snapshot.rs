//! Snapshot files - the flat textual format for saving and loading.
//!
//! A [`SnapshotFile`] reads and writes every record of the index:
//! - Saving writes one line per record in ascending ID order
//! - Loading inserts records in file order, skipping bad lines

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::common::{Error, Result};
use crate::index::BTree;
use crate::record::{validation, Record};

/// Field separator of the snapshot format.
pub const DELIMITER: char = ',';

/// Outcome of loading a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records inserted into the index.
    pub loaded: usize,

    /// Lines rejected as malformed, invalid or duplicate, with their
    /// 1-based line numbers.
    pub skipped: Vec<usize>,
}

/// A snapshot file on disk.
///
/// # File Layout
/// ```text
/// 2502841,Alicia Tan,Computer Science,72.5
/// 2503328,Rahul Nair,Software Engineering,49.5
/// ...
/// ```
/// Fields are `id,name,programme,mark` with no header and no quoting.
/// Names and programmes are validated to letters and spaces, so a field
/// can never contain the delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file into a fresh tree.
    ///
    /// Malformed, invalid and duplicate lines are logged and skipped; the
    /// rest of the file still loads.
    ///
    /// # Errors
    /// Returns an error only if the file cannot be opened or read.
    pub fn load(&self) -> Result<(BTree, LoadReport)> {
        let file = File::open(&self.path)?;
        let (tree, report) = read_records(BufReader::new(file))?;
        info!(
            path = %self.path.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "loaded snapshot"
        );
        Ok((tree, report))
    }

    /// Write every record of `tree`, replacing the file's contents.
    ///
    /// Returns the number of records written.
    ///
    /// # Durability
    /// The file is flushed and `fsync`ed before returning.
    pub fn save(&self, tree: &BTree) -> Result<usize> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let written = write_records(&mut writer, tree)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;

        info!(path = %self.path.display(), written, "saved snapshot");
        Ok(written)
    }
}

/// Load records from any line-oriented reader.
pub fn read_records<R: BufRead>(reader: R) -> Result<(BTree, LoadReport)> {
    let mut tree = BTree::new();
    let mut report = LoadReport::default();

    for (index, raw) in reader.split(b'\n').enumerate() {
        let line_no = index + 1;
        let mut raw = raw?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        let line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(err) => {
                warn!(line = line_no, "skipping snapshot line: {err}");
                report.skipped.push(line_no);
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line).and_then(|record| tree.insert(record)) {
            Ok(()) => report.loaded += 1,
            Err(err) => {
                warn!(line = line_no, "skipping snapshot line: {err}");
                report.skipped.push(line_no);
            }
        }
    }

    Ok((tree, report))
}

/// Write records in ascending ID order, one per line.
pub fn write_records<W: Write>(writer: &mut W, tree: &BTree) -> Result<usize> {
    let mut written = 0;
    for record in tree {
        writeln!(writer, "{}", format_line(record))?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Parse one `id,name,programme,mark` line.
///
/// # Errors
/// `Error::Parse` for a wrong field count; `Error::ValidationFailed` for a
/// bad field value.
pub fn parse_line(line: &str) -> Result<Record> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    let [id, name, programme, mark] = fields.as_slice() else {
        return Err(Error::Parse(format!(
            "expected 4 comma-separated fields, found {}",
            fields.len()
        )));
    };

    let id = validation::parse_id(id)?;
    let mark = validation::parse_mark(mark)?;
    Record::new(id, name, programme, mark)
}

/// Render one record as a snapshot line (without the newline).
pub fn format_line(record: &Record) -> String {
    format!(
        "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
        record.id, record.name, record.programme, record.mark
    )
}
