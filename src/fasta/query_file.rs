//! Temporary FASTA files for tool queries.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::validate_fasta_file;

/// Normalize a raw sequence into single-record FASTA text.
pub fn to_fasta(sequence: &str) -> String {
    format!(">sequence\n{}\n", sequence.trim())
}

/// A submitted sequence materialized as a temporary `.fasta` file.
///
/// The file is removed when the value is dropped, whichever way the request
/// ends.
#[derive(Debug)]
pub struct QueryFile {
    file: NamedTempFile,
}

impl QueryFile {
    /// Write `sequence` as FASTA into a fresh temporary file.
    pub fn create(sequence: &str) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("query_")
            .suffix(".fasta")
            .tempfile()?;
        file.write_all(to_fasta(sequence).as_bytes())?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Whether the written file passes protein FASTA validation.
    pub fn is_valid(&self) -> bool {
        validate_fasta_file(self.path())
    }
}
