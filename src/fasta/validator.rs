//! Protein FASTA validation.

use std::path::Path;

use tracing::error;

/// The 20 standard amino-acid letters accepted in sequence lines.
pub const AMINO_ACIDS: &str = "ACDEFGHIKLMNPQRSTVWY";

fn is_amino_acid(c: char) -> bool {
    AMINO_ACIDS.contains(c.to_ascii_uppercase())
}

/// Check that `text` looks like a FASTA protein record.
///
/// The first line must be a header (`>` followed by at least one character),
/// every other header must be non-empty too, and every sequence line may only
/// contain amino-acid letters (any case). Blank lines are ignored.
pub fn is_valid_protein_fasta(text: &str) -> bool {
    let mut lines = text.lines().peekable();

    match lines.peek() {
        Some(first) if first.trim().starts_with('>') => {}
        _ => return false,
    }

    lines.all(|line| {
        let line = line.trim();
        match line.strip_prefix('>') {
            Some(header) => !header.is_empty(),
            None => line.chars().all(is_amino_acid),
        }
    })
}

/// Validate a FASTA protein file on disk.
///
/// Never fails: unreadable or non-UTF-8 files are logged and reported as
/// invalid.
pub fn validate_fasta_file(path: &Path) -> bool {
    match std::fs::read_to_string(path) {
        Ok(text) => is_valid_protein_fasta(&text),
        Err(e) => {
            error!(path = %path.display(), "Error validating FASTA file: {}", e);
            false
        }
    }
}
