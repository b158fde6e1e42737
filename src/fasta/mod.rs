//! FASTA protein input handling.
//!
//! Submitted sequences are normalized into a single-record FASTA file on disk
//! before any external tool sees them. The file lives exactly as long as the
//! request that created it.

mod query_file;
mod validator;

#[cfg(test)]
mod query_file_test;

pub use query_file::{QueryFile, to_fasta};
pub use validator::{AMINO_ACIDS, is_valid_protein_fasta, validate_fasta_file};
