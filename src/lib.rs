//! HTTP wrappers for the BLASTp alignment search and SPIDER druggability
//! prediction command-line tools.

pub mod api;
pub mod fasta;
pub mod mcp;
pub mod tools;
