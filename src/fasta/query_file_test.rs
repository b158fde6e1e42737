use crate::fasta::{QueryFile, to_fasta};

#[test]
fn test_to_fasta_wraps_trimmed_sequence() {
    assert_eq!(to_fasta("MKTV"), ">sequence\nMKTV\n");
    assert_eq!(to_fasta("  MKTV\n\t"), ">sequence\nMKTV\n");
}

#[test]
fn test_query_file_holds_fasta_text() {
    let query = QueryFile::create(" MKTVRQERLK ").unwrap();

    let written = std::fs::read_to_string(query.path()).unwrap();
    assert_eq!(written, ">sequence\nMKTVRQERLK\n");
    assert!(query.path().extension().is_some_and(|ext| ext == "fasta"));
    assert!(query.is_valid());
}

#[test]
fn test_query_file_is_removed_on_drop() {
    let query = QueryFile::create("MKTV").unwrap();
    let path = query.path().to_path_buf();
    assert!(path.exists());

    drop(query);

    assert!(!path.exists());
}

#[test]
fn test_invalid_sequence_fails_validation() {
    let query = QueryFile::create("MKTV123").unwrap();
    assert!(!query.is_valid());
}
