//! Helpers shared by the tool and HTTP tests.

use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{ExitStatus, Output};

pub fn mock_output(code: i32, stdout: &str, stderr: &str) -> Output {
    Output {
        // Raw wait status: the exit code lives in the second byte.
        status: ExitStatus::from_raw(code << 8),
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Tabular blastp output with `rows` well-formed hits.
pub fn blast_rows(rows: usize) -> String {
    (1..=rows)
        .map(|i| {
            format!(
                "sequence\tsp|P{:05}|HIT{}\t{}.5\t{}\t1e-{}\t{}.0\tHomo sapiens\n",
                i,
                i,
                100 - i,
                60 + i,
                40 - i,
                200 - i
            )
        })
        .collect()
}

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}
