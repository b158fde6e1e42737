//! Tracks which BLAST databases have been checked in this process.

use dashmap::DashSet;

/// Set of database names that have already been refreshed (or skipped).
///
/// Shared between requests by the owning service. Two requests racing on a
/// fresh name may both refresh it; the refresh step is idempotent.
#[derive(Debug, Default)]
pub struct DatabaseRegistry {
    checked: DashSet<String>,
}

impl DatabaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_checked(&self, db_name: &str) -> bool {
        self.checked.contains(db_name)
    }

    /// Mark `db_name` as checked. Returns true if it was not checked before.
    pub fn mark_checked(&self, db_name: &str) -> bool {
        self.checked.insert(db_name.to_string())
    }
}
