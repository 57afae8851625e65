//! Built-in demonstration data.

use service::infra::memory::Snapshot;

/// Built-in demonstration snapshot.
const SEED: &str = include_str!("seed.json");

/// Deserializes the built-in demonstration [`Snapshot`].
///
/// # Errors
///
/// Returns an error if the built-in snapshot is malformed.
pub fn snapshot() -> Result<Snapshot, serde_json::Error> {
    serde_json::from_str(SEED)
}

#[cfg(test)]
mod spec {
    #[test]
    fn built_in_snapshot_deserializes() {
        let snapshot = super::snapshot().unwrap();
        assert!(!snapshot.leads.is_empty());
        assert!(!snapshot.import_jobs.is_empty());
    }
}
