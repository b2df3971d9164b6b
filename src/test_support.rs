use std::sync::Arc;

use crate::changes::SnapshotSet;
use crate::path::CaseSensitivity;
use crate::snapshot::{FileSystemSnapshot, HashCode, LocationSnapshot};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .without_time()
        .compact()
        .try_init();
}

pub fn hash(value: u64) -> HashCode {
    HashCode::from_u64(value)
}

pub fn file(absolute_path: &str, content_hash: u64) -> Arc<LocationSnapshot> {
    Arc::new(
        LocationSnapshot::regular_file(absolute_path, hash(content_hash))
            .expect("Failed to create file snapshot"),
    )
}

pub fn symlink(absolute_path: &str, target_hash: u64) -> Arc<LocationSnapshot> {
    Arc::new(
        LocationSnapshot::symlink(absolute_path, hash(target_hash))
            .expect("Failed to create symlink snapshot"),
    )
}

pub fn missing(absolute_path: &str) -> Arc<LocationSnapshot> {
    Arc::new(LocationSnapshot::missing(absolute_path).expect("Failed to create missing snapshot"))
}

pub fn dir(absolute_path: &str, children: Vec<Arc<LocationSnapshot>>) -> Arc<LocationSnapshot> {
    Arc::new(
        LocationSnapshot::merkle_directory(absolute_path, children, CaseSensitivity::CaseSensitive)
            .expect("Failed to create directory snapshot"),
    )
}

pub fn snapshot_set<const N: usize>(properties: [(&str, FileSystemSnapshot); N]) -> SnapshotSet {
    properties
        .into_iter()
        .map(|(name, snapshot)| (name.to_string(), snapshot))
        .collect()
}
