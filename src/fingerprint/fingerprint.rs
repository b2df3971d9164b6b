use std::collections::BTreeMap;
use std::hash::Hasher;
use std::sync::Arc;

use metrohash::MetroHash64;

use crate::index::RootHashes;
use crate::snapshot::{FileType, HashCode};

/// Fingerprint of a single snapshot entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationFingerprint {
    normalized_path: Arc<str>,
    absolute_path: String,
    file_type: FileType,
    normalized_content_hash: HashCode,
}

impl LocationFingerprint {
    pub fn new(
        normalized_path: Arc<str>,
        absolute_path: impl Into<String>,
        file_type: FileType,
        normalized_content_hash: HashCode,
    ) -> Self {
        Self {
            normalized_path,
            absolute_path: absolute_path.into(),
            file_type,
            normalized_content_hash,
        }
    }

    pub fn normalized_path(&self) -> &Arc<str> {
        &self.normalized_path
    }

    pub fn absolute_path(&self) -> &str {
        &self.absolute_path
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn normalized_content_hash(&self) -> HashCode {
        self.normalized_content_hash
    }
}

/// Normalized fingerprints of every relevant entry of a snapshot, ordered by
/// normalized path.
///
/// Several entries may share a normalized path, e.g. two roots with the same
/// name; they are kept in visitation order.
#[derive(Debug, Clone, Default)]
pub struct FileCollectionFingerprint {
    fingerprints: BTreeMap<Arc<str>, Vec<LocationFingerprint>>,
    root_hashes: RootHashes,
}

impl FileCollectionFingerprint {
    pub fn new(root_hashes: RootHashes) -> Self {
        Self {
            fingerprints: BTreeMap::new(),
            root_hashes,
        }
    }

    pub(crate) fn insert(&mut self, fingerprint: LocationFingerprint) {
        self.fingerprints
            .entry(Arc::clone(&fingerprint.normalized_path))
            .or_default()
            .push(fingerprint);
    }

    pub fn fingerprints_by_path(&self) -> &BTreeMap<Arc<str>, Vec<LocationFingerprint>> {
        &self.fingerprints
    }

    pub fn get(&self, normalized_path: &str) -> &[LocationFingerprint] {
        self.fingerprints
            .get(normalized_path)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocationFingerprint> {
        self.fingerprints.values().flatten()
    }

    pub fn root_hashes(&self) -> &RootHashes {
        &self.root_hashes
    }

    /// Number of fingerprinted entries.
    pub fn len(&self) -> usize {
        self.fingerprints.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    /// Whether both fingerprints hold the same `(normalized path, hash)` pairs.
    ///
    /// Absolute paths and visitation order are ignored.
    pub fn is_equivalent(&self, other: &FileCollectionFingerprint) -> bool {
        self.sorted_pairs() == other.sorted_pairs()
    }

    /// Combined hash over all `(normalized path, hash)` pairs.
    pub fn hash(&self) -> HashCode {
        let mut hasher = MetroHash64::default();
        for (path, content_hash) in self.sorted_pairs() {
            hasher.write(path.as_bytes());
            hasher.write(&[0]);
            hasher.write(&content_hash.as_u64().to_le_bytes());
        }
        HashCode::from_u64(hasher.finish())
    }

    fn sorted_pairs(&self) -> Vec<(&str, HashCode)> {
        let mut pairs = self
            .iter()
            .map(|fingerprint| {
                (
                    &*fingerprint.normalized_path,
                    fingerprint.normalized_content_hash,
                )
            })
            .collect::<Vec<_>>();
        pairs.sort();
        pairs
    }
}
