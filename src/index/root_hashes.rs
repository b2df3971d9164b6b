use hashlink::LinkedHashMap;

use crate::snapshot::{FileSystemSnapshot, HashCode, SnapshotVisitResult};

/// Insertion-ordered multimap from root absolute path to root hashes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootHashes {
    entries: LinkedHashMap<String, Vec<HashCode>>,
}

impl RootHashes {
    pub fn put(&mut self, absolute_path: &str, hash: HashCode) {
        match self.entries.get_mut(absolute_path) {
            Some(hashes) => hashes.push(hash),
            None => {
                self.entries.insert(absolute_path.to_string(), vec![hash]);
            }
        }
    }

    pub fn get(&self, absolute_path: &str) -> &[HashCode] {
        self.entries
            .get(absolute_path)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All `(path, hash)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, HashCode)> {
        self.entries
            .iter()
            .flat_map(|(path, hashes)| hashes.iter().map(move |hash| (path.as_str(), *hash)))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of `(path, hash)` pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects the hash of every root of the tree.
pub fn root_hashes(snapshot: &FileSystemSnapshot) -> RootHashes {
    let mut hashes = RootHashes::default();
    if snapshot.is_empty() {
        return hashes;
    }
    snapshot.accept(|root, _| {
        hashes.put(root.absolute_path(), root.hash());
        SnapshotVisitResult::SkipSubtree
    });
    hashes
}
