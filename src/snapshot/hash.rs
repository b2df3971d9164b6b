use std::hash::Hasher;
use std::sync::LazyLock;

use derive_more::{Display, From};
use metrohash::MetroHash64;

static MISSING_FILE_SIGNATURE: LazyLock<HashCode> =
    LazyLock::new(|| HashCode::signature("MISSING_FILE_SIGNATURE"));
static DIRECTORY_SIGNATURE: LazyLock<HashCode> =
    LazyLock::new(|| HashCode::signature("DIRECTORY_SIGNATURE"));

/// Content hash of a snapshot entry, computed by whoever walked the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From)]
#[display("{_0:016x}")]
pub struct HashCode(u64);

impl HashCode {
    pub const fn from_u64(value: u64) -> Self {
        HashCode(value)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// A well-known hash derived from a name, used as a marker value.
    pub fn signature(name: &str) -> Self {
        let mut hasher = MetroHash64::default();
        hasher.write(b"signature:");
        hasher.write(name.as_bytes());
        HashCode(hasher.finish())
    }

    /// Hash reported for paths that do not exist.
    pub fn missing_file_signature() -> Self {
        *MISSING_FILE_SIGNATURE
    }

    /// Hash recorded for directory entries in fingerprints.
    pub fn directory_signature() -> Self {
        *DIRECTORY_SIGNATURE
    }
}

/// Combines the hashes of a directory's children into the directory's hash.
///
/// Children have to be fed in the order of the directory's child map so that
/// equal trees hash equally.
#[derive(Default)]
pub struct MerkleDirectoryHasher {
    hasher: MetroHash64,
    children: usize,
}

impl MerkleDirectoryHasher {
    pub fn visit(&mut self, name: &str, hash: HashCode) {
        self.hasher.write(name.as_bytes());
        self.hasher.write(&[0]);
        self.hasher.write(&hash.as_u64().to_le_bytes());
        self.children += 1;
    }

    pub fn finish(mut self) -> HashCode {
        self.hasher.write(&(self.children as u64).to_le_bytes());
        HashCode(self.hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signatures_are_stable_and_distinct() {
        assert_eq!(HashCode::signature("a"), HashCode::signature("a"));
        assert_ne!(
            HashCode::missing_file_signature(),
            HashCode::directory_signature()
        );
    }

    #[test]
    fn displays_as_fixed_width_hex() {
        assert_eq!(HashCode::from_u64(0xab).to_string(), "00000000000000ab");
    }

    #[test]
    fn merkle_hash_depends_on_names_and_hashes() {
        let hash_of = |entries: &[(&str, u64)]| {
            let mut hasher = MerkleDirectoryHasher::default();
            for (name, hash) in entries {
                hasher.visit(name, HashCode::from_u64(*hash));
            }
            hasher.finish()
        };

        let reference = hash_of(&[("a.txt", 1), ("b.txt", 2)]);
        assert_eq!(reference, hash_of(&[("a.txt", 1), ("b.txt", 2)]));
        assert_ne!(reference, hash_of(&[("a.txt", 1), ("c.txt", 2)]));
        assert_ne!(reference, hash_of(&[("a.txt", 1), ("b.txt", 3)]));
        assert_ne!(hash_of(&[]), hash_of(&[("a.txt", 1)]));
    }
}
