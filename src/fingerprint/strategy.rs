use std::collections::HashSet;

use derive_more::Display;
use tracing::debug;

use crate::fingerprint::{FileCollectionFingerprint, LocationFingerprint, StringInterner};
use crate::index::root_hashes;
use crate::snapshot::{FileSystemSnapshot, FileType, HashCode, LocationSnapshot, SnapshotVisitResult};

const SEPARATOR_STR: &str = "/";

/// Whether directories show up as entries of a fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum DirectorySensitivity {
    /// Every directory, including empty ones, contributes an entry.
    #[default]
    #[display("default")]
    Default,
    /// Only content-bearing entries contribute.
    #[display("ignore directories")]
    IgnoreDirectories,
}

impl DirectorySensitivity {
    pub fn should_fingerprint(self, snapshot: &LocationSnapshot) -> bool {
        match snapshot.file_type() {
            FileType::Directory => self == DirectorySensitivity::Default,
            FileType::RegularFile | FileType::Symlink => true,
            FileType::Missing => false,
        }
    }
}

/// Fingerprints entries by their path relative to the root they were found in.
///
/// Root files and symlinks are keyed by their name, a root directory by the
/// empty path, and everything below a root directory by the `/`-joined path
/// from that directory. Missing entries never contribute.
pub struct RelativePathFingerprintingStrategy<I> {
    interner: I,
    directory_sensitivity: DirectorySensitivity,
}

impl<I: StringInterner> RelativePathFingerprintingStrategy<I> {
    pub fn new(interner: I, directory_sensitivity: DirectorySensitivity) -> Self {
        Self {
            interner,
            directory_sensitivity,
        }
    }

    pub fn directory_sensitivity(&self) -> DirectorySensitivity {
        self.directory_sensitivity
    }

    pub fn collect_fingerprints(&mut self, snapshot: &FileSystemSnapshot) -> FileCollectionFingerprint {
        let mut fingerprint = FileCollectionFingerprint::new(root_hashes(snapshot));
        let mut processed_entries = HashSet::new();
        let directory_sensitivity = self.directory_sensitivity;
        let interner = &mut self.interner;

        snapshot.accept(|entry, relative_path| {
            if processed_entries.insert(entry.absolute_path())
                && directory_sensitivity.should_fingerprint(entry)
            {
                let normalized_path = if relative_path.is_empty() {
                    match entry.file_type() {
                        FileType::Directory => interner.intern(""),
                        _ => interner.intern(entry.name()),
                    }
                } else {
                    interner.intern(&relative_path.join(SEPARATOR_STR))
                };
                let normalized_content_hash = match entry.file_type() {
                    FileType::Directory => HashCode::directory_signature(),
                    _ => entry.hash(),
                };
                fingerprint.insert(LocationFingerprint::new(
                    normalized_path,
                    entry.absolute_path(),
                    entry.file_type(),
                    normalized_content_hash,
                ));
            }
            SnapshotVisitResult::Continue
        });

        debug!(
            "Collected {} fingerprints ({})",
            fingerprint.len(),
            directory_sensitivity
        );
        fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::{HashSetInterner, NoopInterner};
    use crate::test_support::{dir, file, hash, missing, symlink};
    use rstest::*;
    use std::sync::Arc;

    fn collect(
        snapshot: &FileSystemSnapshot,
        directory_sensitivity: DirectorySensitivity,
    ) -> FileCollectionFingerprint {
        RelativePathFingerprintingStrategy::new(NoopInterner, directory_sensitivity)
            .collect_fingerprints(snapshot)
    }

    fn paths(fingerprint: &FileCollectionFingerprint) -> Vec<(String, HashCode)> {
        fingerprint
            .iter()
            .map(|entry| {
                (
                    entry.normalized_path().to_string(),
                    entry.normalized_content_hash(),
                )
            })
            .collect()
    }

    fn output_dir(root: &str) -> FileSystemSnapshot {
        FileSystemSnapshot::from(dir(
            root,
            vec![
                file(&format!("{root}/a.txt"), 1),
                dir(
                    &format!("{root}/classes"),
                    vec![file(&format!("{root}/classes/A.class"), 2)],
                ),
                dir(&format!("{root}/empty"), vec![]),
            ],
        ))
    }

    #[test]
    fn normalizes_paths_relative_to_root_directory() {
        let fingerprint = collect(&output_dir("/work/out"), DirectorySensitivity::Default);
        let directory = HashCode::directory_signature();
        assert_eq!(
            paths(&fingerprint),
            vec![
                ("".to_string(), directory),
                ("a.txt".to_string(), hash(1)),
                ("classes".to_string(), directory),
                ("classes/A.class".to_string(), hash(2)),
                ("empty".to_string(), directory),
            ]
        );
    }

    #[test]
    fn ignore_directories_keeps_only_content() {
        let fingerprint = collect(
            &output_dir("/work/out"),
            DirectorySensitivity::IgnoreDirectories,
        );
        assert_eq!(
            paths(&fingerprint),
            vec![
                ("a.txt".to_string(), hash(1)),
                ("classes/A.class".to_string(), hash(2)),
            ]
        );
    }

    #[rstest]
    #[case(DirectorySensitivity::Default)]
    #[case(DirectorySensitivity::IgnoreDirectories)]
    fn relocated_tree_is_equivalent(#[case] directory_sensitivity: DirectorySensitivity) {
        let reference = collect(&output_dir("/work/out"), directory_sensitivity);
        let relocated = collect(&output_dir("/elsewhere/build"), directory_sensitivity);
        assert!(reference.is_equivalent(&relocated));
    }

    #[test]
    fn root_files_are_keyed_by_name_and_missing_is_skipped() {
        let snapshot = FileSystemSnapshot::from_roots(vec![
            file("/work/out/report.txt", 7),
            symlink("/work/out/latest", 8),
            missing("/work/out/gone.txt"),
        ]);
        let fingerprint = collect(&snapshot, DirectorySensitivity::Default);
        assert_eq!(
            paths(&fingerprint),
            vec![
                ("latest".to_string(), hash(8)),
                ("report.txt".to_string(), hash(7)),
            ]
        );
        assert_eq!(fingerprint.root_hashes().len(), 3);
    }

    #[test]
    fn duplicate_absolute_paths_are_fingerprinted_once() {
        let shared = file("/work/out/a.txt", 1);
        let snapshot = FileSystemSnapshot::from_roots(vec![Arc::clone(&shared), shared]);
        let fingerprint = collect(&snapshot, DirectorySensitivity::Default);
        assert_eq!(fingerprint.len(), 1);
    }

    #[test]
    fn permuted_child_order_yields_equivalent_fingerprint() {
        let children = vec![
            file("/work/out/a.txt", 1),
            file("/work/out/b.txt", 2),
            file("/work/out/c.txt", 3),
        ];
        let mut reversed = children.clone();
        reversed.reverse();

        let reference = collect(
            &FileSystemSnapshot::from(dir("/work/out", children)),
            DirectorySensitivity::Default,
        );
        let permuted = collect(
            &FileSystemSnapshot::from(dir("/work/out", reversed)),
            DirectorySensitivity::Default,
        );
        assert!(reference.is_equivalent(&permuted));
    }

    #[test]
    fn shared_interner_reuses_path_strings() {
        let mut interner = HashSetInterner::default();
        let first = RelativePathFingerprintingStrategy::new(&mut interner, DirectorySensitivity::Default)
            .collect_fingerprints(&output_dir("/work/out"));
        let second = RelativePathFingerprintingStrategy::new(&mut interner, DirectorySensitivity::Default)
            .collect_fingerprints(&output_dir("/other/out"));

        let first_path = first.get("classes/A.class")[0].normalized_path();
        let second_path = second.get("classes/A.class")[0].normalized_path();
        assert!(Arc::ptr_eq(first_path, second_path));
        assert_eq!(interner.len(), 5);
    }
}
