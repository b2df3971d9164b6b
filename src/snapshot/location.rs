use std::path::Path;
use std::sync::Arc;

use derive_more::Display;
use snafu::{ResultExt, Snafu, ensure};

use crate::path::{CaseSensitivity, RelativePath, SEPARATOR};
use crate::snapshot::{ChildLookup, ChildMap, ChildMapError, HashCode, MerkleDirectoryHasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FileType {
    #[display("file")]
    RegularFile,
    #[display("directory")]
    Directory,
    #[display("missing file")]
    Missing,
    #[display("symlink")]
    Symlink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotKind {
    RegularFile {
        hash: HashCode,
    },
    Directory {
        hash: HashCode,
        children: ChildMap<Arc<LocationSnapshot>>,
    },
    Missing,
    /// A symbolic link; `hash` is the content hash of what it points to.
    Symlink {
        hash: HashCode,
    },
}

/// Immutable snapshot of a single filesystem location and, for directories,
/// everything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSnapshot {
    absolute_path: String,
    name: String,
    kind: SnapshotKind,
}

impl LocationSnapshot {
    pub fn regular_file(
        absolute_path: impl Into<String>,
        hash: HashCode,
    ) -> Result<Self, SnapshotError> {
        Self::new(absolute_path.into(), SnapshotKind::RegularFile { hash })
    }

    pub fn symlink(absolute_path: impl Into<String>, hash: HashCode) -> Result<Self, SnapshotError> {
        Self::new(absolute_path.into(), SnapshotKind::Symlink { hash })
    }

    pub fn missing(absolute_path: impl Into<String>) -> Result<Self, SnapshotError> {
        Self::new(absolute_path.into(), SnapshotKind::Missing)
    }

    /// Creates a directory snapshot with a hash computed by the caller.
    pub fn directory(
        absolute_path: impl Into<String>,
        hash: HashCode,
        children: Vec<Arc<LocationSnapshot>>,
        case_sensitivity: CaseSensitivity,
    ) -> Result<Self, SnapshotError> {
        let absolute_path = absolute_path.into();
        let children = Self::child_map(&absolute_path, children, case_sensitivity)?;
        Self::new(absolute_path, SnapshotKind::Directory { hash, children })
    }

    /// Creates a directory snapshot whose hash combines the names and hashes of its children.
    pub fn merkle_directory(
        absolute_path: impl Into<String>,
        children: Vec<Arc<LocationSnapshot>>,
        case_sensitivity: CaseSensitivity,
    ) -> Result<Self, SnapshotError> {
        let absolute_path = absolute_path.into();
        let children = Self::child_map(&absolute_path, children, case_sensitivity)?;
        let mut hasher = MerkleDirectoryHasher::default();
        for (name, child) in children.iter() {
            hasher.visit(name, child.hash());
        }
        let hash = hasher.finish();
        Self::new(absolute_path, SnapshotKind::Directory { hash, children })
    }

    fn new(absolute_path: String, kind: SnapshotKind) -> Result<Self, SnapshotError> {
        ensure!(
            absolute_path.starts_with(SEPARATOR) || Path::new(&absolute_path).is_absolute(),
            NotAbsolutePathSnafu {
                absolute_path: absolute_path.clone()
            }
        );
        let name = name_of(&absolute_path).to_string();
        Ok(Self {
            absolute_path,
            name,
            kind,
        })
    }

    fn child_map(
        directory_path: &str,
        children: Vec<Arc<LocationSnapshot>>,
        case_sensitivity: CaseSensitivity,
    ) -> Result<ChildMap<Arc<LocationSnapshot>>, SnapshotError> {
        for child in &children {
            ensure!(
                !child.name.is_empty() && parent_of(&child.absolute_path) == trim_path(directory_path),
                ChildPathMismatchSnafu {
                    directory_path: directory_path.to_string(),
                    child_path: child.absolute_path.clone(),
                }
            );
        }
        ChildMap::new(
            children
                .into_iter()
                .map(|child| (child.name.clone(), child)),
            case_sensitivity,
        )
        .context(ChildrenSnafu {
            directory_path: directory_path.to_string(),
        })
    }

    pub fn absolute_path(&self) -> &str {
        &self.absolute_path
    }

    /// Final segment of the absolute path.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &SnapshotKind {
        &self.kind
    }

    pub fn file_type(&self) -> FileType {
        match self.kind {
            SnapshotKind::RegularFile { .. } => FileType::RegularFile,
            SnapshotKind::Directory { .. } => FileType::Directory,
            SnapshotKind::Missing => FileType::Missing,
            SnapshotKind::Symlink { .. } => FileType::Symlink,
        }
    }

    pub fn hash(&self) -> HashCode {
        match &self.kind {
            SnapshotKind::RegularFile { hash }
            | SnapshotKind::Directory { hash, .. }
            | SnapshotKind::Symlink { hash } => *hash,
            SnapshotKind::Missing => HashCode::missing_file_signature(),
        }
    }

    pub fn children(&self) -> Option<&ChildMap<Arc<LocationSnapshot>>> {
        match &self.kind {
            SnapshotKind::Directory { children, .. } => Some(children),
            SnapshotKind::RegularFile { .. } | SnapshotKind::Missing | SnapshotKind::Symlink { .. } => {
                None
            }
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.kind, SnapshotKind::Missing)
    }

    pub fn has_descendants(&self) -> bool {
        self.children().is_some_and(|children| !children.is_empty())
    }

    /// Looks up the snapshot stored at `path` below this one.
    pub fn snapshot_at<'s>(self: &'s Arc<Self>, path: RelativePath<'_>) -> Option<&'s Arc<Self>> {
        if path.is_empty() {
            return Some(self);
        }
        match self.children()?.with_node(path) {
            ChildLookup::ExactMatch { child } => Some(child),
            ChildLookup::DescendantOfChild {
                path_in_child,
                child,
            } => child.snapshot_at(path_in_child),
            ChildLookup::AncestorOfChild { .. } | ChildLookup::Unrelated => None,
        }
    }

    /// Looks up the snapshot stored at `absolute_path`, which has to lie below this one.
    pub fn snapshot_at_absolute_path<'s>(self: &'s Arc<Self>, absolute_path: &str) -> Option<&'s Arc<Self>> {
        let case_sensitivity = self
            .children()
            .map(ChildMap::case_sensitivity)
            .unwrap_or_default();
        let path = RelativePath::from_absolute_path(&self.absolute_path, absolute_path, case_sensitivity)?;
        self.snapshot_at(path)
    }

    /// Like [`Self::snapshot_at`], but also reports a partial view when `path`
    /// ends somewhere inside a multi-segment child key.
    pub fn node_at<'s>(self: &'s Arc<Self>, path: RelativePath<'_>) -> NodeView<'s> {
        if path.is_empty() {
            return NodeView::Snapshot(self);
        }
        let Some(children) = self.children() else {
            return NodeView::Empty;
        };
        match children.with_node(path) {
            ChildLookup::ExactMatch { child } => NodeView::Snapshot(child),
            ChildLookup::DescendantOfChild {
                path_in_child,
                child,
            } => child.node_at(path_in_child),
            ChildLookup::AncestorOfChild {
                path_to_child,
                child,
            } => NodeView::PartialChild {
                path_to_child,
                child,
            },
            ChildLookup::Unrelated => NodeView::Empty,
        }
    }
}

/// Result of [`LocationSnapshot::node_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeView<'a> {
    Empty,
    Snapshot(&'a Arc<LocationSnapshot>),
    /// The looked-up path has no snapshot of its own, but `child` lives
    /// `path_to_child` below it.
    PartialChild {
        path_to_child: RelativePath<'a>,
        child: &'a Arc<LocationSnapshot>,
    },
}

impl<'a> NodeView<'a> {
    pub fn snapshot(&self) -> Option<&'a Arc<LocationSnapshot>> {
        match *self {
            NodeView::Snapshot(snapshot) => Some(snapshot),
            NodeView::Empty | NodeView::PartialChild { .. } => None,
        }
    }

    pub fn root_snapshots(&self) -> impl Iterator<Item = &'a Arc<LocationSnapshot>> + use<'a> {
        match *self {
            NodeView::Empty => None,
            NodeView::Snapshot(snapshot) => Some(snapshot),
            NodeView::PartialChild { child, .. } => Some(child),
        }
        .into_iter()
    }

    pub fn has_descendants(&self) -> bool {
        match self {
            NodeView::Empty => false,
            NodeView::Snapshot(snapshot) => snapshot.has_descendants(),
            NodeView::PartialChild { .. } => true,
        }
    }
}

fn trim_path(path: &str) -> &str {
    path.trim_end_matches([SEPARATOR, '\\'])
}

fn name_of(absolute_path: &str) -> &str {
    let trimmed = trim_path(absolute_path);
    match trimmed.rfind([SEPARATOR, '\\']) {
        Some(index) => &trimmed[index + 1..],
        None => trimmed,
    }
}

fn parent_of(absolute_path: &str) -> &str {
    let trimmed = trim_path(absolute_path);
    match trimmed.rfind([SEPARATOR, '\\']) {
        Some(index) => trim_path(&trimmed[..index]),
        None => "",
    }
}

#[derive(Debug, Snafu)]
pub enum SnapshotError {
    #[snafu(display("Snapshot path '{}' is not absolute", absolute_path))]
    NotAbsolutePathError { absolute_path: String },
    #[snafu(display(
        "Child '{}' does not live directly inside directory '{}'",
        child_path,
        directory_path
    ))]
    ChildPathMismatchError {
        directory_path: String,
        child_path: String,
    },
    #[snafu(display("Invalid children for directory '{}'", directory_path))]
    ChildrenError {
        directory_path: String,
        source: ChildMapError,
    },
}
