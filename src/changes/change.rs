use std::fmt;
use std::sync::Arc;

use derive_more::Display;

use crate::fingerprint::LocationFingerprint;
use crate::snapshot::FileType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ChangeKind {
    #[display("added")]
    Added,
    #[display("removed")]
    Removed,
    #[display("modified")]
    Modified,
}

/// What a [`Change`] is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeTarget {
    /// A whole output property appeared or disappeared.
    Property { name: Arc<str> },
    /// A single entry inside a property's snapshot.
    File {
        normalized_path: Arc<str>,
        absolute_path: String,
        file_type: FileType,
    },
}

/// A single change event, tagged with the property it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    kind: ChangeKind,
    target: ChangeTarget,
    context: Arc<str>,
}

impl Change {
    pub fn property(kind: ChangeKind, name: &str) -> Self {
        let name: Arc<str> = Arc::from(name);
        Self {
            kind,
            target: ChangeTarget::Property {
                name: Arc::clone(&name),
            },
            context: name,
        }
    }

    pub fn file(kind: ChangeKind, fingerprint: &LocationFingerprint, context: &Arc<str>) -> Self {
        Self {
            kind,
            target: ChangeTarget::File {
                normalized_path: Arc::clone(fingerprint.normalized_path()),
                absolute_path: fingerprint.absolute_path().to_string(),
                file_type: fingerprint.file_type(),
            },
            context: Arc::clone(context),
        }
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn target(&self) -> &ChangeTarget {
        &self.target
    }

    /// Name of the property the change belongs to.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Normalized path of a file-level change, `None` for property-level ones.
    pub fn normalized_path(&self) -> Option<&str> {
        match &self.target {
            ChangeTarget::File {
                normalized_path, ..
            } => Some(&**normalized_path),
            ChangeTarget::Property { .. } => None,
        }
    }

    pub fn absolute_path(&self) -> Option<&str> {
        match &self.target {
            ChangeTarget::File { absolute_path, .. } => Some(absolute_path.as_str()),
            ChangeTarget::Property { .. } => None,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            ChangeKind::Modified => "has changed".to_string(),
            kind => format!("has been {kind}"),
        };
        match &self.target {
            ChangeTarget::Property { name } => write!(f, "Output property '{name}' {verb}."),
            ChangeTarget::File {
                absolute_path,
                file_type,
                ..
            } => write!(
                f,
                "Output property '{}' {file_type} {absolute_path} {verb}.",
                self.context
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::hash;
    use rstest::*;

    #[rstest]
    #[case(ChangeKind::Added, "Output property 'classes' has been added.")]
    #[case(ChangeKind::Removed, "Output property 'classes' has been removed.")]
    fn property_change_message(#[case] kind: ChangeKind, #[case] expected: &str) {
        let change = Change::property(kind, "classes");
        assert_eq!(change.to_string(), expected);
        assert_eq!(change.context(), "classes");
        assert_eq!(change.normalized_path(), None);
    }

    #[rstest]
    #[case(ChangeKind::Added, "Output property 'out' file /work/out/a.txt has been added.")]
    #[case(ChangeKind::Removed, "Output property 'out' file /work/out/a.txt has been removed.")]
    #[case(ChangeKind::Modified, "Output property 'out' file /work/out/a.txt has changed.")]
    fn file_change_message(#[case] kind: ChangeKind, #[case] expected: &str) {
        let fingerprint = LocationFingerprint::new(
            Arc::from("a.txt"),
            "/work/out/a.txt",
            FileType::RegularFile,
            hash(1),
        );
        let change = Change::file(kind, &fingerprint, &Arc::from("out"));
        assert_eq!(change.to_string(), expected);
        assert_eq!(change.normalized_path(), Some("a.txt"));
        assert_eq!(change.absolute_path(), Some("/work/out/a.txt"));
    }
}
