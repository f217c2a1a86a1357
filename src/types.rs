use serde::{Deserialize, Serialize};

/// Which side of the index a query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Changes recorded in the index, compared against `HEAD`.
    Staged,
    /// Changes in the working tree not yet added to the index.
    WorkingTree,
}

impl Scope {
    #[must_use]
    pub const fn from_staged(staged: bool) -> Self {
        if staged {
            Self::Staged
        } else {
            Self::WorkingTree
        }
    }

    #[must_use]
    pub const fn is_staged(self) -> bool {
        matches!(self, Self::Staged)
    }

    /// Arguments for `git diff` selecting this scope.
    #[must_use]
    pub const fn diff_args(self) -> &'static [&'static str] {
        match self {
            Self::Staged => &["diff", "--staged"],
            Self::WorkingTree => &["diff"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    TypeChanged,
    Unmerged,
    Unknown,
}

impl FileStatus {
    /// Classifies a `--name-status` token by its leading letter (`R100` is a rename).
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.chars().next() {
            Some('A') => Self::Added,
            Some('M') => Self::Modified,
            Some('D') => Self::Deleted,
            Some('R') => Self::Renamed,
            Some('C') => Self::Copied,
            Some('T') => Self::TypeChanged,
            Some('U') => Self::Unmerged,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Status token exactly as git printed it.
    pub status: String,
    pub path: String,
    /// Source path of a rename or copy.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub old_path: Option<String>,
    pub scope: Scope,
}

impl ChangedFile {
    #[must_use]
    pub fn kind(&self) -> FileStatus {
        FileStatus::from_code(&self.status)
    }
}
