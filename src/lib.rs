pub use error::{Error, Result};
pub use git::{Git, GitCli};
pub use inspector::ChangeSetInspector;
pub use types::{ChangedFile, FileStatus, Scope};

use std::path::Path;

mod error;
mod git;
pub mod inspector;
pub mod listing;
mod types;

/// Creates a new `ChangeSetInspector` for a local repository.
///
/// # Arguments
///
/// * `repo_path`: The path to the local Git repository (or any directory inside it).
///
/// # Errors
///
/// Returns an error if the repository path does not exist.
pub fn new(repo_path: &Path) -> Result<ChangeSetInspector<GitCli>> {
    ChangeSetInspector::new_from_local(repo_path)
}
