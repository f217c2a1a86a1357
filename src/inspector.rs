use crate::error::{Error, Result};
use crate::git::{Git, GitCli};
use crate::listing::{parse_name_status, split_lines};
use crate::types::{ChangedFile, Scope};
use std::path::Path;
use tracing::{debug, instrument};

/// Lists and shows the staged or unstaged changes of a repository
#[derive(Debug, Clone)]
pub struct ChangeSetInspector<G = GitCli> {
    git: G,
    intent_to_add: bool,
}

impl ChangeSetInspector<GitCli> {
    /// Create an inspector for a local git repository
    ///
    /// # Errors
    ///
    /// Returns [`Error::RepositoryNotFound`] if the path is not an existing directory
    #[instrument]
    pub fn new_from_local(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            debug!("Repository path is missing");
            return Err(Error::RepositoryNotFound(path.to_path_buf()));
        }

        Ok(Self::with_git(GitCli::new(path.to_path_buf())))
    }

    /// Run `program` instead of `git` from `PATH`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.git = self.git.with_program(program);
        self
    }
}

impl<G: Git> ChangeSetInspector<G> {
    /// Create an inspector on top of any [`Git`] implementation.
    ///
    /// Intent-to-add staging before working-tree queries is enabled.
    #[must_use]
    pub fn with_git(git: G) -> Self {
        Self {
            git,
            intent_to_add: true,
        }
    }

    /// Whether working-tree queries run [`Self::stage_intent_to_add`] first.
    ///
    /// Turning it off makes every listing query read-only; untracked files
    /// then stay invisible until the caller stages them.
    #[must_use]
    pub fn intent_to_add(mut self, enabled: bool) -> Self {
        self.intent_to_add = enabled;
        self
    }

    /// Stream the full diff of `path` to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the diff process fails
    #[instrument(skip(self))]
    pub fn show_diff(&self, path: &str, scope: Scope) -> Result<()> {
        let mut args = scope.diff_args().to_vec();
        args.extend(["--", path]);
        self.git.run_git_command_inherited(&args)
    }

    /// Mark every untracked file as intent-to-add (`git add -A -N`).
    ///
    /// This writes to the index: new files become visible to working-tree
    /// diffs without their content being staged.
    ///
    /// # Errors
    ///
    /// Returns an error if `git add` fails
    #[instrument(skip(self))]
    pub fn stage_intent_to_add(&self) -> Result<()> {
        self.git.run_git_command(&["add", "-A", "-N"])?;
        debug!("Untracked files marked intent-to-add");
        Ok(())
    }

    /// Paths changed in `scope`, in git's order.
    ///
    /// # Errors
    ///
    /// Returns an error if any git invocation fails
    #[instrument(skip(self))]
    pub fn list_changed_paths(&self, scope: Scope) -> Result<Vec<String>> {
        let output = self.diff_listing(scope, "--name-only")?;
        let paths: Vec<String> = split_lines(&output).map(str::to_string).collect();
        debug!(count = paths.len(), "Listed changed paths");
        Ok(paths)
    }

    /// Raw `STATUS\tPATH` rows for `scope`, in git's order.
    ///
    /// # Errors
    ///
    /// Returns an error if any git invocation fails
    #[instrument(skip(self))]
    pub fn list_changed_paths_with_status(&self, scope: Scope) -> Result<Vec<String>> {
        let output = self.diff_listing(scope, "--name-status")?;
        let rows: Vec<String> = split_lines(&output).map(str::to_string).collect();
        debug!(count = rows.len(), "Listed changed paths with status");
        Ok(rows)
    }

    /// Changed files of `scope` with their status.
    ///
    /// Status and path of each record come from the same `--name-status` row.
    ///
    /// # Errors
    ///
    /// Returns an error if any git invocation fails or a row cannot be parsed
    #[instrument(skip(self))]
    pub fn get_changed_files(&self, scope: Scope) -> Result<Vec<ChangedFile>> {
        let output = self.diff_listing(scope, "--name-status")?;
        let files = parse_name_status(&output, scope)?;
        debug!(count = files.len(), "Collected changed files");
        Ok(files)
    }

    fn diff_listing(&self, scope: Scope, format: &str) -> Result<String> {
        if self.intent_to_add && scope == Scope::WorkingTree {
            self.stage_intent_to_add()?;
        }

        let mut args = scope.diff_args().to_vec();
        args.push(format);
        self.git.run_git_command(&args)
    }
}
