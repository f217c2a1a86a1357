use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// Trait defining Git operations required by the library
pub trait Git {
    /// Run a Git command with the given arguments and capture its stdout.
    ///
    /// The output is returned as printed, including the trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be launched, exits with a non-zero
    /// status or prints non UTF-8 output
    fn run_git_command(&self, args: &[&str]) -> Result<String>;

    /// Run a Git command with stdout and stderr attached to the caller's terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be launched or exits with a non-zero status
    fn run_git_command_inherited(&self, args: &[&str]) -> Result<()>;
}

/// Implementation of Git operations using the local Git CLI
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    repo_path: PathBuf,
}

impl GitCli {
    /// Creates a new `GitCli` instance with the given repository path
    #[must_use]
    pub fn new(repo_path: PathBuf) -> Self {
        Self {
            program: "git".to_string(),
            repo_path,
        }
    }

    /// Use another executable instead of `git` from `PATH`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(&self.repo_path)
            .stdin(Stdio::null());
        cmd
    }
}

impl Git for GitCli {
    #[instrument(skip(self), fields(program = %self.program, repo_path = %self.repo_path.display()))]
    fn run_git_command(&self, args: &[&str]) -> Result<String> {
        let output = self
            .command(args)
            .output()
            .map_err(|e| Error::GitCommandError(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            debug!(status = %output.status, error = %error, "Git command failed");
            return Err(Error::GitCommandError(format!(
                "{} {} ({}): {}",
                self.program,
                args.join(" "),
                output.status,
                error.trim()
            )));
        }

        let result =
            String::from_utf8(output.stdout).map_err(|e| Error::GitCommandError(e.to_string()))?;

        debug!(
            output_length = result.len(),
            "Git command completed successfully"
        );
        Ok(result)
    }

    #[instrument(skip(self), fields(program = %self.program, repo_path = %self.repo_path.display()))]
    fn run_git_command_inherited(&self, args: &[&str]) -> Result<()> {
        let status = self
            .command(args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::GitCommandError(format!("failed to run {}: {e}", self.program)))?;

        if !status.success() {
            debug!(status = %status, "Streamed git command failed");
            return Err(Error::GitCommandError(format!(
                "{} {} ({status})",
                self.program,
                args.join(" ")
            )));
        }

        debug!("Streamed git command completed successfully");
        Ok(())
    }
}
