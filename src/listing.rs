//! Parsing of `git diff --name-only` and `git diff --name-status` output.

use crate::error::{Error, Result};
use crate::types::{ChangedFile, Scope};

/// Splits a listing into its rows.
///
/// Empty output gives no rows, a missing final newline keeps the last row
/// and empty rows are skipped. Rows made of whitespace are real paths.
pub fn split_lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().filter(|line| !line.is_empty())
}

/// Parses one `--name-status` row into a [`ChangedFile`].
///
/// Rows are `STATUS\tPATH`, or `STATUS\tOLD\tNEW` for renames and copies.
/// Text after the tab is kept verbatim. Rows without a tab are split on
/// the first run of whitespace.
///
/// # Errors
///
/// Returns [`Error::MalformedStatusLine`] when the row carries no path.
pub fn parse_status_line(line: &str, scope: Scope) -> Result<ChangedFile> {
    let malformed = || Error::MalformedStatusLine(line.to_string());

    let line = line.trim_end_matches(['\r', '\n']);
    let (status, rest) = match line.split_once('\t') {
        Some(split) => split,
        None => {
            let (status, rest) = line
                .trim_start()
                .split_once(char::is_whitespace)
                .ok_or_else(malformed)?;
            (status, rest.trim_start())
        }
    };

    let status = status.split_whitespace().next().ok_or_else(malformed)?;

    let (old_path, path) = match rest.split_once('\t') {
        Some((old, new)) => (Some(old.to_string()), new),
        None => (None, rest),
    };

    if path.is_empty() {
        return Err(malformed());
    }

    Ok(ChangedFile {
        status: status.to_string(),
        path: path.to_string(),
        old_path,
        scope,
    })
}

/// Parses a whole `--name-status` listing, keeping git's row order.
///
/// # Errors
///
/// Fails on the first malformed row; no partial result is returned.
pub fn parse_name_status(output: &str, scope: Scope) -> Result<Vec<ChangedFile>> {
    split_lines(output)
        .map(|line| parse_status_line(line, scope))
        .collect()
}
