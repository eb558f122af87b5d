//! Domain-specific error types.
//!
//! Workspace resolution returns typed [`WorkspaceError`]s; command handlers
//! at the CLI boundary convert them to [`anyhow::Error`] via `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from workspace validation and resolution.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// The config directory contains a `workspaces/` directory, but no
    /// workspace was given on the command line.
    #[error("Missing required parameter 'workspace'.")]
    MissingWorkspace,

    /// The named workspace is itself a workspace container, which is invalid
    /// to operate on directly.
    #[error("Cannot setup parent of a workspace.")]
    WorkspaceIsParent,

    /// The given path does not exist or is not a directory.
    #[error("Not a directory: {}.", .0.display())]
    InvalidDirectory(PathBuf),
}
