//! Workspace resolution: config directory discovery, dotted workspace
//! parsing, validation, and expansion into the directories a command
//! operates on.
//!
//! A config tree looks like:
//!
//! ```text
//! - workspaces/
//!   -> shared/
//!   -> home/
//!     => workspaces/
//!       -> shared/
//!       -> desktop/
//!       -> laptop/
//! ```
//!
//! The workspace `"home.laptop"` expands to `workspaces/shared`,
//! `workspaces/home`, `workspaces/home/workspaces/shared`, and
//! `workspaces/home/workspaces/laptop` (those that exist).

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::WorkspaceError;

/// Name of a workspace to operate on, with children separated by `"."`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace(Vec<String>);

impl Workspace {
    /// Parse a dotted workspace spec; `None` and empty strings yield the
    /// empty workspace.
    #[must_use]
    pub fn parse(spec: Option<&str>) -> Self {
        let components = spec
            .unwrap_or_default()
            .split('.')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self(components)
    }

    /// Whether no workspace was named.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The workspace levels, outermost first.
    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Resolve the configuration directory.
///
/// An explicit override wins; otherwise the first existing of
/// `$XDG_CONFIG_HOME/nidi/config` and `~/.nidi` is used, falling back to
/// `~/.nidi` so validation can report it when neither exists.
#[must_use]
pub fn config_dir(overridden: Option<&Path>) -> PathBuf {
    if let Some(dir) = overridden {
        return dir.to_path_buf();
    }

    let xdg_config = std::env::var("XDG_CONFIG_HOME").map_or_else(
        |_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        },
        PathBuf::from,
    );
    let home_dot = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".nidi");

    let candidate = xdg_config.join("nidi").join("config");
    if candidate.is_dir() { candidate } else { home_dot }
}

/// Absolute path to each component of the workspace, outermost first.
///
/// For example, the workspace `"home.laptop"` maps to
/// `workspaces/home` and `workspaces/home/workspaces/laptop`.
fn component_directories(root: &Path, workspace: &Workspace) -> Vec<PathBuf> {
    workspace
        .components()
        .iter()
        .fold(Vec::new(), |mut dirs, name| {
            let previous = dirs.last().map_or_else(|| root.to_path_buf(), Clone::clone);
            dirs.push(previous.join("workspaces").join(name));
            dirs
        })
}

/// Validate the config directory and workspace before use.
///
/// # Errors
///
/// Returns [`WorkspaceError::InvalidDirectory`] when the config directory or
/// any workspace component is missing, [`WorkspaceError::MissingWorkspace`]
/// when the config tree requires a workspace but none was named, and
/// [`WorkspaceError::WorkspaceIsParent`] when the named workspace is itself
/// a container of further workspaces.
pub fn validate(root: &Path, workspace: &Workspace) -> Result<(), WorkspaceError> {
    if !root.is_dir() {
        return Err(WorkspaceError::InvalidDirectory(root.to_path_buf()));
    }
    if workspace.is_empty() && root.join("workspaces").exists() {
        return Err(WorkspaceError::MissingWorkspace);
    }

    let components = component_directories(root, workspace);
    if let Some(missing) = components.iter().find(|d| !d.is_dir()) {
        return Err(WorkspaceError::InvalidDirectory(missing.clone()));
    }
    if let Some(last) = components.last()
        && last.join("workspaces").is_dir()
    {
        return Err(WorkspaceError::WorkspaceIsParent);
    }

    Ok(())
}

/// All directories matching the workspace: each level's `workspaces/shared`
/// plus its named directory, keeping only those that exist. With no
/// workspace, the config directory itself.
#[must_use]
pub fn directories(root: &Path, workspace: &Workspace) -> Vec<PathBuf> {
    if workspace.is_empty() {
        return vec![root.to_path_buf()];
    }

    let candidates = workspace
        .components()
        .iter()
        .fold(Vec::new(), |mut dirs: Vec<PathBuf>, name| {
            // Each level nests under the previously named directory.
            let previous = dirs.last().map_or_else(|| root.to_path_buf(), Clone::clone);
            let container = previous.join("workspaces");
            dirs.push(container.join("shared"));
            dirs.push(container.join(name));
            dirs
        });

    candidates.into_iter().filter(|d| d.is_dir()).collect()
}

/// Validate and expand a workspace in one step.
///
/// # Errors
///
/// Propagates any [`WorkspaceError`] from [`validate`].
pub fn resolve(root: &Path, workspace: &Workspace) -> Result<Vec<PathBuf>, WorkspaceError> {
    validate(root, workspace)?;
    Ok(directories(root, workspace))
}
