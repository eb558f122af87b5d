//! Command: apply user defaults from a workspace.
use anyhow::Result;

use crate::cli::{GlobalOpts, WorkspaceOpts};
use crate::logging::Logger;
use crate::tasks::defaults::ApplyDefaults;

/// Run the apply-defaults command.
///
/// # Errors
///
/// Returns an error if workspace resolution fails or the task fails.
pub fn run(global: &GlobalOpts, opts: &WorkspaceOpts, log: &Logger) -> Result<()> {
    let ctx = super::resolve_context(opts, global, log)?;
    super::run_tasks_to_completion(&[&ApplyDefaults], &ctx, log)
}
