//! Command: install packages from a workspace's Brewfile.
use anyhow::Result;

use crate::cli::{BundleOpts, GlobalOpts};
use crate::logging::Logger;
use crate::tasks::bundle::InstallBundle;

/// Run the bundle command.
///
/// # Errors
///
/// Returns an error if workspace resolution fails or the task fails.
pub fn run(global: &GlobalOpts, opts: &BundleOpts, log: &Logger) -> Result<()> {
    let ctx = super::resolve_context(&opts.target, global, log)?;
    let task = InstallBundle {
        cleanup: opts.remove_unlisted,
    };
    super::run_tasks_to_completion(&[&task], &ctx, log)
}
