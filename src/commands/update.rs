//! Command: check for system and application updates.
use anyhow::Result;

use crate::cli::{GlobalOpts, UpdateOpts};
use crate::logging::Logger;
use crate::tasks::{Context, update};
use crate::workspace;

/// Run the update command.
///
/// Updates are system-wide, so no workspace resolution happens here.
///
/// # Errors
///
/// Returns an error if the update task fails.
pub fn run(global: &GlobalOpts, opts: &UpdateOpts, log: &Logger) -> Result<()> {
    let root = workspace::config_dir(None);
    let ctx = Context::new(root, Vec::new(), global, log)?;

    let task = update::UpdateSystem {
        update_all: opts.all,
    };
    super::run_tasks_to_completion(&[&task], &ctx, log)
}
