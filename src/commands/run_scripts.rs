//! Command: run a workspace's hook scripts.
use anyhow::Result;

use crate::cli::{GlobalOpts, ScriptsOpts};
use crate::logging::Logger;
use crate::tasks::scripts::RunScripts;

/// Run the run-scripts command.
///
/// # Errors
///
/// Returns an error if workspace resolution fails or a script fails.
pub fn run(global: &GlobalOpts, opts: &ScriptsOpts, log: &Logger) -> Result<()> {
    let ctx = super::resolve_context(&opts.target, global, log)?;
    let task = RunScripts {
        suffix: opts.suffix,
    };
    super::run_tasks_to_completion(&[&task], &ctx, log)
}
