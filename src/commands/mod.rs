//! Top-level subcommand orchestration.
pub mod apply_defaults;
pub mod apply_symlinks;
pub mod bundle;
pub mod completions;
pub mod run_scripts;
pub mod setup;
pub mod update;
pub mod version;

use anyhow::Result;

use crate::cli::{GlobalOpts, WorkspaceOpts};
use crate::logging::Logger;
use crate::tasks::{self, Context, Task};
use crate::workspace::{self, Workspace};

/// Resolve the workspace target and build a task execution context.
///
/// # Errors
///
/// Returns an error if the config directory or workspace is invalid, or if
/// the home directory cannot be determined.
pub(crate) fn resolve_context<'a>(
    target: &WorkspaceOpts,
    global: &GlobalOpts,
    log: &'a Logger,
) -> Result<Context<'a>> {
    let root = workspace::config_dir(target.directory.as_deref());
    let ws = Workspace::parse(target.workspace.as_deref());

    log.stage("Resolving workspace");
    log.debug(&format!("config directory: {}", root.display()));
    let dirs = workspace::resolve(&root, &ws)?;
    if ws.is_empty() {
        log.info(&format!("directory: {}", root.display()));
    } else {
        log.info(&format!("workspace: {ws}"));
    }
    for dir in &dirs {
        log.debug(&format!("using {}", dir.display()));
    }

    Context::new(root, dirs, global, log)
}

/// Execute every task in order, print the summary, and bail if any failed.
///
/// # Errors
///
/// Returns an error if one or more tasks recorded a failure.
pub(crate) fn run_tasks_to_completion(
    task_list: &[&dyn Task],
    ctx: &Context<'_>,
    log: &Logger,
) -> Result<()> {
    for task in task_list {
        tasks::execute(*task, ctx);
    }
    report_outcome(log)
}

/// Run the whole pipeline over each directory in turn, so one directory
/// completes before the next begins.
pub fn run_pipeline_per_directory(pipeline: &[&dyn Task], ctx: &Context<'_>) {
    for dir in &ctx.dirs {
        let dir_ctx = ctx.for_directory(dir);
        for task in pipeline {
            tasks::execute(*task, &dir_ctx);
        }
    }
}

/// Print the run summary and bail if any task recorded a failure.
///
/// # Errors
///
/// Returns an error if one or more tasks recorded a failure.
pub(crate) fn report_outcome(log: &Logger) -> Result<()> {
    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} task(s) failed");
    }
    Ok(())
}
