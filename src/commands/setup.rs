//! Command: full workspace setup pipeline.
use anyhow::Result;

use crate::cli::{GlobalOpts, SetupOpts};
use crate::logging::Logger;
use crate::tasks::scripts::Suffix;
use crate::tasks::{self, Task, bundle, defaults, scripts, symlinks, update};

/// Run the setup command: update the system once, then for each resolved
/// directory in turn: bundle packages, run the pre hooks, apply defaults and
/// symlinks, and run the post hooks.
///
/// # Errors
///
/// Returns an error if workspace resolution fails or any task fails.
pub fn run(global: &GlobalOpts, opts: &SetupOpts, log: &Logger) -> Result<()> {
    let version = option_env!("NIDI_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("nidi {version}"));

    let ctx = super::resolve_context(&opts.target, global, log)?;

    let update_task = update::UpdateSystem {
        update_all: opts.all,
    };
    tasks::execute(&update_task, &ctx);

    let pipeline: Vec<Box<dyn Task>> = vec![
        Box::new(bundle::InstallBundle {
            cleanup: opts.remove_unlisted,
        }),
        Box::new(scripts::RunScripts {
            suffix: Some(Suffix::Before),
        }),
        Box::new(defaults::ApplyDefaults),
        Box::new(symlinks::ApplySymlinks),
        Box::new(scripts::RunScripts {
            suffix: Some(Suffix::After),
        }),
    ];
    let refs: Vec<&dyn Task> = pipeline.iter().map(AsRef::as_ref).collect();
    super::run_pipeline_per_directory(&refs, &ctx);

    super::report_outcome(log)
}
