use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::exec;

/// Install packages from each workspace directory's `Brewfile` via
/// `brew bundle`, optionally removing packages the Brewfile does not list.
pub struct InstallBundle {
    /// Remove installed packages that are not in the Brewfile.
    pub cleanup: bool,
}

impl Task for InstallBundle {
    fn name(&self) -> &str {
        "Install packages"
    }

    fn should_run(&self, _ctx: &Context<'_>) -> bool {
        exec::which("brew")
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        let mut bundled = 0u32;

        for dir in &ctx.dirs {
            let brewfile = dir.join("Brewfile");
            if !brewfile.is_file() {
                ctx.log
                    .debug(&format!("no Brewfile in {}", dir.display()));
                continue;
            }
            bundled += 1;

            let mut args = vec!["bundle", "--file", "Brewfile"];
            if ctx.debug {
                args.push("--verbose");
            }

            if ctx.dry_run {
                ctx.log.dry_run(&exec::format_command("brew", &args));
                if self.cleanup {
                    ctx.log.dry_run(&exec::format_command(
                        "brew",
                        &["bundle", "cleanup", "--force", "--file", "Brewfile"],
                    ));
                }
                continue;
            }

            ctx.log
                .info(&format!("$ {}", exec::format_command("brew", &args)));
            exec::run_streamed(Some(dir), "brew", &args)?;

            if self.cleanup {
                let cleanup_args = ["bundle", "cleanup", "--force", "--file", "Brewfile"];
                ctx.log
                    .info(&format!("$ {}", exec::format_command("brew", &cleanup_args)));
                exec::run_streamed(Some(dir), "brew", &cleanup_args)?;
            }
        }

        if bundled == 0 {
            return Ok(TaskResult::Skipped("no Brewfile found".to_string()));
        }
        if ctx.dry_run {
            return Ok(TaskResult::DryRun);
        }
        Ok(TaskResult::Ok)
    }
}
