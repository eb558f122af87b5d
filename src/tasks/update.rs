use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::exec;

/// Check and apply system, package-manager, and app-store updates.
pub struct UpdateSystem {
    /// Also reinstall casks that auto-update themselves.
    pub update_all: bool,
}

/// Marker line `softwareupdate --list` prints when updates exist.
const UPDATE_NEEDLE: &str = "Software Update found the following new or updated software:";

impl UpdateSystem {
    /// Check for macOS system updates and tell the user how to install them.
    fn system_update(ctx: &Context<'_>) -> Result<()> {
        ctx.log.info("checking for system updates...");

        let mut args = vec!["--list"];
        if ctx.debug {
            args.push("--verbose");
        }
        if ctx.dry_run {
            ctx.log.dry_run(&exec::format_command("softwareupdate", &args));
            return Ok(());
        }

        let result = exec::run_unchecked("softwareupdate", &args)?;
        if result.stdout.contains(UPDATE_NEEDLE) || result.stderr.contains(UPDATE_NEEDLE) {
            ctx.log.warn(
                "system updates available; run: sudo softwareupdate --install --all --restart",
            );
        } else {
            ctx.log.info("no new software available");
        }
        Ok(())
    }

    /// Update brew itself and upgrade installed formulae and casks.
    fn brew_update(&self, ctx: &Context<'_>) -> Result<()> {
        let mut update_args = vec!["update"];
        let mut upgrade_args = vec!["upgrade"];
        if ctx.debug {
            update_args.push("--verbose");
            upgrade_args.push("--verbose");
        }

        if ctx.dry_run {
            ctx.log.dry_run(&exec::format_command("brew", &update_args));
            ctx.log.dry_run(&exec::format_command("brew", &upgrade_args));
            if self.update_all {
                ctx.log
                    .dry_run("brew reinstall (casks with auto-update enabled)");
            }
            return Ok(());
        }

        ctx.log
            .info(&format!("$ {}", exec::format_command("brew", &update_args)));
        exec::run_streamed(None, "brew", &update_args)?;

        ctx.log
            .info(&format!("$ {}", exec::format_command("brew", &upgrade_args)));
        exec::run_streamed(None, "brew", &upgrade_args)?;

        if self.update_all {
            reinstall_outdated_casks(ctx)?;
        }
        Ok(())
    }

    /// Upgrade apps installed from the App Store.
    fn app_store_update(ctx: &Context<'_>) -> Result<()> {
        if ctx.dry_run {
            ctx.log.dry_run("mas upgrade");
            return Ok(());
        }
        ctx.log.info("$ mas upgrade");
        exec::run_streamed(None, "mas", &["upgrade"])?;
        Ok(())
    }
}

/// Reinstall every outdated cask, including those marked auto-update, which
/// `brew upgrade` skips.
fn reinstall_outdated_casks(ctx: &Context<'_>) -> Result<()> {
    let outdated = exec::run_unchecked("brew", &["outdated", "--cask", "--greedy", "--verbose"])?;

    let casks: Vec<&str> = outdated
        .stdout
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.contains("(latest)"))
        .filter_map(|line| line.split_whitespace().next())
        .collect();

    if casks.is_empty() {
        ctx.log.info("no outdated casks");
        return Ok(());
    }

    for cask in casks {
        let name = format!("homebrew/cask/{cask}");
        let args = ["reinstall", name.as_str()];
        ctx.log
            .info(&format!("$ {}", exec::format_command("brew", &args)));
        exec::run_streamed(None, "brew", &args)?;
    }
    Ok(())
}

impl Task for UpdateSystem {
    fn name(&self) -> &str {
        "Update system"
    }

    fn should_run(&self, _ctx: &Context<'_>) -> bool {
        true
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        let mut ran_any = false;

        if ctx.platform.is_macos() && exec::which("softwareupdate") {
            Self::system_update(ctx)?;
            ran_any = true;
        }
        if exec::which("brew") {
            self.brew_update(ctx)?;
            ran_any = true;
        }
        if ctx.platform.is_macos() && exec::which("mas") {
            Self::app_store_update(ctx)?;
            ran_any = true;
        }

        if !ran_any {
            return Ok(TaskResult::Skipped("no supported update tools found".to_string()));
        }
        if ctx.dry_run {
            return Ok(TaskResult::DryRun);
        }
        Ok(TaskResult::Ok)
    }
}
