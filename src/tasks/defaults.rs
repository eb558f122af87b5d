use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{Context, Task, TaskResult, TaskStats};
use crate::exec;

/// Import macOS user defaults from each workspace directory's `defaults/`.
///
/// Every `defaults/<domain>.plist` is imported into the preference domain
/// named by its file stem via the `defaults` tool.
pub struct ApplyDefaults;

/// The plist files under `dir/defaults`, sorted by name.
fn plist_files(dir: &Path) -> Vec<PathBuf> {
    let defaults_dir = dir.join("defaults");
    let Ok(entries) = std::fs::read_dir(&defaults_dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "plist"))
        .collect();
    files.sort();
    files
}

impl Task for ApplyDefaults {
    fn name(&self) -> &str {
        "Apply user defaults"
    }

    fn should_run(&self, ctx: &Context<'_>) -> bool {
        ctx.platform.is_macos()
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        let mut stats = TaskStats::new();

        for dir in &ctx.dirs {
            for plist in plist_files(dir) {
                let Some(domain) = plist.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let path = plist.display().to_string();
                let args = ["import", domain, path.as_str()];

                if ctx.dry_run {
                    ctx.log.dry_run(&exec::format_command("defaults", &args));
                    stats.changed += 1;
                    continue;
                }

                ctx.log
                    .info(&format!("$ {}", exec::format_command("defaults", &args)));
                exec::run("defaults", &args)?;
                stats.changed += 1;
            }
        }

        if stats.changed == 0 {
            return Ok(TaskResult::Skipped("no defaults found".to_string()));
        }
        ctx.log.info(&stats.summary(ctx.dry_run));
        if ctx.dry_run {
            return Ok(TaskResult::DryRun);
        }
        Ok(TaskResult::Ok)
    }
}
