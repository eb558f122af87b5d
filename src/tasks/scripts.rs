use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{Context, Task, TaskResult, TaskStats};
use crate::exec;

/// Hook phase a script belongs to, taken from its file name suffix
/// (`10-install-before.sh` runs in the `before` phase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Suffix {
    /// Scripts that run before defaults and symlinks are applied.
    Before,
    /// Scripts that run after defaults and symlinks are applied.
    After,
}

impl Suffix {
    /// The file-name suffix marking scripts of this phase.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Before => "-before",
            Self::After => "-after",
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// Run executable hook scripts from each workspace directory's `scripts/`.
pub struct RunScripts {
    /// Phase to run; both phases in order when `None`.
    pub suffix: Option<Suffix>,
}

impl RunScripts {
    fn phases(&self) -> Vec<Suffix> {
        self.suffix
            .map_or_else(|| vec![Suffix::Before, Suffix::After], |s| vec![s])
    }

    /// Collect the executable scripts of `phase` in `dir`, sorted by name.
    fn scripts_for(dir: &Path, phase: Suffix) -> Vec<PathBuf> {
        let scripts_dir = dir.join("scripts");
        let Ok(entries) = std::fs::read_dir(&scripts_dir) else {
            return Vec::new();
        };
        let mut scripts: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_executable(p))
            .filter(|p| {
                p.file_stem()
                    .and_then(|s| s.to_str())
                    .is_some_and(|stem| stem.ends_with(phase.marker()))
            })
            .collect();
        scripts.sort();
        scripts
    }
}

impl Task for RunScripts {
    fn name(&self) -> &str {
        match self.suffix {
            Some(Suffix::Before) => "Run pre-setup scripts",
            Some(Suffix::After) => "Run post-setup scripts",
            None => "Run scripts",
        }
    }

    fn should_run(&self, _ctx: &Context<'_>) -> bool {
        true
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        let mut stats = TaskStats::new();

        for phase in self.phases() {
            for dir in &ctx.dirs {
                for script in Self::scripts_for(dir, phase) {
                    let display = script
                        .strip_prefix(dir)
                        .map_or_else(|_| script.display().to_string(), |r| {
                            format!("./{}", r.display())
                        });

                    if ctx.dry_run {
                        ctx.log.dry_run(&display);
                        stats.changed += 1;
                        continue;
                    }

                    ctx.log.info(&format!("$ {}", exec::escape_argument(&display)));
                    exec::run_streamed(Some(dir), &script.display().to_string(), &[])?;
                    stats.changed += 1;
                }
            }
        }

        if stats.changed == 0 {
            return Ok(TaskResult::Skipped("no scripts found".to_string()));
        }
        ctx.log.info(&format!("ran {} script(s)", stats.changed));
        if ctx.dry_run {
            return Ok(TaskResult::DryRun);
        }
        Ok(TaskResult::Ok)
    }
}

/// Whether the file at `path` has any execute bit set.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt as _;
    std::fs::metadata(path).is_ok_and(|m| m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    false
}
