//! Named tasks that orchestrate the workspace pipeline.
pub mod bundle;
pub mod defaults;
pub mod scripts;
pub mod symlinks;
pub mod update;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::logging::{Logger, TaskStatus};
use crate::platform::Platform;

/// Result of a single task execution.
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task was skipped (nothing to do, or a required tool is missing).
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// Counters for tasks that process many items.
#[derive(Debug, Default)]
pub struct TaskStats {
    /// Number of items changed or applied.
    pub changed: u32,
    /// Number of items already in the correct state.
    pub already_ok: u32,
    /// Number of items skipped.
    pub skipped: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string (e.g. "3 changed, 10 already ok, 1 skipped").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        if self.skipped > 0 {
            format!(
                "{} {verb}, {} already ok, {} skipped",
                self.changed, self.already_ok, self.skipped
            )
        } else {
            format!("{} {verb}, {} already ok", self.changed, self.already_ok)
        }
    }
}

/// Shared execution context for tasks.
#[derive(Debug)]
pub struct Context<'a> {
    /// The resolved configuration directory.
    pub root: PathBuf,
    /// The workspace directories to operate on, outermost first.
    pub dirs: Vec<PathBuf>,
    /// The user's home directory.
    pub home: PathBuf,
    /// Detected platform.
    pub platform: Platform,
    /// Logger for console/file output and task recording.
    pub log: &'a Logger,
    /// Whether to preview changes without applying them.
    pub dry_run: bool,
    /// Whether debug output (and verbose subprocess flags) are enabled.
    pub debug: bool,
}

impl<'a> Context<'a> {
    /// Build a context from a resolved workspace and global options.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new(
        root: PathBuf,
        dirs: Vec<PathBuf>,
        global: &GlobalOpts,
        log: &'a Logger,
    ) -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(Self {
            root,
            dirs,
            home,
            platform: Platform::detect(),
            log,
            dry_run: global.dry_run,
            debug: global.debug,
        })
    }

    /// A context scoped to a single workspace directory.
    #[must_use]
    pub fn for_directory(&self, dir: &Path) -> Self {
        Self {
            root: self.root.clone(),
            dirs: vec![dir.to_path_buf()],
            home: self.home.clone(),
            platform: self.platform,
            log: self.log,
            dry_run: self.dry_run,
            debug: self.debug,
        }
    }
}

/// A named, executable task.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task should run on the current platform/invocation.
    fn should_run(&self, ctx: &Context<'_>) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task fails, such as when system commands fail
    /// or file operations are not permitted.
    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult>;
}

/// Execute a task, recording the result in the logger.
pub fn execute(task: &dyn Task, ctx: &Context<'_>) {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return;
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use test_helpers::make_context;

    /// A mock task for testing `execute()`.
    struct MockTask {
        name: &'static str,
        should_run: bool,
        result: Result<TaskResult, String>,
    }

    impl Task for MockTask {
        fn name(&self) -> &str {
            self.name
        }
        fn should_run(&self, _ctx: &Context<'_>) -> bool {
            self.should_run
        }
        fn run(&self, _ctx: &Context<'_>) -> Result<TaskResult> {
            self.result.clone().map_err(|s| anyhow::anyhow!("{s}"))
        }
    }

    fn run_mock(task: &MockTask) -> usize {
        let log = Logger::new("test");
        let tmp = std::env::temp_dir();
        let ctx = make_context(&tmp, vec![], &log);
        execute(task, &ctx);
        log.failure_count()
    }

    #[test]
    fn execute_skips_non_applicable_task() {
        let failures = run_mock(&MockTask {
            name: "test-task",
            should_run: false,
            result: Ok(TaskResult::Ok),
        });
        assert_eq!(failures, 0);
    }

    #[test]
    fn execute_records_ok_task() {
        let failures = run_mock(&MockTask {
            name: "ok-task",
            should_run: true,
            result: Ok(TaskResult::Ok),
        });
        assert_eq!(failures, 0);
    }

    #[test]
    fn execute_records_failed_task() {
        let failures = run_mock(&MockTask {
            name: "fail-task",
            should_run: true,
            result: Err("kaboom".to_string()),
        });
        assert_eq!(failures, 1);
    }

    #[test]
    fn execute_records_skipped_task() {
        let failures = run_mock(&MockTask {
            name: "skip-task",
            should_run: true,
            result: Ok(TaskResult::Skipped("not needed".to_string())),
        });
        assert_eq!(failures, 0);
    }

    #[test]
    fn stats_summary_formats() {
        let stats = TaskStats {
            changed: 3,
            already_ok: 10,
            skipped: 0,
        };
        assert_eq!(stats.summary(false), "3 changed, 10 already ok");
        assert_eq!(stats.summary(true), "3 would change, 10 already ok");

        let stats = TaskStats {
            changed: 1,
            already_ok: 2,
            skipped: 3,
        };
        assert_eq!(stats.summary(false), "1 changed, 2 already ok, 3 skipped");
    }
}
