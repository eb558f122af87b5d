use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult, TaskStats};

/// Link every file under each workspace directory's `symlinks/` into the
/// home directory as a dotfile.
///
/// `symlinks/config/git/config` becomes `$HOME/.config/git/config`. Stale
/// links are replaced; regular files at the target are never overwritten.
pub struct ApplySymlinks;

/// State of a link target relative to its intended source.
enum LinkState {
    /// Nothing exists at the target path.
    Missing,
    /// A symlink pointing at the source already exists.
    Correct,
    /// A symlink exists but points elsewhere.
    Stale,
    /// A regular file or directory occupies the target path.
    Occupied,
}

fn link_state(source: &Path, target: &Path) -> LinkState {
    let Ok(meta) = std::fs::symlink_metadata(target) else {
        return LinkState::Missing;
    };
    if !meta.file_type().is_symlink() {
        return LinkState::Occupied;
    }
    match std::fs::read_link(target) {
        Ok(dest) if dest == source => LinkState::Correct,
        _ => LinkState::Stale,
    }
}

/// Recursively collect the files under `dir`, sorted by path.
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let mut paths: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .collect();
    paths.sort();
    for path in paths {
        if path.is_dir() {
            collect_files(&path, out);
        } else if path.is_file() {
            out.push(path);
        }
    }
}

#[cfg(unix)]
fn create_symlink(source: &Path, target: &Path) -> Result<()> {
    std::os::unix::fs::symlink(source, target)
        .with_context(|| format!("linking {}", target.display()))
}

#[cfg(not(unix))]
fn create_symlink(_source: &Path, _target: &Path) -> Result<()> {
    anyhow::bail!("symlinks are not supported on this platform")
}

impl Task for ApplySymlinks {
    fn name(&self) -> &str {
        "Apply symlinks"
    }

    fn should_run(&self, _ctx: &Context<'_>) -> bool {
        true
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskResult> {
        let mut stats = TaskStats::new();
        let mut found_tree = false;

        for dir in &ctx.dirs {
            let links_root = dir.join("symlinks");
            if !links_root.is_dir() {
                ctx.log
                    .debug(&format!("no symlinks directory in {}", dir.display()));
                continue;
            }
            found_tree = true;

            let mut files = Vec::new();
            collect_files(&links_root, &mut files);

            for source in files {
                let rel = source
                    .strip_prefix(&links_root)
                    .with_context(|| format!("resolving {}", source.display()))?;
                let target = ctx.home.join(format!(".{}", rel.display()));

                match link_state(&source, &target) {
                    LinkState::Correct => {
                        stats.already_ok += 1;
                    }
                    LinkState::Occupied => {
                        ctx.log.warn(&format!(
                            "refusing to replace existing file: {}",
                            target.display()
                        ));
                        stats.skipped += 1;
                    }
                    state @ (LinkState::Missing | LinkState::Stale) => {
                        if ctx.dry_run {
                            ctx.log.dry_run(&format!(
                                "ln -s {} {}",
                                source.display(),
                                target.display()
                            ));
                            stats.changed += 1;
                            continue;
                        }
                        if let Some(parent) = target.parent() {
                            std::fs::create_dir_all(parent)
                                .with_context(|| format!("creating {}", parent.display()))?;
                        }
                        if matches!(state, LinkState::Stale) {
                            std::fs::remove_file(&target)
                                .with_context(|| format!("removing {}", target.display()))?;
                        }
                        create_symlink(&source, &target)?;
                        ctx.log.debug(&format!(
                            "linked {} -> {}",
                            target.display(),
                            source.display()
                        ));
                        stats.changed += 1;
                    }
                }
            }
        }

        if !found_tree {
            return Ok(TaskResult::Skipped("no symlinks directory found".to_string()));
        }
        ctx.log.info(&stats.summary(ctx.dry_run));
        if ctx.dry_run {
            return Ok(TaskResult::DryRun);
        }
        Ok(TaskResult::Ok)
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::Logger;
    use crate::platform::Os;
    use crate::tasks::test_helpers::make_platform_context;

    fn workspace_with_links(files: &[&str]) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for rel in files {
            let path = tmp.path().join("ws/symlinks").join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, "content").unwrap();
        }
        std::fs::create_dir_all(tmp.path().join("home")).unwrap();
        tmp
    }

    fn run_task(tmp: &tempfile::TempDir, dry_run: bool) -> TaskResult {
        let log = Logger::new("test");
        let mut ctx = make_platform_context(
            tmp.path(),
            vec![tmp.path().join("ws")],
            Os::Linux,
            tmp.path().join("home"),
            &log,
        );
        ctx.dry_run = dry_run;
        ApplySymlinks.run(&ctx).unwrap()
    }

    #[test]
    fn links_files_as_dotfiles() {
        let tmp = workspace_with_links(&["bashrc", "config/git/config"]);
        let result = run_task(&tmp, false);
        assert!(matches!(result, TaskResult::Ok));

        let bashrc = tmp.path().join("home/.bashrc");
        assert!(bashrc.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(
            std::fs::read_link(&bashrc).unwrap(),
            tmp.path().join("ws/symlinks/bashrc")
        );
        assert!(tmp.path().join("home/.config/git/config").exists());
    }

    #[test]
    fn second_run_is_idempotent() {
        let tmp = workspace_with_links(&["bashrc"]);
        run_task(&tmp, false);
        let result = run_task(&tmp, false);
        assert!(matches!(result, TaskResult::Ok));
    }

    #[test]
    fn replaces_stale_link() {
        let tmp = workspace_with_links(&["bashrc"]);
        let target = tmp.path().join("home/.bashrc");
        std::os::unix::fs::symlink("/nonexistent", &target).unwrap();

        run_task(&tmp, false);
        assert_eq!(
            std::fs::read_link(&target).unwrap(),
            tmp.path().join("ws/symlinks/bashrc")
        );
    }

    #[test]
    fn preserves_existing_regular_file() {
        let tmp = workspace_with_links(&["bashrc"]);
        let target = tmp.path().join("home/.bashrc");
        std::fs::write(&target, "precious").unwrap();

        run_task(&tmp, false);
        assert!(!target.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "precious");
    }

    #[test]
    fn dry_run_creates_nothing() {
        let tmp = workspace_with_links(&["bashrc"]);
        let result = run_task(&tmp, true);
        assert!(matches!(result, TaskResult::DryRun));
        assert!(!tmp.path().join("home/.bashrc").exists());
    }

    #[test]
    fn skips_without_symlinks_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("ws")).unwrap();
        std::fs::create_dir_all(tmp.path().join("home")).unwrap();
        let result = run_task(&tmp, false);
        assert!(matches!(result, TaskResult::Skipped(_)));
    }
}
