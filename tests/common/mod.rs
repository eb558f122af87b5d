// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed config tree and a fluent builder so
// each integration test can lay out workspaces, symlink sources, and hook
// scripts without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::PathBuf;

use nidi::logging::Logger;
use nidi::platform::{Os, Platform};
use nidi::tasks::Context;

/// An isolated config tree backed by a [`tempfile::TempDir`].
///
/// Contains a `config/` directory acting as the configuration root and a
/// `home/` directory standing in for the user's home, so tests never touch
/// the real one. Deleted when dropped.
pub struct ConfigTree {
    /// Temporary directory containing the test config tree.
    pub root: tempfile::TempDir,
}

impl ConfigTree {
    /// Create a new tree with empty `config/` and `home/` directories.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("config")).expect("create config dir");
        std::fs::create_dir_all(root.path().join("home")).expect("create home dir");
        Self { root }
    }

    /// Path to the configuration root.
    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("config")
    }

    /// Path to the stand-in home directory.
    pub fn home_path(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Create a directory at `rel` under the configuration root.
    pub fn with_dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.config_path().join(rel)).expect("create dir");
        self
    }

    /// Write `content` to `rel` under the configuration root, creating
    /// parent directories as needed.
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        let path = self.config_path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create file parent");
        }
        std::fs::write(&path, content).expect("write file");
        self
    }

    /// Write an executable shell script to `rel` under the configuration
    /// root.
    #[cfg(unix)]
    pub fn with_script(self, rel: &str, body: &str) -> Self {
        use std::os::unix::fs::PermissionsExt as _;
        let tree = self.with_file(rel, body);
        let path = tree.config_path().join(rel);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod script");
        tree
    }

    /// Build a task [`Context`] over `dirs` with the tree's stand-in home
    /// directory and an explicit OS.
    pub fn context<'a>(&self, dirs: Vec<PathBuf>, os: Os, log: &'a Logger) -> Context<'a> {
        Context {
            root: self.config_path(),
            dirs,
            home: self.home_path(),
            platform: Platform { os },
            log,
            dry_run: false,
            debug: false,
        }
    }
}
