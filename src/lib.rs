//! nidi: a CLI to config your laptop as code.
//!
//! Declarative workspace directories drive everything: a config tree under
//! `$XDG_CONFIG_HOME/nidi/config` (or `~/.nidi`) holds per-workspace
//! Brewfiles, `defaults/` plists, `symlinks/` dotfile trees, and `scripts/`
//! hooks. The public API is organised into four layers:
//!
//! - **[`dispatch`]** — argv routing: matched command, or help with exit 0
//! - **[`workspace`]** — config directory and workspace resolution
//! - **[`tasks`]** — named units of work over the resolved directories
//! - **[`commands`]** — top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod dispatch;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod tasks;
pub mod workspace;
