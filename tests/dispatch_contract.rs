#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for argv routing.
//!
//! These tests exercise the public dispatch surface end to end: the rendered
//! help text, the lexicographic ordering of flags and subcommands, and the
//! exit-code contract for matched, missing, and malformed invocations.

use nidi::dispatch;

// ---------------------------------------------------------------------------
// Help text
// ---------------------------------------------------------------------------

/// The rendered help must carry the application name, its one-line usage,
/// and the global debug flag with its usage string.
#[test]
fn help_describes_application() {
    let help = dispatch::build().render_help().to_string();
    assert!(help.contains("A CLI to config your laptop as code"));
    assert!(help.contains("--debug"));
    assert!(help.contains("enable debug"));
}

/// Every registered subcommand must appear in the help text.
#[test]
fn help_lists_all_subcommands() {
    let help = dispatch::build().render_help().to_string();
    for name in [
        "apply-defaults",
        "apply-symlinks",
        "bundle",
        "completions",
        "run-scripts",
        "setup",
        "update",
        "version",
    ] {
        assert!(help.contains(name), "help is missing subcommand '{name}'");
    }
}

/// Subcommands must render in lexicographic order regardless of how they
/// were registered.
#[test]
fn help_orders_subcommands_lexicographically() {
    let help = dispatch::build().render_help().to_string();
    let names = [
        "apply-defaults",
        "apply-symlinks",
        "bundle",
        "completions",
        "run-scripts",
        "setup",
        "update",
        "version",
    ];
    let positions: Vec<usize> = names
        .iter()
        .map(|n| help.find(n).unwrap_or_else(|| panic!("'{n}' not in help")))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "subcommands out of order:\n{help}");
}

/// Re-normalizing an already normalized command tree must not change the
/// rendered help.
#[test]
fn normalize_twice_renders_identically() {
    let once = dispatch::build().render_help().to_string();
    let twice = dispatch::normalize(dispatch::build())
        .render_help()
        .to_string();
    assert_eq!(once, twice);
}

// ---------------------------------------------------------------------------
// Exit-code contract
// ---------------------------------------------------------------------------

/// A matched subcommand invokes its handler exactly once and succeeds.
#[test]
fn matched_command_runs_handler_once() {
    let mut calls = 0;
    let code = dispatch::run_with(["nidi", "update"], |command, global| {
        calls += 1;
        assert_eq!(command.name(), "update");
        assert!(!global.debug);
        Ok(())
    })
    .expect("dispatch should succeed");
    assert_eq!(calls, 1);
    assert_eq!(code, 0);
}

/// Global flags reach the handler alongside the matched command.
#[test]
fn global_flags_reach_handler() {
    let mut seen_debug = false;
    dispatch::run_with(["nidi", "--debug", "setup"], |_, global| {
        seen_debug = global.debug;
        Ok(())
    })
    .expect("dispatch should succeed");
    assert!(seen_debug);
}

/// An empty invocation shows help and exits successfully without touching
/// any handler.
#[test]
fn no_arguments_shows_help_and_succeeds() {
    let mut calls = 0;
    let code = dispatch::run_with(["nidi"], |_, _| {
        calls += 1;
        Ok(())
    })
    .expect("help fallback should succeed");
    assert_eq!(calls, 0);
    assert_eq!(code, 0);
}

/// An unknown subcommand degrades to the help screen with a success exit
/// code, identically to an empty invocation.
#[test]
fn unknown_subcommand_degrades_to_help() {
    let mut calls = 0;
    let code = dispatch::run_with(["nidi", "frobnicate"], |_, _| {
        calls += 1;
        Ok(())
    })
    .expect("help fallback should succeed");
    assert_eq!(calls, 0);
    assert_eq!(code, 0);
}

/// A malformed flag is fatal: non-zero exit, handler never invoked.
#[test]
fn unknown_flag_is_fatal() {
    let mut calls = 0;
    let code = dispatch::run_with(["nidi", "--frobnicate"], |_, _| {
        calls += 1;
        Ok(())
    })
    .expect("parse failure is reported via the exit code");
    assert_eq!(calls, 0);
    assert_ne!(code, 0);
}

/// A handler failure propagates to the caller as an error.
#[test]
fn handler_failure_propagates() {
    let result = dispatch::run_with(["nidi", "setup"], |_, _| anyhow::bail!("disk on fire"));
    let err = result.expect_err("handler error should propagate");
    assert!(format!("{err:#}").contains("disk on fire"));
}
