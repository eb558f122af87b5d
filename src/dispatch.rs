//! Application dispatcher: builds the command tree, normalizes its display
//! order, and routes argv to exactly one of a matched command handler or the
//! default help action.
//!
//! Missing or unrecognized subcommands are not errors: they degrade to the
//! full help text with a success exit code. Malformed flags and handler
//! failures remain fatal and terminate the process with a non-zero status.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap::error::ErrorKind;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::commands;
use crate::logging::{self, Logger};

/// Build the application command tree with deterministic help ordering.
#[must_use]
pub fn build() -> clap::Command {
    normalize(Cli::command())
}

/// Sort global flags and subcommands lexicographically by name for display.
///
/// Pure with respect to insertion order: the result depends only on the set
/// of registered names, and applying it twice yields the same ordering as
/// applying it once.
#[must_use]
pub fn normalize(cmd: clap::Command) -> clap::Command {
    let mut cmd = cmd;

    let mut flags: Vec<(String, String)> = cmd
        .get_arguments()
        .map(|a| {
            let display = a
                .get_long()
                .map_or_else(|| a.get_id().to_string(), str::to_string);
            (a.get_id().to_string(), display)
        })
        .collect();
    flags.sort_by(|a, b| a.1.cmp(&b.1));
    for (order, (id, _)) in flags.into_iter().enumerate() {
        cmd = cmd.mut_arg(id, |a| a.display_order(order));
    }

    let mut subcommands: Vec<String> = cmd
        .get_subcommands()
        .map(|c| c.get_name().to_string())
        .collect();
    subcommands.sort();
    for (order, name) in subcommands.into_iter().enumerate() {
        cmd = cmd.mut_subcommand(name, |c| c.display_order(order));
    }

    cmd
}

/// Outcome of parsing argv against the command tree.
#[derive(Debug)]
pub enum Route {
    /// A registered command matched; its handler should run.
    Dispatch(Command, GlobalOpts),
    /// Nothing matched (empty invocation or unknown token); show full help.
    Help,
    /// clap rendered output itself (`--help`, `--version`).
    Display(clap::Error),
    /// Malformed invocation; fatal to the process.
    Fatal(clap::Error),
}

/// Parse argv and decide what to run, without running it.
pub fn route<I, T>(argv: I) -> Route
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(argv) {
        Ok(cli) => cli
            .command
            .map_or(Route::Help, |command| Route::Dispatch(command, cli.global)),
        Err(e) => match e.kind() {
            ErrorKind::InvalidSubcommand => Route::Help,
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => Route::Display(e),
            _ => Route::Fatal(e),
        },
    }
}

/// Parse argv and run the matched handler or the default help action.
///
/// Returns the process exit code. Unmatched invocations print help and
/// succeed; parse failures print the clap diagnostic and fail.
///
/// # Errors
///
/// Returns an error when a matched command's handler fails; the caller is
/// expected to surface it on stderr and exit non-zero.
pub fn run<I, T>(argv: I) -> Result<u8>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    run_with(argv, execute)
}

/// [`run`] with an explicit handler, so tests can observe dispatch decisions
/// without executing real commands.
pub fn run_with<I, T>(
    argv: I,
    handler: impl FnOnce(Command, &GlobalOpts) -> Result<()>,
) -> Result<u8>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match route(argv) {
        Route::Dispatch(command, global) => {
            handler(command, &global)?;
            Ok(0)
        }
        Route::Help => {
            build().print_help()?;
            Ok(0)
        }
        Route::Display(e) => {
            e.print()?;
            Ok(0)
        }
        Route::Fatal(e) => {
            e.print()?;
            Ok(2)
        }
    }
}

/// Invoke the handler for a matched command.
fn execute(command: Command, global: &GlobalOpts) -> Result<()> {
    match command {
        // Output-only commands skip logger setup so stdout stays clean.
        Command::Version => {
            commands::version::run();
            Ok(())
        }
        Command::Completions(opts) => {
            commands::completions::run(&opts);
            Ok(())
        }
        command => {
            logging::init_subscriber(global.debug, command.name());
            let log = Logger::new(command.name());
            match command {
                Command::Setup(opts) => commands::setup::run(global, &opts, &log),
                Command::Update(opts) => commands::update::run(global, &opts, &log),
                Command::Bundle(opts) => commands::bundle::run(global, &opts, &log),
                Command::ApplyDefaults(opts) => commands::apply_defaults::run(global, &opts, &log),
                Command::ApplySymlinks(opts) => commands::apply_symlinks::run(global, &opts, &log),
                Command::RunScripts(opts) => commands::run_scripts::run(global, &opts, &log),
                Command::Version | Command::Completions(_) => Ok(()),
            }
        }
    }
}
