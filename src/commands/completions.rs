//! Command: generate shell completions.
use crate::cli::CompletionsOpts;
use crate::dispatch;

/// Write completions for the requested shell to stdout.
pub fn run(opts: &CompletionsOpts) {
    let mut cmd = dispatch::build();
    clap_complete::generate(opts.shell, &mut cmd, "nidi", &mut std::io::stdout());
}
