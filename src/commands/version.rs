//! Command: print version information.

/// Print the nidi version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    let version = option_env!("NIDI_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    println!("nidi {version}");
}
