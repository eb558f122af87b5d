use clap::{Parser, Subcommand};

use crate::tasks::scripts::Suffix;

/// Top-level CLI entry point for nidi.
#[derive(Parser, Debug)]
#[command(name = "nidi", about = "A CLI to config your laptop as code", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// enable debug
    #[arg(long, global = true)]
    pub debug: bool,

    /// Preview changes without applying
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply user defaults from a workspace
    ApplyDefaults(WorkspaceOpts),
    /// Link a workspace's dotfiles into the home directory
    ApplySymlinks(WorkspaceOpts),
    /// Install packages from a workspace's Brewfile
    Bundle(BundleOpts),
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Run a workspace's hook scripts
    RunScripts(ScriptsOpts),
    /// Setup a workspace, or the config directory if none is given
    Setup(SetupOpts),
    /// Check for system and application updates
    Update(UpdateOpts),
    /// Print version information
    Version,
}

impl Command {
    /// The token a user types to select this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ApplyDefaults(_) => "apply-defaults",
            Self::ApplySymlinks(_) => "apply-symlinks",
            Self::Bundle(_) => "bundle",
            Self::Completions(_) => "completions",
            Self::RunScripts(_) => "run-scripts",
            Self::Setup(_) => "setup",
            Self::Update(_) => "update",
            Self::Version => "version",
        }
    }
}

/// Workspace selection shared by the commands that operate on one.
#[derive(Parser, Debug, Clone, Default)]
pub struct WorkspaceOpts {
    /// Workspace to operate on, with levels separated by "." (e.g. "home.laptop")
    pub workspace: Option<String>,

    /// Override the configuration directory
    #[arg(short = 'd', long = "directory")]
    pub directory: Option<std::path::PathBuf>,
}

/// Options for the `setup` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SetupOpts {
    #[command(flatten)]
    pub target: WorkspaceOpts,

    /// Update all casks, including those with auto-update enabled
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Remove packages that are not in the Brewfile
    #[arg(short = 'r', long = "rm")]
    pub remove_unlisted: bool,
}

/// Options for the `bundle` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct BundleOpts {
    #[command(flatten)]
    pub target: WorkspaceOpts,

    /// Remove packages that are not in the Brewfile
    #[arg(short = 'r', long = "rm")]
    pub remove_unlisted: bool,
}

/// Options for the `update` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct UpdateOpts {
    /// Update all casks, including those with auto-update enabled
    #[arg(short = 'a', long)]
    pub all: bool,
}

/// Options for the `run-scripts` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ScriptsOpts {
    #[command(flatten)]
    pub target: WorkspaceOpts,

    /// Run only the given hook phase (both phases when omitted)
    #[arg(long, value_enum)]
    pub suffix: Option<Suffix>,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_subcommand() {
        let cli = Cli::parse_from(["nidi"]);
        assert!(cli.command.is_none());
        assert!(!cli.global.debug);
    }

    #[test]
    fn parse_debug() {
        let cli = Cli::parse_from(["nidi", "--debug", "update"]);
        assert!(cli.global.debug);
        assert!(matches!(cli.command, Some(Command::Update(_))));
    }

    #[test]
    fn parse_debug_after_subcommand() {
        let cli = Cli::parse_from(["nidi", "setup", "--debug"]);
        assert!(cli.global.debug);
    }

    #[test]
    fn parse_dry_run() {
        let cli = Cli::parse_from(["nidi", "-n", "setup"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_setup_with_workspace() {
        let cli = Cli::parse_from(["nidi", "setup", "home.laptop"]);
        let Some(Command::Setup(opts)) = cli.command else {
            panic!("expected setup command");
        };
        assert_eq!(opts.target.workspace.as_deref(), Some("home.laptop"));
        assert!(!opts.all);
        assert!(!opts.remove_unlisted);
    }

    #[test]
    fn parse_setup_flags() {
        let cli = Cli::parse_from(["nidi", "setup", "-a", "-r"]);
        let Some(Command::Setup(opts)) = cli.command else {
            panic!("expected setup command");
        };
        assert!(opts.all);
        assert!(opts.remove_unlisted);
    }

    #[test]
    fn parse_directory_override() {
        let cli = Cli::parse_from(["nidi", "bundle", "-d", "/tmp/conf"]);
        let Some(Command::Bundle(opts)) = cli.command else {
            panic!("expected bundle command");
        };
        assert_eq!(
            opts.target.directory,
            Some(std::path::PathBuf::from("/tmp/conf"))
        );
    }

    #[test]
    fn parse_run_scripts_suffix() {
        let cli = Cli::parse_from(["nidi", "run-scripts", "--suffix", "before"]);
        let Some(Command::RunScripts(opts)) = cli.command else {
            panic!("expected run-scripts command");
        };
        assert_eq!(opts.suffix, Some(Suffix::Before));
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["nidi", "version"]);
        assert!(matches!(cli.command, Some(Command::Version)));
    }

    #[test]
    fn command_names_match_clap_subcommands() {
        let registered: Vec<String> = Cli::command()
            .get_subcommands()
            .map(|c| c.get_name().to_string())
            .collect();
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
            assert!(registered.iter().any(|r| r == name), "missing {name}");
        }
    }
}
