//! CLI Adapter.

mod converge;
mod logging;
mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::config::ProvisionInputs;
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "worker-provision")]
#[command(version)]
#[command(
    about = "Converge this host into an Apache worker virtual host",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install, configure, enable and reload the worker site
    #[clap(visible_alias = "c")]
    Converge {
        #[command(flatten)]
        inputs: InputArgs,
        /// Report what would change without changing anything
        #[arg(short = 'n', long)]
        dry_run: bool,
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the rendered site file without touching the host
    #[clap(visible_alias = "r")]
    Render {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Provisioning config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Data bag item file (JSON) to use instead of the configured bag
    #[arg(short, long)]
    data_bag: Option<PathBuf>,
    /// Hostname to render instead of resolving this machine's
    #[arg(long)]
    hostname: Option<String>,
}

impl From<InputArgs> for ProvisionInputs {
    fn from(args: InputArgs) -> Self {
        Self { config: args.config, data_bag: args.data_bag, hostname: args.hostname }
    }
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<(), AppError> = match cli.command {
        Commands::Converge { inputs, dry_run, json } => {
            converge::run_converge(inputs.into(), dry_run, json)
        }
        Commands::Render { inputs } => render::run_render(inputs.into()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn converge_flags_parse() {
        let cli = Cli::try_parse_from([
            "worker-provision",
            "-vv",
            "converge",
            "--dry-run",
            "--hostname",
            "worker-1",
            "--data-bag",
            "/tmp/local.json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Converge { inputs, dry_run, json } => {
                assert!(dry_run);
                assert!(!json);
                assert_eq!(inputs.hostname.as_deref(), Some("worker-1"));
                assert_eq!(inputs.data_bag, Some(PathBuf::from("/tmp/local.json")));
                assert!(inputs.config.is_none());
            }
            Commands::Render { .. } => panic!("expected converge"),
        }
    }
}
