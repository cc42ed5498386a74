use crate::formatter::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "clusterlint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lint the objects of a live Kubernetes cluster")]
#[command(long_about = "Fetches a snapshot of a Kubernetes cluster and runs a selectable set of checks against it, reporting problems with a severity and the offending object.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the kubeconfig file (defaults to $KUBECONFIG or ~/.kube/config)
    #[arg(long, global = true, value_name = "FILE")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current one
    #[arg(long, global = true, value_name = "NAME")]
    pub context: Option<String>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available checks
    List {
        /// Only list checks in these groups
        #[arg(short = 'g', long, value_delimiter = ',', value_name = "GROUPS")]
        groups: Vec<String>,

        /// Do not list checks in these groups
        #[arg(short = 'G', long, value_delimiter = ',', value_name = "GROUPS")]
        ignore_groups: Vec<String>,
    },

    /// Run checks against the cluster
    Run(RunArgs),
}

/// Flags of the `run` subcommand. Empty lists and unset options fall back to
/// the config file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Run checks in these groups
    #[arg(short = 'g', long, value_delimiter = ',', value_name = "GROUPS")]
    pub groups: Vec<String>,

    /// Skip checks in these groups
    #[arg(short = 'G', long, value_delimiter = ',', value_name = "GROUPS")]
    pub ignore_groups: Vec<String>,

    /// Run these checks
    #[arg(short = 'c', long, value_delimiter = ',', value_name = "CHECKS")]
    pub checks: Vec<String>,

    /// Skip these checks
    #[arg(short = 'C', long, value_delimiter = ',', value_name = "CHECKS")]
    pub ignore_checks: Vec<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Only show diagnostics of this severity (error, warning, suggestion)
    #[arg(short = 'l', long, value_name = "LEVEL")]
    pub level: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Only fetch objects from this namespace
    #[arg(short = 'n', long, value_name = "NAMESPACE")]
    pub namespace: Option<String>,

    /// Seconds allowed for fetching the cluster snapshot
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::try_parse_from([
            "clusterlint",
            "run",
            "-g",
            "basic",
            "-C",
            "unused-secret,other",
            "-o",
            "json",
            "-l",
            "warning",
            "-n",
            "shop",
            "--timeout",
            "5",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.groups, vec!["basic"]);
        assert_eq!(args.ignore_checks, vec!["unused-secret", "other"]);
        assert_eq!(args.output, Some(OutputFormat::Json));
        assert_eq!(args.level.as_deref(), Some("warning"));
        assert_eq!(args.namespace.as_deref(), Some("shop"));
        assert_eq!(args.timeout, Some(5));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "clusterlint",
            "list",
            "--context",
            "staging",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.context.as_deref(), Some("staging"));
        assert_eq!(cli.verbose, 2);
    }
}
