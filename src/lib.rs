//! # clusterlint
//!
//! Lints the objects of a live Kubernetes cluster. A run fetches one
//! snapshot of the cluster, resolves which checks to run from group and name
//! selectors, runs them in parallel and reports normalized diagnostics.
//!
//! ## Example
//!
//! ```rust,no_run
//! use clusterlint::checks::{self, CheckFilter, DiagnosticFilter, Registry, Selection};
//! use clusterlint::cluster::{ClusterClient, ConnectionOptions};
//!
//! # async fn example() -> clusterlint::Result<()> {
//! let registry = Registry::with_builtin()?;
//! let filter = CheckFilter::new(Selection::new().group("basic"), &registry)?;
//! let client = ClusterClient::new(&ConnectionOptions::default()).await?;
//! let objects = client.fetch_objects().await?;
//! let outcome = checks::run(&objects, filter.checks(), &DiagnosticFilter::default());
//! for diagnostic in &outcome.diagnostics {
//!     println!("{diagnostic}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod checks;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod formatter;
pub mod handlers;

pub use error::{ClusterlintError, Result};
use checks::Registry;
use cli::{Cli, Commands};

/// Execute a parsed command line.
pub async fn run_command(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref())?;
    let registry = Registry::with_builtin()?;

    match cli.command {
        Commands::List {
            groups,
            ignore_groups,
        } => {
            let stdout = std::io::stdout();
            handlers::handle_list(&registry, &groups, &ignore_groups, &mut stdout.lock())
        }
        Commands::Run(args) => {
            let options = handlers::RunOptions::resolve(&args, cli.kubeconfig, cli.context, &config)?;
            handlers::handle_run(&registry, &options).await
        }
    }
}
