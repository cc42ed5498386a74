use crate::checks::{self, CheckFilter, DiagnosticFilter, Registry, Selection, Severity};
use crate::cli::RunArgs;
use crate::cluster::{ClusterClient, ConnectionOptions, Objects, client::DEFAULT_TIMEOUT};
use crate::config::Config;
use crate::error::ClusterlintError;
use crate::formatter::{self, OutputFormat};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one `run`, after merging flags over the config file.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub selection: Selection,
    pub format: OutputFormat,
    pub level: Option<Severity>,
    pub colors: bool,
    pub connection: ConnectionOptions,
}

impl RunOptions {
    /// Merge command-line flags over `config`.
    ///
    /// A selector list given on the command line replaces the config file's
    /// list for that selector.
    pub fn resolve(
        args: &RunArgs,
        kubeconfig: Option<PathBuf>,
        context: Option<String>,
        config: &Config,
    ) -> crate::Result<Self> {
        let selected = &config.selection;
        let selection = Selection::from_lists(
            pick(&args.groups, &selected.groups),
            pick(&args.ignore_groups, &selected.ignore_groups),
            pick(&args.checks, &selected.checks),
            pick(&args.ignore_checks, &selected.ignore_checks),
        );

        let level = match args.level.as_ref().or(config.output.level.as_ref()) {
            Some(raw) => Some(
                Severity::parse(raw).ok_or_else(|| ClusterlintError::InvalidLevel(raw.clone()))?,
            ),
            None => None,
        };

        let connection = ConnectionOptions {
            kubeconfig: kubeconfig.or_else(|| config.kubeconfig.as_ref().map(PathBuf::from)),
            context: context.or_else(|| config.context.clone()),
            namespace: args.namespace.clone().or_else(|| config.namespace.clone()),
            timeout: args
                .timeout
                .or(config.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        };

        Ok(Self {
            selection,
            format: args.output.or(config.output.format).unwrap_or_default(),
            level,
            colors: !(args.no_color || config.output.no_color),
            connection,
        })
    }
}

fn pick<'a>(flag: &'a [String], configured: &'a [String]) -> &'a [String] {
    if flag.is_empty() { configured } else { flag }
}

/// Resolve the checks, fetch a snapshot and report diagnostics to stdout.
///
/// Selection errors surface before any connection to the cluster is made.
pub async fn handle_run(registry: &Registry, options: &RunOptions) -> crate::Result<()> {
    let filter = CheckFilter::new(options.selection.clone(), registry)?;
    if filter.is_empty() {
        log::warn!("No checks selected");
    }

    let client = ClusterClient::new(&options.connection).await?;
    let objects = client.fetch_objects().await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report(&objects, &filter, options, &mut out)
}

/// Run the selected checks against `objects` and write what they found.
///
/// Diagnostics are written even when some checks failed; the failures are
/// returned afterwards.
pub fn report<W: Write>(
    objects: &Objects,
    filter: &CheckFilter,
    options: &RunOptions,
    out: &mut W,
) -> crate::Result<()> {
    let outcome = checks::run(objects, filter.checks(), &DiagnosticFilter::new(options.level));
    let (diagnostics, status) = outcome.into_parts();
    formatter::write_diagnostics(out, &diagnostics, options.format, options.colors)?;
    status?;
    Ok(())
}
