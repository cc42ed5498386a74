use clap::Parser;
use clusterlint::cli::Cli;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    if let Err(e) = clusterlint::run_command(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
