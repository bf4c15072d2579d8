//! setup-npm-publish - temporary npm publish credentials for CI jobs

#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;
use setup_npm_publish::cli::Cli;
use setup_npm_publish::output::OutputContext;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = OutputContext::new(cli.no_color, cli.quiet);
    if let Err(e) = cli.run(&output).await {
        output.error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
