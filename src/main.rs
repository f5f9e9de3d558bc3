use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use tf_inventory::ProcessRunner;
use tf_inventory::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // stdout carries the inventory document, so diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    tf_inventory::app::run(&cli, ProcessRunner::new(), &mut out).await?;

    Ok(())
}
