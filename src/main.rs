//! CLI entry point for socket-constrained 3D tile generation

use clap::Parser;
use tilecollapse::io::cli::{Cli, GenerationDriver};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> tilecollapse::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut driver = GenerationDriver::new(cli);
    driver.process()
}
