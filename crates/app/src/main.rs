mod cli;
mod commands;
mod config;
mod input_gen;
mod payload;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::Config;
use huffstring_core::HuffmanCodec;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &Config) {
    // Logs go to stderr so stdout stays clean for payloads and text
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(cli, std::env::var("RUST_LOG").ok())?;

    init_tracing(&config);

    if config.print_config {
        config.print();
    }

    commands::run(&HuffmanCodec, config.operation)
}
