use std::env;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::args::Cli;

mod args;
mod commands;
mod synthesis;

#[tokio::main]
async fn main() -> Result<()> {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "error");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("LOG"))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    commands::provision::run(&cli).await
}
