use clap::Parser;
use image_library::cli::{self, Cli};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    cli::run(cli).await
}
