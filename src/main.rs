//! dnscli entry point.

use std::process::ExitCode;

use clap::Parser;

use dnscli::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    // init logging from RUST_LOG env var with info as default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
