use std::{io::stdout, process::ExitCode};

use bizseed::{BizseedInput, run};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

pub fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&BizseedInput::parse(), stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
