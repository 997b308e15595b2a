pub mod common;
pub mod domain;
pub mod error;
pub mod loader;
pub mod normalizer;
pub mod parsers;
pub mod utils;

use clap::{Args, Parser, Subcommand};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    error::{ArtifactError, BizseedError},
    loader::{CustomerLoader, LoadReport},
    normalizer::normalize_csv_file,
    utils::{read_customer_documents, write_customer_documents},
};

/// Input for the bizseed program
#[derive(Parser)]
#[command(version, about = "Seeds business customers from a csv into the customers API")]
pub struct BizseedInput {
    #[command(subcommand)]
    pub command: BizseedCommand,
}

#[derive(Subcommand)]
pub enum BizseedCommand {
    /// Convert the csv into the customer documents file
    Normalize {
        /// The relative path of the csv file
        file: PathBuf,
        #[clap(flatten)]
        artifact: ArtifactOptions,
        #[clap(flatten)]
        normalize_options: NormalizeOptions,
        /// Also print the customer documents to stdout
        #[arg(long)]
        print: bool,
    },
    /// Submit every customer in the customer documents file to the API
    Load {
        #[clap(flatten)]
        artifact: ArtifactOptions,
        #[clap(flatten)]
        loader_options: LoaderOptions,
    },
    /// Normalize then load
    Run {
        /// The relative path of the csv file
        file: PathBuf,
        #[clap(flatten)]
        artifact: ArtifactOptions,
        #[clap(flatten)]
        normalize_options: NormalizeOptions,
        #[clap(flatten)]
        loader_options: LoaderOptions,
    },
}

#[derive(Clone, Args)]
pub struct ArtifactOptions {
    /// Where the customer documents are written to / read from
    #[arg(long = "artifact", default_value = "output.json")]
    pub path: PathBuf,
}

#[derive(Clone, Args)]
pub struct NormalizeOptions {
    /// The field delimiter of the csv, a single ascii character
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,
}

#[derive(Clone, Args)]
pub struct LoaderOptions {
    /// Base url of the customers API
    #[arg(long, env = "BIZSEED_BASE_URL", default_value = "http://localhost:3000")]
    pub base_url: String,
    /// Extra header sent with every request, as `Name: value`
    #[arg(long, env = "BIZSEED_AUTH_HEADER")]
    pub auth_header: Option<String>,
    /// Per request timeout
    #[arg(long, env = "BIZSEED_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl LoaderOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ascii character, got {raw:?}")),
    }
}

/// Reads and parses the customer documents file
pub fn read_artifact(path: &Path) -> Result<Vec<serde_json::Value>, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_customer_documents(BufReader::new(file))
}

/// Runs the requested command. Report lines are written to `out`.
///
/// # Errors
///
/// Extraction failures, an unreadable customer documents file or invalid loader configuration.
/// Per customer failures are only reported, never returned.
pub fn run<W: Write>(input: &BizseedInput, mut out: W) -> Result<Option<LoadReport>, BizseedError> {
    match &input.command {
        BizseedCommand::Normalize {
            file,
            artifact,
            normalize_options,
            print,
        } => {
            let documents = normalize_csv_file(file, &artifact.path, normalize_options)?;
            if *print {
                write_customer_documents(&documents, &mut out).map_err(std::io::Error::from)?;
                writeln!(out)?;
            }
            Ok(None)
        }
        BizseedCommand::Load {
            artifact,
            loader_options,
        } => load_artifact(&artifact.path, loader_options, out).map(Some),
        BizseedCommand::Run {
            file,
            artifact,
            normalize_options,
            loader_options,
        } => {
            normalize_csv_file(file, &artifact.path, normalize_options)?;
            load_artifact(&artifact.path, loader_options, out).map(Some)
        }
    }
}

fn load_artifact<W: Write>(
    path: &Path,
    options: &LoaderOptions,
    out: W,
) -> Result<LoadReport, BizseedError> {
    // config is validated before the artifact is even opened
    let loader = CustomerLoader::from_options(options)?;
    let documents = read_artifact(path)?;
    Ok(loader.load(documents, out)?)
}
