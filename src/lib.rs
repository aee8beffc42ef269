pub mod chunk;
pub mod cli;
pub mod constants;
pub mod logging;
pub mod split;
pub mod timestamp;

use clap::Parser;
use cli::Cli;
use split::{SourceOutcome, SplitRequest, SplitService};

#[derive(Debug)]
pub enum AppError {
    Split(split::SplitError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Split(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Split(err) => Some(err),
        }
    }
}

impl From<split::SplitError> for AppError {
    fn from(err: split::SplitError) -> Self {
        AppError::Split(err)
    }
}

pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let request = SplitRequest::from(cli.split);
    let service = SplitService::default();
    let outcome = service.execute(&request)?;

    let mut created = 0;
    for (source, result) in &outcome.sources {
        match result {
            SourceOutcome::BelowThreshold { size } => {
                println!(
                    "{} is {size} bytes, under the {} byte threshold; skipping",
                    source.display(),
                    service.threshold()
                );
            }
            SourceOutcome::Split { chunks } => {
                println!("Split {} into {} chunk file(s)", source.display(), chunks.len());
                for chunk in chunks {
                    println!("Created {}", chunk.path.display());
                }
                created += chunks.len();
            }
        }
    }
    println!("Finished: {created} chunk file(s) written");
    Ok(())
}
