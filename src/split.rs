use crate::chunk::{ChunkError, ChunkWriter, LogLines, WrittenChunk};
use crate::cli::SplitArgs;
use crate::constants::CHUNK_THRESHOLD_BYTES;
use glob::{glob, GlobError, PatternError};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SplitRequest {
    pub patterns: Vec<String>,
    pub output_dir: PathBuf,
}

impl From<SplitArgs> for SplitRequest {
    fn from(args: SplitArgs) -> Self {
        SplitRequest {
            patterns: args.patterns,
            output_dir: args.output_dir.unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SourceOutcome {
    /// The source is smaller than the threshold and was left alone.
    BelowThreshold { size: u64 },
    Split { chunks: Vec<WrittenChunk> },
}

#[derive(Debug)]
pub struct SplitOutcome {
    pub sources: Vec<(PathBuf, SourceOutcome)>,
}

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlobPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
    #[error("No files matched pattern '{0}'")]
    NoMatches(String),
    #[error("Failed to read glob matches: {0}")]
    GlobIteration(#[from] GlobError),
    #[error("'{0}' is a directory, not a log file")]
    NotAFile(String),
    #[error("Output path '{0}' is not a directory")]
    OutputNotDirectory(String),
    #[error("Failed to split {path}: {source}")]
    Chunk {
        path: String,
        #[source]
        source: ChunkError,
    },
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SplitError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        SplitError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

pub struct SplitService {
    threshold: u64,
}

impl Default for SplitService {
    fn default() -> Self {
        SplitService {
            threshold: CHUNK_THRESHOLD_BYTES,
        }
    }
}

impl SplitService {
    #[cfg(test)]
    fn with_threshold(threshold: u64) -> Self {
        SplitService { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Split every file the request's patterns resolve to.
    pub fn execute(&self, request: &SplitRequest) -> Result<SplitOutcome, SplitError> {
        let mut sources = Vec::new();
        for path in resolve_sources(&request.patterns)? {
            let outcome = self.split_source(&path, &request.output_dir)?;
            sources.push((path, outcome));
        }
        Ok(SplitOutcome { sources })
    }

    /// Split one file into `output_dir`, or report that it is below the threshold.
    pub fn split_source(&self, path: &Path, output_dir: &Path) -> Result<SourceOutcome, SplitError> {
        let size = fs::metadata(path)
            .map_err(|err| SplitError::io(path, err))?
            .len();
        if size < self.threshold {
            debug!(path = %path.display(), size, threshold = self.threshold, "below threshold");
            return Ok(SourceOutcome::BelowThreshold { size });
        }

        prepare_output_dir(output_dir)?;
        let file = File::open(path).map_err(|err| SplitError::io(path, err))?;
        let writer = ChunkWriter::new(output_dir, self.threshold);
        let chunks = writer
            .write_chunks(LogLines::new(BufReader::new(file)))
            .map_err(|source| SplitError::Chunk {
                path: path.display().to_string(),
                source,
            })?;
        Ok(SourceOutcome::Split { chunks })
    }
}

/// Expand plain paths and glob patterns into files, in argument order, without duplicates.
pub fn resolve_sources(patterns: &[String]) -> Result<Vec<PathBuf>, SplitError> {
    let mut collected: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let mut matches_found = false;
        let entries = glob(pattern).map_err(|err| SplitError::InvalidGlobPattern {
            pattern: pattern.clone(),
            source: err,
        })?;
        for entry in entries {
            let path = entry?;
            matches_found = true;
            if path.is_dir() {
                return Err(SplitError::NotAFile(path.display().to_string()));
            }
            if !collected.contains(&path) {
                collected.push(path);
            }
        }

        if !matches_found {
            return Err(SplitError::NoMatches(pattern.clone()));
        }
    }

    Ok(collected)
}

fn prepare_output_dir(output_dir: &Path) -> Result<(), SplitError> {
    if output_dir.exists() && !output_dir.is_dir() {
        return Err(SplitError::OutputNotDirectory(
            output_dir.display().to_string(),
        ));
    }
    fs::create_dir_all(output_dir).map_err(|err| SplitError::io(output_dir, err))
}
