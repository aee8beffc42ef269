use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Split large log files into timestamp-named chunks of at least 100 MiB",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub split: SplitArgs,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// One or more log files or glob patterns to split, e.g. logs/*.txt.
    #[arg(required = true, value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Directory receiving the chunk files (defaults to the current directory).
    #[arg(short, long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}
