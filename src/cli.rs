use std::path::PathBuf;

use clap::Parser;

/// cpmerge - merge CP-Seeker output workbooks into one filtered CSV
#[derive(Parser)]
#[command(name = "cpmerge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// CP-Seeker output workbooks (.xlsx), one output column each
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Minimum confidence score (inclusive) to keep an intensity
    #[arg(short, long, default_value = "80", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub threshold: u32,

    /// Column range of the scores block
    #[arg(long, value_name = "RANGE", default_value = "A:AC")]
    pub scores_range: String,

    /// Column range of the intensities block
    #[arg(long, value_name = "RANGE", default_value = "AD:BF")]
    pub intensities_range: String,

    /// Output CSV path (defaults to <date>_experiment.csv)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolved output path, following the original tool's naming scheme.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let date = chrono::Local::now().format("%Y-%m-%d");
            PathBuf::from(format!("{date}_experiment.csv"))
        })
    }
}
