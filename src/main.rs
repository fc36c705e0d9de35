mod cli;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use cpmerge::{run_pipeline, to_csv_bytes, PipelineParams};

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let params = PipelineParams {
        threshold: cli.threshold,
        location_scores: cli.scores_range.clone(),
        location_intensities: cli.intensities_range.clone(),
    };

    let mut files = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        files.push((name, file));
    }

    let merged = run_pipeline(files, &params).context("running reshape/filter/merge pipeline")?;
    if merged.is_empty() {
        warn!("no intensities survived the threshold; writing a header-only CSV");
    }

    let bytes = to_csv_bytes(&merged).context("serializing merged table")?;
    let out = cli.output_path();
    std::fs::write(&out, bytes).with_context(|| format!("writing {}", out.display()))?;
    info!(
        "wrote {} rows x {} columns to {}",
        merged.num_rows(),
        merged.num_columns(),
        out.display()
    );

    Ok(())
}
