//! `bmf2stl`: convert base64-wrapped BMF files to ASCII STL.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bmf_convert::{convert_batch, ConversionJob, ConvertOptions};
use clap::Parser;
use mesh_types::MeshTolerance;
use stl_export::StlOptions;
use tracing::error;

#[derive(Parser)]
#[command(name = "bmf2stl")]
#[command(about = "Convert BMF mesh files to ASCII STL")]
#[command(version)]
struct Cli {
    /// BMF files to convert
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for the STL files (defaults to next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Name written after `solid` / `endsolid`
    #[arg(long, default_value = "mesh")]
    solid_name: String,

    /// Mean vertex normals at or below this length are rejected as degenerate
    #[arg(long, default_value_t = 0.0)]
    min_normal_length: f64,

    /// Number of files converted at once (defaults to the number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Print a JSON report line for each converted file
    #[arg(long)]
    summary: bool,

    /// Log per-stage detail
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .init();

    if let Some(n) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    if let Some(dir) = &cli.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let jobs: Vec<ConversionJob> = cli
        .inputs
        .iter()
        .map(|input| match &cli.output_dir {
            Some(dir) => ConversionJob::into_dir(input, dir),
            None => ConversionJob::beside(input),
        })
        .collect();

    let options = ConvertOptions {
        tolerance: MeshTolerance {
            min_normal_length: cli.min_normal_length,
        },
        stl: StlOptions {
            solid_name: cli.solid_name,
        },
    };

    let results = convert_batch(&jobs, &options).context("conflicting output paths")?;

    let mut failed = 0usize;
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(report) => {
                if cli.summary {
                    println!("{}", serde_json::to_string(&report)?);
                }
            }
            Err(e) => {
                failed += 1;
                error!(input = %job.input.display(), kind = e.kind(), "conversion failed: {e}");
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} conversions failed", jobs.len());
    }
    Ok(())
}
