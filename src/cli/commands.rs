//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::config::ConverterConfig;
use crate::core::converter::ZhconvConverter;

/// Commands for the documentation converter
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert every document in the manifest (default)
    Run {
        /// Directory holding the Traditional-Chinese sources
        #[arg(long)]
        source_root: Option<PathBuf>,

        /// Directory receiving the Simplified-Chinese output
        #[arg(long)]
        dest_root: Option<PathBuf>,

        /// Build the manifest from every Markdown file under the source root
        #[arg(long)]
        scan: bool,

        /// Documents processed concurrently (status lines stay in manifest order)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Convert a single document
    File {
        /// Input file (required)
        input: PathBuf,

        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective manifest
    Manifest {
        /// Build the manifest from every Markdown file under the source root
        #[arg(long)]
        scan: bool,
    },
}

/// Load configuration: defaults, then the JSON file, then the environment
pub fn load_config(config_path: Option<PathBuf>) -> anyhow::Result<ConverterConfig> {
    let mut config = match config_path {
        Some(path) => ConverterConfig::from_file(path)?,
        None => ConverterConfig::default(),
    };
    config.apply_env()?;
    Ok(config)
}

/// Handle batch conversion command
pub async fn handle_run(
    mut config: ConverterConfig,
    source_root: Option<PathBuf>,
    dest_root: Option<PathBuf>,
    scan: bool,
    jobs: Option<usize>,
) -> anyhow::Result<()> {
    use crate::processors::batch::BatchDriver;
    use indicatif::{ProgressBar, ProgressStyle};
    use tracing::info;

    if let Some(root) = source_root {
        config.source_root = root;
    }
    if let Some(root) = dest_root {
        config.dest_root = root;
    }
    if let Some(jobs) = jobs {
        config.jobs = jobs;
    }
    if scan {
        config.scan_manifest()?;
    }
    config.validate()?;

    let manifest = config.manifest()?;

    info!("Starting conversion");
    info!("Source: {}", config.source_root.display());
    info!("Destination: {}", config.dest_root.display());
    info!("Documents: {}", manifest.len());

    let driver = BatchDriver::from_config(&config, Arc::new(ZhconvConverter::new()));

    // Create progress bar
    let pb = ProgressBar::new(manifest.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let result = driver
        .run(&manifest, |report| {
            pb.suspend(|| println!("{}", report.status_line()));
            pb.set_message(report.id.to_string());
            pb.inc(1);
        })
        .await;

    pb.finish_and_clear();
    let summary = result?;

    info!(
        "Conversion completed: {} documents ({} translated, {} not translated) in {:?}",
        summary.total(),
        summary.translated,
        summary.not_translated,
        summary.elapsed
    );

    Ok(())
}

/// Handle single-document command
pub async fn handle_file(
    config: ConverterConfig,
    input: PathBuf,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    use crate::core::errors::ConversionError;
    use crate::processors::markdown::MarkdownProcessor;
    use tracing::info;

    config.validate()?;
    let processor = MarkdownProcessor::from_config(&config, Arc::new(ZhconvConverter::new()));

    match output {
        Some(output) => {
            let document = processor.convert_file(&input, &output).await?;
            info!("{} -> {}", input.display(), output.display());
            println!("{} {}.", input.display(), document.outcome);
        }
        None => {
            let content = tokio::fs::read_to_string(&input)
                .await
                .map_err(|e| ConversionError::file(&input, e))?;
            let document = processor.process(&content)?;
            print!("{}", document.text);
        }
    }

    Ok(())
}

/// Handle manifest listing command
pub async fn handle_manifest(mut config: ConverterConfig, scan: bool) -> anyhow::Result<()> {
    if scan {
        config.scan_manifest()?;
    }

    for id in &config.manifest()? {
        println!("{}", id);
    }

    Ok(())
}
