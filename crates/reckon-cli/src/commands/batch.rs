//! Batch command - rebuild per-product history from every discovered circular.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use reckon_core::{CircularParser, PriceRecord};

use crate::discover;
use crate::sink;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Roots to search for circular PDFs
    #[arg(long)]
    root: Vec<PathBuf>,

    /// Filename keywords identifying circulars
    #[arg(long)]
    keyword: Vec<String>,

    /// Directory for per-product CSV files
    #[arg(short = 'o', long, default_value = "csv")]
    csv_dir: PathBuf,

    /// Extraction mode
    #[arg(short, long, value_enum, default_value = "simple")]
    mode: super::process::ModeArg,

    /// Keep going when a document fails to read
    #[arg(long)]
    continue_on_error: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let keywords = discover::keywords_or_default(&args.keyword);
    let roots = discover::search_roots(&args.root);
    let files = discover::discover_all(&roots, &keywords);

    if files.is_empty() {
        anyhow::bail!("no circular PDFs found under the search roots");
    }

    println!("{} Found {} circular files", style("ℹ").blue(), files.len());

    let mut extraction = config.extraction.clone();
    extraction.mode = args.mode.into();
    let parser = CircularParser::new(extraction);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    // Accumulation across documents is append-only; each document's
    // extraction state lives inside its own parse call.
    let mut product_data: HashMap<String, Vec<PriceRecord>> = HashMap::new();
    let mut failed = 0usize;

    for path in &files {
        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        pb.set_message(filename.to_string());

        match super::read_document_text(path) {
            Ok(text) => {
                let result = parser.parse(&text, filename);
                for warning in &result.warnings {
                    warn!("{}: {}", path.display(), warning);
                }
                for record in result.records {
                    product_data
                        .entry(record.description.clone())
                        .or_default()
                        .push(record);
                }
            }
            Err(e) => {
                failed += 1;
                if args.continue_on_error {
                    warn!("failed to read {}: {}", path.display(), e);
                } else {
                    pb.abandon();
                    return Err(e);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    for (product, points) in &product_data {
        let path = sink::write_product_table(&args.csv_dir, product, points)?;
        debug!("wrote {} with {} points", path.display(), points.len());
    }

    println!(
        "{} Bulk extraction completed: {} products from {} files ({} failed)",
        style("✓").green(),
        product_data.len(),
        files.len(),
        failed,
    );
    println!(
        "{} CSV files created in {}",
        style("ℹ").blue(),
        args.csv_dir.display()
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
