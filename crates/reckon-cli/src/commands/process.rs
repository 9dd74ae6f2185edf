//! Process command - extract one circular into per-product CSV history.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use reckon_core::{CircularParser, ExtractionMode};

use crate::discover;
use crate::sink;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input circular (.pdf or pre-rendered .txt); discovered when omitted
    input: Option<PathBuf>,

    /// Directory for per-product CSV files
    #[arg(short = 'o', long, default_value = "csv")]
    csv_dir: PathBuf,

    /// Extraction mode
    #[arg(short, long, value_enum, default_value = "strict")]
    mode: ModeArg,

    /// Roots to search when no input is given
    #[arg(long)]
    root: Vec<PathBuf>,

    /// Filename keywords identifying circulars during discovery
    #[arg(long)]
    keyword: Vec<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    /// Strict dedup with the two-line price fallback
    Strict,
    /// Single pass with lower acceptance floors
    Simple,
}

impl From<ModeArg> for ExtractionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Strict => ExtractionMode::Strict,
            ModeArg::Simple => ExtractionMode::Simple,
        }
    }
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let input = match &args.input {
        Some(path) => path.clone(),
        None => {
            let keywords = discover::keywords_or_default(&args.keyword);
            let roots = discover::search_roots(&args.root);
            discover::discover_latest(&roots, &keywords)
                .ok_or_else(|| anyhow::anyhow!("no recent circular found; pass an input path"))?
        }
    };

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    info!("Processing file: {}", input.display());

    // Create progress bar
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Reading document...");
    pb.set_position(10);

    let text = super::read_document_text(&input)?;
    if text.trim().len() < config.pdf.min_text_length {
        anyhow::bail!("document text too short to be a circular");
    }

    pb.set_message("Scanning table...");
    pb.set_position(40);

    let mut extraction = config.extraction.clone();
    extraction.mode = args.mode.into();
    let parser = CircularParser::new(extraction);

    let filename = input.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let result = parser.parse(&text, filename);

    pb.set_message("Writing CSV files...");
    pb.set_position(70);

    let mut written = 0usize;
    let mut skipped = 0usize;
    for record in &result.records {
        if sink::append_record(&args.csv_dir, record)? {
            written += 1;
        } else {
            skipped += 1;
        }
    }

    pb.set_position(100);
    pb.finish_and_clear();

    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    println!(
        "{} {} records extracted effective {} ({} written, {} already present)",
        style("✓").green(),
        result.records.len(),
        result.effective_date,
        written,
        skipped,
    );
    println!(
        "{} CSV files updated in {}",
        style("ℹ").blue(),
        args.csv_dir.display()
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
