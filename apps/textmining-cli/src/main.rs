//! TextMining command-line search
//!
//! Searches a PDF (or form-feed paged text file) for a condition and prints
//! the report lines to stdout, appending them to the log directory as well.
//!
//! ```text
//! textmining contract.pdf ./logs "rent AND deposit"
//! textmining --shape summary contract.pdf ./logs "rent OR fee"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use textmining_core::source::Pages;
use textmining_core::{
    PlainTextExtractor, ReportShape, SearchConfig, SearchEngine, SearchError, TextExtractor,
};
use textmining_pdf::{is_pdf, PdfExtractor};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for the textmining search
#[derive(Parser, Debug)]
#[command(name = "textmining")]
#[command(version, about = "Search a document for lines matching a condition")]
struct Args {
    /// Document to search (.pdf, or plain text with form-feed page breaks)
    document: PathBuf,

    /// Existing directory the report is appended to
    log_path: PathBuf,

    /// Condition: a term, "a OR b OR c" or "a AND b AND c"
    condition: String,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report shape: line_dump or occurrence_summary
    #[arg(short, long)]
    shape: Option<ReportShape>,

    /// Search counter file (overrides the configured one)
    #[arg(long)]
    counter: Option<PathBuf>,

    /// Ignore accents when matching
    #[arg(long)]
    fold_diacritics: bool,

    /// Print the report as JSON instead of plain lines
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Configuration file values with command-line overrides applied
    fn resolve_config(&self) -> anyhow::Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_file(path)?,
            None => SearchConfig::default(),
        };

        if let Some(shape) = self.shape {
            config.report.shape = shape;
        }
        if let Some(counter) = &self.counter {
            config.counter.path = counter.clone();
        }
        if self.fold_diacritics {
            config.report.fold_diacritics = true;
        }

        Ok(config)
    }
}

/// Picks the extractor from the document's extension
#[derive(Debug, Default)]
struct DocumentExtractor {
    pdf: PdfExtractor,
    text: PlainTextExtractor,
}

impl TextExtractor for DocumentExtractor {
    fn pages<'a>(&'a self, document: &Path) -> Result<Pages<'a>, SearchError> {
        if is_pdf(document) {
            self.pdf.pages(document)
        } else {
            self.text.pages(document)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for the report
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = args.resolve_config()?;
    info!(
        "Searching {} ({})",
        args.document.display(),
        config.report.shape
    );

    let mut engine = SearchEngine::from_config(Box::new(DocumentExtractor::default()), &config);
    let report = engine.search(&args.document, &args.log_path, &args.condition)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        for line in report.lines() {
            println!("{line}");
        }
    }

    Ok(())
}
