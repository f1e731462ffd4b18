//! # Docflow CLI
//!
//! Command-line interface for composing and exporting documents.
//!
//! ## Usage
//!
//! ```bash
//! # Run the HTTP API
//! docflow serve --listen 0.0.0.0:8080 --config docflow.toml
//!
//! # Export a check
//! docflow export --number 017 --client "Builder Co" \
//!     --item "Cement M400;10;t;5000" --item "Sand;3;m3;1200" --out ./out
//!
//! # Export a report
//! docflow export --kind report --text-file notes.txt
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use docflow::{
    DocflowConfig, DocflowError, Document, DocumentKind, DocumentRenderer, ExportPipeline,
    config::SeedItem,
    document::coerce_number,
    export::{Delivery, DirectoryDelivery, ImageFormat},
    server,
};

/// Docflow - compose checks and reports, export them as images
#[derive(Parser, Debug)]
#[command(name = "docflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Address to listen on (overrides the config file)
        #[arg(long)]
        listen: Option<String>,

        /// TOML configuration file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Render one document and write it to a directory
    Export {
        /// TOML configuration file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Document kind: check or report
        #[arg(long, default_value = "check")]
        kind: String,

        /// Document number
        #[arg(long)]
        number: Option<String>,

        /// Company name
        #[arg(long)]
        company: Option<String>,

        /// Document date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Client name (checks only)
        #[arg(long)]
        client: Option<String>,

        /// Line item as "name;quantity;unit;price" (repeatable, replaces configured items)
        #[arg(long = "item", value_name = "ITEM")]
        items: Vec<String>,

        /// Report text
        #[arg(long, conflicts_with = "text_file")]
        text: Option<String>,

        /// Read report text from a file
        #[arg(long, value_name = "FILE")]
        text_file: Option<PathBuf>,

        /// Output format: jpeg or png
        #[arg(long)]
        format: Option<String>,

        /// Output directory
        #[arg(long, value_name = "DIR", default_value = ".")]
        out: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DocflowError> {
    let cli = Cli::parse();
    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Serve { listen, config } => {
            let mut config = DocflowConfig::load_or_default(config.as_deref())?;
            if let Some(listen) = listen {
                config.server.listen_addr = listen;
            }
            runtime.block_on(server::serve(config))
        }

        Commands::Export {
            config,
            kind,
            number,
            company,
            date,
            client,
            items,
            text,
            text_file,
            format,
            out,
        } => {
            let mut config = DocflowConfig::load_or_default(config.as_deref())?;

            let kind = DocumentKind::from_tag(&kind)
                .ok_or_else(|| DocflowError::Config(format!("Unknown document kind: {}", kind)))?;
            if let Some(format) = format {
                config.export.format = ImageFormat::from_name(&format)
                    .ok_or_else(|| DocflowError::Config(format!("Unknown format: {}", format)))?;
            }

            let defaults = &mut config.defaults;
            if let Some(number) = number {
                defaults.document_number = number;
            }
            if let Some(company) = company {
                defaults.company_name = company;
            }
            if date.is_some() {
                defaults.document_date = date;
            }
            if let Some(client) = client {
                defaults.client_name = client;
            }
            if !items.is_empty() {
                defaults.seed_items = items.iter().map(|spec| parse_item(spec)).collect();
            }
            if let Some(text) = text {
                defaults.report_text = text;
            } else if let Some(path) = text_file {
                defaults.report_text = std::fs::read_to_string(&path)?;
            }

            let mut document = Document::new(&config.defaults);
            document.switch_kind(kind);

            let renderer = DocumentRenderer::new(config.locale, config.labels, config.page.columns);
            let surface = renderer.render(&document);
            let pipeline = ExportPipeline::new(config.export, config.page);
            let delivery = DirectoryDelivery::new(out);

            runtime.block_on(async {
                let artifact = pipeline
                    .export_current(Some(&surface), kind, &document.header().document_number)
                    .await?;
                match artifact {
                    Some(artifact) => {
                        let location = delivery.deliver(&artifact).await?;
                        println!(
                            "Exported {} ({}x{}, {} bytes) to {}",
                            artifact.filename,
                            artifact.width,
                            artifact.height,
                            artifact.bytes.len(),
                            location
                        );
                    }
                    None => println!("Nothing to export"),
                }
                Ok::<(), DocflowError>(())
            })
        }
    }
}

/// Parse "name;quantity;unit;price". Missing fields take the blank-item
/// defaults; numbers are coerced like form input.
fn parse_item(spec: &str) -> SeedItem {
    let mut parts = spec.split(';').map(str::trim);
    let name = parts.next().unwrap_or_default().to_string();
    let quantity = parts.next().map(coerce_number).unwrap_or(1.0);
    let unit = match parts.next() {
        Some(unit) if !unit.is_empty() => unit.to_string(),
        _ => "pc".to_string(),
    };
    let price = parts.next().map(coerce_number).unwrap_or(0.0);

    SeedItem {
        name,
        quantity,
        unit,
        price,
    }
}
