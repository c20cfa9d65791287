mod document;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use document::MarkingsDocument;
use pdf_markings::{FlattenPolicy, MarkingsOptions, ReadingClass};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "pdfmarkings",
    about = "Flatten and measure reading markings recorded on PDF pages",
    version,
    author
)]
struct Cli {
    /// Log flatten steps and anomalies at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve overlapping markings and write the result
    Flatten {
        /// Input markings document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Flatten policy: relevance, intersect-to-high, or a class name
        #[arg(short, long, default_value = "relevance")]
        policy: String,

        /// Subtraction pass ceiling
        #[arg(long)]
        max_passes: Option<usize>,
    },

    /// Report the share of the document covered by each relevance class
    Proportions {
        /// Input markings document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Flatten policy: relevance or intersect-to-high
        #[arg(short, long, default_value = "relevance")]
        policy: String,

        /// Calibration applied to the summed page area
        #[arg(short, long)]
        multiplier: Option<f64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Count markings per page and class
    Summary {
        /// Input markings document (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "pdf_markings=debug,pdfmarkings=debug"
    } else {
        "pdf_markings=warn,pdfmarkings=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_policy(policy: &str) -> Result<FlattenPolicy> {
    policy
        .parse::<FlattenPolicy>()
        .with_context(|| format!("Invalid policy '{policy}'"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Flatten {
            input,
            output,
            policy,
            max_passes,
        } => {
            let policy = parse_policy(&policy)?;
            let document = MarkingsDocument::load(&input)?;

            let mut options = MarkingsOptions::default();
            if let Some(passes) = max_passes {
                options = options.with_max_subtraction_passes(passes);
            }

            let mut markings = document.to_markings(options)?;
            let before = markings.count();
            markings.flatten(policy)?;
            tracing::info!(%policy, before, after = markings.count(), "flattened markings");

            document
                .with_markings(&markings)
                .write(output.as_deref())?;
        }

        Commands::Proportions {
            input,
            policy,
            multiplier,
            json,
        } => {
            let policy = parse_policy(&policy)?;
            let document = MarkingsDocument::load(&input)?;

            let mut options = MarkingsOptions::default();
            if let Some(multiplier) = multiplier {
                options = options.with_page_area_multiplier(multiplier);
            }
            options.validate()?;

            let markings = document.to_markings(options)?;
            let proportions = markings.proportions(&document.pages, policy)?;
            let gazed = markings.proportion_gazed(&document.pages)?;

            if json {
                let report = serde_json::json!({
                    "low": proportions.low,
                    "medium": proportions.medium,
                    "high": proportions.high,
                    "total": proportions.total(),
                    "gazed": gazed,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Proportions for: {}", input.display());
                println!("==========================================");
                println!("Low:    {:.4}", proportions.low);
                println!("Medium: {:.4}", proportions.medium);
                println!("High:   {:.4}", proportions.high);
                println!("Total:  {:.4}", proportions.total());
                println!("Gazed:  {:.4}", gazed);
            }
        }

        Commands::Summary { input } => {
            let document = MarkingsDocument::load(&input)?;
            let markings = document.to_markings(MarkingsOptions::default())?;

            println!("Markings summary for: {}", input.display());
            println!("==========================================");
            println!("Pages: {}", document.pages.len());
            println!("Markings: {}", markings.count());

            for page in markings.pages() {
                let summary = markings.page_summary(page);
                let counts: Vec<String> = ReadingClass::ALL
                    .iter()
                    .rev()
                    .filter(|class| summary.count(**class) > 0)
                    .map(|class| format!("{}={}", class, summary.count(*class)))
                    .collect();
                println!("Page {}: {}", page + 1, counts.join(" "));
            }
        }
    }

    Ok(())
}
