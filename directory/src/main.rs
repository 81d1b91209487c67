//! Main entry point for the directory binary
//!
//! Wires the simulated provider into the fetch orchestrator and state store,
//! then prints one derived view per subcommand.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use directory::core::aggregation::{band_label, count_by_region, criteria_breakdown, rating_histogram, total_students};
use directory::core::query::{directorates, parse_type_filter};
use directory::{
    core::summarize, FetchOrchestrator, LoadOutcome, Projector, QueryEngine, QuerySpec, SimulatedProvider, SortKey,
    SortOrder, StateStore,
};
use shared::{
    logging, CriterionScore, DirectoryConfig, PageData, RatingSubmission, Region, SchoolRecord, SectionKey,
    SubmissionReceipt,
};

const CONFIG_ENV: &str = "DIRECTORY_CONFIG";
const LOG_LEVEL_ENV: &str = "DIRECTORY_LOG_LEVEL";

/// Browse the school directory against a simulated backend
#[derive(Parser)]
#[command(name = "directory")]
#[command(about = "Search, rank and map schools in Gaza and the West Bank")]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Simulated provider latency in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Probability in 0.0..=1.0 that a provider call fails
    #[arg(long)]
    pub failure_rate: Option<f64>,

    /// Upper bound on a single provider call in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Print search results, statistics and markers as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Free-text search with optional filters
    Search {
        /// Text matched against names, addresses, cities and regions
        #[arg(default_value = "")]
        query: String,

        /// Arabic label or English name; "all" disables the filter
        #[arg(long = "type")]
        school_type: Option<String>,

        #[arg(long)]
        region: Option<Region>,

        #[arg(long)]
        directorate: Option<String>,

        #[arg(long)]
        min_rating: Option<f64>,

        /// Only schools rated 4.0 and above
        #[arg(long)]
        top_only: bool,

        /// rating, votes or name
        #[arg(long)]
        sort: Option<SortKey>,

        /// asc or desc; defaults to the key's natural order
        #[arg(long)]
        order: Option<SortOrder>,
    },
    /// Aggregate statistics over the catalogue
    Stats {
        #[arg(long)]
        region: Option<Region>,
    },
    /// Marker positions on the region map panels
    Map {
        #[arg(long)]
        region: Option<Region>,
    },
    /// Highest-rated schools with their criteria
    Best,
    /// Submit a rating for a school
    Rate {
        school_id: String,

        /// Whole stars, 1 to 5
        stars: u8,

        /// Criterion as LABEL=PERCENT; may be repeated
        #[arg(long = "criterion", value_parser = parse_criterion)]
        criteria: Vec<CriterionScore>,

        #[arg(long)]
        comment: Option<String>,
    },
}

fn parse_criterion(input: &str) -> Result<CriterionScore, String> {
    let (label, percentage) = input
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=PERCENT, got '{input}'"))?;
    let percentage: f64 = percentage
        .trim()
        .parse()
        .map_err(|e| format!("invalid percentage '{percentage}': {e}"))?;
    CriterionScore::new(label.trim(), percentage).map_err(|e| e.to_string())
}

fn load_config(args: &Args) -> anyhow::Result<DirectoryConfig> {
    let path = args
        .config
        .clone()
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

    let mut config = match path {
        Some(path) => DirectoryConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => DirectoryConfig::default(),
    };

    if let Some(latency_ms) = args.latency_ms {
        config.provider.latency_ms = latency_ms;
    }
    if let Some(failure_rate) = args.failure_rate {
        config.provider.failure_rate = failure_rate;
    }
    if args.timeout_ms.is_some() {
        config.fetch.timeout_ms = args.timeout_ms;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Load one page section, surfacing the slot's error on failure
async fn load_section(
    orchestrator: &FetchOrchestrator<PageData>,
    provider: Arc<SimulatedProvider>,
    section: SectionKey,
) -> anyhow::Result<PageData> {
    match orchestrator.load_page(provider, section).await {
        LoadOutcome::Loaded => orchestrator
            .store()
            .section(section)
            .data
            .clone()
            .with_context(|| format!("Section {section} finished loading without data")),
        LoadOutcome::Failed(error) => {
            let attempts = orchestrator.store().section(section).retry_count;
            bail!("Section {section} failed ({}, attempt {attempts}): {error}", error.kind)
        }
        LoadOutcome::Stale => bail!("Section {section} was superseded by a newer load"),
    }
}

fn print_records<'a>(records: impl IntoIterator<Item = &'a SchoolRecord>) {
    for record in records {
        let place = match &record.directorate {
            Some(directorate) => format!("{} / {}", record.region.label(), directorate),
            None => record.region.label().to_string(),
        };
        println!(
            "{:<8} {:<40} {:<12} {:.1}★ ({} votes)  {}",
            record.id,
            record.name,
            record.school_type.label(),
            record.rating,
            record.votes,
            place
        );
    }
}

fn in_region(records: Vec<SchoolRecord>, region: Option<Region>) -> Vec<SchoolRecord> {
    match region {
        Some(region) => records.into_iter().filter(|r| r.region == region).collect(),
        None => records,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let log_level = args.log_level.clone().or_else(|| std::env::var(LOG_LEVEL_ENV).ok());
    logging::init_tracing(log_level.as_deref());

    let config = load_config(&args)?;
    logging::log_startup("school directory");

    let provider = Arc::new(
        SimulatedProvider::new(config.provider.clone())
            .context("Failed to seed the simulated provider")?
            .with_query_settings(config.query.clone()),
    );
    let store = Arc::new(StateStore::<PageData>::new());
    let orchestrator = FetchOrchestrator::new(Arc::clone(&store)).with_timeout(config.fetch.timeout());
    let engine = QueryEngine::with_top_only_floor(config.query.top_only_floor);

    match args.command {
        Command::Search {
            query,
            school_type,
            region,
            directorate,
            min_rating,
            top_only,
            sort,
            order,
        } => {
            let page = load_section(&orchestrator, provider, SectionKey::SearchResults).await?;

            let mut spec = QuerySpec::new().with_search_text(query);
            spec.type_filter = school_type.as_deref().map(parse_type_filter).transpose()?.flatten();
            spec.region_filter = region;
            spec.directorate_filter = directorate;
            spec.min_rating = min_rating;
            spec.top_only = top_only;
            spec.sort_key = sort;
            spec.sort_order = order;

            let results = engine.select(&page.records, &spec);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
                return Ok(());
            }
            println!("{} of {} schools match", results.len(), page.records.len());
            print_records(results);

            if region == Some(Region::WestBank) {
                println!("Directorates: {}", directorates(&page.records).join("، "));
            }
        }
        Command::Stats { region } => {
            let page = load_section(&orchestrator, provider, SectionKey::Statistics).await?;
            let records = in_region(page.records, region);

            let stats = summarize(&records);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            println!("Schools:        {}", stats.count);
            println!("Average rating: {:.1}", stats.average_rating);
            println!("Total votes:    {}", stats.total_votes);
            println!("Students:       {}", total_students(&records));
            for (school_type, count) in &stats.count_by_type {
                println!("  {:<12} {}", school_type.label(), count);
            }
            for (region, count) in count_by_region(&records) {
                println!("  {:<14} {}", region.label(), count);
            }
            for (bucket, count) in rating_histogram(&records).iter().enumerate() {
                println!("  {:<6}★ {}", band_label(bucket), "█".repeat(*count));
            }
        }
        Command::Map { region } => {
            let page = load_section(&orchestrator, provider, SectionKey::MapData).await?;
            let records = in_region(page.records, region);

            let markers = Projector::new(config.projection.clone()).project_all(&records);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&markers)?);
                return Ok(());
            }
            for marker in markers {
                println!(
                    "{:<8} top {:>5.1}%  left {:>5.1}%  {}",
                    marker.id, marker.position.top, marker.position.left, marker.name
                );
            }
        }
        Command::Best => {
            let page = load_section(&orchestrator, provider, SectionKey::BestOf).await?;
            print_records(&page.records);
            for record in &page.records {
                println!("{}", record.name);
                for row in criteria_breakdown(page.criteria_for(&record.id)) {
                    println!("  {:<20} {:>5.1}%  {:.1}★", row.label, row.percentage, row.stars);
                }
            }
        }
        Command::Rate {
            school_id,
            stars,
            criteria,
            comment,
        } => {
            let submissions = Arc::new(StateStore::<SubmissionReceipt>::new());
            let submitter = FetchOrchestrator::new(Arc::clone(&submissions)).with_timeout(config.fetch.timeout());
            let payload = RatingSubmission {
                school_id,
                stars,
                criteria,
                comment,
            };

            match submitter.submit_rating(provider, payload).await {
                LoadOutcome::Loaded => {
                    let slot = submissions.section(SectionKey::RatingForm);
                    if let Some(receipt) = &slot.data {
                        logging::log_success(&format!("Rating saved with receipt {}", receipt.id));
                        println!("{}", receipt.message);
                    }
                }
                LoadOutcome::Failed(error) => {
                    logging::log_error("Rating submission", &error);
                    bail!("{error}");
                }
                LoadOutcome::Stale => bail!("Rating submission was superseded"),
            }
        }
    }

    Ok(())
}
