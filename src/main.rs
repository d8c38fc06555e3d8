use anyhow::{Context, Result};
use chrono::{Duration, Local};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use prettytable::{Cell, Row as PrettyRow, Table};
use std::env;
use std::fs::File;
use tracing::{info, warn};

use vigil::classify::{ClassifiedResult, Severity};
use vigil::config::{
    ScreeningConfig, DEFAULT_LOOKBACK_DAYS, INCLUSIVE_SIMILARITY_THRESHOLD,
};
use vigil::export::{export_path, write_csv};
use vigil::logging::configure_logging;
use vigil::pipeline::{Screener, ScreeningReport, ScreeningRequest, SortKey};
use vigil::sentiment::{LexiconClassifier, NegativityClassifier, RemoteClassifier};
use vigil::sources::{
    GNewsSource, NewsApiSource, NewsDataSource, OfacSdnSource, OpenSanctionsSource,
    UkSanctionsSource,
};
use vigil::TARGET_PIPELINE;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Newest,
    Oldest,
    Source,
    SanctionsFirst,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => SortKey::NewestFirst,
            SortArg::Oldest => SortKey::OldestFirst,
            SortArg::Source => SortKey::SourceAZ,
            SortArg::SanctionsFirst => SortKey::SanctionsFirst,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EngineArg {
    Lexicon,
    Remote,
}

#[derive(Parser)]
#[clap(name = "vigil", about = "Adverse news and sanctions screening")]
struct Cli {
    /// Entity name to screen
    #[clap(short, long, default_value = "")]
    name: String,

    /// Extra keywords, comma-separated
    #[clap(short, long, default_value = "")]
    keywords: String,

    /// How many days back to search
    #[clap(short, long, default_value_t = DEFAULT_LOOKBACK_DAYS)]
    days: i64,

    /// Override the name similarity threshold
    #[clap(short, long)]
    threshold: Option<f64>,

    /// Use the inclusive (0.6) similarity preset
    #[clap(long)]
    inclusive: bool,

    /// Result ordering
    #[clap(short, long, value_enum, default_value_t = SortArg::SanctionsFirst)]
    sort: SortArg,

    /// Keep only high severity results
    #[clap(long)]
    high_severity_only: bool,

    /// Negativity engine
    #[clap(short, long, value_enum, default_value_t = EngineArg::Lexicon)]
    engine: EngineArg,

    /// Write results to a CSV file ("auto" derives the name)
    #[clap(long)]
    csv: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();

    let cli = Cli::parse();

    let mut config = ScreeningConfig::from_env();
    if cli.inclusive {
        config = config.with_similarity_threshold(INCLUSIVE_SIMILARITY_THRESHOLD);
    }
    if let Some(threshold) = cli.threshold {
        config = config.with_similarity_threshold(threshold);
    }
    config
        .validate()
        .context("screening configuration is invalid")?;

    let classifier = build_classifier(cli.engine, &config)?;
    let client = reqwest::Client::builder()
        .gzip(true)
        .build()
        .context("failed to build HTTP client")?;

    let mut screener = Screener::new(&config, classifier)
        .with_list_source(Box::new(OfacSdnSource::new(client.clone())))
        .with_list_source(Box::new(UkSanctionsSource::new(client.clone())))
        .with_list_source(Box::new(OpenSanctionsSource::new(
            client.clone(),
            env::var("OPENSANCTIONS_API_KEY").ok(),
        )));

    screener = wire_news_sources(screener, &client);

    let to_date = Local::now().format("%Y-%m-%d").to_string();
    let from_date = (Local::now() - Duration::days(cli.days))
        .format("%Y-%m-%d")
        .to_string();

    let request = ScreeningRequest {
        name: cli.name.clone(),
        extra_keywords: cli
            .keywords
            .split(',')
            .map(|kw| kw.trim().to_string())
            .filter(|kw| !kw.is_empty())
            .collect(),
        from_date,
        to_date,
        sort_key: cli.sort.into(),
        high_severity_only: cli.high_severity_only,
    };

    let report = screener.screen(&request).await?;
    print_report(&cli.name, &report);

    if let Some(csv_arg) = &cli.csv {
        let path = if csv_arg == "auto" {
            export_path(&cli.name)
        } else {
            csv_arg.clone()
        };
        let file = File::create(&path).with_context(|| format!("failed to create {}", path))?;
        write_csv(&report.results, file)?;
        info!(target: TARGET_PIPELINE, "Exported {} results to {}", report.results.len(), path);
        println!("Results written to {}", path);
    }

    Ok(())
}

fn build_classifier(
    engine: EngineArg,
    config: &ScreeningConfig,
) -> Result<Box<dyn NegativityClassifier>> {
    match engine {
        EngineArg::Lexicon => Ok(Box::new(LexiconClassifier::new())),
        EngineArg::Remote => {
            let endpoint = env::var("SENTIMENT_ENDPOINT")
                .context("SENTIMENT_ENDPOINT must be set for the remote engine")?;
            let api_key = env::var("SENTIMENT_API_KEY").ok();
            if config.label_polarity.is_empty() {
                warn!(
                    target: TARGET_PIPELINE,
                    "No VIGIL_NEGATIVE_LABELS configured; only labels containing 'neg' will count as negative"
                );
            }
            let client = reqwest::Client::builder().gzip(true).build()?;
            Ok(Box::new(RemoteClassifier::new(client, &endpoint, api_key)))
        }
    }
}

/// Wire up each news provider whose API key is present; missing keys are
/// reported and the provider is skipped.
fn wire_news_sources(mut screener: Screener, client: &reqwest::Client) -> Screener {
    match env::var("NEWSDATA_API_KEY") {
        Ok(key) => {
            screener =
                screener.with_article_source(Box::new(NewsDataSource::new(client.clone(), &key)));
        }
        Err(_) => warn!(target: TARGET_PIPELINE, "NEWSDATA_API_KEY not set; skipping NewsData"),
    }
    match env::var("NEWSAPI_API_KEY") {
        Ok(key) => {
            screener =
                screener.with_article_source(Box::new(NewsApiSource::new(client.clone(), &key)));
        }
        Err(_) => warn!(target: TARGET_PIPELINE, "NEWSAPI_API_KEY not set; skipping NewsAPI"),
    }
    match env::var("GNEWS_API_KEY") {
        Ok(key) => {
            screener =
                screener.with_article_source(Box::new(GNewsSource::new(client.clone(), &key)));
        }
        Err(_) => warn!(target: TARGET_PIPELINE, "GNEWS_API_KEY not set; skipping GNews"),
    }
    screener
}

fn severity_cell(severity: Severity) -> Cell {
    let label = severity.to_string();
    let colored = match severity {
        Severity::High => label.bright_red().to_string(),
        Severity::Medium => label.bright_yellow().to_string(),
        Severity::Low => label.yellow().to_string(),
    };
    Cell::new(&colored)
}

fn print_report(name: &str, report: &ScreeningReport) {
    if report.results.is_empty() {
        println!(
            "No adverse findings for '{}' ({} articles fetched, {} list names screened).",
            name, report.articles_fetched, report.sanction_names_screened
        );
        return;
    }

    let mut table = Table::new();
    table.add_row(PrettyRow::new(vec![
        Cell::new("Title"),
        Cell::new("Source"),
        Cell::new("Date"),
        Cell::new("Severity"),
        Cell::new("Score"),
        Cell::new("Label"),
    ]));

    for result in &report.results {
        table.add_row(PrettyRow::new(vec![
            Cell::new(&truncate(&result.headline, 60)),
            Cell::new(&result.source.to_string()),
            Cell::new(&truncate(&result.date, 10)),
            severity_cell(result.severity),
            Cell::new(&format!("{:.2}", result.confidence)),
            Cell::new(&result.model_label),
        ]));
    }
    table.printstd();

    let high = count_severity(&report.results, Severity::High);
    let medium = count_severity(&report.results, Severity::Medium);
    let low = count_severity(&report.results, Severity::Low);
    println!(
        "{} findings for '{}': {} high, {} medium, {} low ({} articles fetched, {} list names screened).",
        report.results.len(),
        name,
        high,
        medium,
        low,
        report.articles_fetched,
        report.sanction_names_screened
    );
}

fn count_severity(results: &[ClassifiedResult], severity: Severity) -> usize {
    results.iter().filter(|r| r.severity == severity).count()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
