use chrono::Local;
use clap::{Args, Parser, Subcommand};
use realty_report::config::{AppConfig, MarketProfile};
use realty_report::error::AppError;
use realty_report::telemetry;
use realty_report::workflows::market::{
    ReportPipeline, ReportPublisher, RunOutcome, WordPressClient, YearMonth,
};
use realty_report::workflows::molit::MolitClient;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "realty-report",
    about = "Build the monthly Yeoju real-estate transaction report",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, render and publish the report (default command)
    Run(RunArgs),
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Deal month to report (YYYYMM, defaults to the current month)
    #[arg(long)]
    month: Option<YearMonth>,
    /// Override the artifact root directory
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Current-month record count below which the previous month is appended
    #[arg(long)]
    fallback_threshold: Option<usize>,
    /// Maximum cards shown per category
    #[arg(long)]
    display_cap: Option<usize>,
    /// Write local artifacts only, even when publish credentials exist
    #[arg(long)]
    no_publish: bool,
    /// Skip the summary image
    #[arg(long)]
    no_image: bool,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Run(RunArgs::default()));

    match command {
        Command::Run(args) => run_report(args),
    }
}

fn run_report(args: RunArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(dir) = args.output_dir {
        config.report.output_dir = dir;
    }
    if let Some(threshold) = args.fallback_threshold {
        config.report.fallback_threshold = threshold;
    }
    if let Some(cap) = args.display_cap {
        config.report.display_cap = cap;
    }

    telemetry::init(&config.telemetry)?;

    let now = Local::now().naive_local();
    let target = args
        .month
        .unwrap_or_else(|| YearMonth::from_date(now.date()));
    let profile = MarketProfile::yeoju();

    let source = MolitClient::new(config.source.clone(), profile.clone())?;
    let mut pipeline = ReportPipeline::new(Box::new(source), profile.clone(), &config.report);
    if args.no_image {
        pipeline = pipeline.without_image();
    }

    match config.publish.credentials() {
        Some(credentials) if !args.no_publish => {
            let client = WordPressClient::new(credentials, config.source.timeout)?;
            pipeline = pipeline.with_publisher(ReportPublisher::new(
                Box::new(client),
                profile.clone(),
                config.publish.category_id,
                config.publish.body_mode,
            ));
        }
        Some(_) => info!("publishing disabled by --no-publish"),
        None => info!("WP_URL, WP_USER or WP_APP_PASSWORD missing; publishing disabled"),
    }

    info!(
        environment = ?config.environment,
        region = profile.region_name,
        month = %target,
        "starting report run"
    );

    match pipeline.run(target, now)? {
        RunOutcome::NothingToReport => {
            println!(
                "{} {}: no transactions to report",
                profile.region_name,
                target.label()
            );
        }
        RunOutcome::Produced {
            artifacts,
            stats,
            published,
        } => {
            println!(
                "{} {}: {} transactions",
                profile.region_name,
                target.label(),
                stats.overall.total
            );
            for category in &stats.categories {
                println!(
                    "- {}: {}",
                    profile.spec(category.category).label,
                    category.total
                );
            }
            println!("Report: {}", artifacts.report.display());
            if let Some(image) = &artifacts.image {
                println!("Image: {}", image.display());
            }
            println!("Records: {}", artifacts.records.display());
            match published {
                Some(post) => println!("Published: {}", post.link),
                None => println!("Published: no"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_is_the_default_command() {
        let cli = Cli::try_parse_from(["realty-report"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::try_parse_from([
            "realty-report",
            "run",
            "--month",
            "202502",
            "--display-cap",
            "5",
            "--fallback-threshold",
            "4",
            "--no-publish",
            "--no-image",
        ])
        .expect("parses");

        let Some(Command::Run(args)) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.month, YearMonth::new(2025, 2));
        assert_eq!(args.display_cap, Some(5));
        assert_eq!(args.fallback_threshold, Some(4));
        assert!(args.no_publish);
        assert!(args.no_image);
    }

    #[test]
    fn malformed_month_is_rejected() {
        assert!(Cli::try_parse_from(["realty-report", "run", "--month", "2025-13"]).is_err());
    }
}
