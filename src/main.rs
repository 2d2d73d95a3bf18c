mod cli;

use anyhow::Context;
use chrono::Local;
use cli::Args;
use gcp_scanner::adapters::outbound::console::StderrProgressReporter;
use gcp_scanner::adapters::outbound::crawlers::StaticCrawlerRegistry;
use gcp_scanner::adapters::outbound::filesystem::JsonFileStore;
use gcp_scanner::adapters::outbound::network::{
    build_http_client, IamCredentialsImpersonator, ResourceManagerDirectory, RestClientFactory,
};
use gcp_scanner::application::dto::ScanRequest;
use gcp_scanner::application::factories::CredentialSourceFactory;
use gcp_scanner::application::use_cases::CrawlIdentitiesUseCase;
use gcp_scanner::config::{default_config_json, load_scan_config};
use gcp_scanner::scanning::domain::{OutputName, ScanConfig};
use gcp_scanner::shared::error::ExitCode;
use gcp_scanner::shared::security::validate_output_directory;
use gcp_scanner::shared::Result;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    if args.print_default_config {
        match default_config_json() {
            Ok(json) => {
                println!("{}", json);
                process::exit(ExitCode::Success.as_i32());
            }
            Err(e) => exit_with_error(e),
        }
    }

    if let Err(e) = init_logging(&args) {
        exit_with_error(e);
    }

    match run(args).await {
        Ok(()) => process::exit(ExitCode::Success.as_i32()),
        Err(e) => exit_with_error(e),
    }
}

fn exit_with_error(e: anyhow::Error) -> ! {
    eprintln!("\n❌ An error occurred:\n");
    eprintln!("{}", e);

    // Display error chain
    let mut source = e.source();
    while let Some(err) = source {
        eprintln!("\nCaused by: {}", err);
        source = err.source();
    }

    eprintln!();
    process::exit(ExitCode::ApplicationError.as_i32());
}

fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(log_file) = &args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let output_dir = args
        .output_dir
        .clone()
        .context("--output-dir is required")?;
    validate_output_directory(&output_dir)?;

    let scan_config = match &args.config {
        Some(path) => load_scan_config(path)?,
        None => ScanConfig::fetch_everything(),
    };

    let http = build_http_client()?;

    // Create adapters (Dependency Injection)
    let sources = CredentialSourceFactory::create(&args.credential_selection(), http.clone());
    let seeds = CredentialSourceFactory::load_seeds(&sources).await;
    if seeds.is_empty() {
        tracing::warn!("No credentials could be loaded from the selected sources");
    }

    let use_case = CrawlIdentitiesUseCase::new(
        StaticCrawlerRegistry::with_default_crawlers(),
        RestClientFactory::new(http.clone()),
        ResourceManagerDirectory::new(RestClientFactory::new(http.clone())),
        IamCredentialsImpersonator::new(RestClientFactory::new(http)),
        JsonFileStore::new(output_dir),
        StderrProgressReporter::new(),
    );

    let request = ScanRequest::new(scan_config, OutputName::time_suffix(&Local::now()))
        .with_light_scan(args.light_scan)
        .with_target_project(args.project.clone())
        .with_force_projects(args.force_projects.clone());

    let summary = use_case.execute(&request, seeds).await;
    tracing::info!(%summary, "Scan complete");
    Ok(())
}
