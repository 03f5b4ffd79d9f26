mod cli;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use rescount_api::plex::PlexClient;
use rescount_core::config::AppConfig;
use rescount_core::error::RescountError;
use rescount_core::orchestrator::{collect_tallies, SectionSelection};
use rescount_core::report;
use rescount_core::tally::ITEM_LOG_TARGET;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // .env values feed the env-backed flags, so load them before parsing.
    let env_file = dotenvy::dotenv();
    let args = cli::Args::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("rescount: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);
    match env_file {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }

    match run(&config).await {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|()| stdout.flush()) {
                tracing::error!(error = %e, "Failed to write report");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("rescount: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Tally every selected section, then render. Nothing is printed unless
/// every section succeeded.
async fn run(config: &AppConfig) -> Result<String, RescountError> {
    tracing::info!(url = %config.server.url, "Retrieving library data from Plex instance");

    let client = PlexClient::connect(&config.server.url, config.server.token.clone()).await?;
    let selection = SectionSelection::from_names(config.report.sections.clone());
    let tallies = collect_tallies(&client, &selection, config.verbose()).await?;

    Ok(report::render(&tallies))
}

fn init_tracing(config: &AppConfig) {
    let level = config.level_filter();
    let mut directives = format!("rescount={level},rescount_core={level},rescount_api={level}");
    if config.verbose() && level < LevelFilter::INFO {
        directives.push_str(&format!(",{ITEM_LOG_TARGET}=info"));
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .init();
}
