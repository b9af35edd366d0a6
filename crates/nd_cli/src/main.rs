use anyhow::Context;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue};
use clap::Parser;
use nd_clients::{create_collaborators, CollaboratorKind, Config, DEFAULT_AGGREGATOR_URL, DEFAULT_SCRAPER_URL};
use nd_web::envelope::Envelope;
use nd_web::{create_app, handlers, ApiError, AppState, API_PREFIX};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "HTTP front door for the news scraper and aggregator services", long_about = None)]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "NEWSDESK_HOST", default_value = "0.0.0.0")]
    host: String,
    #[arg(long, env = "NEWSDESK_PORT", default_value_t = 3000)]
    port: u16,
    /// Which collaborators to delegate to: remote (default) or dummy
    #[arg(long, env = "NEWSDESK_COLLABORATORS", default_value = "remote")]
    collaborators: CollaboratorKind,
    #[arg(long, env = "NEWSDESK_SCRAPER_URL", default_value = DEFAULT_SCRAPER_URL)]
    scraper_url: String,
    #[arg(long, env = "NEWSDESK_AGGREGATOR_URL", default_value = DEFAULT_AGGREGATOR_URL)]
    aggregator_url: String,
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug, Clone)]
enum Commands {
    /// Serve the news API (default)
    Serve,
    #[command(flatten)]
    Query(QueryCommand),
}

/// One-shot requests answered through the same handlers as the HTTP API.
#[derive(clap::Subcommand, Debug, Clone)]
enum QueryCommand {
    /// Search news across the scraper's sources
    Search {
        query: String,
        /// Interest to filter by, may be repeated
        #[arg(long = "interest")]
        interests: Vec<String>,
    },
    /// Fetch aggregated news for a query
    Aggregate {
        query: String,
    },
    /// Extract the full text of an article
    Extract {
        url: String,
    },
}

impl Cli {
    fn collaborator_config(&self) -> Config {
        Config {
            kind: self.collaborators,
            scraper_url: self.scraper_url.clone(),
            aggregator_url: self.aggregator_url.clone(),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("⚠️ Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("👋 Shutting down");
}

async fn serve(cli: &Cli, state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", cli.host, cli.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🗞️ News API listening on http://{}{}", addr, API_PREFIX);
    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Prints a handler's outcome the way the HTTP API would have returned it.
fn print_outcome<T: Serialize>(outcome: Result<axum::Json<T>, ApiError>) -> anyhow::Result<()> {
    match outcome {
        Ok(axum::Json(body)) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", serde_json::to_string_pretty(&Envelope::error(e.message()))?);
            anyhow::bail!("request failed with {}", e.status_code())
        }
    }
}

async fn run_once(command: QueryCommand, state: AppState) -> anyhow::Result<()> {
    let state = State(Arc::new(state));
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    match command {
        QueryCommand::Search { query, interests } => {
            let body = Bytes::from(serde_json::to_vec(&json!({"query": query, "userInterests": interests}))?);
            print_outcome(handlers::search_news(state, headers, body).await)
        }
        QueryCommand::Aggregate { query } => {
            let body = Bytes::from(serde_json::to_vec(&json!({"query": query}))?);
            print_outcome(handlers::aggregate_news(state, headers, body).await)
        }
        QueryCommand::Extract { url } => {
            let body = Bytes::from(serde_json::to_vec(&json!({"url": url}))?);
            print_outcome(handlers::extract_content(state, headers, body).await)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let collaborators = create_collaborators(&cli.collaborator_config())?;
    info!(
        "🧩 Delegating to {} and {}",
        collaborators.scraper.name(),
        collaborators.aggregator.name()
    );
    let state = AppState::from(collaborators);

    match cli.command.clone().unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&cli, state).await,
        Commands::Query(command) => run_once(command, state).await,
    }
}
