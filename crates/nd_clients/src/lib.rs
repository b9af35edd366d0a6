use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use nd_core::{NewsAggregator, NewsScraper, Result};

pub mod dummy;
pub mod remote;

pub use dummy::{DummyAggregator, DummyScraper};
pub use remote::{RemoteAggregator, RemoteScraper};

pub const DEFAULT_SCRAPER_URL: &str = "http://localhost:4001";
pub const DEFAULT_AGGREGATOR_URL: &str = "http://localhost:4002";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollaboratorKind {
    #[default]
    Remote,
    Dummy,
}

impl FromStr for CollaboratorKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "dummy" => Ok(Self::Dummy),
            other => Err(format!("Unknown collaborator kind: {} (expected remote or dummy)", other)),
        }
    }
}

impl fmt::Display for CollaboratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Dummy => write!(f, "dummy"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub kind: CollaboratorKind,
    pub scraper_url: String,
    pub aggregator_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kind: CollaboratorKind::default(),
            scraper_url: DEFAULT_SCRAPER_URL.to_string(),
            aggregator_url: DEFAULT_AGGREGATOR_URL.to_string(),
        }
    }
}

/// The pair of services the web layer delegates to.
#[derive(Debug, Clone)]
pub struct Collaborators {
    pub scraper: Arc<dyn NewsScraper>,
    pub aggregator: Arc<dyn NewsAggregator>,
}

pub fn create_collaborators(config: &Config) -> Result<Collaborators> {
    let collaborators = match config.kind {
        CollaboratorKind::Remote => {
            let client = Arc::new(reqwest::Client::new());
            Collaborators {
                scraper: Arc::new(RemoteScraper::with_client(client.clone(), &config.scraper_url)?),
                aggregator: Arc::new(RemoteAggregator::with_client(client, &config.aggregator_url)?),
            }
        }
        CollaboratorKind::Dummy => Collaborators {
            scraper: Arc::new(DummyScraper::new()),
            aggregator: Arc::new(DummyAggregator::new()),
        },
    };
    info!(
        "🔌 Collaborators ready ({}): {:?}, {:?}",
        config.kind, collaborators.scraper, collaborators.aggregator
    );
    Ok(collaborators)
}
