use std::sync::Arc;
use nd_clients::Collaborators;
use nd_core::{NewsAggregator, NewsScraper};

pub struct AppState {
    pub scraper: Arc<dyn NewsScraper>,
    pub aggregator: Arc<dyn NewsAggregator>,
}

impl AppState {
    pub fn new(scraper: Arc<dyn NewsScraper>, aggregator: Arc<dyn NewsAggregator>) -> Self {
        Self { scraper, aggregator }
    }
}

impl From<Collaborators> for AppState {
    fn from(collaborators: Collaborators) -> Self {
        Self::new(collaborators.scraper, collaborators.aggregator)
    }
}
