pub mod error;
pub mod requests;
pub mod services;
pub mod types;

pub use error::{Error, Result};
pub use requests::{AggregateRequest, ExtractRequest, RequestBody, SearchRequest};
pub use services::{NewsAggregator, NewsScraper};
pub use types::Article;
