use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Aggregation error: {0}")]
    Aggregation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The message a caller supplied, without the variant's prefix.
    ///
    /// Empty when a collaborator failed without saying why.
    pub fn detail(&self) -> String {
        match self {
            Error::InvalidRequest(m)
            | Error::Scraping(m)
            | Error::Aggregation(m)
            | Error::Config(m) => m.clone(),
            other => other.to_string(),
        }
    }
}
