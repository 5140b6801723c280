//! Error types for the Extractor

use scrivener_domain::Category;
use thiserror::Error;

/// Errors raised by a strategy while processing one endpoint
#[derive(Error, Debug)]
pub enum StrategyError {
    /// The endpoint carries input the strategy cannot interpret
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The strategy failed for another reason
    #[error("Strategy failed: {0}")]
    Failed(String),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for StrategyError {
    fn from(e: serde_json::Error) -> Self {
        StrategyError::Json(e.to_string())
    }
}

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// A configured strategy failed; extraction of that endpoint stops
    #[error("Strategy '{strategy}' failed in {category} for {route}: {source}")]
    StrategyExecution {
        /// Route being processed
        route: String,
        /// Category the strategy ran in
        category: Category,
        /// Configured strategy identity
        strategy: String,
        /// Underlying failure
        #[source]
        source: StrategyError,
    },

    /// The configuration names a strategy nobody registered for a category
    #[error("Unknown strategy '{name}' configured for {category}")]
    UnknownStrategy {
        /// Category the name was listed under
        category: Category,
        /// Unregistered identity
        name: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The concurrent run exceeded its time limit
    #[error("Extraction timeout")]
    Timeout,

    /// A worker task could not be scheduled or joined
    #[error("Worker error: {0}")]
    Worker(String),
}

impl ExtractorError {
    /// Category and strategy identity of a strategy failure
    pub fn strategy_context(&self) -> Option<(Category, &str)> {
        match self {
            ExtractorError::StrategyExecution {
                category, strategy, ..
            } => Some((*category, strategy.as_str())),
            _ => None,
        }
    }
}
