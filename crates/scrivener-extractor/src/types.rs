//! Result types for extraction runs

use crate::error::ExtractorError;
use scrivener_domain::{Category, ExtractedEndpointData, RouteIdentity};
use serde::{Deserialize, Serialize};

/// Result of processing a batch of routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Endpoints that were fully extracted, in input order
    pub endpoints: Vec<ExtractedEndpointData>,

    /// Routes whose extraction was aborted
    pub failures: Vec<ExtractionFailure>,

    /// Metadata about the run
    pub metadata: ExtractionMetadata,
}

impl ExtractionReport {
    /// True when no route failed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Information about a route that could not be extracted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionFailure {
    /// Route that failed
    pub route: RouteIdentity,

    /// Reason for failure
    pub reason: String,

    /// Category whose strategy failed, if a strategy failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Identity of the failing strategy, if a strategy failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

impl ExtractionFailure {
    /// Record why a route's extraction was aborted
    pub fn new(route: RouteIdentity, error: &ExtractorError) -> Self {
        let (category, strategy) = match error.strategy_context() {
            Some((category, strategy)) => (Some(category), Some(strategy.to_string())),
            None => (None, None),
        };
        Self {
            route,
            reason: error.to_string(),
            category,
            strategy,
        }
    }
}

/// Metadata about an extraction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Total number of routes handed in
    pub total_routes: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrategyError;
    use scrivener_domain::{HandlerRef, Route};

    fn identity() -> RouteIdentity {
        Route::new(["GET"], "/api/users", HandlerRef::new("UserController", "index")).identity
    }

    #[test]
    fn test_failure_from_strategy_error() {
        let error = ExtractorError::StrategyExecution {
            route: "[GET] /api/users".to_string(),
            category: Category::Responses,
            strategy: "response_calls".to_string(),
            source: StrategyError::Failed("timeout".to_string()),
        };

        let failure = ExtractionFailure::new(identity(), &error);
        assert_eq!(failure.category, Some(Category::Responses));
        assert_eq!(failure.strategy.as_deref(), Some("response_calls"));
        assert!(failure.reason.contains("timeout"));
    }

    #[test]
    fn test_failure_from_other_error() {
        let failure = ExtractionFailure::new(identity(), &ExtractorError::Worker("gone".to_string()));
        assert_eq!(failure.category, None);
        assert_eq!(failure.strategy, None);
    }

    #[test]
    fn test_report_completeness() {
        let mut report = ExtractionReport {
            endpoints: Vec::new(),
            failures: Vec::new(),
            metadata: ExtractionMetadata {
                total_routes: 1,
                processing_time_ms: 0,
            },
        };
        assert!(report.is_complete());

        report
            .failures
            .push(ExtractionFailure::new(identity(), &ExtractorError::Timeout));
        assert!(!report.is_complete());
    }
}
