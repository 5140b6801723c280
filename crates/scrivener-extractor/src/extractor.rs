//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::context::EndpointContext;
use crate::error::ExtractorError;
use crate::pipeline::{run_category, Pipelines};
use crate::strategy::StrategyRegistry;
use crate::types::{ExtractionFailure, ExtractionMetadata, ExtractionReport};
use scrivener_domain::{
    Category, ExtractedEndpointData, ParameterLocation, ResponseDescriptor, Route, RouteIdentity,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Extractor turns routes into finalized endpoint records
///
/// Pipelines are resolved once at construction and shared read-only by every
/// endpoint, so one extractor can serve any number of runs.
pub struct Extractor {
    config: ExtractorConfig,
    pipelines: Pipelines,
}

impl Extractor {
    /// Create a new Extractor, resolving the configured strategies
    pub fn new(config: ExtractorConfig, registry: &StrategyRegistry) -> Result<Self, ExtractorError> {
        config.validate()?;
        let pipelines = registry.resolve(&config.strategies)?;

        info!(
            "Extractor ready: metadata {:?}, responses {:?}",
            pipelines.names(Category::Metadata),
            pipelines.names(Category::Responses)
        );

        Ok(Self { config, pipelines })
    }

    /// Create a new Extractor backed by the built-in strategies
    pub fn with_builtins(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        Self::new(config, &StrategyRegistry::with_builtins())
    }

    /// The configuration this extractor was built from
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The resolved pipelines
    pub fn pipelines(&self) -> &Pipelines {
        &self.pipelines
    }

    /// Extract one endpoint
    ///
    /// Runs every category in pipeline order, applies metadata defaults and
    /// sorts responses by status. The first strategy error aborts the
    /// endpoint.
    pub fn process_route(&self, route: &Route) -> Result<ExtractedEndpointData, ExtractorError> {
        debug!("Processing {}", route);

        // Resolve per-path rules and parse both annotation blocks once
        let rules = self.config.route_rules_for(route);
        if !rules.is_empty() {
            debug!("Route rules apply to {}", route.identity);
        }
        let endpoint = EndpointContext::new(route);
        let pipelines = &self.pipelines;

        // Run every category in pipeline order
        let metadata = run_category(Category::Metadata, pipelines.metadata(), &endpoint, &rules)?;
        let url_parameters = run_category(
            Category::UrlParameters,
            pipelines.parameters(ParameterLocation::Url),
            &endpoint,
            &rules,
        )?;
        let query_parameters = run_category(
            Category::QueryParameters,
            pipelines.parameters(ParameterLocation::Query),
            &endpoint,
            &rules,
        )?;
        let headers = run_category(
            Category::Headers,
            pipelines.parameters(ParameterLocation::Header),
            &endpoint,
            &rules,
        )?;
        let body_parameters = run_category(
            Category::BodyParameters,
            pipelines.parameters(ParameterLocation::Body),
            &endpoint,
            &rules,
        )?;
        let mut responses = run_category(Category::Responses, pipelines.responses(), &endpoint, &rules)?;
        let response_fields =
            run_category(Category::ResponseFields, pipelines.response_fields(), &endpoint, &rules)?;

        sort_responses(&mut responses);

        // Fill in missing metadata
        Ok(ExtractedEndpointData {
            route: route.identity.clone(),
            metadata: metadata.finalize(),
            url_parameters,
            query_parameters,
            headers,
            body_parameters,
            responses,
            response_fields,
        })
    }

    /// Extract a batch of routes one after another
    ///
    /// Failing routes are logged and reported; the rest are still extracted.
    pub fn process_routes(&self, routes: &[Route]) -> ExtractionReport {
        let start = Instant::now();
        info!("Starting extraction of {} routes", routes.len());

        let outcomes = routes
            .iter()
            .map(|route| (route.identity.clone(), self.process_route(route)))
            .collect();

        build_report(outcomes, routes.len(), start)
    }

    /// Extract a batch of routes on blocking workers
    ///
    /// At most `max_concurrent_endpoints` routes are processed at once.
    /// Results keep input order, so the report matches [`Self::process_routes`].
    /// With `run_timeout_secs` set, exceeding it aborts the whole run.
    pub async fn process_routes_concurrently(
        self: Arc<Self>,
        routes: Vec<Route>,
    ) -> Result<ExtractionReport, ExtractorError> {
        let start = Instant::now();
        let total = routes.len();

        info!(
            "Starting concurrent extraction of {} routes with {} workers",
            total, self.config.max_concurrent_endpoints
        );

        // Whole run under the optional time limit
        let run = self.spawn_all(routes);
        let outcomes = match self.config.run_timeout() {
            Some(limit) => timeout(limit, run).await.map_err(|_| ExtractorError::Timeout)??,
            None => run.await?,
        };

        Ok(build_report(outcomes, total, start))
    }

    async fn spawn_all(
        self: &Arc<Self>,
        routes: Vec<Route>,
    ) -> Result<Vec<(RouteIdentity, Result<ExtractedEndpointData, ExtractorError>)>, ExtractorError>
    {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_endpoints));
        let mut handles = Vec::with_capacity(routes.len());

        // Wait for a free worker before spawning the next route
        for route in routes {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| ExtractorError::Worker(format!("Semaphore closed: {}", e)))?;
            let extractor = Arc::clone(self);

            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                let result = extractor.process_route(&route);
                (route.identity, result)
            }));
        }

        // Join in spawn order so results keep input order
        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            outcomes.push(
                handle
                    .await
                    .map_err(|e| ExtractorError::Worker(format!("Task join error: {}", e)))?,
            );
        }
        Ok(outcomes)
    }
}

/// Sort responses by status, ascending
///
/// The sort is stable: responses sharing a status keep their merged order.
pub fn sort_responses(responses: &mut [ResponseDescriptor]) {
    responses.sort_by_key(|response| response.status);
}

fn build_report(
    outcomes: Vec<(RouteIdentity, Result<ExtractedEndpointData, ExtractorError>)>,
    total_routes: usize,
    start: Instant,
) -> ExtractionReport {
    let mut endpoints = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();

    for (identity, outcome) in outcomes {
        match outcome {
            Ok(endpoint) => endpoints.push(endpoint),
            Err(e) => {
                warn!("Failed to extract {}: {}", identity, e);
                failures.push(ExtractionFailure::new(identity, &e));
            }
        }
    }

    info!(
        "Extraction complete: {} endpoints, {} failed",
        endpoints.len(),
        failures.len()
    );

    ExtractionReport {
        endpoints,
        failures,
        metadata: ExtractionMetadata {
            total_routes,
            processing_time_ms: start.elapsed().as_millis() as u64,
        },
    }
}
