//! Category pipeline runner

use crate::config::RouteRules;
use crate::context::EndpointContext;
use crate::error::ExtractorError;
use crate::strategy::Strategy;
use scrivener_domain::{
    Category, Merge, MetadataRecord, ParameterDescriptor, ParameterLocation, ResponseDescriptor,
    ResponseField,
};
use std::sync::Arc;
use tracing::debug;

/// A resolved strategy with its configured identity
pub struct Stage<T> {
    name: String,
    strategy: Arc<dyn Strategy<Output = T>>,
}

impl<T> Stage<T> {
    /// Wrap a strategy instance
    pub fn new(name: impl Into<String>, strategy: Arc<dyn Strategy<Output = T>>) -> Self {
        Self {
            name: name.into(),
            strategy,
        }
    }

    /// Configured identity
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for Stage<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            strategy: Arc::clone(&self.strategy),
        }
    }
}

/// The resolved strategies of every category, in configured order
///
/// Built once per run and shared read-only by every endpoint.
#[derive(Clone, Default)]
pub struct Pipelines {
    pub(crate) metadata: Vec<Stage<MetadataRecord>>,
    pub(crate) url_parameters: Vec<Stage<Vec<ParameterDescriptor>>>,
    pub(crate) query_parameters: Vec<Stage<Vec<ParameterDescriptor>>>,
    pub(crate) headers: Vec<Stage<Vec<ParameterDescriptor>>>,
    pub(crate) body_parameters: Vec<Stage<Vec<ParameterDescriptor>>>,
    pub(crate) responses: Vec<Stage<Vec<ResponseDescriptor>>>,
    pub(crate) response_fields: Vec<Stage<Vec<ResponseField>>>,
}

impl Pipelines {
    /// Metadata stages
    pub fn metadata(&self) -> &[Stage<MetadataRecord>] {
        &self.metadata
    }

    /// Parameter stages of one location
    pub fn parameters(&self, location: ParameterLocation) -> &[Stage<Vec<ParameterDescriptor>>] {
        match location {
            ParameterLocation::Url => &self.url_parameters,
            ParameterLocation::Query => &self.query_parameters,
            ParameterLocation::Header => &self.headers,
            ParameterLocation::Body => &self.body_parameters,
        }
    }

    /// Response stages
    pub fn responses(&self) -> &[Stage<Vec<ResponseDescriptor>>] {
        &self.responses
    }

    /// Response-field stages
    pub fn response_fields(&self) -> &[Stage<Vec<ResponseField>>] {
        &self.response_fields
    }

    /// Configured identities of a category, in order
    pub fn names(&self, category: Category) -> Vec<&str> {
        fn names<T>(stages: &[Stage<T>]) -> Vec<&str> {
            stages.iter().map(Stage::name).collect()
        }
        match category {
            Category::Metadata => names(&self.metadata),
            Category::Responses => names(&self.responses),
            Category::ResponseFields => names(&self.response_fields),
            _ => category
                .parameter_location()
                .map(|location| names(self.parameters(location)))
                .unwrap_or_default(),
        }
    }
}

/// Run one category's stages in order and fold their contributions
///
/// `None` contributions are skipped. The first strategy error aborts the
/// category (and with it the endpoint).
pub fn run_category<T>(
    category: Category,
    stages: &[Stage<T>],
    endpoint: &EndpointContext<'_>,
    rules: &RouteRules,
) -> Result<T, ExtractorError>
where
    T: Merge + Default,
{
    let mut merged = T::default();

    for stage in stages {
        let contribution = stage
            .strategy
            .invoke(endpoint, rules)
            .map_err(|source| ExtractorError::StrategyExecution {
                route: endpoint.identity().to_string(),
                category,
                strategy: stage.name.clone(),
                source,
            })?;

        match contribution {
            Some(contribution) => {
                debug!("{} '{}' contributed for {}", category, stage.name, endpoint.identity());
                merged.merge(contribution);
            }
            None => debug!("{} '{}' had nothing for {}", category, stage.name, endpoint.identity()),
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrategyError;
    use scrivener_domain::{Field, HandlerRef, Route, TriState};

    struct Fixed(Option<MetadataRecord>);

    impl Strategy for Fixed {
        type Output = MetadataRecord;

        fn invoke(
            &self,
            _endpoint: &EndpointContext<'_>,
            _rules: &RouteRules,
        ) -> Result<Option<MetadataRecord>, StrategyError> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl Strategy for Failing {
        type Output = MetadataRecord;

        fn invoke(
            &self,
            _endpoint: &EndpointContext<'_>,
            _rules: &RouteRules,
        ) -> Result<Option<MetadataRecord>, StrategyError> {
            Err(StrategyError::Failed("boom".to_string()))
        }
    }

    fn stage(name: &str, strategy: impl Strategy<Output = MetadataRecord> + 'static) -> Stage<MetadataRecord> {
        Stage::new(name, Arc::new(strategy))
    }

    fn route() -> Route {
        Route::new(["GET"], "/api/test", HandlerRef::new("TestController", "dummy"))
    }

    #[test]
    fn test_absent_contribution_keeps_earlier_keys() {
        let route = route();
        let endpoint = EndpointContext::new(&route);
        let stages = vec![
            stage("a", Fixed(Some(MetadataRecord { title: "A".into(), ..Default::default() }))),
            stage("b", Fixed(None)),
        ];

        let merged = run_category(Category::Metadata, &stages, &endpoint, &RouteRules::default()).unwrap();
        assert_eq!(merged.title, Field::Set("A".to_string()));
    }

    #[test]
    fn test_empty_contribution_is_merged() {
        let route = route();
        let endpoint = EndpointContext::new(&route);
        let stages = vec![
            stage("a", Fixed(Some(MetadataRecord { authenticated: TriState::True, ..Default::default() }))),
            stage("b", Fixed(Some(MetadataRecord::new()))),
        ];

        let merged = run_category(Category::Metadata, &stages, &endpoint, &RouteRules::default()).unwrap();
        assert_eq!(merged.authenticated, TriState::True);
    }

    #[test]
    fn test_no_stages_yield_default() {
        let route = route();
        let endpoint = EndpointContext::new(&route);
        let merged: MetadataRecord =
            run_category(Category::Metadata, &[], &endpoint, &RouteRules::default()).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_error_carries_route_category_and_strategy() {
        let route = route();
        let endpoint = EndpointContext::new(&route);
        let stages = vec![stage("explodes", Failing), stage("never", Fixed(None))];

        let error = run_category(Category::Metadata, &stages, &endpoint, &RouteRules::default()).unwrap_err();
        match error {
            ExtractorError::StrategyExecution { route, category, strategy, .. } => {
                assert_eq!(route, "[GET] /api/test");
                assert_eq!(category, Category::Metadata);
                assert_eq!(strategy, "explodes");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
