//! The strategy contract and the registry resolving configured identities

use crate::config::{RouteRules, StrategyConfig, ATTRIBUTES, DOC_BLOCKS, ROUTE_RULES};
use crate::context::EndpointContext;
use crate::error::{ExtractorError, StrategyError};
use crate::pipeline::{Pipelines, Stage};
use crate::strategies::{
    AttributeMetadata, DocBlockMetadata, RouteRuleHeaders, TagParameters, TagResponseFields,
    TagResponses,
};
use scrivener_domain::{
    Category, MetadataRecord, ParameterDescriptor, ParameterLocation, ResponseDescriptor,
    ResponseField,
};
use std::collections::HashMap;
use std::sync::Arc;

/// One pluggable source of endpoint data for a category
///
/// Implementations must not mutate shared state and must return the same
/// result for the same endpoint every time. `Ok(None)` means "no data for
/// this endpoint"; `Ok(Some(empty))` is a real (empty) contribution.
pub trait Strategy: Send + Sync {
    /// Shape of the contribution ([`MetadataRecord`] or a list)
    type Output;

    /// Extract this strategy's contribution for one endpoint
    fn invoke(
        &self,
        endpoint: &EndpointContext<'_>,
        rules: &RouteRules,
    ) -> Result<Option<Self::Output>, StrategyError>;
}

type Factory<T> = Box<dyn Fn() -> Arc<dyn Strategy<Output = T>> + Send + Sync>;

fn factory<T, S, F>(make: F) -> Factory<T>
where
    T: 'static,
    F: Fn() -> S + Send + Sync + 'static,
    S: Strategy<Output = T> + 'static,
{
    Box::new(move || Arc::new(make()) as Arc<dyn Strategy<Output = T>>)
}

/// Maps strategy identities to factories, per category
///
/// Identities are resolved once, when an extractor is built; endpoints never
/// look strategies up by name.
#[derive(Default)]
pub struct StrategyRegistry {
    metadata: HashMap<String, Factory<MetadataRecord>>,
    parameters: HashMap<(ParameterLocation, String), Factory<Vec<ParameterDescriptor>>>,
    responses: HashMap<String, Factory<Vec<ResponseDescriptor>>>,
    response_fields: HashMap<String, Factory<Vec<ResponseField>>>,
}

impl StrategyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in strategies
    ///
    /// - `doc_blocks` for every category
    /// - `attributes` for metadata
    /// - `route_rules` for headers
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register_metadata(DOC_BLOCKS, || DocBlockMetadata)
            .register_metadata(ATTRIBUTES, || AttributeMetadata)
            .register_parameters(ParameterLocation::Header, ROUTE_RULES, || RouteRuleHeaders)
            .register_responses(DOC_BLOCKS, || TagResponses)
            .register_response_fields(DOC_BLOCKS, || TagResponseFields);
        for location in ParameterLocation::ALL {
            registry.register_parameters(location, DOC_BLOCKS, move || TagParameters::new(location));
        }
        registry
    }

    /// Register a metadata strategy
    pub fn register_metadata<S, F>(&mut self, name: impl Into<String>, make: F) -> &mut Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Strategy<Output = MetadataRecord> + 'static,
    {
        self.metadata.insert(name.into(), factory(make));
        self
    }

    /// Register a parameter strategy for one parameter location
    pub fn register_parameters<S, F>(
        &mut self,
        location: ParameterLocation,
        name: impl Into<String>,
        make: F,
    ) -> &mut Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Strategy<Output = Vec<ParameterDescriptor>> + 'static,
    {
        self.parameters.insert((location, name.into()), factory(make));
        self
    }

    /// Register a response strategy
    pub fn register_responses<S, F>(&mut self, name: impl Into<String>, make: F) -> &mut Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Strategy<Output = Vec<ResponseDescriptor>> + 'static,
    {
        self.responses.insert(name.into(), factory(make));
        self
    }

    /// Register a response-field strategy
    pub fn register_response_fields<S, F>(&mut self, name: impl Into<String>, make: F) -> &mut Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Strategy<Output = Vec<ResponseField>> + 'static,
    {
        self.response_fields.insert(name.into(), factory(make));
        self
    }

    /// Check whether an identity is registered for a category
    pub fn contains(&self, category: Category, name: &str) -> bool {
        match category {
            Category::Metadata => self.metadata.contains_key(name),
            Category::Responses => self.responses.contains_key(name),
            Category::ResponseFields => self.response_fields.contains_key(name),
            _ => category
                .parameter_location()
                .is_some_and(|location| self.parameters.contains_key(&(location, name.to_string()))),
        }
    }

    /// Instantiate the configured pipelines
    ///
    /// Fails with [`ExtractorError::UnknownStrategy`] for the first identity
    /// that is not registered under its category.
    pub fn resolve(&self, config: &StrategyConfig) -> Result<Pipelines, ExtractorError> {
        let metadata = resolve_stages(config, Category::Metadata, |name| self.metadata.get(name))?;
        let url = self.resolve_parameters(config, ParameterLocation::Url)?;
        let query = self.resolve_parameters(config, ParameterLocation::Query)?;
        let headers = self.resolve_parameters(config, ParameterLocation::Header)?;
        let body = self.resolve_parameters(config, ParameterLocation::Body)?;
        let responses = resolve_stages(config, Category::Responses, |name| self.responses.get(name))?;
        let response_fields =
            resolve_stages(config, Category::ResponseFields, |name| self.response_fields.get(name))?;

        Ok(Pipelines {
            metadata,
            url_parameters: url,
            query_parameters: query,
            headers,
            body_parameters: body,
            responses,
            response_fields,
        })
    }

    fn resolve_parameters(
        &self,
        config: &StrategyConfig,
        location: ParameterLocation,
    ) -> Result<Vec<Stage<Vec<ParameterDescriptor>>>, ExtractorError> {
        resolve_stages(config, location.category(), |name| {
            self.parameters.get(&(location, name.to_string()))
        })
    }
}

fn resolve_stages<'r, T, L>(
    config: &StrategyConfig,
    category: Category,
    lookup: L,
) -> Result<Vec<Stage<T>>, ExtractorError>
where
    T: 'r,
    L: Fn(&str) -> Option<&'r Factory<T>>,
{
    config
        .strategies(category)
        .iter()
        .map(|name| {
            lookup(name)
                .map(|make| Stage::new(name.clone(), make()))
                .ok_or_else(|| ExtractorError::UnknownStrategy {
                    category,
                    name: name.clone(),
                })
        })
        .collect()
}
