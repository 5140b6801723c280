//! Configuration for the Extractor

use crate::error::ExtractorError;
use scrivener_domain::{Category, Merge, Route};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::warn;

/// Identity of the annotation-block strategies (registered for every category)
pub const DOC_BLOCKS: &str = "doc_blocks";

/// Identity of the declaration-backed metadata strategy
pub const ATTRIBUTES: &str = "attributes";

/// Identity of the route-rules header strategy
pub const ROUTE_RULES: &str = "route_rules";

/// Ordered strategy identities per category
///
/// Categories absent from the configuration run no strategies and contribute
/// nothing. Unrecognized category names are dropped with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct StrategyConfig {
    lists: BTreeMap<Category, Vec<String>>,
}

impl StrategyConfig {
    /// Configuration running no strategies at all
    pub fn empty() -> Self {
        Self {
            lists: BTreeMap::new(),
        }
    }

    /// Set the ordered strategy list of one category
    pub fn with<I, S>(mut self, category: Category, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lists
            .insert(category, names.into_iter().map(Into::into).collect());
        self
    }

    /// The ordered strategy identities of a category
    pub fn strategies(&self, category: Category) -> &[String] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for StrategyConfig {
    /// Built-in pipelines: annotation blocks first, declarations override
    fn default() -> Self {
        Self::empty()
            .with(Category::Metadata, [DOC_BLOCKS, ATTRIBUTES])
            .with(Category::UrlParameters, [DOC_BLOCKS])
            .with(Category::QueryParameters, [DOC_BLOCKS])
            .with(Category::Headers, [ROUTE_RULES, DOC_BLOCKS])
            .with(Category::BodyParameters, [DOC_BLOCKS])
            .with(Category::Responses, [DOC_BLOCKS])
            .with(Category::ResponseFields, [DOC_BLOCKS])
    }
}

impl From<BTreeMap<String, Vec<String>>> for StrategyConfig {
    fn from(raw: BTreeMap<String, Vec<String>>) -> Self {
        let mut lists = BTreeMap::new();
        for (name, strategies) in raw {
            match Category::parse(&name) {
                Some(category) => {
                    lists.insert(category, strategies);
                }
                None => warn!("Ignoring strategies for unknown category '{}'", name),
            }
        }
        Self { lists }
    }
}

impl From<StrategyConfig> for BTreeMap<String, Vec<String>> {
    fn from(config: StrategyConfig) -> Self {
        config
            .lists
            .into_iter()
            .map(|(category, names)| (category.as_str().to_string(), names))
            .collect()
    }
}

/// Per-route override rules handed to every strategy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteRules {
    /// Headers every matching route sends
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Free-form rules for custom strategies
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl RouteRules {
    /// Look up a free-form rule
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    /// True when no rule is present
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.extra.is_empty()
    }
}

impl Merge for RouteRules {
    /// Later rule sets win key by key
    fn merge(&mut self, other: Self) {
        self.headers.extend(other.headers);
        self.extra.extend(other.extra);
    }
}

/// Rules applied to every route whose path matches one of the prefixes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGroup {
    /// Path patterns; a trailing `*` matches any suffix, `*` alone matches all
    pub prefixes: Vec<String>,

    /// Rules applied to matching routes
    #[serde(default)]
    pub apply: RouteRules,
}

impl RouteGroup {
    /// Check whether a path matches any of the group's patterns
    pub fn matches(&self, path: &str) -> bool {
        let path = path.trim_start_matches('/');
        self.prefixes.iter().any(|pattern| {
            let pattern = pattern.trim_start_matches('/');
            match pattern.strip_suffix('*') {
                Some(prefix) => path.starts_with(prefix),
                None => path == pattern,
            }
        })
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Worker limit for concurrent runs
    #[serde(default = "default_max_concurrent_endpoints")]
    pub max_concurrent_endpoints: usize,

    /// Optional limit for a whole concurrent run (seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_timeout_secs: Option<u64>,

    /// Ordered strategies per category
    #[serde(default)]
    pub strategies: StrategyConfig,

    /// Route groups carrying override rules
    #[serde(default)]
    pub routes: Vec<RouteGroup>,
}

fn default_max_concurrent_endpoints() -> usize {
    4
}

impl ExtractorConfig {
    /// Default settings with the given strategy pipelines
    pub fn with_strategies(strategies: StrategyConfig) -> Self {
        Self {
            strategies,
            ..Self::default()
        }
    }

    /// Preset: metadata from declarations only, nothing else extracted
    pub fn declarations_only() -> Self {
        Self::with_strategies(StrategyConfig::empty().with(Category::Metadata, [ATTRIBUTES]))
    }

    /// Preset: annotation blocks only, declarations ignored
    pub fn annotations_only() -> Self {
        let mut strategies = StrategyConfig::empty();
        for category in Category::ALL {
            strategies = strategies.with(category, [DOC_BLOCKS]);
        }
        Self::with_strategies(strategies)
    }

    /// Get the run timeout as a Duration
    pub fn run_timeout(&self) -> Option<Duration> {
        self.run_timeout_secs.map(Duration::from_secs)
    }

    /// Merged rules of every route group matching the route, in order
    pub fn route_rules_for(&self, route: &Route) -> RouteRules {
        let mut rules = RouteRules::default();
        for group in self.routes.iter().filter(|g| g.matches(route.path())) {
            rules.merge(group.apply.clone());
        }
        rules
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.max_concurrent_endpoints == 0 {
            return Err(ExtractorError::Config(
                "max_concurrent_endpoints must be greater than 0".to_string(),
            ));
        }
        if self.run_timeout_secs == Some(0) {
            return Err(ExtractorError::Config(
                "run_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if let Some(index) = self.routes.iter().position(|g| g.prefixes.is_empty()) {
            return Err(ExtractorError::Config(format!(
                "route group {} has no prefixes",
                index
            )));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_endpoints: default_max_concurrent_endpoints(),
            run_timeout_secs: None,
            strategies: StrategyConfig::default(),
            routes: Vec::new(),
        }
    }
}
