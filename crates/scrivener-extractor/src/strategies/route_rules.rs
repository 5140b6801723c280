//! Headers applied to groups of routes by configuration

use crate::config::RouteRules;
use crate::context::EndpointContext;
use crate::error::StrategyError;
use crate::strategy::Strategy;
use scrivener_domain::ParameterDescriptor;

/// Turns the `headers` rule of the matching route groups into header parameters
///
/// Each header's configured value becomes its example. Contributes nothing
/// when no rule sets headers for the route.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteRuleHeaders;

impl Strategy for RouteRuleHeaders {
    type Output = Vec<ParameterDescriptor>;

    fn invoke(
        &self,
        _endpoint: &EndpointContext<'_>,
        rules: &RouteRules,
    ) -> Result<Option<Self::Output>, StrategyError> {
        if rules.headers.is_empty() {
            return Ok(None);
        }

        Ok(Some(
            rules
                .headers
                .iter()
                .map(|(name, value)| ParameterDescriptor::new(name).with_example(value.as_str()))
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrivener_domain::{HandlerRef, Route};
    use serde_json::json;

    #[test]
    fn test_headers_become_parameters() {
        let route = Route::new(["POST"], "/api/posts", HandlerRef::new("PostController", "store"));
        let endpoint = EndpointContext::new(&route);
        let mut rules = RouteRules::default();
        rules.headers.insert("Content-Type".to_string(), "application/json".to_string());
        rules.headers.insert("Accept".to_string(), "application/json".to_string());

        let headers = RouteRuleHeaders.invoke(&endpoint, &rules).unwrap().unwrap();
        let names: Vec<_> = headers.iter().map(|h| h.name.as_str()).collect();

        assert_eq!(names, vec!["Accept", "Content-Type"]);
        assert_eq!(headers[1].example, Some(json!("application/json")));
    }

    #[test]
    fn test_no_headers_is_absent() {
        let route = Route::new(["GET"], "/", HandlerRef::function("home"));
        let endpoint = EndpointContext::new(&route);
        assert_eq!(RouteRuleHeaders.invoke(&endpoint, &RouteRules::default()).unwrap(), None);
    }
}
