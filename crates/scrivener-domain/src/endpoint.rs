//! The finalized per-endpoint record

use crate::category::ParameterLocation;
use crate::metadata::EndpointMetadata;
use crate::parameter::{ParameterDescriptor, ResponseField};
use crate::response::ResponseDescriptor;
use crate::route::RouteIdentity;
use serde::{Deserialize, Serialize};

/// Everything extracted for one endpoint
///
/// Produced once by the extractor and handed to renderers as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedEndpointData {
    /// Which route this record documents
    pub route: RouteIdentity,

    /// Finalized metadata
    pub metadata: EndpointMetadata,

    /// Path parameters
    pub url_parameters: Vec<ParameterDescriptor>,

    /// Query-string parameters
    pub query_parameters: Vec<ParameterDescriptor>,

    /// Request headers
    pub headers: Vec<ParameterDescriptor>,

    /// Body parameters
    pub body_parameters: Vec<ParameterDescriptor>,

    /// Example responses, ascending by status
    pub responses: Vec<ResponseDescriptor>,

    /// Response body fields
    pub response_fields: Vec<ResponseField>,
}

impl ExtractedEndpointData {
    /// Parameters of the given location
    pub fn parameters(&self, location: ParameterLocation) -> &[ParameterDescriptor] {
        match location {
            ParameterLocation::Url => &self.url_parameters,
            ParameterLocation::Query => &self.query_parameters,
            ParameterLocation::Header => &self.headers,
            ParameterLocation::Body => &self.body_parameters,
        }
    }

    /// Status codes of the responses, in record order
    pub fn statuses(&self) -> Vec<u16> {
        self.responses.iter().map(|r| r.status).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::HandlerRef;

    fn sample() -> ExtractedEndpointData {
        ExtractedEndpointData {
            route: RouteIdentity {
                methods: vec!["GET".to_string()],
                path: "/api/test".to_string(),
                handler: HandlerRef::new("TestController", "dummy"),
            },
            metadata: EndpointMetadata::default(),
            url_parameters: vec![ParameterDescriptor::new("id")],
            query_parameters: Vec::new(),
            headers: vec![ParameterDescriptor::new("Accept")],
            body_parameters: Vec::new(),
            responses: vec![
                ResponseDescriptor::new(200, "ok"),
                ResponseDescriptor::new(404, "missing"),
            ],
            response_fields: Vec::new(),
        }
    }

    #[test]
    fn test_parameters_by_location() {
        let data = sample();
        assert_eq!(data.parameters(ParameterLocation::Url)[0].name, "id");
        assert_eq!(data.parameters(ParameterLocation::Header)[0].name, "Accept");
        assert!(data.parameters(ParameterLocation::Body).is_empty());
        assert_eq!(data.statuses(), vec![200, 404]);
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("urlParameters").is_some());
        assert!(json.get("responseFields").is_some());
        assert_eq!(json["metadata"]["tryOut"], true);
    }
}
