//! Category module - the extraction stages run for every endpoint

use serde::{Deserialize, Serialize};
use std::fmt;

/// One extraction stage of the endpoint pipeline
///
/// Every endpoint runs all seven categories, always in the order of
/// [`Category::ALL`]:
/// - Metadata: title, description, grouping and flags
/// - UrlParameters, QueryParameters, Headers, BodyParameters: parameter lists
/// - Responses: example responses, sorted by status after merging
/// - ResponseFields: documented fields of the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Endpoint metadata (merged field by field)
    Metadata,

    /// Parameters bound from the URL path
    UrlParameters,

    /// Query-string parameters
    QueryParameters,

    /// Request headers
    Headers,

    /// Request body parameters
    BodyParameters,

    /// Example responses
    Responses,

    /// Fields of the response body
    ResponseFields,
}

impl Category {
    /// All categories in pipeline order
    pub const ALL: [Category; 7] = [
        Category::Metadata,
        Category::UrlParameters,
        Category::QueryParameters,
        Category::Headers,
        Category::BodyParameters,
        Category::Responses,
        Category::ResponseFields,
    ];

    /// Get the configuration name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Metadata => "metadata",
            Category::UrlParameters => "urlParameters",
            Category::QueryParameters => "queryParameters",
            Category::Headers => "headers",
            Category::BodyParameters => "bodyParameters",
            Category::Responses => "responses",
            Category::ResponseFields => "responseFields",
        }
    }

    /// Parse a category from its configuration name
    ///
    /// Names are matched exactly; anything else yields `None` so callers can
    /// skip unrecognized configuration entries.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "metadata" => Some(Category::Metadata),
            "urlParameters" => Some(Category::UrlParameters),
            "queryParameters" => Some(Category::QueryParameters),
            "headers" => Some(Category::Headers),
            "bodyParameters" => Some(Category::BodyParameters),
            "responses" => Some(Category::Responses),
            "responseFields" => Some(Category::ResponseFields),
            _ => None,
        }
    }

    /// The parameter location for parameter categories
    pub fn parameter_location(&self) -> Option<ParameterLocation> {
        match self {
            Category::UrlParameters => Some(ParameterLocation::Url),
            Category::QueryParameters => Some(ParameterLocation::Query),
            Category::Headers => Some(ParameterLocation::Header),
            Category::BodyParameters => Some(ParameterLocation::Body),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}

/// Where a request parameter is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path segment
    Url,
    /// Query string
    Query,
    /// Request header
    Header,
    /// Request body
    Body,
}

impl ParameterLocation {
    /// All parameter locations in pipeline order
    pub const ALL: [ParameterLocation; 4] = [
        ParameterLocation::Url,
        ParameterLocation::Query,
        ParameterLocation::Header,
        ParameterLocation::Body,
    ];

    /// The category collecting parameters of this location
    pub fn category(&self) -> Category {
        match self {
            ParameterLocation::Url => Category::UrlParameters,
            ParameterLocation::Query => Category::QueryParameters,
            ParameterLocation::Header => Category::Headers,
            ParameterLocation::Body => Category::BodyParameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_unknown_category_name() {
        assert_eq!(Category::parse("cookies"), None);
        assert_eq!(Category::parse("Metadata"), None);
        assert!("cookies".parse::<Category>().is_err());
    }

    #[test]
    fn test_parameter_locations_map_to_categories() {
        for location in ParameterLocation::ALL {
            assert_eq!(location.category().parameter_location(), Some(location));
        }
        assert_eq!(Category::Metadata.parameter_location(), None);
        assert_eq!(Category::Responses.parameter_location(), None);
    }

    #[test]
    fn test_pipeline_order_starts_with_metadata() {
        assert_eq!(Category::ALL[0], Category::Metadata);
        assert_eq!(Category::ALL[6], Category::ResponseFields);
    }
}
