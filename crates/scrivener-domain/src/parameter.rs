//! Parameter and response-field descriptors

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A documented request parameter
///
/// The category a descriptor is contributed to decides whether it is a URL,
/// query, header or body parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name
    pub name: String,

    /// Declared type (`string`, `integer`, `object[]`, ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Whether the parameter must be supplied
    #[serde(default)]
    pub required: bool,

    /// Example value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl ParameterDescriptor {
    /// Create an optional `string` parameter with no description
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "string".to_string(),
            description: String::new(),
            required: false,
            example: None,
        }
    }

    /// Set the declared type
    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the required flag
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the example value
    pub fn with_example(mut self, example: impl Into<Value>) -> Self {
        self.example = Some(example.into());
        self
    }
}

/// A documented field of a response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseField {
    /// Field name (dotted paths allowed)
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub kind: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Whether the field is always present
    #[serde(default)]
    pub required: bool,
}

impl ResponseField {
    /// Create an optional `string` field with no description
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "string".to_string(),
            description: String::new(),
            required: false,
        }
    }

    /// Set the declared type
    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the required flag
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}
