//! Response descriptors

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of an example response
///
/// Text that is valid JSON is kept structured so renderers can pretty-print
/// it; anything else stays raw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseContent {
    /// Raw text body
    Raw(String),

    /// Structured JSON body
    Json(Value),
}

impl ResponseContent {
    /// Raw text content
    pub fn raw(text: impl Into<String>) -> Self {
        ResponseContent::Raw(text.into())
    }

    /// Structured JSON content
    pub fn json(value: impl Into<Value>) -> Self {
        ResponseContent::Json(value.into())
    }

    /// Keep `text` structured if it parses as JSON, raw otherwise
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => ResponseContent::Json(value),
            Err(_) => ResponseContent::Raw(trimmed.to_string()),
        }
    }

    /// True when the body is empty text or JSON `null`
    pub fn is_empty(&self) -> bool {
        match self {
            ResponseContent::Raw(text) => text.is_empty(),
            ResponseContent::Json(value) => value.is_null(),
        }
    }
}

impl From<&str> for ResponseContent {
    fn from(text: &str) -> Self {
        ResponseContent::raw(text)
    }
}

impl From<Value> for ResponseContent {
    fn from(value: Value) -> Self {
        ResponseContent::Json(value)
    }
}

/// One example response of an endpoint
///
/// Several descriptors may share a status; they stay separate entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDescriptor {
    /// HTTP status code
    pub status: u16,

    /// Response body
    pub content: ResponseContent,

    /// What scenario produces this response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResponseDescriptor {
    /// Create a response without a description
    pub fn new(status: u16, content: impl Into<ResponseContent>) -> Self {
        Self {
            status,
            content: content.into(),
            description: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
