//! Scrivener Extractor
//!
//! Turns routes into API documentation records through configurable
//! pipelines of extraction strategies.
//!
//! # Overview
//!
//! Every endpoint runs seven categories in a fixed order: metadata, URL
//! parameters, query parameters, headers, body parameters, responses and
//! response fields. Each category runs its configured strategies in order
//! and folds their contributions: metadata field by field (later strategies
//! win), lists by concatenation. Missing metadata is then defaulted and
//! responses are sorted by status.
//!
//! # Architecture
//!
//! ```text
//! Route → EndpointContext → [category pipelines] → finalize → ExtractedEndpointData
//! ```
//!
//! # Key Features
//!
//! - **Annotation Parsing**: Titles, descriptions, groups and flags from doc
//!   blocks of the handler and its container
//! - **Declarations**: Structured metadata attached by the host framework
//! - **Pluggable Strategies**: Register custom strategies under any identity
//! - **Route Rules**: Per-path overrides from configuration
//! - **Batch Processing**: Sequential or bounded concurrent runs
//!
//! # Example Usage
//!
//! ```
//! use scrivener_domain::{HandlerRef, Route};
//! use scrivener_extractor::{Extractor, ExtractorConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = Extractor::with_builtins(ExtractorConfig::default())?;
//!
//! let route = Route::new(["GET"], "/api/users", HandlerRef::new("UserController", "index"))
//!     .with_container_annotation("/**\n * @group Users\n */")
//!     .with_handler_annotation("/**\n * List users.\n * @authenticated\n */");
//!
//! let endpoint = extractor.process_route(&route)?;
//!
//! assert_eq!(endpoint.metadata.title, "List users.");
//! assert_eq!(endpoint.metadata.group_name, "Users");
//! assert!(endpoint.metadata.authenticated);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod context;
mod error;
mod extractor;
mod parser;
mod pipeline;
mod strategy;
mod types;

pub mod strategies;


pub use config::{
    ExtractorConfig, RouteGroup, RouteRules, StrategyConfig, ATTRIBUTES, DOC_BLOCKS, ROUTE_RULES,
};
pub use context::EndpointContext;
pub use error::{ExtractorError, StrategyError};
pub use extractor::{sort_responses, Extractor};
pub use parser::{parse, parse_block, DocBlock, Tag};
pub use pipeline::{run_category, Pipelines, Stage};
pub use strategy::{Strategy, StrategyRegistry};
pub use types::{ExtractionFailure, ExtractionMetadata, ExtractionReport};
