//! Scrivener Domain Layer
//!
//! This crate contains the value types shared by every Scrivener component:
//! the routes handed in by the host framework, the partial records produced by
//! extraction strategies, and the finalized endpoint records handed to
//! renderers. Its only dependencies are `serde` and `serde_json`.
//!
//! ## Key Concepts
//!
//! - **Route**: One endpoint as described by the host framework, including the
//!   raw annotation text and declarations of its handler and container
//! - **MetadataRecord**: Partial metadata where every key distinguishes
//!   "unset" from an explicit value
//! - **Category**: The seven extraction stages run for every endpoint
//! - **ExtractedEndpointData**: The finalized per-endpoint aggregate
//!
//! ## Architecture
//!
//! - No I/O, no logging
//! - Merge policies live next to the types they fold ([`traits::Merge`])
//! - Extraction logic lives in `scrivener-extractor`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod declaration;
pub mod endpoint;
pub mod field;
pub mod metadata;
pub mod parameter;
pub mod response;
pub mod route;
pub mod traits;

// Re-exports for convenience
pub use category::{Category, ParameterLocation};
pub use declaration::Declaration;
pub use endpoint::ExtractedEndpointData;
pub use field::{Field, TriState};
pub use metadata::{EndpointMetadata, MetadataRecord};
pub use parameter::{ParameterDescriptor, ResponseField};
pub use response::{ResponseContent, ResponseDescriptor};
pub use route::{AnnotationBlock, HandlerRef, Route, RouteIdentity};
pub use traits::Merge;
