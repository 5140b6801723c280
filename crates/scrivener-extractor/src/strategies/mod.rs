//! Built-in strategies
//!
//! | Identity      | Categories        | Source                              |
//! |---------------|-------------------|-------------------------------------|
//! | `doc_blocks`  | all               | handler (and container) annotations |
//! | `attributes`  | metadata          | handler and container declarations  |
//! | `route_rules` | headers           | `[[routes]]` rules of the config    |

mod attributes;
mod doc_blocks;
mod route_rules;
mod tags;

pub use attributes::AttributeMetadata;
pub use doc_blocks::{merge_handler_and_container, DocBlockMetadata};
pub use route_rules::RouteRuleHeaders;
pub use tags::{TagParameters, TagResponseFields, TagResponses};
