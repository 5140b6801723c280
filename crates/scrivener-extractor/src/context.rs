//! Per-endpoint context handed to strategies

use crate::parser::{parse_block, DocBlock};
use scrivener_domain::{Declaration, Route, RouteIdentity};

/// Read-only view of one endpoint while it is being extracted
///
/// Both annotation blocks are parsed once here so every strategy of every
/// category sees the same doc blocks.
#[derive(Debug, Clone)]
pub struct EndpointContext<'a> {
    route: &'a Route,
    handler_doc: DocBlock,
    container_doc: DocBlock,
}

impl<'a> EndpointContext<'a> {
    /// Build the context for a route
    pub fn new(route: &'a Route) -> Self {
        Self {
            route,
            handler_doc: parse_block(&route.handler_annotation),
            container_doc: parse_block(&route.container_annotation),
        }
    }

    /// The route being extracted
    pub fn route(&self) -> &'a Route {
        self.route
    }

    /// Methods, path and handler of the route
    pub fn identity(&self) -> &'a RouteIdentity {
        &self.route.identity
    }

    /// Parsed annotation block of the handler
    pub fn handler_doc(&self) -> &DocBlock {
        &self.handler_doc
    }

    /// Parsed annotation block of the container
    pub fn container_doc(&self) -> &DocBlock {
        &self.container_doc
    }

    /// Declarations attached to the handler
    pub fn handler_declarations(&self) -> &'a [Declaration] {
        &self.route.handler_declarations
    }

    /// Declarations attached to the container
    pub fn container_declarations(&self) -> &'a [Declaration] {
        &self.route.container_declarations
    }
}
