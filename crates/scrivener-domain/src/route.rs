//! Routes as handed in by the host framework

use crate::declaration::Declaration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw annotation text of one code unit (a handler or its container)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationBlock(String);

impl AnnotationBlock {
    /// Capture annotation text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The captured text
    pub fn text(&self) -> &str {
        &self.0
    }

    /// True when the block holds only whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for AnnotationBlock {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for AnnotationBlock {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// Reference to the code that handles a route
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerRef {
    /// Container (controller, module, impl block) the handler belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    /// Handler name
    pub name: String,
}

impl HandlerRef {
    /// A handler inside a container
    pub fn new(container: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            container: Some(container.into()),
            name: name.into(),
        }
    }

    /// A free-standing handler (closure or function without container)
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            container: None,
            name: name.into(),
        }
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.container {
            Some(container) => write!(f, "{}::{}", container, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Identity of a route: what it answers to and who handles it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteIdentity {
    /// HTTP methods (uppercase)
    pub methods: Vec<String>,

    /// URI path
    pub path: String,

    /// Handler reference
    pub handler: HandlerRef,
}

impl fmt::Display for RouteIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.methods.join(","), self.path)
    }
}

/// One endpoint as described by the host framework
///
/// Read-only for the extractor: strategies see it through the endpoint
/// context and never modify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// HTTP methods and path plus handler reference
    #[serde(flatten)]
    pub identity: RouteIdentity,

    /// Annotation text of the handler
    #[serde(default)]
    pub handler_annotation: AnnotationBlock,

    /// Annotation text of the handler's container
    #[serde(default)]
    pub container_annotation: AnnotationBlock,

    /// Declarations attached to the handler
    #[serde(default)]
    pub handler_declarations: Vec<Declaration>,

    /// Declarations attached to the container
    #[serde(default)]
    pub container_declarations: Vec<Declaration>,
}

impl Route {
    /// Create a route with no annotations or declarations
    pub fn new<M, S>(methods: M, path: impl Into<String>, handler: HandlerRef) -> Self
    where
        M: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            identity: RouteIdentity {
                methods: methods
                    .into_iter()
                    .map(|m| m.as_ref().to_uppercase())
                    .collect(),
                path: path.into(),
                handler,
            },
            handler_annotation: AnnotationBlock::default(),
            container_annotation: AnnotationBlock::default(),
            handler_declarations: Vec::new(),
            container_declarations: Vec::new(),
        }
    }

    /// Attach the handler's annotation text
    pub fn with_handler_annotation(mut self, block: impl Into<AnnotationBlock>) -> Self {
        self.handler_annotation = block.into();
        self
    }

    /// Attach the container's annotation text
    pub fn with_container_annotation(mut self, block: impl Into<AnnotationBlock>) -> Self {
        self.container_annotation = block.into();
        self
    }

    /// Attach a declaration to the handler
    pub fn with_handler_declaration(mut self, declaration: Declaration) -> Self {
        self.handler_declarations.push(declaration);
        self
    }

    /// Attach a declaration to the container
    pub fn with_container_declaration(mut self, declaration: Declaration) -> Self {
        self.container_declarations.push(declaration);
        self
    }

    /// URI path without the leading slash
    pub fn path(&self) -> &str {
        self.identity.path.trim_start_matches('/')
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.identity, self.identity.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_identity_display() {
        let route = Route::new(["get", "head"], "/api/users", HandlerRef::new("UserController", "index"));
        assert_eq!(route.identity.methods, vec!["GET", "HEAD"]);
        assert_eq!(route.to_string(), "[GET,HEAD] /api/users (UserController::index)");
        assert_eq!(route.path(), "api/users");
    }

    #[test]
    fn test_blank_annotation() {
        assert!(AnnotationBlock::new("  \n ").is_blank());
        assert!(!AnnotationBlock::from("Title").is_blank());
    }

    #[test]
    fn test_annotation_from_owned_text() {
        let route = Route::new(["GET"], "/items/7", HandlerRef::function("show"))
            .with_handler_annotation(format!("Show item {}.", 7));
        assert_eq!(route.handler_annotation.text(), "Show item 7.");
        assert_eq!(AnnotationBlock::from(String::from("x")), AnnotationBlock::new("x"));
    }

    #[test]
    fn test_route_deserialize_from_host_json() {
        let route: Route = serde_json::from_str(
            r#"{
                "methods": ["GET"],
                "path": "/api/test",
                "handler": {"container": "TestController", "name": "dummy"},
                "handlerAnnotation": "Endpoint title."
            }"#,
        )
        .unwrap();

        assert_eq!(route.identity.handler.to_string(), "TestController::dummy");
        assert_eq!(route.handler_annotation.text(), "Endpoint title.");
        assert!(route.container_annotation.is_blank());
        assert!(route.handler_declarations.is_empty());
    }
}
