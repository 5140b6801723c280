//! Declarative metadata attached to handlers and containers

use crate::field::{Field, TriState};
use crate::metadata::MetadataRecord;
use serde::{Deserialize, Serialize};

/// A structured declaration carrying part of an endpoint's metadata
///
/// Host frameworks attach these to a handler or to the container it belongs
/// to, as an alternative to free-text annotation blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Declaration {
    /// Endpoint title and description
    #[serde(rename_all = "camelCase")]
    Endpoint {
        /// Endpoint title
        title: String,
        /// Endpoint description
        #[serde(default)]
        description: String,
        /// Optional authentication flag
        #[serde(default)]
        authenticated: Option<bool>,
        /// Optional try-out flag
        #[serde(default)]
        try_out: Option<bool>,
    },

    /// Group membership
    #[serde(rename_all = "camelCase")]
    Group {
        /// Group name
        name: String,
        /// Group description
        #[serde(default)]
        description: String,
        /// Optional authentication flag
        #[serde(default)]
        authenticated: Option<bool>,
        /// Optional try-out flag
        #[serde(default)]
        try_out: Option<bool>,
    },

    /// Subgroup membership
    Subgroup {
        /// Subgroup name
        name: String,
        /// Subgroup description
        #[serde(default)]
        description: String,
    },

    /// Authentication requirement
    Authenticated {
        /// Whether authentication is required
        #[serde(default = "default_true")]
        authenticated: bool,
    },

    /// Interactive try-out availability
    #[serde(rename_all = "camelCase")]
    TryOut {
        /// Whether try-out is offered
        #[serde(default = "default_true")]
        try_out: bool,
    },
}

fn default_true() -> bool {
    true
}

impl Declaration {
    /// Endpoint declaration with title and description
    pub fn endpoint(title: impl Into<String>, description: impl Into<String>) -> Self {
        Declaration::Endpoint {
            title: title.into(),
            description: description.into(),
            authenticated: None,
            try_out: None,
        }
    }

    /// Group declaration with name and description
    pub fn group(name: impl Into<String>, description: impl Into<String>) -> Self {
        Declaration::Group {
            name: name.into(),
            description: description.into(),
            authenticated: None,
            try_out: None,
        }
    }

    /// Subgroup declaration with name and description
    pub fn subgroup(name: impl Into<String>, description: impl Into<String>) -> Self {
        Declaration::Subgroup {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Marks the endpoint as requiring authentication
    pub fn authenticated() -> Self {
        Declaration::Authenticated { authenticated: true }
    }

    /// Marks the endpoint as offering try-out
    pub fn try_out() -> Self {
        Declaration::TryOut { try_out: true }
    }

    /// Marks the endpoint as not offering try-out
    pub fn no_try_out() -> Self {
        Declaration::TryOut { try_out: false }
    }

    /// The metadata keys this declaration sets
    pub fn to_metadata(&self) -> MetadataRecord {
        match self {
            Declaration::Endpoint {
                title,
                description,
                authenticated,
                try_out,
            } => MetadataRecord {
                title: Field::Set(title.clone()),
                description: Field::Set(description.clone()),
                authenticated: TriState::from(*authenticated),
                try_out: TriState::from(*try_out),
                ..Default::default()
            },
            Declaration::Group {
                name,
                description,
                authenticated,
                try_out,
            } => MetadataRecord {
                group_name: Field::Set(name.clone()),
                group_description: Field::Set(description.clone()),
                authenticated: TriState::from(*authenticated),
                try_out: TriState::from(*try_out),
                ..Default::default()
            },
            Declaration::Subgroup { name, description } => MetadataRecord {
                subgroup: Field::Set(name.clone()),
                subgroup_description: Field::Set(description.clone()),
                ..Default::default()
            },
            Declaration::Authenticated { authenticated } => MetadataRecord {
                authenticated: TriState::from(*authenticated),
                ..Default::default()
            },
            Declaration::TryOut { try_out } => MetadataRecord {
                try_out: TriState::from(*try_out),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_declaration_leaves_flags_unset() {
        let record = Declaration::endpoint("List users", "").to_metadata();
        assert_eq!(record.title, Field::Set("List users".to_string()));
        assert_eq!(record.description, Field::Set(String::new()));
        assert!(record.authenticated.is_unset());
        assert!(record.try_out.is_unset());
        assert!(!record.has_group());
    }

    #[test]
    fn test_group_declaration_with_flags() {
        let declaration = Declaration::Group {
            name: "Users".to_string(),
            description: "Manage users".to_string(),
            authenticated: Some(false),
            try_out: None,
        };
        let record = declaration.to_metadata();
        assert_eq!(record.group_name, Field::Set("Users".to_string()));
        assert_eq!(record.authenticated, TriState::False);
        assert!(record.try_out.is_unset());
    }

    #[test]
    fn test_flag_declarations() {
        assert_eq!(Declaration::authenticated().to_metadata().authenticated, TriState::True);
        assert_eq!(Declaration::no_try_out().to_metadata().try_out, TriState::False);
        assert_eq!(Declaration::try_out().to_metadata().try_out, TriState::True);
    }

    #[test]
    fn test_declaration_deserialize_defaults() {
        let declaration: Declaration = serde_json::from_str(r#"{"kind": "authenticated"}"#).unwrap();
        assert_eq!(declaration, Declaration::authenticated());

        let declaration: Declaration =
            serde_json::from_str(r#"{"kind": "endpoint", "title": "Show", "tryOut": false}"#).unwrap();
        assert_eq!(declaration.to_metadata().try_out, TriState::False);
    }
}
