//! Metadata from structured declarations

use crate::config::RouteRules;
use crate::context::EndpointContext;
use crate::error::StrategyError;
use crate::strategy::Strategy;
use scrivener_domain::{Merge, MetadataRecord};

/// Reads metadata from the declarations attached to handler and container
///
/// Container declarations apply first; handler declarations override them
/// key by key. Contributes nothing when neither carries declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeMetadata;

impl Strategy for AttributeMetadata {
    type Output = MetadataRecord;

    fn invoke(
        &self,
        endpoint: &EndpointContext<'_>,
        _rules: &RouteRules,
    ) -> Result<Option<MetadataRecord>, StrategyError> {
        let declarations = endpoint
            .container_declarations()
            .iter()
            .chain(endpoint.handler_declarations());

        let mut record: Option<MetadataRecord> = None;
        for declaration in declarations {
            record
                .get_or_insert_with(MetadataRecord::new)
                .merge(declaration.to_metadata());
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrivener_domain::{Declaration, Field, HandlerRef, Route, TriState};

    fn invoke(route: &Route) -> Option<MetadataRecord> {
        AttributeMetadata
            .invoke(&EndpointContext::new(route), &RouteRules::default())
            .unwrap()
    }

    #[test]
    fn test_no_declarations_is_absent() {
        let route = Route::new(["GET"], "/users", HandlerRef::new("UserController", "index"));
        assert_eq!(invoke(&route), None);
    }

    #[test]
    fn test_handler_overrides_container() {
        let route = Route::new(["GET"], "/users", HandlerRef::new("UserController", "index"))
            .with_container_declaration(Declaration::group("Users", "Manage users"))
            .with_container_declaration(Declaration::authenticated())
            .with_handler_declaration(Declaration::endpoint("List users", "Paginated list"))
            .with_handler_declaration(Declaration::Authenticated { authenticated: false })
            .with_handler_declaration(Declaration::no_try_out());

        let record = invoke(&route).unwrap();
        assert_eq!(record.group_name, Field::Set("Users".to_string()));
        assert_eq!(record.group_description, Field::Set("Manage users".to_string()));
        assert_eq!(record.title, Field::Set("List users".to_string()));
        assert_eq!(record.authenticated, TriState::False);
        assert_eq!(record.try_out, TriState::False);
        assert!(record.subgroup.is_unset());
    }

    #[test]
    fn test_handler_group_overrides_field_by_field() {
        let route = Route::new(["GET"], "/users", HandlerRef::new("UserController", "index"))
            .with_container_declaration(Declaration::Group {
                name: "Users".to_string(),
                description: "Manage users".to_string(),
                authenticated: Some(true),
                try_out: None,
            })
            .with_handler_declaration(Declaration::group("Admin", ""));

        let record = invoke(&route).unwrap();
        assert_eq!(record.group_name, Field::Set("Admin".to_string()));
        assert_eq!(record.group_description, Field::Set(String::new()));
        assert_eq!(record.authenticated, TriState::True);
    }
}
