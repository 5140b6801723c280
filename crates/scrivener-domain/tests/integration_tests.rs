//! Integration tests for the domain records as exchanged with host frameworks

use scrivener_domain::{
    Declaration, Field, HandlerRef, Merge, MetadataRecord, Route, TriState,
};
use serde_json::json;

#[test]
fn test_route_from_host_json() {
    let route: Route = serde_json::from_value(json!({
        "methods": ["GET", "HEAD"],
        "path": "/api/users/{id}",
        "handler": {"container": "UserController", "name": "show"},
        "handlerAnnotation": "/** Show a user. */",
        "containerDeclarations": [
            {"kind": "group", "name": "Users", "description": "User management"},
            {"kind": "authenticated"}
        ]
    }))
    .unwrap();

    assert_eq!(route.identity.handler, HandlerRef::new("UserController", "show"));
    assert_eq!(route.path(), "api/users/{id}");
    assert!(route.container_annotation.is_blank());
    assert!(route.handler_declarations.is_empty());
    assert_eq!(route.container_declarations[1], Declaration::authenticated());
    assert_eq!(route.to_string(), "[GET,HEAD] /api/users/{id} (UserController::show)");
}

#[test]
fn test_partial_record_json_keeps_null_apart_from_unset() {
    let record: MetadataRecord = serde_json::from_value(json!({
        "title": "List users",
        "subgroup": null,
        "authenticated": false
    }))
    .unwrap();

    assert_eq!(record.title, Field::Set("List users".to_string()));
    assert_eq!(record.subgroup, Field::Null);
    assert!(record.description.is_unset());
    assert_eq!(record.authenticated, TriState::False);
    assert!(record.try_out.is_unset());

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value, json!({"title": "List users", "subgroup": null, "authenticated": false}));
}

#[test]
fn test_declarations_fold_into_finalized_metadata() {
    let mut record = MetadataRecord::new();
    for declaration in [
        Declaration::group("Users", "User management"),
        Declaration::subgroup("Admins", "Admin-only endpoints"),
        Declaration::endpoint("Delete user", "Removes the user permanently."),
        Declaration::no_try_out(),
    ] {
        record.merge(declaration.to_metadata());
    }

    let metadata = record.finalize();
    assert_eq!(metadata.group_name, "Users");
    assert_eq!(metadata.subgroup.as_deref(), Some("Admins"));
    assert_eq!(metadata.subgroup_description.as_deref(), Some("Admin-only endpoints"));
    assert_eq!(metadata.title, "Delete user");
    assert!(!metadata.authenticated);
    assert!(!metadata.try_out);
}
