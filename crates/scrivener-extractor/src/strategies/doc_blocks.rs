//! Metadata from the handler's and container's annotation blocks

use crate::config::RouteRules;
use crate::context::EndpointContext;
use crate::error::StrategyError;
use crate::parser::DocBlock;
use crate::strategy::Strategy;
use scrivener_domain::{Field, MetadataRecord};

/// Reads title, description, grouping and flags from annotation blocks
///
/// Always contributes, even for endpoints without any annotation text: in
/// that case the record carries only an explicit `null` subgroup.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocBlockMetadata;

impl Strategy for DocBlockMetadata {
    type Output = MetadataRecord;

    fn invoke(
        &self,
        endpoint: &EndpointContext<'_>,
        _rules: &RouteRules,
    ) -> Result<Option<MetadataRecord>, StrategyError> {
        Ok(Some(merge_handler_and_container(
            endpoint.handler_doc(),
            endpoint.container_doc(),
        )))
    }
}

/// Combine a handler block with its container's block
///
/// - Title and description come from the handler only.
/// - A handler `@group` replaces the container's group wholesale; the
///   container's group description is never inherited.
/// - A handler with `@group` but no free text uses the group's trailing text
///   as its title.
/// - Subgroup name and description travel as a pair from whichever block
///   declares `@subgroup` (handler first); without one, `subgroup` is `null`.
/// - Flags: handler first, container second.
pub fn merge_handler_and_container(handler: &DocBlock, container: &DocBlock) -> MetadataRecord {
    let own = handler.metadata();
    let inherited = container.metadata();

    let mut record = MetadataRecord {
        title: own.title,
        description: own.description,
        ..Default::default()
    };

    if own.group_name.is_present() || own.group_description.is_present() {
        record.group_name = own.group_name;
        record.group_description = Field::Set(own.group_description.unwrap_or(String::new()));

        if record.title.is_unset() {
            let trailing = handler.tag("group").map(|group| group.trailing()).unwrap_or_default();
            if !trailing.is_empty() {
                record.title = Field::Set(trailing);
                record.group_description = Field::Set(String::new());
            }
        }
    } else if inherited.has_group() {
        record.group_name = inherited.group_name;
        record.group_description = inherited.group_description;
    }

    if own.subgroup.is_present() {
        record.subgroup = own.subgroup;
        record.subgroup_description = own.subgroup_description;
    } else if inherited.subgroup.is_present() {
        record.subgroup = inherited.subgroup;
        record.subgroup_description = inherited.subgroup_description;
    } else {
        record.subgroup = Field::Null;
    }

    record.authenticated = own.authenticated.or(inherited.authenticated);
    record.try_out = own.try_out.or(inherited.try_out);

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use scrivener_domain::TriState;

    #[test]
    fn test_method_block_only() {
        let record = merge_handler_and_container(
            &parse(
                "/**
                  * Endpoint title.
                  * Endpoint description.
                  * Multiline.
                  */",
            ),
            &parse(""),
        );

        assert!(record.authenticated.is_unset());
        assert_eq!(record.subgroup, Field::Null);
        assert_eq!(record.title, Field::Set("Endpoint title.".to_string()));
        assert_eq!(record.description, Field::Set("Endpoint description.\nMultiline.".to_string()));
    }

    #[test]
    fn test_group_inherited_from_container() {
        let record = merge_handler_and_container(
            &parse("Endpoint title.\nEndpoint description.\nMultiline."),
            &parse("/**\n * @group Group A\n * Group description.\n */"),
        );

        assert!(record.authenticated.is_unset());
        assert!(record.try_out.is_unset());
        assert_eq!(record.subgroup, Field::Null);
        assert_eq!(record.group_name, Field::Set("Group A".to_string()));
        assert_eq!(record.group_description, Field::Set("Group description.".to_string()));
        assert_eq!(record.title, Field::Set("Endpoint title.".to_string()));
    }

    #[test]
    fn test_flags_and_subgroup_from_container() {
        let record = merge_handler_and_container(
            &parse("Endpoint title.\n@authenticated\n@noTryOut"),
            &parse("@authenticated\n@noTryOut\n@subgroup Einträge\n@subgroupDescription Alle Einträge"),
        );

        assert_eq!(record.authenticated, TriState::True);
        assert_eq!(record.try_out, TriState::False);
        assert!(record.group_name.is_unset());
        assert_eq!(record.subgroup, Field::Set("Einträge".to_string()));
        assert_eq!(record.subgroup_description, Field::Set("Alle Einträge".to_string()));
        assert_eq!(record.title, Field::Set("Endpoint title.".to_string()));
        assert_eq!(record.description, Field::Set(String::new()));
    }

    #[test]
    fn test_method_group_replaces_container_group() {
        let record = merge_handler_and_container(
            &parse(
                "Endpoint title.\nThis is the endpoint description.\n@authenticated\n@noTryOut\n@group Group from method",
            ),
            &parse("@group Group from controller\n@tryOut\nThis is the group description."),
        );

        assert_eq!(record.authenticated, TriState::True);
        assert_eq!(record.try_out, TriState::False);
        assert_eq!(record.group_name, Field::Set("Group from method".to_string()));
        assert_eq!(record.group_description, Field::Set(String::new()));
        assert_eq!(record.description, Field::Set("This is the endpoint description.".to_string()));
        assert_eq!(record.title, Field::Set("Endpoint title.".to_string()));
    }

    #[test]
    fn test_container_group_description_is_discarded() {
        let record = merge_handler_and_container(
            &parse("Endpoint title.\n@group Group from method"),
            &parse("@group Group from controller\nController group description."),
        );

        assert_eq!(record.group_name, Field::Set("Group from method".to_string()));
        assert_eq!(record.group_description, Field::Set(String::new()));
    }

    #[test]
    fn test_group_trailing_text_is_title_without_free_text() {
        let record = merge_handler_and_container(&parse("@group Cars\nFetch cars."), &parse(""));

        assert_eq!(record.group_name, Field::Set("Cars".to_string()));
        assert_eq!(record.group_description, Field::Set(String::new()));
        assert_eq!(record.title, Field::Set("Fetch cars.".to_string()));
    }

    #[test]
    fn test_no_annotations_yield_null_subgroup_only() {
        let record = merge_handler_and_container(&parse(""), &parse(""));
        assert_eq!(
            record,
            MetadataRecord {
                subgroup: Field::Null,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_handler_subgroup_wins_as_a_pair() {
        let record = merge_handler_and_container(
            &parse("@subgroup Mine"),
            &parse("@subgroup Theirs\n@subgroupDescription Theirs described"),
        );
        assert_eq!(record.subgroup, Field::Set("Mine".to_string()));
        assert!(record.subgroup_description.is_unset());
    }
}
