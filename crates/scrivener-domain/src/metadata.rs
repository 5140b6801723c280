//! Metadata module - partial and finalized endpoint metadata

use crate::field::{Field, TriState};
use crate::traits::Merge;
use serde::{Deserialize, Serialize};

/// Partial endpoint metadata as contributed by one strategy
///
/// Every key is three-state. Keys a strategy did not mention are
/// [`Field::Unset`] / [`TriState::Unset`] and are skipped when serialized, so
/// the JSON form contains exactly the keys that were encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    /// Short endpoint title
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub title: Field<String>,

    /// Longer endpoint description
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub description: Field<String>,

    /// Name of the group the endpoint is listed under
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub group_name: Field<String>,

    /// Description of that group
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub group_description: Field<String>,

    /// Subgroup within the group
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub subgroup: Field<String>,

    /// Description of the subgroup
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub subgroup_description: Field<String>,

    /// Whether the endpoint requires authentication
    #[serde(default, skip_serializing_if = "TriState::is_unset")]
    pub authenticated: TriState,

    /// Whether interactive "try it out" is offered
    #[serde(default, skip_serializing_if = "TriState::is_unset")]
    pub try_out: TriState,
}

impl MetadataRecord {
    /// Create an empty record (every key unset)
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no key has been mentioned
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when either group key was mentioned
    pub fn has_group(&self) -> bool {
        self.group_name.is_present() || self.group_description.is_present()
    }

    /// Apply final defaults and produce the consumer-facing record
    ///
    /// Text keys default to `""`, `authenticated` to `false` and `tryOut` to
    /// `true`. Subgroup keys stay optional.
    pub fn finalize(self) -> EndpointMetadata {
        EndpointMetadata {
            title: self.title.unwrap_or(String::new()),
            description: self.description.unwrap_or(String::new()),
            group_name: self.group_name.unwrap_or(String::new()),
            group_description: self.group_description.unwrap_or(String::new()),
            subgroup: self.subgroup.into_value(),
            subgroup_description: self.subgroup_description.into_value(),
            authenticated: self.authenticated.unwrap_or(false),
            try_out: self.try_out.unwrap_or(true),
        }
    }
}

impl Merge for MetadataRecord {
    /// Field-wise override: every key `other` mentions replaces ours
    fn merge(&mut self, other: Self) {
        self.title.override_with(other.title);
        self.description.override_with(other.description);
        self.group_name.override_with(other.group_name);
        self.group_description.override_with(other.group_description);
        self.subgroup.override_with(other.subgroup);
        self.subgroup_description.override_with(other.subgroup_description);
        self.authenticated.override_with(other.authenticated);
        self.try_out.override_with(other.try_out);
    }
}

/// Finalized endpoint metadata with every default applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointMetadata {
    /// Short endpoint title
    pub title: String,

    /// Longer endpoint description
    pub description: String,

    /// Group name
    pub group_name: String,

    /// Group description
    pub group_description: String,

    /// Subgroup, if any source declared one
    pub subgroup: Option<String>,

    /// Subgroup description, if any source declared one
    pub subgroup_description: Option<String>,

    /// Whether the endpoint requires authentication
    pub authenticated: bool,

    /// Whether interactive "try it out" is offered
    pub try_out: bool,
}

impl Default for EndpointMetadata {
    fn default() -> Self {
        MetadataRecord::default().finalize()
    }
}
