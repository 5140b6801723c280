//! Three-state values for partial records
//!
//! Strategies report only what they know. A key that no strategy mentioned
//! must stay distinguishable from one explicitly set to `null` or `false`,
//! otherwise a later merge cannot tell "no opinion" from "override".

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that may be unset, explicitly null, or set
///
/// Serializes as the inner value or `null`; deserializes a missing key (with
/// `#[serde(default)]`) as [`Field::Unset`] and an explicit `null` as
/// [`Field::Null`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// No source mentioned this key
    #[default]
    Unset,

    /// A source explicitly cleared this key
    Null,

    /// A source provided a value
    Set(T),
}

impl<T> Field<T> {
    /// True when no source mentioned this key
    pub fn is_unset(&self) -> bool {
        matches!(self, Field::Unset)
    }

    /// True when a source mentioned this key, even as `null`
    pub fn is_present(&self) -> bool {
        !self.is_unset()
    }

    /// The value, if one was set
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Field::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Consume into the value, if one was set
    pub fn into_value(self) -> Option<T> {
        match self {
            Field::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Keep `self` when present, otherwise fall back to `other`
    pub fn or(self, other: Field<T>) -> Field<T> {
        if self.is_present() {
            self
        } else {
            other
        }
    }

    /// Replace `self` with `other` unless `other` is unset
    pub fn override_with(&mut self, other: Field<T>) {
        if other.is_present() {
            *self = other;
        }
    }

    /// The set value, or `default` for unset and null
    pub fn unwrap_or(self, default: T) -> T {
        self.into_value().unwrap_or(default)
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Set(value)
    }
}

impl From<&str> for Field<String> {
    fn from(value: &str) -> Self {
        Field::Set(value.to_string())
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Null, Field::Set)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Set(value) => value.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Field::from)
    }
}

/// A boolean flag that may be left unset
///
/// An explicit `null` carries no opinion for a flag, so it deserializes as
/// [`TriState::Unset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TriState {
    /// No source mentioned this flag
    #[default]
    Unset,

    /// Explicitly true
    True,

    /// Explicitly false
    False,
}

impl TriState {
    /// True when no source mentioned this flag
    pub fn is_unset(&self) -> bool {
        matches!(self, TriState::Unset)
    }

    /// The flag value, if set
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TriState::Unset => None,
            TriState::True => Some(true),
            TriState::False => Some(false),
        }
    }

    /// Keep `self` when set, otherwise fall back to `other`
    pub fn or(self, other: TriState) -> TriState {
        if self.is_unset() {
            other
        } else {
            self
        }
    }

    /// Replace `self` with `other` unless `other` is unset
    pub fn override_with(&mut self, other: TriState) {
        if !other.is_unset() {
            *self = other;
        }
    }

    /// The flag value, or `default` when unset
    pub fn unwrap_or(self, default: bool) -> bool {
        self.as_bool().unwrap_or(default)
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value {
            TriState::True
        } else {
            TriState::False
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(TriState::Unset, TriState::from)
    }
}

impl Serialize for TriState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_bool().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(TriState::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_override_ignores_unset() {
        let mut field: Field<String> = "first".into();
        field.override_with(Field::Unset);
        assert_eq!(field, Field::Set("first".to_string()));

        field.override_with(Field::Null);
        assert_eq!(field, Field::Null);

        field.override_with("second".into());
        assert_eq!(field.as_value().map(String::as_str), Some("second"));
    }

    #[test]
    fn test_field_or_prefers_present_values() {
        let null: Field<String> = Field::Null;
        assert_eq!(null.or("fallback".into()), Field::Null);

        let unset: Field<String> = Field::Unset;
        assert_eq!(unset.or("fallback".into()), Field::Set("fallback".to_string()));
    }

    #[test]
    fn test_field_unwrap_or_treats_null_as_missing() {
        assert_eq!(Field::<String>::Null.unwrap_or(String::new()), "");
        assert_eq!(Field::<String>::Unset.unwrap_or("x".to_string()), "x");
    }

    #[test]
    fn test_tristate_distinguishes_false_from_unset() {
        let mut flag = TriState::True;
        flag.override_with(TriState::Unset);
        assert_eq!(flag, TriState::True);

        flag.override_with(TriState::False);
        assert_eq!(flag.as_bool(), Some(false));
        assert!(!flag.unwrap_or(true));
        assert!(TriState::Unset.unwrap_or(true));
    }

    #[test]
    fn test_field_serde() {
        let set: Field<String> = serde_json::from_str("\"value\"").unwrap();
        assert_eq!(set, Field::Set("value".to_string()));

        let null: Field<String> = serde_json::from_str("null").unwrap();
        assert_eq!(null, Field::Null);

        assert_eq!(serde_json::to_string(&Field::<String>::Null).unwrap(), "null");
    }

    #[test]
    fn test_tristate_serde() {
        let flag: TriState = serde_json::from_str("false").unwrap();
        assert_eq!(flag, TriState::False);

        let unset: TriState = serde_json::from_str("null").unwrap();
        assert_eq!(unset, TriState::Unset);

        assert_eq!(serde_json::to_string(&TriState::True).unwrap(), "true");
    }
}
