//! Trait definitions shared across layers
//!
//! Merge policies are defined here so the extractor's pipeline runner can
//! fold contributions without knowing which category it is running.

/// Fold one strategy contribution into an accumulator
///
/// Implemented by every category's output type:
/// - [`crate::MetadataRecord`]: field-wise override, later wins
/// - `Vec<T>`: concatenation in contribution order
pub trait Merge {
    /// Merge `other` into `self`
    fn merge(&mut self, other: Self);
}

impl<T> Merge for Vec<T> {
    fn merge(&mut self, other: Self) {
        self.extend(other);
    }
}
