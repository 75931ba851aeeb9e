//! Classification options.

/// Options that change how types classify.
///
/// Types already in the cache were classified under the options in force at
/// the time, so changing options goes through
/// [`crate::Classifier::reconfigure`], which empties the cache.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct MappingOptions {
    /// Map types that fail remote and value conformance as non-conforming
    /// types instead of rejecting them.
    pub parse_non_conforming: bool,
}

impl MappingOptions {
    #[must_use]
    pub fn with_parse_non_conforming(mut self, enabled: bool) -> Self {
        self.parse_non_conforming = enabled;
        self
    }
}
