use std::str::FromStr;

use testprops_utils::error::PropertyError;
use tracing::debug;

use super::PropertyStore;

/// One property name, or an ordered list of equivalent names.
///
/// Lists are tried front to back and the first name present wins, so older
/// spellings of a key can stay supported behind the current one.
pub trait PropertyKeys {
    fn candidates(&self) -> &[&str];
}

impl PropertyKeys for &str {
    fn candidates(&self) -> &[&str] {
        std::slice::from_ref(self)
    }
}

impl PropertyKeys for &[&str] {
    fn candidates(&self) -> &[&str] {
        self
    }
}

impl<const N: usize> PropertyKeys for &[&str; N] {
    fn candidates(&self) -> &[&str] {
        *self
    }
}

impl PropertyStore {
    fn resolve<'s, 'k>(&'s self, candidates: &[&'k str]) -> Option<(&'k str, &'s str)> {
        candidates
            .iter()
            .find_map(|key| self.properties.get(*key).map(|value| (*key, value.as_str())))
    }

    /// Value of the first present key.
    ///
    /// # Errors
    ///
    /// [`PropertyError::MissingRequired`] naming the first key of the list
    /// when none is present.
    ///
    /// # Panics
    ///
    /// Panics if `keys` is an empty list; that is a caller bug, not bad input.
    pub fn required_string<K: PropertyKeys>(&self, keys: K) -> Result<&str, PropertyError> {
        let candidates = keys.candidates();
        assert!(!candidates.is_empty(), "empty property name list");

        self.resolve(candidates)
            .map(|(_, value)| value)
            .ok_or_else(|| PropertyError::MissingRequired {
                key: candidates[0].to_string(),
            })
    }

    /// Value of the first present key, or `None`.
    #[must_use]
    pub fn optional_string<K: PropertyKeys>(&self, keys: K) -> Option<&str> {
        self.resolve(keys.candidates()).map(|(_, value)| value)
    }

    /// Value of the first present key, or `default`.
    #[must_use]
    pub fn optional_string_or<'a, K: PropertyKeys>(&'a self, keys: K, default: &'a str) -> &'a str {
        self.optional_string(keys).unwrap_or(default)
    }

    /// Base-10 integer value of the first present key.
    ///
    /// An absent key and a value that does not parse both yield `default`;
    /// malformed values are not reported as errors.
    #[must_use]
    pub fn optional_integer<T, K>(&self, keys: K, default: T) -> T
    where
        T: FromStr,
        K: PropertyKeys,
    {
        match self.resolve(keys.candidates()) {
            None => default,
            Some((key, raw)) => raw.parse().unwrap_or_else(|_| {
                debug!(key, value = raw, "Malformed integer property; using default");
                default
            }),
        }
    }

    /// Boolean value of the first present key.
    ///
    /// `true` and `yes` (any case) are true; every other present value,
    /// including the empty string, is false. Only an absent key yields
    /// `default`.
    #[must_use]
    pub fn optional_boolean<K: PropertyKeys>(&self, keys: K, default: bool) -> bool {
        self.optional_string(keys).map_or(default, |value| {
            value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes")
        })
    }
}
