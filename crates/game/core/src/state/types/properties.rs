//! String-keyed property bags attached to tile groups, placements and live
//! entities.
//!
//! Authored content stores everything as strings. Readers go through the typed
//! accessors, which never fail: a missing or unparsable value yields the
//! caller's default.

use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PropertyBag {
    values: BTreeMap<String, String>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bag from `defaults` with `overrides` layered on top.
    pub fn merged(defaults: &PropertyBag, overrides: &PropertyBag) -> Self {
        let mut bag = defaults.clone();
        for (key, value) in &overrides.values {
            bag.values.insert(key.clone(), value.clone());
        }
        bag
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the value when present and non-blank.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|value| !value.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get_i32(&self, key: &str, default: i32) -> i32 {
        self.get(key)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(default)
    }

    pub fn get_u32(&self, key: &str, default: u32) -> u32 {
        self.get(key)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(default)
    }

    pub fn get_f32(&self, key: &str, default: f32) -> f32 {
        self.get(key)
            .and_then(|value| value.trim().parse::<f32>().ok())
            .filter(|value| value.is_finite())
            .unwrap_or(default)
    }

    /// Accepts `true/false`, `yes/no` and `1/0` in any case.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key).map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if matches!(v.as_str(), "true" | "yes" | "1") => true,
            Some(v) if matches!(v.as_str(), "false" | "no" | "0") => false,
            _ => default,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.values.insert(key.into(), value.to_string());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyBag
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors_fall_back_to_defaults() {
        let bag: PropertyBag = [("health", "12"), ("defense", "lots"), ("hostile", "No")]
            .into_iter()
            .collect();

        assert_eq!(bag.get_i32("health", 1), 12);
        assert_eq!(bag.get_i32("defense", 0), 0);
        assert_eq!(bag.get_i32("missing", 7), 7);
        assert!(!bag.get_bool("hostile", true));
        assert!(bag.get_bool("missing", true));
    }

    #[test]
    fn overrides_win_when_merging() {
        let defaults: PropertyBag = [("health", "5"), ("name", "Slime")].into_iter().collect();
        let overrides: PropertyBag = [("health", "9")].into_iter().collect();

        let merged = PropertyBag::merged(&defaults, &overrides);
        assert_eq!(merged.get("health"), Some("9"));
        assert_eq!(merged.get("name"), Some("Slime"));
    }
}
