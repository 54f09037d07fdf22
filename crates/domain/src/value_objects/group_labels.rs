//! Group labels value object
//!
//! The label set shared by an instance and the successors its controller
//! creates. Used as an exact-equality selector when looking for a replacement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key/value labels identifying an instance group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupLabels(BTreeMap<String, String>);

impl GroupLabels {
    /// Create an empty label set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add a label, replacing any previous value for the key
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// True when no labels are present, meaning no managed successor is expected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Look up a label value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate labels in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as an equality label selector (`k1=v1,k2=v2`, keys sorted)
    pub fn to_selector(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Check whether `labels` satisfies this selector
    ///
    /// Every key must be present with an identical value. An empty selector
    /// matches everything.
    pub fn matches(&self, labels: &Self) -> bool {
        self.0
            .iter()
            .all(|(k, v)| labels.0.get(k).is_some_and(|actual| actual == v))
    }
}

impl From<BTreeMap<String, String>> for GroupLabels {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for GroupLabels
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
