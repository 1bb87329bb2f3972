//! Annotation tags
//!
//! A [`TagSet`] is an insertion-ordered map from tag name to [`TagValue`].
//! Order matters: it is the order tags are rendered in.

pub mod merge;
pub mod validate;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

pub use merge::merge;
pub use validate::{validate, ALLOWED_TAGS};

/// Payload of a single tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    /// One value, possibly empty for a bare tag such as `@internal`
    Scalar(String),
    /// Repeated tag, one line per item
    List(Vec<String>),
}

impl TagValue {
    /// A bare tag renders without a value
    pub fn is_empty(&self) -> bool {
        match self {
            TagValue::Scalar(value) => value.is_empty(),
            TagValue::List(values) => values.is_empty(),
        }
    }

    /// Add another occurrence, promoting a scalar to a list
    pub fn push(&mut self, value: String) {
        match self {
            TagValue::Scalar(first) => {
                let first = std::mem::take(first);
                *self = TagValue::List(vec![first, value]);
            }
            TagValue::List(values) => values.push(value),
        }
    }
}

impl Default for TagValue {
    fn default() -> Self {
        TagValue::Scalar(String::new())
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Scalar(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::Scalar(value)
    }
}

impl From<Vec<String>> for TagValue {
    fn from(values: Vec<String>) -> Self {
        TagValue::List(values)
    }
}

impl From<Vec<&str>> for TagValue {
    fn from(values: Vec<&str>) -> Self {
        TagValue::List(values.into_iter().map(str::to_string).collect())
    }
}

// `null` in a config file means a bare tag.
impl<'de> Deserialize<'de> for TagValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Scalar(String),
            List(Vec<String>),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => TagValue::default(),
            Some(Raw::Scalar(value)) => TagValue::Scalar(value),
            Some(Raw::List(values)) => TagValue::List(values),
        })
    }
}

/// Ordered mapping from tag name to value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(IndexMap<String, TagValue>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Set a tag. An existing tag keeps its position and takes the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<TagValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style [`TagSet::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Record one more occurrence of `name`, promoting to a list on repeat
    pub fn append(&mut self, name: &str, value: String) {
        match self.0.get_mut(name) {
            Some(existing) => existing.push(value),
            None => {
                self.0.insert(name.to_string(), TagValue::Scalar(value));
            }
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, TagValue> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = (&'a String, &'a TagValue);
    type IntoIter = indexmap::map::Iter<'a, String, TagValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for TagSet {
    type Item = (String, TagValue);
    type IntoIter = indexmap::map::IntoIter<String, TagValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<TagValue>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
