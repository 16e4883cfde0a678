//! `[collections]` section configuration.
//!
//! Each entry declares one custom content collection with its own URL scheme.
//! Collections keep their declaration order, which is also the order their
//! source plugins are emitted in.
//!
//! # Example
//!
//! ```toml
//! [collections.Docs]
//! type = "md"
//! path = "docs"
//!
//! [collections.Event]
//! type = "vue"
//! path = "events"
//! ```

use super::error::ConfigError;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};
use std::fmt;

/// Raw collection entry as written in the config file.
///
/// `type` stays a plain string here so a bad value can be reported with the
/// collection's name; see [`CollectionSpec::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub path: String,
}

impl CollectionSpec {
    #[cfg(test)]
    pub fn new(kind: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            path: path.into(),
        }
    }

    /// Turn the raw entry into a typed [`Collection`].
    pub fn resolve(&self, name: &str) -> Result<Collection, ConfigError> {
        let name = name.to_owned();
        let path = self.path.clone();
        match self.kind.as_str() {
            "md" => Ok(Collection::Markdown { name, path }),
            "vue" => Ok(Collection::VueTemplate { name, path }),
            other => Err(ConfigError::InvalidCollectionType {
                name,
                kind: other.to_owned(),
            }),
        }
    }
}

/// A validated custom collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    /// Plain markdown pages under `<md>/<path>/*/index.md`.
    Markdown { name: String, path: String },
    /// Vue-flavored markdown under `<vue>/<path>`.
    VueTemplate { name: String, path: String },
}

impl Collection {
    pub fn name(&self) -> &str {
        match self {
            Self::Markdown { name, .. } | Self::VueTemplate { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Markdown { path, .. } | Self::VueTemplate { path, .. } => path,
        }
    }

    /// The literal used for this kind in the config file.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Markdown { .. } => "md",
            Self::VueTemplate { .. } => "vue",
        }
    }
}

// ============================================================================
// Ordered collection map
// ============================================================================

/// Declaration-ordered map of collection name to [`CollectionSpec`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collections(Vec<(String, CollectionSpec)>);

impl Collections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a collection. Returns `false` if the name was already taken.
    pub fn insert(&mut self, name: impl Into<String>, spec: CollectionSpec) -> bool {
        let name = name.into();
        if self.get(&name).is_some() {
            return false;
        }
        self.0.push((name, spec));
        true
    }

    pub fn get(&self, name: &str) -> Option<&CollectionSpec> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, spec)| spec)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CollectionSpec)> {
        self.0.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve every entry, failing on the first invalid type.
    ///
    /// Nothing is built until every entry has resolved.
    pub fn resolve(&self) -> Result<Vec<Collection>, ConfigError> {
        self.iter().map(|(name, spec)| spec.resolve(name)).collect()
    }
}

impl<N: Into<String>> FromIterator<(N, CollectionSpec)> for Collections {
    fn from_iter<T: IntoIterator<Item = (N, CollectionSpec)>>(iter: T) -> Self {
        let mut collections = Self::new();
        for (name, spec) in iter {
            collections.insert(name, spec);
        }
        collections
    }
}

impl Serialize for Collections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, spec) in &self.0 {
            map.serialize_entry(name, spec)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Collections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CollectionsVisitor;

        impl<'de> Visitor<'de> for CollectionsVisitor {
            type Value = Collections;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of collection name to { type, path }")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut collections = Collections::new();
                while let Some((name, spec)) = access.next_entry::<String, CollectionSpec>()? {
                    if !collections.insert(name.clone(), spec) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate collection `{name}`"
                        )));
                    }
                }
                Ok(collections)
            }
        }

        deserializer.deserialize_map(CollectionsVisitor)
    }
}
