//! Content nodes as the build engine hands them to templates and feed callbacks.
//!
//! Only the fields this crate reads are modelled; anything else on the node
//! is ignored on deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single content node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentNode {
    /// Resolved node path, e.g. `/build/content-md/news/2024-01-gcc/`.
    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub title: Option<String>,

    /// Rendered HTML body.
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub date: Option<NodeDate>,

    #[serde(default)]
    pub category: Option<String>,

    /// Short teaser, used as the feed description.
    #[serde(default)]
    pub tease: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    /// Point of contact; preferred over `authors` for feed attribution.
    /// Front matter may give a string or a list of names.
    #[serde(default)]
    pub contact: Option<Value>,

    #[serde(default)]
    pub authors: Option<Value>,

    /// File-system metadata. Only `source-filesystem` nodes carry it.
    #[serde(default)]
    pub file_info: Option<FileInfo>,
}

/// `fileInfo` attached by `source-filesystem`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Directory relative to the project, e.g. `build/content-md/news`.
    pub directory: String,
    /// Base name without extension.
    pub name: String,
}

/// The `date` field of a node.
///
/// Front matter may hold a real timestamp, a string, or something else
/// entirely; only the first two are usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeDate {
    Native(DateTime<Utc>),
    Text(String),
    Other(Value),
}

impl NodeDate {
    /// Name of the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Native(_) => "Date",
            Self::Text(_) => "String",
            Self::Other(value) => match value {
                Value::Null => "Null",
                Value::Bool(_) => "Boolean",
                Value::Number(_) => "Number",
                Value::String(_) => "String",
                Value::Array(_) => "Array",
                Value::Object(_) => "Object",
            },
        }
    }

    /// Whether the value counts as "no date": an empty string, `0` or `false`.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Native(_) => false,
            Self::Text(s) => s.trim().is_empty(),
            Self::Other(Value::Bool(b)) => !b,
            Self::Other(Value::Number(n)) => n.as_f64() == Some(0.0),
            Self::Other(_) => false,
        }
    }

    /// A numeric date read as milliseconds since the Unix epoch.
    pub fn epoch_millis(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Other(Value::Number(n)) => {
                let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
                DateTime::from_timestamp_millis(millis)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

impl ContentNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// The node's date, ignoring blank values.
    pub fn date(&self) -> Option<&NodeDate> {
        self.date.as_ref().filter(|d| !d.is_blank())
    }

    /// Name to credit in the feed: `contact`, else `authors`.
    ///
    /// Lists are joined with `, `. Empty values fall through to the next field.
    pub fn author(&self) -> Option<String> {
        [&self.contact, &self.authors]
            .into_iter()
            .flatten()
            .find_map(display_name)
    }
}

fn display_name(value: &Value) -> Option<String> {
    let name = match value {
        Value::Null | Value::Bool(false) => return None,
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(display_name)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    };
    (!name.is_empty()).then_some(name)
}
