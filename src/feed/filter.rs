//! The `filterNodes` predicate.

use super::normalize_date;
use crate::node::ContentNode;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Admits a node into the feed.
///
/// A node is admitted when it has a date, its category is whitelisted, and
/// it is not dated after `compile_date`. Numeric dates are read as epoch
/// milliseconds here so the projector can report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedFilter {
    categories: Vec<String>,
    #[serde(rename = "notAfter")]
    compile_date: DateTime<Utc>,
}

impl FeedFilter {
    pub fn new(categories: Vec<String>, compile_date: DateTime<Utc>) -> Self {
        Self {
            categories,
            compile_date,
        }
    }

    pub fn admits(&self, node: Option<&ContentNode>) -> bool {
        let Some(node) = node else {
            return false;
        };
        let Some(date) = node.date() else {
            return false;
        };
        let whitelisted = node
            .category
            .as_ref()
            .is_some_and(|category| self.categories.contains(category));
        if !whitelisted {
            return false;
        }

        normalize_date(date, &node.path)
            .ok()
            .or_else(|| date.epoch_millis())
            .is_some_and(|date| date <= self.compile_date)
    }
}
