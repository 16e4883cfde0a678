//! Feed callbacks and the feed plugin descriptor.
//!
//! `gridsome-plugin-feed` owns feed writing. This module supplies what it
//! calls back into:
//!
//! - [`FeedFilter::admits`] as `filterNodes`
//! - [`project`] as `nodeToFeedItem`
//!
//! [`select`] runs both over a batch of nodes the way the plugin does, which
//! is what the `feed` subcommand prints.

mod filter;

pub use filter::FeedFilter;

use crate::{
    collection::plugins::{FeedFormat, FeedOptions, FeedPluginOptions, PluginDescriptor},
    config::SiteConfig,
    node::{ContentNode, NodeDate},
    utils::date::parse_date,
};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use thiserror::Error;

/// Feed projection errors.
///
/// Every variant means the node cannot become a feed entry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("Nonexistent node")]
    MissingNode,

    #[error("No date on `{path}`")]
    MissingDate { path: String },

    #[error("Invalid date type {kind} for {value} on `{path}`")]
    InvalidDate {
        kind: &'static str,
        value: String,
        path: String,
    },
}

/// One entry as consumed by the feed writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    pub title: Option<String>,
    pub content: Option<String>,
    pub date: DateTime<Utc>,
    pub published: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<FeedAuthor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedAuthor {
    pub name: String,
}

/// Resolve a node date into a timestamp.
///
/// Native dates pass through unchanged; strings must parse.
pub(crate) fn normalize_date(date: &NodeDate, path: &str) -> Result<DateTime<Utc>, FeedError> {
    let parsed = match date {
        NodeDate::Native(dt) => Some(*dt),
        NodeDate::Text(s) => parse_date(s),
        NodeDate::Other(_) => None,
    };
    parsed.ok_or_else(|| FeedError::InvalidDate {
        kind: date.type_name(),
        value: date.to_string(),
        path: path.to_owned(),
    })
}

fn is_absolute_url(s: &str) -> bool {
    static RE_ABSOLUTE_URL: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^https?://[^/ \t\r\n]+").unwrap());
    RE_ABSOLUTE_URL.is_match(s)
}

/// Convert a content node into a feed entry.
pub fn project(node: Option<&ContentNode>) -> Result<FeedItem, FeedError> {
    let node = node.ok_or(FeedError::MissingNode)?;
    let date = node.date().ok_or_else(|| FeedError::MissingDate {
        path: node.path.clone(),
    })?;
    let date = normalize_date(date, &node.path)?;

    let author = node
        .author()
        .map(|name| vec![FeedAuthor { name }])
        .unwrap_or_default();

    Ok(FeedItem {
        title: node.title.clone(),
        content: node.content.clone(),
        date,
        published: date,
        description: node.tease.clone().filter(|tease| !tease.is_empty()),
        image: node.image.clone().filter(|image| is_absolute_url(image)),
        author,
    })
}

/// Filter, project and order `nodes` the way the feed plugin does.
///
/// Entries are sorted newest first and capped at `max_items`. A node that
/// passes the filter but fails projection aborts the whole run.
pub fn select(
    nodes: &[Option<ContentNode>],
    filter: &FeedFilter,
    max_items: usize,
) -> Result<Vec<FeedItem>, FeedError> {
    let mut items = nodes
        .iter()
        .map(Option::as_ref)
        .filter(|node| filter.admits(*node))
        .map(project)
        .collect::<Result<Vec<_>, _>>()?;

    items.sort_by(|a, b| b.date.cmp(&a.date));
    items.truncate(max_items);
    Ok(items)
}

/// Build the `gridsome-plugin-feed` descriptor for `config`.
pub fn feed_plugin(
    config: &SiteConfig,
    filter: &FeedFilter,
) -> serde_json::Result<PluginDescriptor> {
    let feed = &config.feed;
    let id = format!("{}{}", config.site_url(), feed.output);

    Ok(PluginDescriptor::feed(FeedPluginOptions {
        content_types: feed.content_types.clone(),
        feed_options: FeedOptions {
            description: feed.description.clone(),
            id,
        },
        atom: FeedFormat {
            enabled: feed.atom,
            output: Some(feed.output.clone()),
        },
        rss: FeedFormat {
            enabled: feed.rss,
            output: None,
        },
        max_items: feed.max_items,
        filter_nodes: serde_json::to_value(filter)?,
    }))
}
