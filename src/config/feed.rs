//! `[feed]` section configuration.
//!
//! Options passed through to `gridsome-plugin-feed`. The category whitelist
//! lives at the top level as `rss_categories`, matching the legacy layout.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[feed]` section in hub.toml.
///
/// # Example
/// ```toml
/// [feed]
/// max_items = 25
/// output = "/feed.atom"
/// rss = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// Feed-level description.
    #[serde(default = "defaults::feed::description")]
    #[educe(Default = defaults::feed::description())]
    pub description: String,

    /// Node types the feed plugin collects candidates from.
    #[serde(default = "defaults::feed::content_types")]
    #[educe(Default = defaults::feed::content_types())]
    pub content_types: Vec<String>,

    /// Emit an Atom feed.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub atom: bool,

    /// Emit an RSS 2.0 feed.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub rss: bool,

    /// Atom output path, as a site URL path.
    #[serde(default = "defaults::feed::output")]
    #[educe(Default = defaults::feed::output())]
    pub output: String,

    /// Upper bound on feed entries.
    #[serde(default = "defaults::feed::max_items")]
    #[educe(Default = defaults::feed::max_items())]
    pub max_items: usize,
}
