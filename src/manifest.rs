//! The build manifest: everything the build engine reads from its config.
//!
//! | Key                | Source                                       |
//! |--------------------|----------------------------------------------|
//! | `siteName` etc.    | `[site]` and `host`                          |
//! | `templates`        | collection compiler                          |
//! | `plugins`          | feed plugin, then the collection compiler    |
//! | `transformers`     | remark settings for filesystem sources       |
//! | `css`, `images`    | fixed build tuning                           |
//! | `configureWebpack` | fixed bundler tuning                         |
//! | `chainWebpack`     | fixed bundler tuning                         |

use crate::{
    collection::{
        self, CompiledCollections,
        plugins::{PluginDescriptor, RemarkPlugin, markdown_remark_plugins},
        templates::Templates,
    },
    config::{ConfigError, SiteConfig},
    feed::{FeedFilter, feed_plugin},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub site_name: String,
    pub site_description: String,
    pub site_url: String,
    pub icon: String,
    pub templates: Templates,
    pub plugins: Vec<PluginDescriptor>,
    pub css: Value,
    pub transformers: Transformers,
    pub images: ImageOptions,
    pub configure_webpack: Value,
    pub chain_webpack: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transformers {
    pub remark: RemarkTransformer,
}

/// Markdown settings applied to every `source-filesystem` source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemarkTransformer {
    pub external_links_target: String,
    pub external_links_rel: Vec<String>,
    pub slug: bool,
    pub autolink_headings: bool,
    pub plugins: Vec<RemarkPlugin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptions {
    pub compress: bool,
    pub default_quality: u8,
}

impl Default for RemarkTransformer {
    fn default() -> Self {
        Self {
            external_links_target: "_blank".into(),
            external_links_rel: vec!["noopener".into(), "noreferrer".into()],
            slug: true,
            autolink_headings: true,
            plugins: markdown_remark_plugins(),
        }
    }
}

impl Default for ImageOptions {
    /// Compression off: it dominates build time.
    fn default() -> Self {
        Self {
            compress: false,
            default_quality: 100,
        }
    }
}

impl Manifest {
    /// Assemble the manifest for `config`.
    ///
    /// `compile_date` is the cut-off for the feed: posts dated later stay out.
    pub fn build(config: &SiteConfig, compile_date: DateTime<Utc>) -> Result<Self, ConfigError> {
        let CompiledCollections {
            plugins: sources,
            templates,
        } = collection::compile(config)?;

        let filter = FeedFilter::new(config.rss_categories.clone(), compile_date);
        let mut plugins = Vec::with_capacity(sources.len() + 1);
        plugins.push(feed_plugin(config, &filter)?);
        plugins.extend(sources);

        Ok(Self {
            site_name: config.site.name.clone(),
            site_description: config.site.description.clone(),
            site_url: config.site_url(),
            icon: config.site.icon.clone(),
            templates,
            plugins,
            css: json!({
                "loaderOptions": { "scss": { "sassOptions": { "quietDeps": true } } }
            }),
            transformers: Transformers {
                remark: RemarkTransformer::default(),
            },
            images: ImageOptions::default(),
            // `fs` has no browser build
            configure_webpack: json!({ "node": { "fs": "empty" } }),
            // symlinked markdown outside the content dir breaks vue-remark otherwise
            chain_webpack: json!({ "resolve": { "symlinks": false } }),
        })
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
