//! Site configuration management for `hub.toml`.
//!
//! # Sections
//!
//! | Section          | Purpose                                         |
//! |------------------|-------------------------------------------------|
//! | top level        | `host` and the feed category whitelist          |
//! | `[site]`         | Site metadata (name, description, icon)         |
//! | `[build]`        | Content directories and template location       |
//! | `[feed]`         | Feed plugin options                             |
//! | `[collections]`  | Custom content collections                      |
//!
//! # Example
//!
//! ```toml
//! host = "galaxyproject.org"
//! rss_categories = ["news", "events"]
//!
//! [build.dirs]
//! md = "build/content-md"
//! vue = "build/content-vue"
//!
//! [collections.Platform]
//! type = "md"
//! path = "use"
//!
//! [collections.Event]
//! type = "vue"
//! path = "events"
//! ```
//!
//! A file with a `.json` extension is read as JSON with the same shape, so
//! the legacy `config.json` (with `rssCategories`) loads unchanged.

mod build;
mod collection;
pub mod defaults;
mod error;
mod feed;
mod site;

pub use collection::{Collection, Collections};
#[cfg(test)]
pub use collection::CollectionSpec;
pub use error::ConfigError;

use build::BuildConfig;
use feed::FeedConfig;
use site::SiteInfo;

use crate::{
    cli::Cli,
    log,
    utils::path::{bare_path, join_path},
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};

/// Type names claimed by the generic catch-all sources.
pub const RESERVED_TYPE_NAMES: [&str; 3] = ["Article", "Insert", "VueArticle"];

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing hub.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Public host name, without scheme (e.g. `galaxyproject.org`)
    pub host: String,

    /// Categories whose posts are published in the feed
    #[serde(default, alias = "rssCategories")]
    pub rss_categories: Vec<String>,

    /// Basic site information
    #[serde(default)]
    pub site: SiteInfo,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Feed plugin settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Custom content collections, in declaration order
    #[serde(default)]
    pub collections: Collections,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Parse configuration from JSON string
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path.
    ///
    /// `.json` files are parsed as JSON, anything else as TOML.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_str(&content),
        }
    }

    /// Public site URL, always https.
    pub fn site_url(&self) -> String {
        format!("https://{}", self.host)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.host, cli.host.as_ref());
        Self::update_option(&mut self.build.dirs.md, cli.md_dir.as_ref());
        Self::update_option(&mut self.build.dirs.vue, cli.vue_dir.as_ref());
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Directory a collection's sources live in, `<md|vue>/<path>`.
    pub fn collection_dir(&self, collection: &Collection) -> String {
        let root = match collection {
            Collection::Markdown { .. } => &self.build.dirs.md,
            Collection::VueTemplate { .. } => &self.build.dirs.vue,
        };
        join_path(root, bare_path(collection.path()))
    }

    /// Validate configuration before compiling it.
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            bail!(ConfigError::Validation("[host] must not be empty".into()));
        }
        if self.host.contains("://") || self.host.contains('/') {
            bail!(ConfigError::Validation(
                "[host] must be a bare host name, without scheme or path".into()
            ));
        }

        if self.build.dirs.md.trim_matches('/').is_empty() {
            bail!(ConfigError::Validation("[build.dirs.md] must not be empty".into()));
        }
        if self.build.dirs.vue.trim_matches('/').is_empty() {
            bail!(ConfigError::Validation("[build.dirs.vue] must not be empty".into()));
        }

        self.validate_collections()?;

        if self.rss_categories.is_empty() {
            log!("warn"; "[rss_categories] is empty, the feed will have no entries");
        }

        Ok(())
    }

    fn validate_collections(&self) -> Result<()> {
        let mut seen_dirs = HashSet::new();

        for (name, spec) in self.collections.iter() {
            if name.is_empty() {
                bail!(ConfigError::Validation("collection names must not be empty".into()));
            }
            if RESERVED_TYPE_NAMES.contains(&name) {
                bail!(ConfigError::Validation(format!(
                    "[collections.{name}] reuses a built-in type name"
                )));
            }

            let collection = spec.resolve(name)?;

            let path = bare_path(&spec.path);
            if path.is_empty() {
                bail!(ConfigError::Validation(format!(
                    "[collections.{name}.path] must not be empty"
                )));
            }
            if path.split('/').any(|seg| seg == "..") {
                bail!(ConfigError::Validation(format!(
                    "[collections.{name}.path] must stay inside the content directory"
                )));
            }
            let dir = self.collection_dir(&collection);
            if !seen_dirs.insert(dir) {
                bail!(ConfigError::Validation(format!(
                    "[collections.{name}.path] `{path}` is already used by another collection"
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
