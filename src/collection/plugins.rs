//! Plugin descriptors handed to the build engine.
//!
//! A descriptor serializes as `{ "use": <plugin id>, "options": { ... } }`.
//! Each plugin kind has its own options struct so the field names the plugin
//! expects (`typeName`, `path`, `baseDir`, `ignore`, ...) are fixed at compile
//! time.

use serde::{Serialize, Serializer, ser::SerializeTuple};
use serde_json::{Value, json};

pub const SOURCE_FILESYSTEM: &str = "@gridsome/source-filesystem";
pub const VUE_REMARK: &str = "@gridsome/vue-remark";
pub const FEED: &str = "gridsome-plugin-feed";

/// Module path of the local table-of-contents remodelling plugin.
const TOC_REMODEL: &str = "./src/build/toc-remodel.mjs";

// ============================================================================
// Descriptor
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginDescriptor {
    #[serde(rename = "use")]
    pub plugin: &'static str,
    pub options: PluginOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PluginOptions {
    Filesystem(FilesystemOptions),
    VueRemark(VueRemarkOptions),
    Feed(FeedPluginOptions),
}

impl PluginDescriptor {
    pub fn filesystem(type_name: impl Into<String>, path: SourcePath) -> Self {
        Self {
            plugin: SOURCE_FILESYSTEM,
            options: PluginOptions::Filesystem(FilesystemOptions {
                type_name: type_name.into(),
                path,
            }),
        }
    }

    pub fn vue_remark(options: VueRemarkOptions) -> Self {
        Self {
            plugin: VUE_REMARK,
            options: PluginOptions::VueRemark(options),
        }
    }

    pub fn feed(options: FeedPluginOptions) -> Self {
        Self {
            plugin: FEED,
            options: PluginOptions::Feed(options),
        }
    }

    /// The node type this descriptor sources, if any.
    pub fn type_name(&self) -> Option<&str> {
        match &self.options {
            PluginOptions::Filesystem(opts) => Some(&opts.type_name),
            PluginOptions::VueRemark(opts) => Some(&opts.type_name),
            PluginOptions::Feed(_) => None,
        }
    }

    /// Globs, or the base directory, this descriptor reads content from.
    pub fn sources(&self) -> &[String] {
        match &self.options {
            PluginOptions::Filesystem(opts) => opts.path.globs(),
            PluginOptions::VueRemark(opts) => std::slice::from_ref(&opts.base_dir),
            PluginOptions::Feed(_) => &[],
        }
    }
}

// ============================================================================
// Options per plugin kind
// ============================================================================

/// `source-filesystem` accepts either one glob or a list of globs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SourcePath {
    Single(String),
    List(Vec<String>),
}

impl SourcePath {
    pub fn globs(&self) -> &[String] {
        match self {
            Self::Single(glob) => std::slice::from_ref(glob),
            Self::List(globs) => globs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesystemOptions {
    pub type_name: String,
    pub path: SourcePath,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VueRemarkOptions {
    pub type_name: String,
    pub base_dir: String,
    pub path_prefix: String,
    /// Directories under `base_dir` this source must not claim.
    pub ignore: Vec<String>,
    pub template: String,
    pub plugins: Vec<RemarkPlugin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPluginOptions {
    pub content_types: Vec<String>,
    pub feed_options: FeedOptions,
    pub atom: FeedFormat,
    pub rss: FeedFormat,
    pub max_items: usize,
    /// Data the `filterNodes` callback is built from.
    pub filter_nodes: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedOptions {
    pub description: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedFormat {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

// ============================================================================
// Remark plugins
// ============================================================================

/// A remark plugin reference: bare name, or `[name, options]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RemarkPlugin {
    pub name: String,
    pub options: Option<Value>,
}

impl RemarkPlugin {
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: None,
        }
    }

    pub fn with_options(name: impl Into<String>, options: Value) -> Self {
        Self {
            name: name.into(),
            options: Some(options),
        }
    }
}

impl Serialize for RemarkPlugin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.options {
            None => serializer.serialize_str(&self.name),
            Some(options) => {
                let mut tuple = serializer.serialize_tuple(2)?;
                tuple.serialize_element(&self.name)?;
                tuple.serialize_element(options)?;
                tuple.end()
            }
        }
    }
}

/// Remark plugins shared by every markdown pipeline: a table of contents and
/// the layout remodelling that splits it from the body.
pub fn remark_plugins() -> Vec<RemarkPlugin> {
    vec![
        RemarkPlugin::with_options("remark-toc", json!({ "skip": "end-table-of-contents" })),
        RemarkPlugin::with_options(
            TOC_REMODEL,
            json!({
                "tocAttrs": { "class": "toc-wrapper col-md-3" },
                "bodyAttrs": { "class": "body-wrapper col-md-9" },
            }),
        ),
    ]
}

/// Remark plugins for plain markdown, which additionally supports attributes.
pub fn markdown_remark_plugins() -> Vec<RemarkPlugin> {
    let mut plugins = remark_plugins();
    plugins.push(RemarkPlugin::bare("remark-attr"));
    plugins
}
