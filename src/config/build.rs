//! `[build]` section configuration.
//!
//! Contains the content directories the build engine sources from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[build]` section in hub.toml.
///
/// # Example
/// ```toml
/// [build]
/// templates = "src/templates"
///
/// [build.dirs]
/// md = "build/content-md"
/// vue = "build/content-vue"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory holding the `<TypeName>.vue` page templates.
    #[serde(default = "defaults::build::templates")]
    #[educe(Default = defaults::build::templates())]
    pub templates: String,

    /// Content source directories.
    #[serde(default)]
    pub dirs: DirsConfig,
}

/// `[build.dirs]` section - where the preprocessed content lives.
///
/// These are kept as `/`-separated strings, relative to the site project,
/// because they are spliced into source globs verbatim.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DirsConfig {
    /// Markdown content root, sourced by `source-filesystem`.
    #[serde(default = "defaults::build::dirs::md")]
    #[educe(Default = defaults::build::dirs::md())]
    pub md: String,

    /// Vue-flavored markdown content root, sourced by `vue-remark`.
    #[serde(default = "defaults::build::dirs::vue")]
    #[educe(Default = defaults::build::dirs::vue())]
    pub vue: String,
}
