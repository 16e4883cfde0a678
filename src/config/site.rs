//! `[site]` section configuration.
//!
//! Contains the site metadata handed to the build engine as
//! `siteName`, `siteDescription` and `icon`.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in hub.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [site]
/// name = "Galaxy Community Hub"
/// description = "All about Galaxy and its community."
/// icon = "./src/favicon.png"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteInfo {
    /// Site title displayed in browser tab and headers.
    #[serde(default = "defaults::site::name")]
    #[educe(Default = defaults::site::name())]
    pub name: String,

    /// Site description for SEO meta tags.
    #[serde(default = "defaults::site::description")]
    #[educe(Default = defaults::site::description())]
    pub description: String,

    /// Favicon path, relative to the site project.
    #[serde(default = "defaults::site::icon")]
    #[educe(Default = defaults::site::icon())]
    pub icon: String,
}
