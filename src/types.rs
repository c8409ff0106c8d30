//! Page metadata shared by configuration, rendering, and CLI output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value given to `active_<section>` placeholders for the page's own nav entry.
pub const ACTIVE_CLASS: &str = "active";

/// Metadata for one output page.
///
/// The page table is declared once in `site.toml` (or the stock defaults) and
/// is read-only for the whole build. `file` is both the fragment name under
/// `pages/` and the output name under `dist/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    /// Output filename, e.g. `gallery.html`.
    pub file: String,
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub og_title: String,
    pub og_description: String,
    /// Nav sections highlighted on this page. `["home"]` sets `{{active_home}}`
    /// to `active`.
    #[serde(default)]
    pub active: Vec<String>,
    /// Markup forwarded to the footer's `{{extra_scripts}}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_scripts: Option<String>,
    /// Additional header placeholders specific to this page.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vars: BTreeMap<String, String>,
}

impl PageConfig {
    /// Placeholder key for a nav section flag.
    pub fn active_key(section: &str) -> String {
        format!("active_{section}")
    }
}
