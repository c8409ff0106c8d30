//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults
//! describe the complete site (layout plus the six-page metadata table), so a
//! project without a `site.toml` builds as-is.
//!
//! ## Config File Location
//!
//! ```text
//! project/
//! ├── site.toml                # Optional, overrides stock defaults
//! ├── templates/
//! │   ├── header.html
//! │   └── footer.html
//! ├── pages/                   # One fragment per declared page
//! ├── css/  js/  gallery/  images/
//! └── dist/                    # Output (created by the build)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Top-level keys override the stock value; the
//! `[[pages]]` array replaces the stock page table as a whole:
//!
//! ```toml
//! output_dir = "public"
//! assets = ["css", "js"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::PageConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
///
/// Paths are relative to the project root passed to the build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding the header and footer templates.
    pub templates_dir: String,
    /// Header template filename inside `templates_dir`.
    pub header: String,
    /// Footer template filename inside `templates_dir`.
    pub footer: String,
    /// Directory holding one content fragment per page.
    pub pages_dir: String,
    /// Output directory. Created non-recursively, so its parent must exist.
    pub output_dir: String,
    /// Top-level asset directories mirrored into the output.
    pub assets: Vec<String>,
    /// Page metadata table, built in order.
    pub pages: Vec<PageConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            templates_dir: "templates".to_string(),
            header: "header.html".to_string(),
            footer: "footer.html".to_string(),
            pages_dir: "pages".to_string(),
            output_dir: "dist".to_string(),
            assets: ["css", "js", "gallery", "images"]
                .into_iter()
                .map(String::from)
                .collect(),
            pages: default_pages(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable as paths and placeholder keys.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("templates_dir", &self.templates_dir),
            ("header", &self.header),
            ("footer", &self.footer),
            ("pages_dir", &self.pages_dir),
            ("output_dir", &self.output_dir),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }

        for asset in &self.assets {
            if !is_plain_name(asset) {
                return Err(ConfigError::Validation(format!(
                    "assets entry '{asset}' must be a single directory name"
                )));
            }
        }

        // Copying an asset directory into itself never terminates.
        if let Some(top) = output_top_dir(&self.output_dir) {
            if self.assets.iter().any(|a| a == top) {
                return Err(ConfigError::Validation(format!(
                    "output_dir '{}' must not be inside asset directory '{top}'",
                    self.output_dir
                )));
            }
        }

        let mut seen = HashSet::new();
        for page in &self.pages {
            if !is_plain_name(&page.file) {
                return Err(ConfigError::Validation(format!(
                    "pages.file '{}' must be a single file name",
                    page.file
                )));
            }
            if !seen.insert(page.file.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate page '{}'",
                    page.file
                )));
            }
            for section in &page.active {
                if section.is_empty() || !section.chars().all(is_key_char) {
                    return Err(ConfigError::Validation(format!(
                        "page '{}': active section '{section}' is not a valid placeholder name",
                        page.file
                    )));
                }
            }
            for key in page.vars.keys() {
                if key.is_empty() || !key.chars().all(is_key_char) {
                    return Err(ConfigError::Validation(format!(
                        "page '{}': var '{key}' is not a valid placeholder name",
                        page.file
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn header_path(&self, root: &Path) -> PathBuf {
        root.join(&self.templates_dir).join(&self.header)
    }

    pub fn footer_path(&self, root: &Path) -> PathBuf {
        root.join(&self.templates_dir).join(&self.footer)
    }

    pub fn fragment_path(&self, root: &Path, page: &PageConfig) -> PathBuf {
        root.join(&self.pages_dir).join(&page.file)
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir)
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// First directory of `output_dir` relative to the project root, if any.
fn output_top_dir(output_dir: &str) -> Option<&str> {
    match Path::new(output_dir)
        .components()
        .find(|c| !matches!(c, Component::CurDir))?
    {
        Component::Normal(name) => name.to_str(),
        _ => None,
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn page(
    file: &str,
    title: &str,
    description: &str,
    keywords: &str,
    og: (&str, &str),
    active: &str,
) -> PageConfig {
    PageConfig {
        file: file.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        keywords: keywords.to_string(),
        og_title: og.0.to_string(),
        og_description: og.1.to_string(),
        active: vec![active.to_string()],
        extra_scripts: None,
        vars: Default::default(),
    }
}

/// The stock page table.
pub fn default_pages() -> Vec<PageConfig> {
    let mut gallery = page(
        "gallery.html",
        "Photo Gallery | Sebastian Spa Retreat",
        "Browse photos of Sebastian Spa Retreat - pool, hot tub, sauna, bedrooms, kitchen, and more. See what awaits you on your Florida vacation.",
        "Sebastian Spa Retreat photos, vacation rental gallery, pool hot tub images",
        (
            "Photo Gallery - Sebastian Spa Retreat",
            "Explore our photo gallery showcasing the pool, hot tub, sauna, bedrooms, and outdoor areas.",
        ),
        "gallery",
    );
    gallery.extra_scripts = Some(r#"<script src="js/gallery.js"></script>"#.to_string());

    vec![
        page(
            "index.html",
            "Sebastian Spa Retreat | Vacation Rental in Sebastian, FL",
            "Sebastian Spa Retreat - A stunning 3-bedroom vacation rental in Sebastian, FL with heated pool, hot tub, sauna, and year-round outdoor fun. Book your relaxing getaway today!",
            "Sebastian FL vacation rental, hot tub, pool, sauna, beach house, Florida vacation",
            (
                "Sebastian Spa Retreat: Hot Tub, Pool & Sauna Bliss",
                "3-bedroom vacation home with heated pool, hot tub, sauna, and amazing amenities in Sebastian, Florida.",
            ),
            "home",
        ),
        page(
            "property.html",
            "The Property | Sebastian Spa Retreat",
            "Explore Sebastian Spa Retreat's rooms and amenities - 3 bedrooms, 2 bathrooms, heated pool, hot tub, sauna, full kitchen, and more.",
            "Sebastian vacation rental amenities, pool hot tub sauna, bedrooms bathrooms",
            (
                "The Property - Sebastian Spa Retreat",
                "Detailed property information including bedrooms, bathrooms, amenities, and outdoor features.",
            ),
            "property",
        ),
        gallery,
        page(
            "location.html",
            "Location & Activities | Sebastian Spa Retreat",
            "Discover Sebastian, FL - beaches, fishing, kayaking, SpaceX launches, and more. Find activities and attractions near Sebastian Spa Retreat.",
            "Sebastian FL activities, beaches fishing SpaceX, Indian River Lagoon",
            (
                "Location & Activities - Sebastian Spa Retreat",
                "Explore Sebastian, Florida's beaches, fishing spots, SpaceX launch viewing, and local attractions.",
            ),
            "location",
        ),
        page(
            "local-guide.html",
            "Local Guide | Sebastian Spa Retreat",
            "Local guide for Sebastian, FL - weather, restaurants, shopping, events, and insider tips for your vacation at Sebastian Spa Retreat.",
            "Sebastian FL guide, restaurants weather, local events shopping",
            (
                "Local Guide - Sebastian Spa Retreat",
                "Your complete guide to Sebastian, Florida including weather, dining, shopping, and local events.",
            ),
            "guide",
        ),
        page(
            "guest-info.html",
            "Guest Information | Sebastian Spa Retreat",
            "Guest information for Sebastian Spa Retreat - check-in details, house rules, WiFi, appliance guides, and everything you need for your stay.",
            "Sebastian Spa Retreat check-in, house rules WiFi, guest information",
            (
                "Guest Information - Sebastian Spa Retreat",
                "Important guest information including check-in procedures, house rules, and appliance guides.",
            ),
            "guest",
        ),
    ]
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `site.toml` exists in the directory.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `site.toml` in the project root, falling back to stock
/// defaults when the file is absent.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a commented stock `site.toml` listing every key and the full page
/// table. Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Build Configuration
# ========================
# All settings are optional. Values shown below are the defaults.
# Paths are relative to the project root. Unknown keys will cause an error.

# Header/footer templates: {{key}} placeholders are filled from page metadata.
templates_dir = "templates"
header = "header.html"
footer = "footer.html"

# One content fragment per page, named after the page's output file.
pages_dir = "pages"

# Output directory. Its parent must already exist.
output_dir = "dist"

# Directories mirrored verbatim into the output. Missing ones are skipped.
assets = ["css", "js", "gallery", "images"]

# ---------------------------------------------------------------------------
# Pages
# ---------------------------------------------------------------------------
# Each entry fills the header's {{title}}, {{description}}, {{keywords}},
# {{og_title}} and {{og_description}}. Every section in `active` sets
# {{active_<section>}} to "active". `extra_scripts` is the only value passed
# to the footer. `vars` adds page-specific header placeholders.
#
# Declaring [[pages]] replaces this whole table.

[[pages]]
file = "index.html"
title = "Sebastian Spa Retreat | Vacation Rental in Sebastian, FL"
description = "Sebastian Spa Retreat - A stunning 3-bedroom vacation rental in Sebastian, FL with heated pool, hot tub, sauna, and year-round outdoor fun. Book your relaxing getaway today!"
keywords = "Sebastian FL vacation rental, hot tub, pool, sauna, beach house, Florida vacation"
og_title = "Sebastian Spa Retreat: Hot Tub, Pool & Sauna Bliss"
og_description = "3-bedroom vacation home with heated pool, hot tub, sauna, and amazing amenities in Sebastian, Florida."
active = ["home"]

[[pages]]
file = "property.html"
title = "The Property | Sebastian Spa Retreat"
description = "Explore Sebastian Spa Retreat's rooms and amenities - 3 bedrooms, 2 bathrooms, heated pool, hot tub, sauna, full kitchen, and more."
keywords = "Sebastian vacation rental amenities, pool hot tub sauna, bedrooms bathrooms"
og_title = "The Property - Sebastian Spa Retreat"
og_description = "Detailed property information including bedrooms, bathrooms, amenities, and outdoor features."
active = ["property"]

[[pages]]
file = "gallery.html"
title = "Photo Gallery | Sebastian Spa Retreat"
description = "Browse photos of Sebastian Spa Retreat - pool, hot tub, sauna, bedrooms, kitchen, and more. See what awaits you on your Florida vacation."
keywords = "Sebastian Spa Retreat photos, vacation rental gallery, pool hot tub images"
og_title = "Photo Gallery - Sebastian Spa Retreat"
og_description = "Explore our photo gallery showcasing the pool, hot tub, sauna, bedrooms, and outdoor areas."
active = ["gallery"]
extra_scripts = '<script src="js/gallery.js"></script>'

[[pages]]
file = "location.html"
title = "Location & Activities | Sebastian Spa Retreat"
description = "Discover Sebastian, FL - beaches, fishing, kayaking, SpaceX launches, and more. Find activities and attractions near Sebastian Spa Retreat."
keywords = "Sebastian FL activities, beaches fishing SpaceX, Indian River Lagoon"
og_title = "Location & Activities - Sebastian Spa Retreat"
og_description = "Explore Sebastian, Florida's beaches, fishing spots, SpaceX launch viewing, and local attractions."
active = ["location"]

[[pages]]
file = "local-guide.html"
title = "Local Guide | Sebastian Spa Retreat"
description = "Local guide for Sebastian, FL - weather, restaurants, shopping, events, and insider tips for your vacation at Sebastian Spa Retreat."
keywords = "Sebastian FL guide, restaurants weather, local events shopping"
og_title = "Local Guide - Sebastian Spa Retreat"
og_description = "Your complete guide to Sebastian, Florida including weather, dining, shopping, and local events."
active = ["guide"]

[[pages]]
file = "guest-info.html"
title = "Guest Information | Sebastian Spa Retreat"
description = "Guest information for Sebastian Spa Retreat - check-in details, house rules, WiFi, appliance guides, and everything you need for your stay."
keywords = "Sebastian Spa Retreat check-in, house rules WiFi, guest information"
og_title = "Guest Information - Sebastian Spa Retreat"
og_description = "Important guest information including check-in procedures, house rules, and appliance guides."
active = ["guest"]
"##
}
