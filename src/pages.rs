//! Page assembly: header + fragment + footer.
//!
//! Everything here is pure. File access lives in [`crate::site`].
//!
//! The header sees the page's whole metadata record. The footer sees a single
//! key, `extra_scripts`, which is always present (empty when the page declares
//! none), so `{{extra_scripts}}` never leaks into a footer.

use crate::template::{Context, Template};
use crate::types::{ACTIVE_CLASS, PageConfig};

pub const EXTRA_SCRIPTS: &str = "extra_scripts";

/// Header placeholders for one page.
///
/// Only keys the page actually declares are present: a page without
/// `extra_scripts` has no `extra_scripts` key, and only its own `active_*`
/// flags are set. Placeholders for other pages' nav flags are therefore left
/// as written.
pub fn header_context(page: &PageConfig) -> Context {
    let mut ctx = Context::new()
        .with("title", page.title.as_str())
        .with("description", page.description.as_str())
        .with("keywords", page.keywords.as_str())
        .with("og_title", page.og_title.as_str())
        .with("og_description", page.og_description.as_str());
    for section in &page.active {
        ctx.insert(PageConfig::active_key(section), Some(ACTIVE_CLASS.to_string()));
    }
    if let Some(extra) = &page.extra_scripts {
        ctx.insert(EXTRA_SCRIPTS, Some(extra.clone()));
    }
    for (key, value) in &page.vars {
        ctx.insert(key.as_str(), Some(value.clone()));
    }
    ctx
}

/// Footer placeholders for one page: `extra_scripts` only.
pub fn footer_context(page: &PageConfig) -> Context {
    let mut ctx = Context::new();
    ctx.insert(
        EXTRA_SCRIPTS,
        Some(page.extra_scripts.clone().unwrap_or_default()),
    );
    ctx
}

/// The shared header and footer, parsed once per build.
#[derive(Debug, Clone)]
pub struct Layout {
    pub header: Template,
    pub footer: Template,
}

impl Layout {
    pub fn parse(header: &str, footer: &str) -> Self {
        Self {
            header: Template::parse(header),
            footer: Template::parse(footer),
        }
    }

    /// Render one page. The three parts are joined with nothing in between.
    ///
    /// The fragment is opaque: its bytes are copied through unchanged, whatever
    /// their encoding.
    pub fn render_page(&self, page: &PageConfig, content: &[u8]) -> Vec<u8> {
        let header = self.header.render(&header_context(page));
        let footer = self.footer.render(&footer_context(page));
        let mut html = Vec::with_capacity(header.len() + content.len() + footer.len());
        html.extend_from_slice(header.as_bytes());
        html.extend_from_slice(content);
        html.extend_from_slice(footer.as_bytes());
        html
    }

    /// Placeholders that would be emitted literally for this page.
    pub fn unresolved<'a>(&'a self, page: &PageConfig) -> Vec<&'a str> {
        let mut names = self.header.unresolved(&header_context(page));
        for name in self.footer.unresolved(&footer_context(page)) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}
