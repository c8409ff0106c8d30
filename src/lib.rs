//! # Retreat Site
//!
//! Build tool and browser-behaviour models for a vacation-rental marketing
//! site.
//!
//! # Architecture: Two Independent Halves
//!
//! ```text
//! Build     templates/ + pages/ + site.toml  →  dist/*.html   (+ mirrored assets)
//! Client    DOM events  →  gallery / nav models  →  DOM effects
//! ```
//!
//! The build is sequential string work: each page's header and footer are
//! filled from its metadata, wrapped around the page fragment, and written
//! out; then asset directories are copied. The client half holds no I/O at
//! all. Each browser feature is a small state machine with named inputs and
//! returned effects, so its behaviour is testable without a browser.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`site`] | Build orchestration: templates, pages, assets, progress events |
//! | [`template`] | `{{placeholder}}` parsing and substitution |
//! | [`pages`] | Header/footer contexts per page and page assembly |
//! | [`assets`] | Recursive mirroring of static asset directories |
//! | [`config`] | `site.toml` loading, merging over stock defaults, validation |
//! | [`types`] | The page metadata record |
//! | [`output`] | CLI output formatting |
//! | [`gallery`] | Gallery filter and lightbox state machines |
//! | [`nav`] | Mobile menu, header scroll, smooth scroll, active link, lazy images |
//!
//! # Design Decisions
//!
//! ## Substitution, Not a Template Language
//!
//! Templates carry nothing but `{{key}}` holes. A hole with no matching key is
//! left in place rather than blanked, so a typo or an incomplete page record
//! is visible in the output and listed by `retreat-site check`.
//!
//! ## Missing Pages Don't Stop the Build
//!
//! A page whose fragment is absent is reported and skipped; every other page
//! is still written. Missing templates, on the other hand, abort the run:
//! nothing useful can be produced without them.

pub mod assets;
pub mod config;
pub mod gallery;
pub mod nav;
pub mod output;
pub mod pages;
pub mod site;
pub mod template;
pub mod types;

pub use site::{build, build_site};

#[cfg(test)]
pub(crate) mod test_helpers;
