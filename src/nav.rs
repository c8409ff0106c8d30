//! Site-wide navigation behaviour shared by every page.
//!
//! Like [`crate::gallery`], each feature is a small value that owns its own
//! state and turns input events into class or scroll changes for a host to
//! apply. Features whose elements are missing from the page are simply not
//! constructed.

pub const HEADER_CLASS: &str = "header";
pub const NAV_TOGGLE_CLASS: &str = "nav-toggle";
pub const NAV_MENU_CLASS: &str = "nav-menu";
pub const NAV_LINK_CLASS: &str = "nav-link";
pub const ACTIVE_CLASS: &str = "active";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const BODY_NAV_OPEN_CLASS: &str = "nav-open";
pub const LAZY_SRC_ATTR: &str = "data-src";

/// Scroll offset, in pixels, past which the header gets `scrolled`.
pub const SCROLL_THRESHOLD: f64 = 50.0;

/// Page assumed when the location path ends in `/`.
pub const DEFAULT_PAGE: &str = "index.html";

// ============================================================================
// Mobile menu
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    ToggleClicked,
    LinkClicked,
    /// Any document click; flags say whether it landed inside menu or toggle.
    DocumentClicked { in_menu: bool, in_toggle: bool },
}

/// Classes the host mirrors onto toggle, menu, and `<body>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuClasses {
    pub toggle_active: bool,
    pub menu_active: bool,
    pub body_nav_open: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MobileNav {
    open: bool,
}

impl MobileNav {
    /// `None` unless both `.nav-toggle` and `.nav-menu` exist.
    pub fn init(has_toggle: bool, has_menu: bool) -> Option<Self> {
        (has_toggle && has_menu).then(Self::default)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn handle(&mut self, input: MenuInput) -> MenuClasses {
        match input {
            MenuInput::ToggleClicked => self.open = !self.open,
            MenuInput::LinkClicked => self.open = false,
            MenuInput::DocumentClicked { in_menu, in_toggle } => {
                if !in_menu && !in_toggle {
                    self.open = false;
                }
            }
        }
        self.classes()
    }

    pub fn classes(&self) -> MenuClasses {
        MenuClasses {
            toggle_active: self.open,
            menu_active: self.open,
            body_nav_open: self.open,
        }
    }
}

// ============================================================================
// Header scroll styling
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct HeaderScroll {
    scrolled: bool,
    last_scroll: f64,
}

impl HeaderScroll {
    pub fn init(has_header: bool) -> Option<Self> {
        has_header.then(Self::default)
    }

    /// Record a scroll position; returns whether the header is `scrolled`.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        self.scrolled = offset > SCROLL_THRESHOLD;
        self.last_scroll = offset;
        self.scrolled
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn last_scroll(&self) -> f64 {
        self.last_scroll
    }
}

// ============================================================================
// Smooth anchor scrolling
// ============================================================================

/// Target of an in-page anchor, as measured by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorTarget {
    /// Top of the target relative to the viewport.
    pub viewport_top: f64,
}

/// Where to smooth-scroll for a click on an anchor with `href`.
///
/// `None` means the click is left to the browser: a bare `#`, a non-fragment
/// link, or a fragment with no matching element. The header height is
/// subtracted so the target isn't hidden under a fixed header.
pub fn smooth_scroll_target(
    href: &str,
    target: Option<AnchorTarget>,
    page_offset: f64,
    header_height: Option<f64>,
) -> Option<f64> {
    if !href.starts_with('#') || href == "#" {
        return None;
    }
    let target = target?;
    Some(target.viewport_top + page_offset - header_height.unwrap_or(0.0))
}

// ============================================================================
// Active nav link
// ============================================================================

/// Last path segment of `pathname`, or [`DEFAULT_PAGE`] if empty.
pub fn current_page(pathname: &str) -> &str {
    match pathname.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => DEFAULT_PAGE,
    }
}

/// Indices of nav links whose `href` is the current page.
pub fn active_links<'a>(pathname: &str, hrefs: impl IntoIterator<Item = &'a str>) -> Vec<usize> {
    let page = current_page(pathname);
    hrefs
        .into_iter()
        .enumerate()
        .filter(|(_, href)| *href == page)
        .map(|(i, _)| i)
        .collect()
}

// ============================================================================
// Lazy images
// ============================================================================

/// Instruction to set an image's `src` and drop its `data-src`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadImage {
    pub id: usize,
    pub src: String,
}

/// Images carrying `data-src`, loaded on first intersection.
#[derive(Debug, Clone, Default)]
pub struct LazyLoader {
    pending: Vec<(usize, String)>,
}

impl LazyLoader {
    /// Register `(id, data-src)` pairs. Without intersection observation,
    /// every image is returned for immediate loading and nothing stays pending.
    pub fn init(images: Vec<(usize, String)>, observer_supported: bool) -> (Self, Vec<LoadImage>) {
        if observer_supported {
            (Self { pending: images }, Vec::new())
        } else {
            let now = images
                .into_iter()
                .map(|(id, src)| LoadImage { id, src })
                .collect();
            (Self::default(), now)
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Handle an observer callback: load and stop observing every entry that
    /// now intersects.
    pub fn on_intersect(&mut self, entries: &[(usize, bool)]) -> Vec<LoadImage> {
        let mut loads = Vec::new();
        for &(id, intersecting) in entries {
            if !intersecting {
                continue;
            }
            if let Some(pos) = self.pending.iter().position(|(p, _)| *p == id) {
                let (id, src) = self.pending.remove(pos);
                loads.push(LoadImage { id, src });
            }
        }
        loads
    }
}
