//! Photo gallery behaviour: category filter and lightbox.
//!
//! The browser side of the gallery page is modelled as plain values driven by
//! named input events. A host (DOM glue, test harness) describes what the page
//! contains with [`GalleryMarkup`], feeds [`GalleryInput`]s to a
//! [`GalleryPage`], and applies the [`Effect`]s it returns.
//!
//! ## DOM Contract
//!
//! ```html
//! <button class="filter-btn" data-filter="pool">Pool</button>
//! <div class="gallery-item" data-category="pool"><img src="..." alt="..."></div>
//! <div id="lightbox">
//!   <img class="lightbox-image">
//!   <button class="lightbox-close"></button>
//!   <button class="lightbox-prev"></button>
//!   <button class="lightbox-next"></button>
//! </div>
//! ```
//!
//! A page without filter buttons gets no filtering; a page without items or
//! without the overlay gets no lightbox.
//!
//! ## Lightbox States
//!
//! ```text
//!            item click                prev / next / ← / → / swipe
//!  Closed ─────────────→ Open(i) ─────────────────────────────→ Open(i')
//!     ↑                     │
//!     └─────────────────────┘
//!      close / backdrop / Esc
//! ```
//!
//! Navigation wraps around the *visible* items, which are recomputed from the
//! filter state every time the lightbox opens.

use std::time::Duration;

pub const FILTER_BUTTON_CLASS: &str = "filter-btn";
pub const FILTER_ATTR: &str = "data-filter";
pub const ITEM_CLASS: &str = "gallery-item";
pub const CATEGORY_ATTR: &str = "data-category";
pub const LIGHTBOX_ID: &str = "lightbox";
pub const LIGHTBOX_IMAGE_CLASS: &str = "lightbox-image";
pub const LIGHTBOX_CLOSE_CLASS: &str = "lightbox-close";
pub const LIGHTBOX_PREV_CLASS: &str = "lightbox-prev";
pub const LIGHTBOX_NEXT_CLASS: &str = "lightbox-next";
pub const ACTIVE_CLASS: &str = "active";

/// Wildcard filter value.
pub const ALL: &str = "all";

/// Horizontal travel, in pixels, a touch must exceed to count as a swipe.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Delay between fading the lightbox image out and swapping its source.
pub const FADE_DELAY: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Category(String),
}

impl Filter {
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            Filter::All
        } else {
            Filter::Category(value.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => c == category,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    pub category: String,
    pub src: String,
    pub alt: String,
}

impl GalleryItem {
    pub fn new(category: &str, src: &str, alt: &str) -> Self {
        Self {
            category: category.to_string(),
            src: src.to_string(),
            alt: alt.to_string(),
        }
    }
}

/// The items on the page and which of them are currently shown.
#[derive(Debug, Clone)]
pub struct Gallery {
    items: Vec<GalleryItem>,
    shown: Vec<bool>,
}

impl Gallery {
    pub fn new(items: Vec<GalleryItem>) -> Self {
        let shown = vec![true; items.len()];
        Self { items, shown }
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn is_shown(&self, index: usize) -> bool {
        self.shown.get(index).copied().unwrap_or(false)
    }

    /// Indices of shown items, in page order.
    pub fn visible(&self) -> Vec<usize> {
        (0..self.items.len()).filter(|&i| self.shown[i]).collect()
    }

    /// Show matching items, hide the rest. Returns one effect per item.
    pub fn apply(&mut self, filter: &Filter) -> Vec<Effect> {
        self.items
            .iter()
            .zip(self.shown.iter_mut())
            .enumerate()
            .map(|(index, (item, shown))| {
                *shown = filter.matches(&item.category);
                if *shown {
                    Effect::ShowItem { index }
                } else {
                    Effect::HideItem { index }
                }
            })
            .collect()
    }
}

/// Filter buttons; at most one is active.
#[derive(Debug, Clone)]
pub struct FilterBar {
    buttons: Vec<Filter>,
    active: Option<usize>,
}

impl FilterBar {
    pub fn new(buttons: Vec<Filter>) -> Self {
        Self {
            buttons,
            active: None,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_filter(&self) -> Option<&Filter> {
        self.active.and_then(|i| self.buttons.get(i))
    }

    /// Mark `button` active and filter `gallery` by it.
    pub fn activate(&mut self, button: usize, gallery: &mut Gallery) -> Vec<Effect> {
        let Some(filter) = self.buttons.get(button) else {
            return Vec::new();
        };
        self.active = Some(button);
        let mut effects = vec![Effect::SetActiveButton { index: button }];
        effects.extend(gallery.apply(filter));
        effects
    }
}

// ============================================================================
// Lightbox
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxState {
    Closed,
    /// `index` is a position in the visible item set, not an item index.
    Open { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Prev,
    Next,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => Key::Other,
        }
    }

    fn nav(self) -> Option<Nav> {
        match self {
            Key::Escape => Some(Nav::Close),
            Key::ArrowLeft => Some(Nav::Prev),
            Key::ArrowRight => Some(Nav::Next),
            Key::Other => None,
        }
    }
}

/// Step `index` by `delta` around a ring of `len` positions.
pub fn wrap_index(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + delta).rem_euclid(len as isize) as usize
}

/// Pure lightbox transition over `visible` positions.
pub fn transition(state: LightboxState, nav: Nav, visible: usize) -> LightboxState {
    match (state, nav) {
        (LightboxState::Closed, _) => LightboxState::Closed,
        (LightboxState::Open { .. }, Nav::Close) => LightboxState::Closed,
        (LightboxState::Open { index }, Nav::Prev) => LightboxState::Open {
            index: wrap_index(index, -1, visible),
        },
        (LightboxState::Open { index }, Nav::Next) => LightboxState::Open {
            index: wrap_index(index, 1, visible),
        },
    }
}

/// Direction of a completed touch, if it travelled far enough.
pub fn swipe(start_x: f64, end_x: f64) -> Option<Nav> {
    let diff = start_x - end_x;
    if diff.abs() <= SWIPE_THRESHOLD {
        None
    } else if diff > 0.0 {
        Some(Nav::Next)
    } else {
        Some(Nav::Prev)
    }
}

/// Lightbox controller: state plus the visible-item snapshot taken at open.
#[derive(Debug, Clone)]
pub struct Lightbox {
    state: LightboxState,
    visible: Vec<usize>,
    touch_start_x: f64,
}

impl Default for Lightbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lightbox {
    pub fn new() -> Self {
        Self {
            state: LightboxState::Closed,
            visible: Vec::new(),
            touch_start_x: 0.0,
        }
    }

    pub fn state(&self) -> LightboxState {
        self.state
    }

    /// Item index currently displayed, if open.
    pub fn current_item(&self) -> Option<usize> {
        match self.state {
            LightboxState::Open { index } => self.visible.get(index).copied(),
            LightboxState::Closed => None,
        }
    }

    /// Open on `item`. Ignored if the item is hidden.
    pub fn open(&mut self, item: usize, gallery: &Gallery) -> Vec<Effect> {
        self.visible = gallery.visible();
        let Some(index) = self.visible.iter().position(|&i| i == item) else {
            return Vec::new();
        };
        self.state = LightboxState::Open { index };
        let shown = &gallery.items()[item];
        vec![
            Effect::ShowImage {
                src: shown.src.clone(),
                alt: shown.alt.clone(),
            },
            Effect::OpenOverlay,
            Effect::LockScroll,
        ]
    }

    pub fn navigate(&mut self, nav: Nav, gallery: &Gallery) -> Vec<Effect> {
        let before = self.state;
        self.state = transition(before, nav, self.visible.len());
        match (before, self.state) {
            (LightboxState::Open { .. }, LightboxState::Closed) => {
                vec![Effect::CloseOverlay, Effect::UnlockScroll]
            }
            (LightboxState::Open { .. }, LightboxState::Open { index }) => {
                let item = &gallery.items()[self.visible[index]];
                vec![
                    Effect::FadeOut,
                    Effect::SwapImageAfter {
                        delay: FADE_DELAY,
                        src: item.src.clone(),
                        alt: item.alt.clone(),
                    },
                ]
            }
            _ => Vec::new(),
        }
    }

    pub fn key(&mut self, key: Key, gallery: &Gallery) -> Vec<Effect> {
        if self.state == LightboxState::Closed {
            return Vec::new();
        }
        match key.nav() {
            Some(nav) => self.navigate(nav, gallery),
            None => Vec::new(),
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.touch_start_x = x;
    }

    pub fn touch_end(&mut self, x: f64, gallery: &Gallery) -> Vec<Effect> {
        match swipe(self.touch_start_x, x) {
            Some(nav) => self.navigate(nav, gallery),
            None => Vec::new(),
        }
    }
}

// ============================================================================
// Page controller
// ============================================================================

/// What the host found in the document when the page loaded.
#[derive(Debug, Clone, Default)]
pub struct GalleryMarkup {
    /// `data-filter` of each `.filter-btn`, in document order.
    pub filter_buttons: Vec<String>,
    pub items: Vec<GalleryItem>,
    /// Whether `#lightbox` exists.
    pub has_lightbox: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GalleryInput {
    FilterClicked(usize),
    ItemClicked(usize),
    CloseClicked,
    PrevClicked,
    NextClicked,
    /// Click whose target is the overlay itself, not one of its children.
    BackdropClicked,
    Key(Key),
    TouchStart { x: f64 },
    TouchEnd { x: f64 },
}

/// DOM changes for the host to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetActiveButton { index: usize },
    ShowItem { index: usize },
    HideItem { index: usize },
    ShowImage { src: String, alt: String },
    OpenOverlay,
    CloseOverlay,
    LockScroll,
    UnlockScroll,
    FadeOut,
    /// Swap the lightbox image after `delay`, then fade back in.
    SwapImageAfter {
        delay: Duration,
        src: String,
        alt: String,
    },
}

/// All gallery state for one page load.
#[derive(Debug, Clone)]
pub struct GalleryPage {
    gallery: Gallery,
    filters: Option<FilterBar>,
    lightbox: Option<Lightbox>,
}

impl GalleryPage {
    pub fn init(markup: GalleryMarkup) -> Self {
        let has_items = !markup.items.is_empty();
        let filters = (has_items && !markup.filter_buttons.is_empty()).then(|| {
            FilterBar::new(markup.filter_buttons.iter().map(|f| Filter::parse(f)).collect())
        });
        let lightbox = (has_items && markup.has_lightbox).then(Lightbox::new);
        Self {
            gallery: Gallery::new(markup.items),
            filters,
            lightbox,
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn filters(&self) -> Option<&FilterBar> {
        self.filters.as_ref()
    }

    pub fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    pub fn handle(&mut self, input: GalleryInput) -> Vec<Effect> {
        if let GalleryInput::FilterClicked(button) = input {
            return match &mut self.filters {
                Some(bar) => bar.activate(button, &mut self.gallery),
                None => Vec::new(),
            };
        }

        let Some(lightbox) = &mut self.lightbox else {
            return Vec::new();
        };
        let gallery = &self.gallery;
        match input {
            GalleryInput::ItemClicked(item) => lightbox.open(item, gallery),
            GalleryInput::CloseClicked | GalleryInput::BackdropClicked => {
                lightbox.navigate(Nav::Close, gallery)
            }
            GalleryInput::PrevClicked => lightbox.navigate(Nav::Prev, gallery),
            GalleryInput::NextClicked => lightbox.navigate(Nav::Next, gallery),
            GalleryInput::Key(key) => lightbox.key(key, gallery),
            GalleryInput::TouchStart { x } => {
                lightbox.touch_start(x);
                Vec::new()
            }
            GalleryInput::TouchEnd { x } => lightbox.touch_end(x, gallery),
            GalleryInput::FilterClicked(_) => Vec::new(),
        }
    }
}
