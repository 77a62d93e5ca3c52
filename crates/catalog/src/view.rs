//! View synchronizer: derive the visible list from catalog + filter, and
//! project everything the page shows onto a [`DisplaySurface`].
//!
//! Every render is a full recompute. A [`Frame`] is a complete description of
//! the page's dynamic regions, so a surface never has to remember anything
//! between frames.

use std::collections::{BTreeMap, HashSet};

use tracing::trace;

use glovehub_core::ProductId;

use crate::config::BrowserConfig;
use crate::filter::FilterState;
use crate::i18n::{t, Label, Lang};
use crate::product::{Catalog, Product};

/// Receiver of rendered frames (the DOM in the browser, a recorder in tests).
pub trait DisplaySurface {
    fn present(&mut self, frame: &Frame);
}

/// One product card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: ProductId,
    pub rank: u32,
    pub title: String,
    pub summary: String,
    pub image: String,
    pub attributes: Vec<String>,
    pub positions_text: String,
    pub buy_link: String,
    pub details_label: &'static str,
    pub buy_label: &'static str,
    pub reveal_delay_ms: u32,
    pub revealed: bool,
}

/// Contents of the card list region.
#[derive(Debug, Clone, PartialEq)]
pub enum ListRegion {
    /// Nothing matched; show a single message instead of cards.
    Empty { message: &'static str },
    Cards(Vec<CardView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    /// Empty for the "all positions" option.
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOption {
    pub tag: String,
    pub active: bool,
}

/// Highlighting for every filter control, derived from [`FilterState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub categories: Vec<CategoryOption>,
    pub tags: Vec<TagOption>,
    pub language: Lang,
}

impl ControlState {
    pub fn selected_category(&self) -> Option<&str> {
        self.categories
            .iter()
            .find(|o| o.selected)
            .map(|o| o.value.as_str())
    }

    pub fn active_tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().filter(|o| o.active).map(|o| o.tag.as_str())
    }
}

/// Contents of the details overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub positions_label: &'static str,
    pub positions_text: String,
    pub attributes: Vec<String>,
    /// Opaque markup from the data file.
    pub details: String,
    pub buy_link: String,
    pub buy_label: &'static str,
}

impl DetailsView {
    fn from_product(product: &Product, lang: Lang) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            image: product.image.clone(),
            positions_label: t(Label::Positions, lang),
            positions_text: product.positions_text(),
            attributes: product.attributes.clone(),
            details: product.details.clone(),
            buy_link: product.buy_link.clone(),
            buy_label: t(Label::WhereToBuy, lang),
        }
    }
}

/// Every bilingual string on the page, resolved for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub lang: Lang,
    text: BTreeMap<Label, &'static str>,
}

impl Labels {
    pub fn for_lang(lang: Lang) -> Self {
        let text = Label::ALL.iter().map(|&l| (l, t(l, lang))).collect();
        Self { lang, text }
    }

    pub fn get(&self, label: Label) -> &'static str {
        self.text.get(&label).copied().unwrap_or_else(|| t(label, self.lang))
    }

    pub fn guide_sections(&self) -> impl Iterator<Item = &'static str> + '_ {
        Label::GUIDE_SECTIONS.iter().map(|&l| self.get(l))
    }
}

/// A complete render of the page's dynamic regions.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub list: ListRegion,
    pub item_count: usize,
    pub count_label: String,
    pub controls: ControlState,
    pub labels: Labels,
    pub details: Option<DetailsView>,
}

impl Frame {
    pub fn cards(&self) -> &[CardView] {
        match &self.list {
            ListRegion::Cards(cards) => cards,
            ListRegion::Empty { .. } => &[],
        }
    }

    pub fn card(&self, id: ProductId) -> Option<&CardView> {
        self.cards().iter().find(|c| c.id == id)
    }

    pub fn card_ids(&self) -> Vec<ProductId> {
        self.cards().iter().map(|c| c.id).collect()
    }
}

/// Surface that keeps every frame it is shown.
#[derive(Debug, Default)]
pub struct MemorySurface {
    frames: Vec<Frame>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn render_count(&self) -> usize {
        self.frames.len()
    }
}

impl DisplaySurface for MemorySurface {
    fn present(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }
}

/// Owns the session state and keeps the page consistent with it.
///
/// The catalog is fixed at construction. Mutations go through
/// [`ViewSynchronizer::dispatch`](crate::action), which always finishes with a
/// render.
#[derive(Debug, Clone)]
pub struct ViewSynchronizer {
    catalog: Catalog,
    pub(crate) filter: FilterState,
    config: BrowserConfig,
    revealed: HashSet<ProductId>,
    details: Option<ProductId>,
}

impl ViewSynchronizer {
    pub fn new(catalog: Catalog, config: BrowserConfig) -> Self {
        let filter = FilterState::new(config.default_language);
        Self {
            catalog,
            filter,
            config,
            revealed: HashSet::new(),
            details: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Products passing the current filter, in catalog order.
    pub fn recompute(&self) -> Vec<&Product> {
        self.catalog
            .products()
            .iter()
            .filter(|p| self.filter.matches(p))
            .collect()
    }

    /// Build the full frame for the current state.
    pub fn compose(&self) -> Frame {
        let lang = self.filter.language();
        let visible = self.recompute();
        let item_count = visible.len();

        let list = if visible.is_empty() {
            ListRegion::Empty {
                message: t(Label::NoMatches, lang),
            }
        } else {
            ListRegion::Cards(
                visible
                    .iter()
                    .enumerate()
                    .map(|(index, product)| self.card(index, product, lang))
                    .collect(),
            )
        };

        let count_label = format!(
            "{} {} {}",
            t(Label::Showing, lang),
            item_count,
            t(Label::Items, lang)
        );

        let details = self
            .details
            .and_then(|id| self.catalog.get(id))
            .map(|p| DetailsView::from_product(p, lang));

        Frame {
            list,
            item_count,
            count_label,
            controls: self.controls(),
            labels: Labels::for_lang(lang),
            details,
        }
    }

    /// Compose and present one frame.
    pub fn render<S: DisplaySurface + ?Sized>(&self, surface: &mut S) {
        let frame = self.compose();
        trace!(items = frame.item_count, lang = frame.labels.lang.code(), "render");
        surface.present(&frame);
    }

    /// Flag a card as revealed. Returns `true` on the first call for `id`.
    ///
    /// Flags are never cleared; a product keeps its revealed state for the
    /// rest of the session even if filtering hides and restores its card.
    pub fn mark_revealed(&mut self, id: ProductId) -> bool {
        if self.catalog.get(id).is_none() {
            return false;
        }
        self.revealed.insert(id)
    }

    pub fn is_revealed(&self, id: ProductId) -> bool {
        self.revealed.contains(&id)
    }

    /// Open the details overlay for `id`. Unknown ids are ignored.
    pub fn open_details(&mut self, id: ProductId) -> bool {
        if self.catalog.get(id).is_some() {
            self.details = Some(id);
            true
        } else {
            false
        }
    }

    pub fn close_details(&mut self) {
        self.details = None;
    }

    pub fn details_open(&self) -> Option<ProductId> {
        self.details
    }

    fn card(&self, index: usize, product: &Product, lang: Lang) -> CardView {
        CardView {
            id: product.id,
            rank: product.rank,
            title: product.title.clone(),
            summary: product.summary.clone(),
            image: product.image.clone(),
            attributes: product.attributes.clone(),
            positions_text: product.positions_text(),
            buy_link: product.buy_link.clone(),
            details_label: t(Label::ViewDetails, lang),
            buy_label: t(Label::WhereToBuy, lang),
            reveal_delay_ms: self.config.reveal_delay_ms(index),
            revealed: self.is_revealed(product.id),
        }
    }

    fn controls(&self) -> ControlState {
        let lang = self.filter.language();

        let mut category_values: Vec<String> = match &self.config.category_options {
            Some(options) => options.clone(),
            None => self.catalog.positions().into_iter().map(str::to_string).collect(),
        };
        let current = self.filter.category();
        if !current.is_empty() && !category_values.iter().any(|v| v == current) {
            category_values.push(current.to_string());
        }

        let mut categories = Vec::with_capacity(category_values.len() + 1);
        categories.push(CategoryOption {
            value: String::new(),
            label: t(Label::AllPositions, lang).to_string(),
            selected: current.is_empty(),
        });
        categories.extend(category_values.into_iter().map(|value| CategoryOption {
            selected: value == current,
            label: value.clone(),
            value,
        }));

        let mut tag_values: Vec<String> = match &self.config.tag_options {
            Some(options) => options.clone(),
            None => self.catalog.tags().into_iter().map(str::to_string).collect(),
        };
        for active in self.filter.tags() {
            if !tag_values.contains(active) {
                tag_values.push(active.clone());
            }
        }
        let tags = tag_values
            .into_iter()
            .map(|tag| TagOption {
                active: self.filter.is_tag_active(&tag),
                tag,
            })
            .collect();

        ControlState {
            categories,
            tags,
            language: lang,
        }
    }
}
