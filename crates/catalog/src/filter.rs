use std::collections::BTreeSet;

use crate::i18n::Lang;
use crate::product::Product;

/// Session filter selection plus display language.
///
/// Pure data. Any string is accepted as a category or tag; values that no
/// product carries simply match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    category: String,
    tags: BTreeSet<String>,
    language: Lang,
}

impl FilterState {
    pub fn new(language: Lang) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Active category; empty means unconstrained.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn language(&self) -> Lang {
        self.language
    }

    pub fn is_tag_active(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Replace the category. An empty value clears it.
    pub fn set_category(&mut self, value: impl Into<String>) {
        self.category = value.into();
    }

    /// Add `tag` if absent, remove it if present.
    pub fn toggle_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.remove(&tag) {
            self.tags.insert(tag);
        }
    }

    pub fn clear_tags(&mut self) {
        self.tags.clear();
    }

    pub fn set_language(&mut self, language: Lang) {
        self.language = language;
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggled();
    }

    /// Start a fresh filter on `value`: category set, tags cleared.
    pub fn apply_category_shortcut(&mut self, value: impl Into<String>) {
        self.category = value.into();
        self.tags.clear();
    }

    /// Inclusion rule: category (if any) is one of the product's positions,
    /// and every active tag is on the product.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.category.is_empty() && !product.has_position(&self.category) {
            return false;
        }
        self.tags.iter().all(|tag| product.has_tag(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glovehub_core::ProductId;

    fn glove(positions: &[&str], tags: &[&str]) -> Product {
        Product {
            id: ProductId::new(1),
            rank: 1,
            title: "Glove".to_string(),
            summary: String::new(),
            details: String::new(),
            image: String::new(),
            buy_link: String::new(),
            positions: positions.iter().map(|p| p.to_string()).collect(),
            attributes: Vec::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn starts_unconstrained_in_primary_language() {
        let filter = FilterState::default();
        assert_eq!(filter.category(), "");
        assert!(filter.tags().is_empty());
        assert_eq!(filter.language(), Lang::En);
    }

    #[test]
    fn empty_category_clears_the_constraint() {
        let mut filter = FilterState::default();
        filter.set_category("Pitcher");
        filter.set_category("");
        assert!(filter.matches(&glove(&["Catcher"], &[])));
    }

    #[test]
    fn toggle_tag_adds_then_removes() {
        let mut filter = FilterState::default();
        filter.toggle_tag("leather");
        assert!(filter.is_tag_active("leather"));
        filter.toggle_tag("leather");
        assert!(!filter.is_tag_active("leather"));
    }

    #[test]
    fn shortcut_sets_category_and_clears_tags() {
        let mut filter = FilterState::default();
        filter.toggle_tag("youth");
        filter.toggle_tag("leather");
        filter.apply_category_shortcut("Outfield");
        assert_eq!(filter.category(), "Outfield");
        assert!(filter.tags().is_empty());
    }

    #[test]
    fn language_changes_leave_selection_alone() {
        let mut filter = FilterState::default();
        filter.set_category("Pitcher");
        filter.toggle_tag("leather");
        filter.toggle_language();
        assert_eq!(filter.language(), Lang::Ja);
        filter.set_language(Lang::En);
        assert_eq!(filter.category(), "Pitcher");
        assert!(filter.is_tag_active("leather"));
    }

    #[test]
    fn tags_are_and_combined() {
        let mut filter = FilterState::default();
        filter.toggle_tag("leather");
        filter.toggle_tag("youth");
        assert!(!filter.matches(&glove(&["Pitcher"], &["leather"])));
        assert!(filter.matches(&glove(&["Pitcher"], &["leather", "youth", "pro"])));
    }

    #[test]
    fn unknown_values_match_nothing() {
        let mut filter = FilterState::default();
        filter.set_category("Goalkeeper");
        assert!(!filter.matches(&glove(&["Pitcher"], &[])));

        let mut filter = FilterState::default();
        filter.toggle_tag("no-such-tag");
        assert!(!filter.matches(&glove(&["Pitcher"], &["leather"])));
    }

    #[test]
    fn category_matches_any_listed_position() {
        let mut filter = FilterState::default();
        filter.set_category("First Base");
        assert!(filter.matches(&glove(&["Catcher", "First Base"], &[])));
    }
}
