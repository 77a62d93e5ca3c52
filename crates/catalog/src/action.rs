//! Command handlers: named user actions mapped onto state mutations.
//!
//! The page translates raw events (clicks, key presses, intersection
//! callbacks) into a [`UserAction`] and hands it to
//! [`ViewSynchronizer::dispatch`]. Each dispatch mutates, then renders exactly
//! once, so the controls, list, count and labels can never drift apart.

use tracing::debug;

use glovehub_core::ProductId;

use crate::i18n::Lang;
use crate::view::{DisplaySurface, ViewSynchronizer};

/// Which affordance on a card was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTrigger {
    /// The "View Details" button.
    Details,
    /// The card image.
    Image,
    /// The "Where to Buy" link.
    Purchase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Page-level effect the shell must carry out after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Bring the rankings section into view.
    ScrollToRankings,
    /// Follow an outbound link.
    External(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Category select changed. Empty clears the category.
    SelectCategory(String),
    ToggleTag(String),
    ClearTags,
    SetLanguage(Lang),
    ToggleLanguage,
    /// Navigation shortcut: fresh filter on one category.
    JumpToCategory(String),
    ActivateCard {
        product: ProductId,
        trigger: CardTrigger,
    },
    /// Close button or backdrop click.
    CloseDetails,
    KeyPressed(Key),
    /// The visibility observer reports a card on screen.
    CardVisible(ProductId),
}

impl ViewSynchronizer {
    /// Apply `action`, render once, and report any page effect.
    pub fn dispatch<S>(&mut self, action: UserAction, surface: &mut S) -> Option<Navigation>
    where
        S: DisplaySurface + ?Sized,
    {
        debug!(?action, "dispatch");
        let navigation = self.apply(action);
        self.render(surface);
        navigation
    }

    fn apply(&mut self, action: UserAction) -> Option<Navigation> {
        match action {
            UserAction::SelectCategory(value) => {
                self.filter.set_category(value);
                None
            }
            UserAction::ToggleTag(tag) => {
                self.filter.toggle_tag(tag);
                None
            }
            UserAction::ClearTags => {
                self.filter.clear_tags();
                None
            }
            UserAction::SetLanguage(lang) => {
                self.filter.set_language(lang);
                None
            }
            UserAction::ToggleLanguage => {
                self.filter.toggle_language();
                None
            }
            UserAction::JumpToCategory(value) => {
                self.filter.apply_category_shortcut(value);
                Some(Navigation::ScrollToRankings)
            }
            UserAction::ActivateCard { product, trigger } => {
                if !self.open_details(product) {
                    return None;
                }
                match trigger {
                    CardTrigger::Details | CardTrigger::Image => None,
                    CardTrigger::Purchase => self
                        .catalog()
                        .get(product)
                        .map(|p| Navigation::External(p.buy_link.clone())),
                }
            }
            UserAction::CloseDetails => {
                self.close_details();
                None
            }
            UserAction::KeyPressed(Key::Escape) => {
                self.close_details();
                None
            }
            UserAction::KeyPressed(Key::Other(_)) => None,
            UserAction::CardVisible(product) => {
                self.mark_revealed(product);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrowserConfig;
    use crate::product::Catalog;
    use crate::view::MemorySurface;

    const GLOVES: &str = r#"[
        {"id": 1, "rank": 1, "title": "Pitcher Pro", "summary": "", "details": "<p>One</p>",
         "image": "1.jpg", "buyLink": "https://shop.example/1",
         "positions": ["Pitcher"], "attributes": ["Closed web"], "tags": ["leather"]},
        {"id": 2, "rank": 2, "title": "Catcher Mitt", "summary": "", "details": "<p>Two</p>",
         "image": "2.jpg", "buyLink": "https://shop.example/2",
         "positions": ["Catcher"], "attributes": [], "tags": ["leather", "youth"]}
    ]"#;

    fn sync() -> ViewSynchronizer {
        ViewSynchronizer::new(Catalog::from_json(GLOVES).unwrap(), BrowserConfig::default())
    }

    #[test]
    fn every_dispatch_renders_once() {
        let mut sync = sync();
        let mut surface = MemorySurface::new();
        sync.dispatch(UserAction::ToggleTag("leather".into()), &mut surface);
        sync.dispatch(UserAction::KeyPressed(Key::Other("a".into())), &mut surface);
        sync.dispatch(UserAction::ToggleLanguage, &mut surface);
        assert_eq!(surface.render_count(), 3);
    }

    #[test]
    fn jump_shortcut_resets_tags_and_scrolls() {
        let mut sync = sync();
        let mut surface = MemorySurface::new();
        sync.dispatch(UserAction::ToggleTag("youth".into()), &mut surface);
        let nav = sync.dispatch(UserAction::JumpToCategory("Pitcher".into()), &mut surface);

        assert_eq!(nav, Some(Navigation::ScrollToRankings));
        let frame = surface.last().unwrap();
        assert_eq!(frame.controls.selected_category(), Some("Pitcher"));
        assert_eq!(frame.controls.active_tags().count(), 0);
        assert_eq!(frame.card_ids(), vec![ProductId::new(1)]);
    }

    #[test]
    fn details_and_image_triggers_open_the_same_view() {
        for trigger in [CardTrigger::Details, CardTrigger::Image] {
            let mut sync = sync();
            let mut surface = MemorySurface::new();
            let nav = sync.dispatch(
                UserAction::ActivateCard { product: ProductId::new(2), trigger },
                &mut surface,
            );
            assert_eq!(nav, None);
            let details = surface.last().unwrap().details.as_ref().unwrap();
            assert_eq!(details.title, "Catcher Mitt");
        }
    }

    #[test]
    fn purchase_trigger_opens_details_and_follows_link() {
        let mut sync = sync();
        let mut surface = MemorySurface::new();
        let nav = sync.dispatch(
            UserAction::ActivateCard {
                product: ProductId::new(1),
                trigger: CardTrigger::Purchase,
            },
            &mut surface,
        );
        assert_eq!(nav, Some(Navigation::External("https://shop.example/1".into())));
        assert_eq!(sync.details_open(), Some(ProductId::new(1)));
    }

    #[test]
    fn unknown_card_is_ignored() {
        let mut sync = sync();
        let mut surface = MemorySurface::new();
        let nav = sync.dispatch(
            UserAction::ActivateCard {
                product: ProductId::new(9),
                trigger: CardTrigger::Purchase,
            },
            &mut surface,
        );
        assert_eq!(nav, None);
        assert!(surface.last().unwrap().details.is_none());
    }

    #[test]
    fn escape_and_close_dismiss_details() {
        let mut sync = sync();
        let mut surface = MemorySurface::new();
        let open = UserAction::ActivateCard {
            product: ProductId::new(1),
            trigger: CardTrigger::Details,
        };

        sync.dispatch(open.clone(), &mut surface);
        sync.dispatch(UserAction::KeyPressed(Key::from_dom("Escape")), &mut surface);
        assert!(surface.last().unwrap().details.is_none());

        sync.dispatch(open, &mut surface);
        sync.dispatch(UserAction::CloseDetails, &mut surface);
        assert!(surface.last().unwrap().details.is_none());
    }

    #[test]
    fn other_keys_leave_details_open() {
        let mut sync = sync();
        let mut surface = MemorySurface::new();
        sync.dispatch(
            UserAction::ActivateCard {
                product: ProductId::new(1),
                trigger: CardTrigger::Details,
            },
            &mut surface,
        );
        sync.dispatch(UserAction::KeyPressed(Key::from_dom("Enter")), &mut surface);
        assert!(surface.last().unwrap().details.is_some());
    }

    #[test]
    fn open_details_relabel_on_language_switch() {
        let mut sync = sync();
        let mut surface = MemorySurface::new();
        sync.dispatch(
            UserAction::ActivateCard {
                product: ProductId::new(1),
                trigger: CardTrigger::Details,
            },
            &mut surface,
        );
        sync.dispatch(UserAction::SetLanguage(Lang::Ja), &mut surface);
        let details = surface.last().unwrap().details.as_ref().unwrap();
        assert_eq!(details.buy_label, "購入する");
        assert_eq!(details.positions_label, "ポジション:");
    }

    #[test]
    fn card_visible_marks_card_revealed() {
        let mut sync = sync();
        let mut surface = MemorySurface::new();
        sync.dispatch(UserAction::CardVisible(ProductId::new(2)), &mut surface);
        let frame = surface.last().unwrap();
        assert!(frame.card(ProductId::new(2)).unwrap().revealed);
        assert!(!frame.card(ProductId::new(1)).unwrap().revealed);
    }

    #[test]
    fn clear_tags_restores_full_list() {
        let mut sync = sync();
        let mut surface = MemorySurface::new();
        sync.dispatch(UserAction::ToggleTag("youth".into()), &mut surface);
        assert_eq!(surface.last().unwrap().item_count, 1);
        sync.dispatch(UserAction::ClearTags, &mut surface);
        assert_eq!(surface.last().unwrap().item_count, 2);
    }
}
