//! Browser configuration.
//!
//! Static, embedded at build time. Every field has a default, so an empty
//! JSON object is a valid configuration.

use serde::{Deserialize, Serialize};

use glovehub_core::CatalogResult;

use crate::i18n::Lang;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Location of the product data file, relative to the page.
    pub data_url: String,
    /// Reveal animation delay added per card position.
    pub stagger_step_ms: u32,
    /// Fraction of a card that must be visible before it is revealed.
    pub reveal_threshold: f64,
    pub default_language: Lang,
    /// Category select options. `None` derives them from the catalog.
    pub category_options: Option<Vec<String>>,
    /// Tag pills. `None` derives them from the catalog.
    pub tag_options: Option<Vec<String>>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            data_url: "data.json".to_string(),
            stagger_step_ms: 50,
            reveal_threshold: 0.1,
            default_language: Lang::En,
            category_options: None,
            tag_options: None,
        }
    }
}

impl BrowserConfig {
    pub fn from_json(payload: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Delay before the card at `index` animates in.
    pub fn reveal_delay_ms(&self, index: usize) -> u32 {
        u32::try_from(index)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.stagger_step_ms)
    }
}
