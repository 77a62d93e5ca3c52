//! Catalog browser domain (filter-and-render loop).
//!
//! This crate holds everything the browser needs apart from the page itself:
//! the immutable product catalog, the session filter state, the bilingual
//! label table, and the view synchronizer that projects both onto a
//! [`DisplaySurface`]. No DOM types appear here, so the whole loop runs in
//! plain unit tests.

pub mod action;
pub mod config;
pub mod filter;
pub mod i18n;
pub mod product;
pub mod store;
pub mod view;

pub use action::{CardTrigger, Key, Navigation, UserAction};
pub use config::BrowserConfig;
pub use filter::FilterState;
pub use i18n::{t, Label, Lang};
pub use product::{Catalog, Product};
pub use store::{CatalogSource, CatalogStore, StaticSource};
#[cfg(not(target_arch = "wasm32"))]
pub use store::FileSource;
pub use view::{
    CardView, CategoryOption, ControlState, DetailsView, DisplaySurface, Frame, Labels,
    ListRegion, MemorySurface, TagOption, ViewSynchronizer,
};

pub use glovehub_core::{CatalogError, CatalogResult, ProductId};
