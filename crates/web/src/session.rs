//! One browsing session: catalog installed once, actions applied in order.

use std::cell::RefCell;

use tracing::{error, info, warn};

use glovehub_catalog::{
    BrowserConfig, Catalog, Frame, Navigation, UserAction, ViewSynchronizer,
};

use crate::surface::BufferedSurface;

const BUNDLED_CONFIG: &str = include_str!("../config.json");

/// The configuration shipped with the page.
///
/// A broken file is logged and replaced by the defaults.
pub fn bundled_config() -> BrowserConfig {
    BrowserConfig::from_json(BUNDLED_CONFIG).unwrap_or_else(|e| {
        error!(error = %e, "bundled config rejected; using defaults");
        BrowserConfig::default()
    })
}

/// Result of one dispatched action.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub frame: Frame,
    pub navigation: Option<Navigation>,
}

/// Single-threaded session state behind the page.
///
/// Before the catalog arrives there is nothing to render and actions are
/// dropped. After [`Session::install`] the catalog is fixed for the life of
/// the session.
#[derive(Debug)]
pub struct Session {
    config: BrowserConfig,
    sync: RefCell<Option<ViewSynchronizer>>,
}

impl Session {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            sync: RefCell::new(None),
        }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Install the loaded catalog and produce the first frame.
    ///
    /// Returns `None` if a catalog was already installed; the first one wins.
    pub fn install(&self, catalog: Catalog) -> Option<Frame> {
        let mut slot = self.sync.borrow_mut();
        if slot.is_some() {
            warn!("catalog already installed for this session; ignoring reload");
            return None;
        }

        info!(products = catalog.len(), "session ready");
        let sync = ViewSynchronizer::new(catalog, self.config.clone());
        let mut surface = BufferedSurface::new();
        sync.render(&mut surface);
        *slot = Some(sync);
        surface.take()
    }

    /// Apply one action. `None` while the catalog is still loading.
    pub fn dispatch(&self, action: UserAction) -> Option<Update> {
        let mut slot = self.sync.borrow_mut();
        let sync = slot.as_mut()?;
        let mut surface = BufferedSurface::new();
        let navigation = sync.dispatch(action, &mut surface);
        surface.take().map(|frame| Update { frame, navigation })
    }
}
