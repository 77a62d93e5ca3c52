//! Browser bindings: the data fetch, page navigation, and the reveal observer.

use anyhow::{anyhow, Context};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    window, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Response, ScrollBehavior, ScrollIntoViewOptions,
};

use glovehub_catalog::{CatalogError, CatalogResult, CatalogSource, Navigation};

/// Id of the section the jump shortcuts scroll to.
pub const RANKINGS_SECTION: &str = "rankings-section";

fn js_error(value: JsValue) -> anyhow::Error {
    anyhow!("{:?}", value)
}

/// The data file, fetched with `window.fetch`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl CatalogSource for HttpSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> CatalogResult<String> {
        fetch_text(&self.url)
            .await
            .map_err(|e| CatalogError::transport(format!("{e:#}")))
    }
}

async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = window().context("no window object")?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_error)
        .with_context(|| format!("fetch {url}"))?;
    let response: Response = response.dyn_into().map_err(js_error)?;
    if !response.ok() {
        return Err(anyhow!("HTTP {} for {}", response.status(), url));
    }

    let body = response.text().map_err(js_error)?;
    let text = JsFuture::from(body)
        .await
        .map_err(js_error)
        .context("failed to read response body")?;
    text.as_string().context("response body is not text")
}

/// Carry out a page effect requested by a dispatch.
pub fn navigate(navigation: Navigation) {
    let result = match navigation {
        Navigation::ScrollToRankings => scroll_to(RANKINGS_SECTION),
        Navigation::External(url) => open_external(&url),
    };
    if let Err(e) = result {
        tracing::warn!(error = %format!("{e:#}"), "navigation failed");
    }
}

fn scroll_to(id: &str) -> anyhow::Result<()> {
    let document = window()
        .and_then(|w| w.document())
        .context("no document")?;
    let target = document
        .get_element_by_id(id)
        .with_context(|| format!("no element #{id}"))?;

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    target.scroll_into_view_with_scroll_into_view_options(&options);
    Ok(())
}

fn open_external(url: &str) -> anyhow::Result<()> {
    let window = window().context("no window object")?;
    window
        .open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer")
        .map_err(js_error)
        .with_context(|| format!("open {url}"))?;
    Ok(())
}

type RevealCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// A live reveal observer. Dropping it disconnects the observer and releases
/// the callback.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: RevealCallback,
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Call `on_visible` once, the first time `target` scrolls into view.
///
/// The observer stays registered only as long as the returned handle lives.
pub fn observe_reveal(
    target: &Element,
    threshold: f64,
    on_visible: impl Fn() + 'static,
) -> anyhow::Result<RevealObserver> {
    let callback = RevealCallback::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let visible = entries.iter().any(|entry| {
                entry
                    .dyn_into::<IntersectionObserverEntry>()
                    .map(|e| e.is_intersecting())
                    .unwrap_or(false)
            });
            if visible {
                observer.disconnect();
                on_visible();
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(js_error)
            .context("failed to create IntersectionObserver")?;
    observer.observe(target);

    Ok(RevealObserver {
        observer,
        _callback: callback,
    })
}
