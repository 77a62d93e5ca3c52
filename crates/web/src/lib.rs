//! `glovehub-web`
//!
//! **Responsibility:** the browser shell around the catalog core.
//!
//! This crate provides:
//! - A single-session wrapper that installs the catalog once and serializes
//!   user actions through the view synchronizer
//! - A buffered display surface so a whole frame reaches the page in one
//!   update
//! - The Leptos page (WASM only)
//!
//! The shell owns no filtering logic; it only turns DOM events into
//! `UserAction`s and frames into markup.

pub mod session;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use session::Session;
pub use surface::BufferedSurface;
