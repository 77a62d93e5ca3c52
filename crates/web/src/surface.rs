//! Buffered display surface.

use glovehub_catalog::{DisplaySurface, Frame};

/// Holds the most recent frame until the shell commits it.
///
/// The synchronizer renders into this while the session is borrowed; the
/// shell takes the frame afterwards and publishes it in one page update, so
/// reactive effects never observe (or re-enter) a half-finished dispatch.
#[derive(Debug, Default)]
pub struct BufferedSurface {
    pending: Option<Frame>,
}

impl BufferedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Option<Frame> {
        self.pending.take()
    }
}

impl DisplaySurface for BufferedSurface {
    fn present(&mut self, frame: &Frame) {
        self.pending = Some(frame.clone());
    }
}
