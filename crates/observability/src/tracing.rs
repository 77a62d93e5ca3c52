//! Tracing/logging initialization.
//!
//! Natively: JSON lines on stdout, filtered by `RUST_LOG` (default `info`).
//! In the browser: the same JSON lines written to the devtools console,
//! without timestamps (the console stamps them, and `wasm32` has no clock
//! behind `SystemTime`).

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Initialize tracing/logging for the page.
///
/// Safe to call multiple times (subsequent calls are no-ops).
#[cfg(target_arch = "wasm32")]
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(DEFAULT_FILTER))
        .json()
        .without_time()
        .with_target(false)
        .with_ansi(false)
        .with_writer(console::ConsoleWriter::default)
        .try_init();
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io::{self, Write};

    /// Buffers one formatted event and hands it to `console.log` on drop.
    #[derive(Default)]
    pub struct ConsoleWriter {
        buf: Vec<u8>,
    }

    impl Write for ConsoleWriter {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.buf);
            let line = line.trim_end();
            if !line.is_empty() {
                web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
            }
        }
    }
}
