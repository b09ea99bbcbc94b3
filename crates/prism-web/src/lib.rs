#![cfg_attr(doc, doc = include_str!("../README.md"))]
#![allow(clippy::new_without_default)] // Default trait can’t be used by wasm consumer anyway.

// Silence the unused_crate_dependencies lint.
// This crate is added just to enable additional WASM features.
extern crate time as _;

#[macro_use]
extern crate tracing;

mod bridge;
mod error;
mod gl;
mod host;
mod module;
mod surface;

pub use bridge::{Runtime, RuntimeBuilder};
pub use error::{PrismError, PrismErrorKind};
pub use host::RuntimeHost;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn prism_init(log_level: &str) {
    set_panic_hook();

    if let Ok(level) = log_level.parse::<tracing::Level>() {
        set_logger_once(level);
    }

    debug!("prism is ready");
}

#[wasm_bindgen(js_name = "setupPanicHook")]
pub fn setup_panic_hook() {
    set_panic_hook();
}

pub(crate) fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, panics are forwarded to it and
    // reported with `console.error`, along with a stack trace.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "panic_hook")]
    prism_bootstrap::set_panic_hook_once(console_error_panic_hook::hook);

    #[cfg(not(feature = "panic_hook"))]
    prism_bootstrap::set_panic_hook_once(|_| {});
}

fn set_logger_once(level: tracing::Level) {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::fmt::time::UtcTime;
    use tracing_subscriber::prelude::*;
    use tracing_web::MakeConsoleWriter;

    static INIT: std::sync::Once = std::sync::Once::new();

    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_timer(UtcTime::rfc_3339()) // std::time is not available in browsers
            .with_writer(MakeConsoleWriter);

        let level_filter = LevelFilter::from_level(level);

        tracing_subscriber::registry().with(fmt_layer).with(level_filter).init();
    })
}
