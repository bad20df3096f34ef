//! `log` backend for the browser console.
//!
//! In wasm [`init`] routes records to `console.debug/info/warn/error`. Native embedders install
//! whatever logger they like (`env_logger` in the tests) and [`init`] leaves it alone.

use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};
    use wasm_bindgen::JsValue;
    use web_sys::console;

    pub(super) struct ConsoleLogger;

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
            match record.level() {
                Level::Error => console::error_1(&line),
                Level::Warn => console::warn_1(&line),
                Level::Info => console::info_1(&line),
                Level::Debug | Level::Trace => console::debug_1(&line),
            }
        }

        fn flush(&self) {}
    }
}

/// Parse a level name such as `"info"` or `"debug"`; unknown names mean `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.parse().unwrap_or(LevelFilter::Info)
}

/// Install the console logger. Later calls only adjust the level.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    if log::set_logger(&console::LOGGER).is_err() {
        log::debug!("logger already installed, adjusting level to {level}");
    }
    log::set_max_level(level);
}

/// No-op natively: the embedding application owns the logger and its level.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(_level: LevelFilter) {}
