//! Console Logger
//!
//! `log` backend for WASM frontends. Each record becomes one line on the
//! browser console, routed to the console method matching its level.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use wasm_bindgen::JsValue;

/// Logger writing to `window.console`
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string(), now_hms());
        let value = JsValue::from_str(&line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&value),
            Level::Warn => web_sys::console::warn_1(&value),
            Level::Info => web_sys::console::info_1(&value),
            Level::Debug => web_sys::console::log_1(&value),
            Level::Trace => web_sys::console::debug_1(&value),
        }
    }

    fn flush(&self) {}
}

/// Format one console line: `HH:MM:SS.mmm LEVEL [target] message`
pub fn format_line(level: Level, target: &str, message: &str, time: Option<String>) -> String {
    match time {
        Some(t) => format!("{} {:<5} [{}] {}", t, level, target, message),
        None => format!("{:<5} [{}] {}", level, target, message),
    }
}

/// Parse a level name, falling back to `Info` for anything unknown
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

#[cfg(target_arch = "wasm32")]
fn now_hms() -> Option<String> {
    let d = js_sys::Date::new_0();
    Some(format!(
        "{:02}:{:02}:{:02}.{:03}",
        d.get_hours(),
        d.get_minutes(),
        d.get_seconds(),
        d.get_milliseconds()
    ))
}

#[cfg(not(target_arch = "wasm32"))]
fn now_hms() -> Option<String> {
    None
}

/// Install the console logger as the global `log` backend
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_without_time() {
        let line = format_line(Level::Warn, "office_desk::api", "[API] retry", None);
        assert_eq!(line, "WARN  [office_desk::api] [API] retry");
    }

    #[test]
    fn test_format_with_time() {
        let line = format_line(Level::Error, "app", "boom", Some("09:05:01.007".into()));
        assert_eq!(line, "09:05:01.007 ERROR [app] boom");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = ConsoleLogger::new(LevelFilter::Warn);
        let info = Metadata::builder().level(Level::Info).target("t").build();
        let error = Metadata::builder().level(Level::Error).target("t").build();
        assert!(!logger.enabled(&info));
        assert!(logger.enabled(&error));
    }

    #[test]
    fn test_install_once() {
        assert!(init_logger(LevelFilter::Debug).is_ok());
        assert_eq!(log::max_level(), LevelFilter::Debug);
        assert!(init_logger(LevelFilter::Error).is_err());
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }
}
