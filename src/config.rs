//! Application Configuration
//!
//! Values baked in at compile time from environment variables, with defaults.

use log::LevelFilter;

const DEFAULT_API_BASE: &str = "http://localhost:5000/api";
const DEFAULT_TOAST_MS: u32 = 3000;

/// Page size choices offered by every list page
pub const PAGE_SIZE_OPTIONS: &[usize] = &[5, 10, 25, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// localStorage key for the persisted session
pub const SESSION_STORAGE_KEY: &str = "office-desk.session";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// REST API root, without trailing slash
    pub api_base: String,
    pub log_level: LevelFilter,
    /// How long a toast stays on screen
    pub toast_ms: u32,
    pub default_page_size: usize,
}

impl AppConfig {
    /// Build from `OFFICE_API_BASE`, `OFFICE_LOG_LEVEL` and `OFFICE_TOAST_MS`
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("OFFICE_API_BASE"),
            option_env!("OFFICE_LOG_LEVEL"),
            option_env!("OFFICE_TOAST_MS"),
        )
    }

    pub fn from_values(api_base: Option<&str>, log_level: Option<&str>, toast_ms: Option<&str>) -> Self {
        let api_base = api_base
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();
        Self {
            api_base,
            log_level: log_level.map(console_logger::parse_level).unwrap_or(LevelFilter::Info),
            toast_ms: toast_ms.and_then(|v| v.trim().parse().ok()).unwrap_or(DEFAULT_TOAST_MS),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, "http://localhost:5000/api");
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.toast_ms, 3000);
        assert!(PAGE_SIZE_OPTIONS.contains(&config.default_page_size));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_values(Some("https://office.example.com/api/ "), Some("debug"), Some("oops"));
        assert_eq!(config.api_base, "https://office.example.com/api");
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.toast_ms, 3000);
    }
}
