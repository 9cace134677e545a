//! Application constants and configuration

pub const APP_NAME: &str = "TinyLink";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const WINDOW_TITLE: &str = "TinyLink - URL Shortener";

/// Used when settings.json has no base URL and no override is set
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Session override for the API base URL (not persisted)
pub const API_URL_ENV: &str = "TINYLINK_API_URL";

pub const LINKS_PATH: &str = "/api/links";
