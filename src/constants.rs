//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the Metadict REST API
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application name
pub const APP_NAME: &str = "Metadict TUI";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory (below the home directory) holding settings and logs
pub const CONFIG_DIR_NAME: &str = ".metadict";

/// Settings file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Log file name
pub const LOG_FILE_NAME: &str = "metadict-tui.log";

/// URL parameter carrying the initial query
pub const PARAM_QUERY_STRING: &str = "queryString";

/// URL parameter carrying comma-separated dictionary keys
pub const PARAM_DICTIONARIES: &str = "dictionaries";

/// Status value of a successful API response
pub const STATUS_OK: &str = "OK";

/// How long a transient notification stays visible
pub const TOAST_DURATION_MS: u64 = 4000;

// User-facing messages
pub const MSG_INTERNAL_ERROR: &str = "Internal system error";
pub const MSG_ILLEGAL_STRUCTURE: &str = "Illegal data structure";
pub const MSG_QUERY_FAILED: &str = "The last query failed: ";
pub const MSG_NO_QUERY: &str = "No query entered";
pub const MSG_NO_DICTIONARIES: &str = "No dictionaries selected";
