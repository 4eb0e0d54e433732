/// Title given to events whose feed carries no usable `SUMMARY`.
pub const DEFAULT_EVENT_TITLE: &str = "Untitled";

pub const APP_NAME: &str = "tminus";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const USER_AGENT: &str = const_str::concat!(APP_NAME, "/", APP_VERSION);

/// Prefix for environment variables read by the configuration loader.
pub const ENV_PREFIX: &str = "TMINUS";
pub const CONFIG_FILE: &str = "config.toml";
