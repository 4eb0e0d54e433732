use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{CONFIG_FILE, ENV_PREFIX};
use crate::error::{CoreError, CoreResult};
use crate::types::Category;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub feeds: Vec<FeedConfig>,
    pub display: DisplayConfig,
    pub refresh: RefreshConfig,
    pub parser: ParserConfig,
    pub logging: LoggingConfig,
}

/// One calendar feed source.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub name: Option<String>,
    /// `http(s)://` URL, `file://` URL or plain filesystem path.
    pub url: String,
    #[serde(default)]
    pub category: Category,
    /// Read the tier from the feed's `CATEGORIES` property, using `category` as fallback.
    #[serde(default)]
    pub category_from_feed: bool,
}

impl FeedConfig {
    /// ## Summary
    /// Returns the configured display name, or the URL when none is set.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.url)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub main_limit: usize,
    pub secondary_limit: usize,
    pub tertiary_limit: usize,
    pub show_description: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    /// Seconds between feed refetches.
    pub interval_secs: u64,
    /// Seconds between countdown redraws.
    pub tick_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// How zone-less local times are read: `system`, `utc`, or an IANA zone name.
    pub floating_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and `config.toml` into a `Settings`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::build(config::File::with_name(CONFIG_FILE).required(false))
    }

    /// ## Summary
    /// Loads configuration from an explicit TOML file, still layered under the environment.
    ///
    /// ## Errors
    /// Returns an error if the file is missing or the configuration is invalid.
    pub fn load_from(path: &str) -> Result<Self> {
        Self::build(config::File::with_name(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        // .env values become part of the environment layer below
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }

        let settings = Self::defaults()?
            // TOML file
            .add_source(file)
            // Env
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?;

        settings.validate()?;
        tracing::debug!(feeds = settings.feeds.len(), "Settings loaded");
        Ok(settings)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("display.main_limit", 3)?
            .set_default("display.secondary_limit", 3)?
            .set_default("display.tertiary_limit", 1)?
            .set_default("display.show_description", false)?
            .set_default("refresh.interval_secs", 60)?
            .set_default("refresh.tick_secs", 1)?
            .set_default("parser.floating_time", "system")?
            .set_default("logging.level", "info")?)
    }

    /// ## Summary
    /// Checks invariants the deserializer cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` when no feed is configured, a feed URL is
    /// blank, or a refresh period is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.feeds.is_empty() {
            return Err(CoreError::ConfigError(
                "at least one [[feeds]] entry is required".to_string(),
            ));
        }

        if let Some(feed) = self.feeds.iter().find(|f| f.url.trim().is_empty()) {
            return Err(CoreError::ConfigError(format!(
                "feed {:?} has an empty url",
                feed.name
            )));
        }

        if self.refresh.interval_secs == 0 || self.refresh.tick_secs == 0 {
            return Err(CoreError::ConfigError(
                "refresh periods must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env` and `config.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<Settings> {
        let settings = Settings::defaults()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?;
        settings.validate()?;
        Ok(settings)
    }

    #[test_log::test]
    fn defaults_fill_missing_sections() {
        let settings = from_toml(
            r#"
            [[feeds]]
            url = "https://example.com/cal.ics"
            "#,
        )
        .unwrap();

        assert_eq!(settings.display.main_limit, 3);
        assert_eq!(settings.display.secondary_limit, 3);
        assert_eq!(settings.display.tertiary_limit, 1);
        assert!(!settings.display.show_description);
        assert_eq!(settings.refresh.interval_secs, 60);
        assert_eq!(settings.parser.floating_time, "system");
        assert_eq!(settings.feeds[0].category, Category::Secondary);
        assert!(!settings.feeds[0].category_from_feed);
    }

    #[test]
    fn feeds_carry_category() {
        let settings = from_toml(
            r#"
            [[feeds]]
            name = "Launches"
            url = "https://example.com/a.ics"
            category = "main"

            [[feeds]]
            url = "/tmp/b.ics"
            category = "tertiary"
            category_from_feed = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.feeds.len(), 2);
        assert_eq!(settings.feeds[0].category, Category::Main);
        assert_eq!(settings.feeds[0].label(), "Launches");
        assert_eq!(settings.feeds[1].label(), "/tmp/b.ics");
        assert!(settings.feeds[1].category_from_feed);
        assert_eq!(settings.display.tertiary_limit, 1);
    }

    #[test_log::test]
    fn load_from_reads_explicit_file() {
        let path = std::env::temp_dir().join(format!("tminus-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[[feeds]]\nurl = \"/tmp/a.ics\"\ncategory = \"main\"\n\n[display]\nmain_limit = 5\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path.to_string_lossy()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.feeds[0].category, Category::Main);
        assert_eq!(settings.display.main_limit, 5);
        assert_eq!(settings.refresh.tick_secs, 1);
    }

    #[test]
    fn load_from_requires_the_file() {
        assert!(Settings::load_from("/nonexistent/tminus/config.toml").is_err());
    }

    #[test]
    fn rejects_missing_feeds() {
        assert!(from_toml("[display]\nmain_limit = 2\n").is_err());
    }

    #[test]
    fn rejects_zero_refresh() {
        let result = from_toml(
            r#"
            [[feeds]]
            url = "https://example.com/cal.ics"

            [refresh]
            interval_secs = 0
            "#,
        );
        assert!(result.is_err());
    }
}
