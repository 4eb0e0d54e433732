//! Dashboard state: the events from the last refresh and the feeds that failed.

use chrono::{DateTime, Utc};
use tminus_ical::ical::{Diagnostics, Event, FloatingTimePolicy, ParseOutcome, parse_feed};
use tminus_service::{Agenda, DisplayLimits};

use crate::config::{Settings, display_limits, floating_policy, parse_options};
use crate::error::AppResult;
use crate::fetch::{FeedFetcher, FetchedFeed};

/// A feed that could not be retrieved on the last refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFailure {
    pub feed: String,
    pub message: String,
}

#[derive(Debug)]
pub struct Dashboard {
    settings: Settings,
    floating: FloatingTimePolicy,
    limits: DisplayLimits,
    events: Vec<Event>,
    diagnostics: Diagnostics,
    failures: Vec<FeedFailure>,
}

impl Dashboard {
    /// ## Summary
    /// Creates an empty dashboard for the given settings.
    ///
    /// ## Errors
    /// Returns an error if the parser settings name an unknown zone.
    pub fn new(settings: Settings) -> AppResult<Self> {
        let floating = floating_policy(&settings.parser)?;
        let limits = display_limits(&settings);
        Ok(Self {
            settings,
            floating,
            limits,
            events: Vec::new(),
            diagnostics: Diagnostics::new(),
            failures: Vec::new(),
        })
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// ## Summary
    /// Fetches every configured feed and replaces the current events.
    pub async fn refresh(&mut self, fetcher: &FeedFetcher) {
        let fetched = fetcher.fetch_all(&self.settings.feeds).await;
        self.ingest(fetched);
    }

    /// ## Summary
    /// Parses fetched documents in configuration order, replacing the
    /// previous refresh's events, diagnostics and failures.
    pub fn ingest(&mut self, fetched: Vec<FetchedFeed>) {
        let mut outcome = ParseOutcome::default();
        self.failures.clear();

        for FetchedFeed { feed, body } in fetched {
            match body {
                Ok(text) => {
                    let parsed = parse_feed(&text, &parse_options(&feed, self.floating));
                    tracing::info!(
                        feed = feed.label(),
                        events = parsed.events.len(),
                        diagnostics = parsed.diagnostics.len(),
                        "Parsed feed"
                    );
                    outcome.merge(parsed);
                }
                Err(e) => self.failures.push(FeedFailure {
                    feed: feed.label().to_string(),
                    message: e.to_string(),
                }),
            }
        }

        if !outcome.diagnostics.unknown_zones().is_empty() {
            tracing::warn!(
                zones = ?outcome.diagnostics.unknown_zones(),
                "Unrecognized timezones in feeds"
            );
        }

        self.events = outcome.events;
        self.diagnostics = outcome.diagnostics;
    }

    /// ## Summary
    /// Selects the events to display at `now`.
    #[must_use]
    pub fn agenda(&self, now: DateTime<Utc>) -> Agenda {
        Agenda::build(self.events.iter().cloned(), now, &self.limits)
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub fn failures(&self) -> &[FeedFailure] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DisplayConfig, FeedConfig, LoggingConfig, ParserConfig, RefreshConfig};
    use crate::error::AppError;
    use chrono::TimeZone;
    use tminus_ical::ical::Category;

    fn feed(name: &str, category: Category) -> FeedConfig {
        FeedConfig {
            name: Some(name.to_string()),
            url: format!("https://example.com/{name}.ics"),
            category,
            category_from_feed: false,
        }
    }

    fn settings() -> Settings {
        Settings {
            feeds: vec![feed("launches", Category::Main), feed("chores", Category::Tertiary)],
            display: DisplayConfig {
                main_limit: 2,
                secondary_limit: 3,
                tertiary_limit: 1,
                show_description: false,
            },
            refresh: RefreshConfig {
                interval_secs: 60,
                tick_secs: 1,
            },
            parser: ParserConfig {
                floating_time: "utc".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    fn document(events: &[(&str, &str, &str)]) -> String {
        let mut doc = String::from("BEGIN:VCALENDAR\r\n");
        for (summary, start, end) in events {
            doc.push_str(&format!(
                "BEGIN:VEVENT\r\nSUMMARY:{summary}\r\nDTSTART:{start}\r\nDTEND:{end}\r\nEND:VEVENT\r\n"
            ));
        }
        doc.push_str("END:VCALENDAR\r\n");
        doc
    }

    #[test_log::test]
    fn ingest_merges_feeds_and_records_failures() {
        let mut dashboard = Dashboard::new(settings()).unwrap();
        dashboard.ingest(vec![
            FetchedFeed {
                feed: feed("launches", Category::Main),
                body: Ok(document(&[
                    ("Old", "20260101T100000Z", "20260101T110000Z"),
                    ("Launch", "20260123T140000Z", "20260123T150000Z"),
                ])),
            },
            FetchedFeed {
                feed: feed("chores", Category::Tertiary),
                body: Err(AppError::ReadError {
                    path: "chores.ics".to_string(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                }),
            },
        ]);

        assert_eq!(dashboard.events().len(), 2);
        assert_eq!(dashboard.failures().len(), 1);
        assert_eq!(dashboard.failures()[0].feed, "chores");
        assert!(dashboard.diagnostics().is_empty());

        let now = Utc.with_ymd_and_hms(2026, 1, 23, 12, 0, 0).unwrap();
        let agenda = dashboard.agenda(now);
        let main: Vec<_> = agenda
            .events(Category::Main)
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(main, ["Launch"]);
        assert_eq!(agenda.placeholders(Category::Main), 1);
        assert_eq!(agenda.placeholders(Category::Tertiary), 1);
    }

    #[test]
    fn ingest_replaces_previous_refresh() {
        let mut dashboard = Dashboard::new(settings()).unwrap();
        let fetched = || {
            vec![FetchedFeed {
                feed: feed("launches", Category::Main),
                body: Ok(document(&[("Launch", "20260123T140000Z", "20260123T150000Z")])),
            }]
        };
        dashboard.ingest(fetched());
        dashboard.ingest(fetched());
        assert_eq!(dashboard.events().len(), 1);
    }

    #[test]
    fn rejects_unknown_floating_zone() {
        let mut settings = settings();
        settings.parser.floating_time = "Atlantis/Capital".to_string();
        assert!(Dashboard::new(settings).is_err());
    }
}
