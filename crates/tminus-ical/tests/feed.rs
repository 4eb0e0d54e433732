//! End-to-end feed parsing: document text through segment, extract and resolve.

mod fixtures;

use chrono::{DateTime, TimeZone, Utc};
use tminus_ical::error::IcalError;
use tminus_ical::ical::{
    Category, CategoryPolicy, DiagnosticKind, FloatingTimePolicy, ParseOptions, parse_feed,
    parse_feeds,
};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

fn options() -> ParseOptions {
    ParseOptions::new(
        CategoryPolicy::Fixed(Category::Main),
        FloatingTimePolicy::Utc,
    )
}

#[test_log::test]
fn google_feed() {
    let outcome = parse_feed(fixtures::GOOGLE_FEED, &options());
    assert!(outcome.diagnostics.is_empty(), "{}", outcome.diagnostics);
    assert_eq!(outcome.events.len(), 2);

    let launch = &outcome.events[0];
    assert_eq!(launch.title, "Orbital launch, attempt 2");
    assert_eq!(
        launch.description,
        "Static fire complete.\nWeather 80% go. Range opens at T-4h and closes at T+2h."
    );
    assert_eq!(launch.location, "LC-39A; Kennedy Space Center");
    assert_eq!(launch.start, Some(utc(2026, 1, 23, 14, 0, 0)));
    assert_eq!(launch.end, Some(utc(2026, 1, 23, 15, 0, 0)));

    let review = &outcome.events[1];
    assert_eq!(review.start, Some(utc(2026, 2, 1, 0, 0, 0)));
    assert_eq!(review.end, Some(utc(2026, 2, 2, 0, 0, 0)));
}

#[test_log::test]
fn outlook_feed_uses_fixed_standard_offset() {
    let outcome = parse_feed(fixtures::OUTLOOK_FEED, &options());
    assert!(outcome.diagnostics.is_empty(), "{}", outcome.diagnostics);
    assert_eq!(outcome.events.len(), 1);

    let meeting = &outcome.events[0];
    assert_eq!(meeting.title, "Board meeting");
    // July is EDT in New York, but the alias resolves with the standard UTC-5.
    assert_eq!(meeting.start, Some(utc(2026, 7, 15, 15, 0, 0)));
    assert_eq!(meeting.end, Some(utc(2026, 7, 15, 16, 30, 0)));
    // The alarm's DESCRIPTION belongs to the VALARM, not the event.
    assert_eq!(meeting.description, "");
}

#[test]
fn category_read_from_feed() {
    let opts = ParseOptions::new(
        CategoryPolicy::FromFeed {
            fallback: Category::Secondary,
        },
        FloatingTimePolicy::Utc,
    );
    let outcome = parse_feed(fixtures::AIRBNB_FEED, &opts);

    let categories: Vec<_> = outcome.events.iter().map(|e| e.category).collect();
    assert_eq!(categories, [Category::Main, Category::Secondary]);
}

#[test_log::test]
fn unknown_zone_degrades_without_failing() {
    let outcome = parse_feed(fixtures::UNKNOWN_ZONE_FEED, &options());

    assert_eq!(outcome.events.len(), 1);
    let event = &outcome.events[0];
    assert_eq!(event.start, Some(utc(2026, 1, 23, 12, 0, 0)));
    assert_eq!(event.end, Some(utc(2026, 1, 23, 13, 0, 0)));

    assert_eq!(outcome.diagnostics.count(DiagnosticKind::UnknownTimezone), 2);
    assert_eq!(
        outcome.diagnostics.unknown_zones().iter().collect::<Vec<_>>(),
        ["Mars Coordinated Time"]
    );
}

#[test]
fn strict_mode_rejects_unknown_zone() {
    let result = parse_feed(fixtures::UNKNOWN_ZONE_FEED, &options()).into_strict();
    let Err(IcalError::Diagnostics(diagnostics)) = result else {
        panic!("expected diagnostics error");
    };
    assert!(diagnostics.unknown_zones().contains("Mars Coordinated Time"));

    let events = parse_feed(fixtures::GOOGLE_FEED, &options())
        .into_strict()
        .unwrap();
    assert_eq!(events.len(), 2);
}

#[test]
fn no_markers_is_empty_not_error() {
    for input in ["", "just some text\r\n", fixtures::EMPTY_CALENDAR] {
        let outcome = parse_feed(input, &options());
        assert!(outcome.events.is_empty());
        assert!(outcome.diagnostics.is_empty());
    }
}

#[test]
fn round_trip_reproduces_fields() {
    let input = fixtures::single_event(
        "Launch\\, day 1",
        "Line one\\nLine two",
        "Pad\\; North",
        "20260123T140000Z",
        "20260124",
    );
    let event = &parse_feed(&input, &options()).events[0];

    assert_eq!(event.title, "Launch, day 1");
    assert_eq!(event.description, "Line one\nLine two");
    assert_eq!(event.location, "Pad; North");
    assert_eq!(event.start, Some(utc(2026, 1, 23, 14, 0, 0)));
    assert_eq!(event.end, Some(utc(2026, 1, 24, 0, 0, 0)));
    assert_eq!(event.category, Category::Main);
}

#[test]
fn parsing_is_idempotent() {
    for input in [
        fixtures::GOOGLE_FEED,
        fixtures::OUTLOOK_FEED,
        fixtures::UNKNOWN_ZONE_FEED,
    ] {
        let first = parse_feed(input, &options());
        let second = parse_feed(input, &options());
        assert_eq!(first.events, second.events);
        assert_eq!(first.diagnostics, second.diagnostics);
    }
}

#[test]
fn folded_value_matches_unfolded() {
    let unfolded = fixtures::single_event(
        "A fairly long event title",
        "",
        "",
        "20260123T140000Z",
        "20260123T150000Z",
    );
    let folded = unfolded
        .replace("SUMMARY:A fairly long", "SUMMARY:A fair\r\n ly long")
        .replace("DTSTART:20260123", "DTSTART:2026\r\n\t0123");

    assert_eq!(
        parse_feed(&folded, &options()).events,
        parse_feed(&unfolded, &options()).events
    );
}

#[test]
fn line_ending_styles_are_equivalent() {
    let crlf = fixtures::GOOGLE_FEED;
    let lf = crlf.replace("\r\n", "\n");
    let cr = crlf.replace("\r\n", "\r");

    let expected = parse_feed(crlf, &options()).events;
    assert_eq!(parse_feed(&lf, &options()).events, expected);
    assert_eq!(parse_feed(&cr, &options()).events, expected);
}

#[test]
fn floating_time_follows_policy() {
    let input = fixtures::single_event("x", "", "", "20260715T100000", "20260715T110000");

    let as_utc = parse_feed(&input, &options());
    assert_eq!(as_utc.events[0].start, Some(utc(2026, 7, 15, 10, 0, 0)));

    let rome = FloatingTimePolicy::from_setting("Europe/Rome").unwrap();
    let as_rome = parse_feed(
        &input,
        &ParseOptions::new(CategoryPolicy::default(), rome),
    );
    assert_eq!(as_rome.events[0].start, Some(utc(2026, 7, 15, 8, 0, 0)));
    assert_eq!(as_rome.events[0].category, Category::Secondary);
}

#[test]
fn multiple_feeds_merge_in_order() {
    let outcome = parse_feeds(
        [
            (
                fixtures::GOOGLE_FEED,
                CategoryPolicy::Fixed(Category::Main),
            ),
            (
                fixtures::OUTLOOK_FEED,
                CategoryPolicy::Fixed(Category::Tertiary),
            ),
        ],
        FloatingTimePolicy::Utc,
    );

    let summary: Vec<_> = outcome
        .events
        .iter()
        .map(|e| (e.title.as_str(), e.category))
        .collect();
    assert_eq!(
        summary,
        [
            ("Orbital launch, attempt 2", Category::Main),
            ("Review day", Category::Main),
            ("Board meeting", Category::Tertiary),
        ]
    );
}
