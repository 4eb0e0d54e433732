use super::*;
use tminus_ical::ical::Category;

fn feed(category: Category, from_feed: bool) -> FeedConfig {
    FeedConfig {
        name: Some("work".to_string()),
        url: "https://example.com/work.ics".to_string(),
        category,
        category_from_feed: from_feed,
    }
}

fn parser(floating_time: &str) -> ParserConfig {
    ParserConfig {
        floating_time: floating_time.to_string(),
    }
}

#[test]
fn fixed_category_by_default() {
    assert_eq!(
        category_policy(&feed(Category::Main, false)),
        CategoryPolicy::Fixed(Category::Main)
    );
}

#[test]
fn category_from_feed_keeps_fallback() {
    assert_eq!(
        category_policy(&feed(Category::Tertiary, true)),
        CategoryPolicy::FromFeed {
            fallback: Category::Tertiary
        }
    );
}

#[test]
fn floating_policy_names() {
    assert_eq!(
        floating_policy(&parser("system")).unwrap(),
        FloatingTimePolicy::SystemLocal
    );
    assert_eq!(
        floating_policy(&parser("utc")).unwrap(),
        FloatingTimePolicy::Utc
    );
    assert!(matches!(
        floating_policy(&parser("W. Europe Standard Time")).unwrap(),
        FloatingTimePolicy::Zone(_)
    ));
}

#[test]
fn floating_policy_rejects_unknown_zone() {
    let err = floating_policy(&parser("Atlantis/Capital")).unwrap_err();
    assert!(err.to_string().contains("Atlantis/Capital"));
}

#[test]
fn parse_options_combine_feed_and_parser() {
    let options = parse_options(&feed(Category::Main, false), FloatingTimePolicy::Utc);
    assert_eq!(options.category, CategoryPolicy::Fixed(Category::Main));
    assert_eq!(options.floating, FloatingTimePolicy::Utc);
}
