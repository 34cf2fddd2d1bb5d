//! Behavior of the rule grid: loading, fallback and the selection lifecycle.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use forty_rules::model::{PLACEHOLDER_COUNT, Rule, placeholder_text};
use forty_rules::source::{DataUnavailable, RulesSource};
use forty_rules::view::{CollectionView, FallbackPolicy, LoadState, Screen};
use forty_rules_net::NetworkError;

struct FixedSource(Result<Vec<Rule>, DataUnavailable>);

#[async_trait]
impl RulesSource for FixedSource {
    async fn fetch_all_rules(&self) -> Result<Vec<Rule>, DataUnavailable> {
        self.0.clone()
    }
}

fn remote_failure() -> DataUnavailable {
    DataUnavailable::Remote(NetworkError::HttpStatus {
        status: 503,
        message: Some("Service Unavailable".to_string()),
    })
}

fn loaded(count: i64) -> CollectionView {
    let mut view = CollectionView::new(FallbackPolicy::Placeholders);
    view.finish_load(Ok((1..=count).map(|i| Rule::new(i, format!("rule {i}"))).collect()));
    view
}

#[tokio::test]
async fn test_card_order_follows_ascending_id() {
    let rows = vec![
        Rule::new(10, "ten"),
        Rule::new(2, "two"),
        Rule::new(7, "seven"),
        Rule::new(1, "one"),
    ];
    let mut view = CollectionView::new(FallbackPolicy::Placeholders);
    view.load(&FixedSource(Ok(rows))).await;

    let cards = view.cards();
    assert_eq!(cards.len(), 4);
    let ids: Vec<i64> = cards.iter().map(|c| c.rule_id).collect();
    assert_eq!(ids, vec![1, 2, 7, 10]);
    let positions: Vec<usize> = cards.iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);
    assert_eq!(view.state(), LoadState::Ready { error: None });
}

#[tokio::test]
async fn test_failure_substitutes_forty_placeholders() {
    let mut view = CollectionView::new(FallbackPolicy::Placeholders);
    view.load(&FixedSource(Err(remote_failure()))).await;

    let rules = view.rules();
    assert_eq!(rules.len(), PLACEHOLDER_COUNT);
    for (i, rule) in rules.iter().enumerate() {
        assert_eq!(rule.id, i as i64 + 1);
    }
    assert_eq!(rules[6].text(), placeholder_text(7));

    match view.screen() {
        Screen::Grid { warning: Some(message) } => assert!(!message.is_empty()),
        other => panic!("expected grid with warning, got {other:?}"),
    }
    assert!(!view.can_retry());
    assert!(!view.retry());
}

#[tokio::test]
async fn test_error_page_and_retry_when_placeholders_off() {
    let mut view = CollectionView::new(FallbackPolicy::ErrorPage);
    view.load(&FixedSource(Err(remote_failure()))).await;

    assert!(view.rules().is_empty());
    assert!(matches!(view.screen(), Screen::ErrorPage { .. }));
    assert!(view.can_retry());

    assert!(view.retry());
    assert_eq!(view.screen(), Screen::Loading);
    assert!(!view.retry());

    view.finish_load(Ok(vec![Rule::new(1, "back")]));
    assert_eq!(view.screen(), Screen::Grid { warning: None });
}

#[test]
fn test_select_seven_then_close() {
    let start = Instant::now();
    let mut view = loaded(40);

    assert!(view.select_id(7));
    assert!(view.is_open());
    assert_eq!(view.selected().map(|s| s.rule.id), Some(7));

    view.close(start);
    assert!(!view.is_open());

    view.tick(start + Duration::from_millis(199));
    assert_eq!(view.selected().map(|s| s.rule.id), Some(7));

    view.tick(start + Duration::from_millis(200));
    assert!(view.selected().is_none());
}

#[test]
fn test_open_never_without_selection() {
    let start = Instant::now();
    let mut view = loaded(12);
    let check = |view: &CollectionView| assert!(!view.is_open() || view.selected().is_some());

    check(&view);
    for (step, index) in [0usize, 5, 11, 3].into_iter().enumerate() {
        let now = start + Duration::from_millis(step as u64 * 150);
        view.select_index(index);
        check(&view);
        view.close(now);
        check(&view);
        view.tick(now + Duration::from_millis(100));
        check(&view);
    }
    view.tick(start + Duration::from_secs(5));
    check(&view);
    assert!(view.selected().is_none());
}

#[test]
fn test_selection_signals() {
    let start = Instant::now();
    let mut view = loaded(5);
    let events = Arc::new(Mutex::new(Vec::new()));

    let seen = events.clone();
    view.selection_changed.connect(move |id: &Option<i64>| {
        seen.lock().unwrap().push(format!("selected {id:?}"));
    });
    let seen = events.clone();
    view.open_changed.connect(move |open: &bool| {
        seen.lock().unwrap().push(format!("open {open}"));
    });

    view.select_id(3);
    view.close(start);
    view.tick(start + Duration::from_millis(200));

    assert_eq!(
        *events.lock().unwrap(),
        vec!["selected Some(3)", "open true", "open false", "selected None"]
    );
}
