//! Ordering and exhaustion behaviour of the fallback chain resolver.

use std::time::Duration;

use stackup_cli::application::services::chain;
use stackup_cli::domain::strategy::{Action, Strategy};
use stackup_cli::domain::{ChainError, Outcome, RetryPolicy};

use crate::mocks::{FakeHost, RecordingReporter};

fn strategy(order: u32, program: &str, attempts: u32) -> Strategy {
    Strategy::new(order, program, Action::run(program, Vec::<String>::new()))
        .retry(RetryPolicy::new(attempts, Duration::from_secs(3)))
}

#[tokio::test(start_paused = true)]
async fn falls_past_transient_exhaustion_and_fatal() {
    let host = FakeHost::new()
        .script("alpha", vec![Outcome::Transient("timed out".to_string())])
        .script("bravo", vec![Outcome::Fatal("unable to locate package".to_string())]);
    let reporter = RecordingReporter::default();
    let strategies = [
        strategy(1, "alpha", 3),
        strategy(2, "bravo", 3),
        strategy(3, "charlie", 3),
    ];

    let resolution = chain::resolve(&host, "reach the goal", &strategies, &reporter)
        .await
        .expect("third strategy succeeds");

    assert_eq!(resolution.strategy, "charlie");
    assert_eq!(resolution.attempts, 1);
    assert_eq!(host.count_calls("alpha"), 3);
    assert_eq!(host.count_calls("bravo"), 1);
    assert_eq!(host.count_calls("charlie"), 1);
    assert_eq!(reporter.messages("warn").len(), 2);
}

#[tokio::test(start_paused = true)]
async fn tries_strategies_by_order_not_position() {
    let host = FakeHost::new().script("late", vec![Outcome::Fatal("invalid".to_string())]);
    let reporter = RecordingReporter::default();
    let strategies = [strategy(9, "early", 1), strategy(1, "late", 1)];

    let resolution = chain::resolve(&host, "reach the goal", &strategies, &reporter)
        .await
        .expect("resolves");

    assert_eq!(resolution.strategy, "early");
    assert_eq!(host.calls(), ["late", "early"]);
}

#[tokio::test(start_paused = true)]
async fn stops_at_first_success() {
    let host = FakeHost::new();
    let reporter = RecordingReporter::default();
    let strategies = [strategy(1, "alpha", 3), strategy(2, "bravo", 3)];

    let resolution = chain::resolve(&host, "reach the goal", &strategies, &reporter)
        .await
        .expect("resolves");

    assert_eq!(resolution.strategy, "alpha");
    assert_eq!(host.count_calls("bravo"), 0);
    assert!(reporter.messages("warn").is_empty());
}

#[tokio::test(start_paused = true)]
async fn exhaustion_aggregates_every_failure_in_order() {
    let host = FakeHost::new()
        .script("alpha", vec![Outcome::Transient("connection refused".to_string())])
        .script("bravo", vec![Outcome::Fatal("permission denied".to_string())]);
    let reporter = RecordingReporter::default();
    let strategies = [strategy(1, "alpha", 2), strategy(2, "bravo", 2)];

    let err = chain::resolve(&host, "reach the goal", &strategies, &reporter)
        .await
        .expect_err("every strategy fails");

    let failures = err.failures();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].strategy, "alpha");
    assert_eq!(failures[0].attempts, 2);
    assert!(!failures[0].fatal);
    assert_eq!(failures[0].reason, "connection refused");
    assert_eq!(failures[1].strategy, "bravo");
    assert_eq!(failures[1].attempts, 1);
    assert!(failures[1].fatal);

    let message = err.to_string();
    assert!(message.starts_with("could not reach the goal"), "{message}");
    assert!(message.contains("connection refused"), "{message}");
    assert!(message.contains("permission denied"), "{message}");
}

#[tokio::test]
async fn empty_strategy_list_is_an_error() {
    let host = FakeHost::new();
    let reporter = RecordingReporter::default();

    let err = chain::resolve(&host, "reach the goal", &[], &reporter)
        .await
        .expect_err("nothing to try");

    assert!(matches!(err, ChainError::NoStrategies { .. }));
    assert!(err.failures().is_empty());
    assert!(host.calls().is_empty());
}
