//! Joke aggregator tests: fixed ordering, per-branch failure containment,
//! no-I/O fast fail for missing credentials, and fan-out timing.

mod common;

use joke_battles::models::ModelName;
use joke_battles::services::providers::mock::MockJokeProvider;
use joke_battles::services::providers::JokeProvider;
use joke_battles::services::JokeAggregator;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn full_mock_set() -> Vec<Arc<dyn JokeProvider>> {
    ModelName::ALL
        .iter()
        .map(|&name| Arc::new(MockJokeProvider::new(name)) as Arc<dyn JokeProvider>)
        .collect()
}

#[tokio::test]
async fn returns_one_result_per_provider_in_fixed_order() {
    common::init_tracing();

    let aggregator = JokeAggregator::new(full_mock_set());
    let results = aggregator.generate_all("cats").await;

    assert_eq!(results.len(), 4);
    for (result, expected) in results.iter().zip(ModelName::ALL) {
        assert_eq!(result.provider, expected);
        assert!(!result.fallback);
        assert!(result.content.contains("cats"));
    }
}

#[tokio::test]
async fn failing_branch_falls_back_without_affecting_siblings() {
    common::init_tracing();

    let providers: Vec<Arc<dyn JokeProvider>> = vec![
        Arc::new(MockJokeProvider::new(ModelName::OpenAi)),
        Arc::new(MockJokeProvider::new(ModelName::Anthropic).failing()),
        Arc::new(MockJokeProvider::new(ModelName::Gemini)),
        Arc::new(MockJokeProvider::new(ModelName::Llama)),
    ];

    let results = JokeAggregator::new(providers).generate_all("dogs").await;

    assert_eq!(results.len(), 4);
    assert!(results[1].fallback);
    assert_eq!(results[1].content, ModelName::Anthropic.fallback_text());
    for i in [0, 2, 3] {
        assert!(!results[i].fallback, "sibling branch {} was affected", i);
    }
}

#[tokio::test]
async fn unconfigured_provider_is_never_called() {
    common::init_tracing();

    let unconfigured = MockJokeProvider::unconfigured(ModelName::Gemini);
    let calls = unconfigured.call_counter();

    let providers: Vec<Arc<dyn JokeProvider>> = vec![
        Arc::new(MockJokeProvider::new(ModelName::OpenAi)),
        Arc::new(unconfigured),
    ];

    let results = JokeAggregator::new(providers).generate_all("planes").await;

    assert_eq!(results[1].content, ModelName::Gemini.not_configured_text());
    assert!(results[1].fallback);
    assert_eq!(
        calls.load(std::sync::atomic::Ordering::SeqCst),
        0,
        "unconfigured provider must not be called"
    );
}

#[tokio::test]
async fn timed_out_branch_does_not_delay_siblings() {
    common::init_tracing();

    let providers: Vec<Arc<dyn JokeProvider>> = vec![
        Arc::new(
            MockJokeProvider::new(ModelName::OpenAi)
                .with_delay(Duration::from_millis(500))
                .with_timeout(Duration::from_millis(100)),
        ),
        Arc::new(MockJokeProvider::new(ModelName::Anthropic)),
        Arc::new(MockJokeProvider::new(ModelName::Gemini)),
        Arc::new(MockJokeProvider::new(ModelName::Llama)),
    ];

    let start = Instant::now();
    let results = JokeAggregator::new(providers).generate_all("trains").await;
    let elapsed = start.elapsed();

    // The join waits for the bounded branch, not for its full 500ms delay.
    assert!(
        elapsed < Duration::from_millis(400),
        "join took {:?}, expected roughly the 100ms branch bound",
        elapsed
    );
    assert!(results[0].fallback);
    assert_eq!(results[0].content, ModelName::OpenAi.fallback_text());
    for i in [1, 2, 3] {
        assert!(!results[i].fallback);
    }
}

#[tokio::test]
async fn branches_run_concurrently_not_sequentially() {
    common::init_tracing();

    let providers: Vec<Arc<dyn JokeProvider>> = ModelName::ALL
        .iter()
        .map(|&name| {
            Arc::new(MockJokeProvider::new(name).with_delay(Duration::from_millis(150)))
                as Arc<dyn JokeProvider>
        })
        .collect();

    let start = Instant::now();
    let results = JokeAggregator::new(providers).generate_all("boats").await;
    let elapsed = start.elapsed();

    // Four 150ms branches in sequence would take 600ms.
    assert!(
        elapsed < Duration::from_millis(450),
        "branches appear to have run sequentially: {:?}",
        elapsed
    );
    assert!(results.iter().all(|r| !r.fallback));
}
