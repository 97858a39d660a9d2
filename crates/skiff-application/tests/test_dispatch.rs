//! Integration tests for the dispatch send path: routing, attribution,
//! accounting, the single-outstanding-request policy, and teardown.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use skiff_application::{DispatchOutcome, Dispatcher, FALLBACK_REPLY};
use skiff_core::agent::AgentId;
use skiff_core::ledger::estimate_tokens;
use skiff_core::session::MessageRole;
use skiff_interaction::{ProviderError, ProviderRequest, ResponseProvider, SimulatedProvider};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

// Mock provider that records every request and echoes the message back.
struct CapturingProvider {
    requests: Mutex<Vec<ProviderRequest>>,
}

impl CapturingProvider {
    fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResponseProvider for CapturingProvider {
    async fn respond(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(format!("echo: {}", request.message))
    }
}

// Mock provider that always fails with a fixed error.
struct FailingProvider {
    error: ProviderError,
}

#[async_trait]
impl ResponseProvider for FailingProvider {
    async fn respond(&self, _request: &ProviderRequest) -> Result<String, ProviderError> {
        Err(self.error.clone())
    }
}

// Mock provider that parks every request until the test releases it, so
// tests can interleave other operations with an in-flight send.
struct BlockingProvider {
    entered: Notify,
    release: Notify,
}

impl BlockingProvider {
    fn new() -> Self {
        Self {
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    async fn wait_until_entered(&self) {
        self.entered.notified().await;
    }

    fn release_response(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl ResponseProvider for BlockingProvider {
    async fn respond(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(format!("late reply to: {}", request.message))
    }
}

#[tokio::test]
async fn test_auto_route_switches_agent_before_either_turn() {
    init_tracing();
    let dispatcher = Dispatcher::new(Arc::new(SimulatedProvider::new()));
    assert_eq!(dispatcher.active_agent().await, AgentId::CreativeGeneralist);

    let outcome = dispatcher.send("Can you analyze this complex problem?").await;

    let (user, assistant) = match outcome {
        DispatchOutcome::Exchange { user, assistant } => (user, assistant),
        other => panic!("expected Exchange, got {other:?}"),
    };
    assert_eq!(user.agent_id, AgentId::DeepThinker);
    assert_eq!(assistant.agent_id, AgentId::DeepThinker);
    assert_eq!(dispatcher.active_agent().await, AgentId::DeepThinker);

    let transcript = dispatcher.transcript().await;
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, MessageRole::User);
    assert_eq!(transcript[1].role, MessageRole::Assistant);
    assert_eq!(transcript[1].id, assistant.id);
}

#[tokio::test]
async fn test_usage_is_recorded_for_the_exchange_agent_only() {
    let dispatcher = Dispatcher::new(Arc::new(CapturingProvider::new()));

    let outcome = dispatcher.send("analyze the ledger").await;
    let (user, assistant) = match outcome {
        DispatchOutcome::Exchange { user, assistant } => (user, assistant),
        other => panic!("expected Exchange, got {other:?}"),
    };

    let expected = estimate_tokens(&user.content) + estimate_tokens(&assistant.content);
    let counter = dispatcher.agent_usage(AgentId::DeepThinker).await;
    assert_eq!(counter.tokens_used, expected);
    assert!((counter.cost_accrued - expected as f64 * 0.003).abs() < 1e-9);

    let usage = dispatcher.usage().await;
    assert_eq!(usage.len(), 1, "only the exchange agent should have usage");
}

#[tokio::test]
async fn test_empty_input_is_a_silent_no_op() {
    let dispatcher = Dispatcher::new(Arc::new(SimulatedProvider::new()));

    let outcome = dispatcher.send("   \n\t").await;
    assert!(matches!(outcome, DispatchOutcome::NoOp));
    assert!(dispatcher.transcript().await.is_empty());
    assert!(dispatcher.usage().await.is_empty());
}

#[tokio::test]
async fn test_second_send_is_rejected_while_one_is_in_flight() {
    let provider = Arc::new(BlockingProvider::new());
    let dispatcher = Arc::new(Dispatcher::new(provider.clone()));

    let first = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move { dispatcher.send("first question").await })
    };
    provider.wait_until_entered().await;

    let second = dispatcher.send("second question").await;
    assert!(matches!(second, DispatchOutcome::RejectedBusy));
    assert_eq!(
        dispatcher.transcript().await.len(),
        1,
        "rejected send must leave no trace"
    );
    assert!(dispatcher.usage().await.is_empty());

    provider.release_response();
    let first = first.await.expect("send task should not panic");
    assert!(matches!(first, DispatchOutcome::Exchange { .. }));
    assert_eq!(dispatcher.transcript().await.len(), 2);

    // The gate is released; the session accepts new sends.
    let third = dispatcher.send("").await;
    assert!(matches!(third, DispatchOutcome::NoOp));
}

#[tokio::test]
async fn test_attribution_survives_an_agent_switch_mid_flight() {
    let provider = Arc::new(BlockingProvider::new());
    let dispatcher = Arc::new(Dispatcher::new(provider.clone()));

    let send = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move { dispatcher.send("analyze the harbor logs").await })
    };
    provider.wait_until_entered().await;

    // Switch agents while the response is still in flight.
    dispatcher.select_agent(AgentId::DeepCreator).await;
    provider.release_response();

    let outcome = send.await.expect("send task should not panic");
    let assistant = match outcome {
        DispatchOutcome::Exchange { assistant, .. } => assistant,
        other => panic!("expected Exchange, got {other:?}"),
    };
    assert_eq!(
        assistant.agent_id,
        AgentId::DeepThinker,
        "the reply keeps the agent captured at dispatch"
    );
    assert_eq!(dispatcher.active_agent().await, AgentId::DeepCreator);

    let usage = dispatcher.usage().await;
    assert!(usage.contains_key(&AgentId::DeepThinker));
    assert!(!usage.contains_key(&AgentId::DeepCreator));
}

#[tokio::test]
async fn test_closing_while_awaiting_discards_the_response() {
    init_tracing();
    let provider = Arc::new(BlockingProvider::new());
    let dispatcher = Arc::new(Dispatcher::new(provider.clone()));

    let send = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move { dispatcher.send("explain the tide tables").await })
    };
    provider.wait_until_entered().await;

    dispatcher.close();
    provider.release_response();

    let outcome = send.await.expect("send task should not panic");
    assert!(matches!(outcome, DispatchOutcome::Closed));

    let transcript = dispatcher.transcript().await;
    assert_eq!(transcript.len(), 1, "only the user turn was recorded");
    assert_eq!(transcript[0].role, MessageRole::User);
    assert!(dispatcher.usage().await.is_empty());

    let after = dispatcher.send("anyone there?").await;
    assert!(matches!(after, DispatchOutcome::Closed));
}

#[tokio::test]
async fn test_provider_failure_records_one_fallback_and_no_usage() {
    init_tracing();
    let provider = Arc::new(FailingProvider {
        error: ProviderError::Status {
            status: 500,
            message: "internal error".to_string(),
        },
    });
    let dispatcher = Dispatcher::new(provider);

    let outcome = dispatcher.send("explain the outage").await;
    let (fallback, error) = match outcome {
        DispatchOutcome::Fallback {
            fallback, error, ..
        } => (fallback, error),
        other => panic!("expected Fallback, got {other:?}"),
    };

    assert_eq!(fallback.content, FALLBACK_REPLY);
    assert_eq!(fallback.role, MessageRole::Assistant);
    assert_eq!(fallback.agent_id, AgentId::RationalJournalist);
    assert_eq!(error, ProviderError::Status {
        status: 500,
        message: "internal error".to_string(),
    });

    assert_eq!(dispatcher.transcript().await.len(), 2);
    assert!(dispatcher.usage().await.is_empty(), "failed exchanges are not billed");

    // The session stays usable after a failure.
    let again = dispatcher.send("try once more").await;
    assert!(matches!(again, DispatchOutcome::Fallback { .. }));
    assert_eq!(dispatcher.transcript().await.len(), 4);
}

#[tokio::test]
async fn test_disabling_auto_route_pins_the_active_agent() {
    let provider = Arc::new(CapturingProvider::new());
    let dispatcher = Dispatcher::new(provider.clone());
    dispatcher.set_auto_route(false).await;

    let outcome = dispatcher.send("analyze this anyway").await;
    let user = match outcome {
        DispatchOutcome::Exchange { user, .. } => user,
        other => panic!("expected Exchange, got {other:?}"),
    };

    assert_eq!(user.agent_id, AgentId::CreativeGeneralist);
    assert_eq!(dispatcher.active_agent().await, AgentId::CreativeGeneralist);
    assert_eq!(
        provider.requests()[0].agent_id,
        AgentId::CreativeGeneralist
    );
}

#[tokio::test]
async fn test_request_carries_temperature_and_session_id() {
    let provider = Arc::new(CapturingProvider::new());
    let dispatcher = Dispatcher::new(provider.clone());
    dispatcher.set_temperature(0.25).await;

    dispatcher.send("hello").await;

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].message, "hello");
    assert_eq!(requests[0].temperature, 0.25);
    assert_eq!(requests[0].session_id, dispatcher.session().await.id);
}

#[tokio::test]
async fn test_closed_dispatcher_rejects_new_sends_without_side_effects() {
    let dispatcher = Dispatcher::new(Arc::new(SimulatedProvider::new()));
    dispatcher.close();
    assert!(dispatcher.is_closed());

    let outcome = dispatcher.send("hello?").await;
    assert!(matches!(outcome, DispatchOutcome::Closed));
    assert!(dispatcher.transcript().await.is_empty());
}
