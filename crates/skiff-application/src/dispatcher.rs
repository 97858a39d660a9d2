//! Message dispatch orchestration.
//!
//! The dispatcher owns one session's routing state, transcript, and usage
//! ledger, and drives the full send path: route, record the user turn,
//! acquire the reply, record the assistant turn, account for usage. It is
//! written against the [`ResponseProvider`] trait and never learns which
//! implementation answers.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use skiff_core::agent::AgentId;
use skiff_core::ledger::{self, UsageCounter, UsageLedger};
use skiff_core::session::{DispatchSession, Message};
use skiff_interaction::{ProviderError, ProviderRequest, ResponseProvider};

/// Reply recorded in place of an assistant answer when the provider fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't get a response for that message. Please try again.";

/// Result of dispatching one piece of user input.
///
/// The send path never surfaces an `Err`; every way a send can go is a
/// variant here, so callers handle outcomes instead of failures.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// Input was empty or whitespace-only; nothing was recorded.
    NoOp,
    /// A previous send is still awaiting its response; nothing was recorded.
    RejectedBusy,
    /// The exchange completed and both turns are in the transcript.
    Exchange { user: Message, assistant: Message },
    /// The provider failed; a fallback assistant turn was recorded and the
    /// ledger was left untouched.
    Fallback {
        user: Message,
        fallback: Message,
        error: ProviderError,
    },
    /// The session is closed, or was closed while the response was in
    /// flight (in which case the response was discarded).
    Closed,
}

/// Releases the single-outstanding-request gate on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Routes user input to an agent and manages the resulting conversation.
///
/// All state lives behind short-lived locks; no lock is ever held across
/// the provider call. One request may be outstanding at a time.
pub struct Dispatcher {
    session: RwLock<DispatchSession>,
    transcript: RwLock<Vec<Message>>,
    ledger: RwLock<UsageLedger>,
    provider: Arc<dyn ResponseProvider>,
    in_flight: AtomicBool,
    shutdown: CancellationToken,
}

impl Dispatcher {
    /// Creates a dispatcher with a fresh session over the given provider.
    pub fn new(provider: Arc<dyn ResponseProvider>) -> Self {
        Self {
            session: RwLock::new(DispatchSession::new()),
            transcript: RwLock::new(Vec::new()),
            ledger: RwLock::new(UsageLedger::new()),
            provider,
            in_flight: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
        }
    }

    /// Dispatches one piece of user input.
    ///
    /// The path is: reject closed/empty/busy sends; route (switching the
    /// active agent first when auto-routing suggests it) and capture the
    /// agent, temperature, and session id by value; record the user turn;
    /// await the provider with no locks held; then record the assistant
    /// turn against the captured agent and account for usage.
    ///
    /// A response arriving after [`Dispatcher::close`] is discarded rather
    /// than appended to the defunct session. Provider failures record one
    /// fallback assistant turn, skip the ledger, and are never retried.
    pub async fn send(&self, input: &str) -> DispatchOutcome {
        if self.shutdown.is_cancelled() {
            return DispatchOutcome::Closed;
        }

        if input.trim().is_empty() {
            return DispatchOutcome::NoOp;
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            tracing::debug!("[Dispatcher] Send rejected, a request is already in flight");
            return DispatchOutcome::RejectedBusy;
        }
        let _gate = InFlightGuard(&self.in_flight);

        // Attribution is captured by value here; agent switches that happen
        // while the provider is working must not re-label this exchange.
        let (agent, temperature, session_id) = {
            let mut session = self.session.write().await;
            let previous = session.active_agent;
            let agent = session.route(input);
            if agent != previous {
                tracing::info!(
                    "[Dispatcher] Auto-routed to {} for this message (was {})",
                    agent,
                    previous
                );
            }
            (agent, session.temperature, session.id.clone())
        };

        let user = Message::user(agent, input);
        self.transcript.write().await.push(user.clone());

        let request = ProviderRequest {
            message: user.content.clone(),
            agent_id: agent,
            temperature,
            session_id,
        };

        tracing::debug!(
            "[Dispatcher] Sending message ({} chars) as {}",
            request.message.chars().count(),
            agent
        );
        let response = self.provider.respond(&request).await;

        if self.shutdown.is_cancelled() {
            tracing::debug!("[Dispatcher] Session closed while awaiting, discarding response");
            return DispatchOutcome::Closed;
        }

        match response {
            Ok(reply) => {
                let assistant = Message::assistant(agent, reply);
                self.transcript.write().await.push(assistant.clone());

                let tokens = ledger::estimate_tokens(&user.content)
                    + ledger::estimate_tokens(&assistant.content);
                self.ledger.write().await.record(agent, tokens);

                DispatchOutcome::Exchange { user, assistant }
            }
            Err(error) => {
                tracing::warn!("[Dispatcher] Provider failed, recording fallback: {}", error);
                let fallback = Message::assistant(agent, FALLBACK_REPLY);
                self.transcript.write().await.push(fallback.clone());

                DispatchOutcome::Fallback {
                    user,
                    fallback,
                    error,
                }
            }
        }
    }

    /// Selects an agent explicitly for subsequent messages.
    pub async fn select_agent(&self, agent_id: AgentId) {
        let mut session = self.session.write().await;
        if session.active_agent != agent_id {
            tracing::info!("[Dispatcher] Agent selected: {}", agent_id);
        }
        session.select_agent(agent_id);
    }

    /// Enables or disables keyword auto-routing.
    pub async fn set_auto_route(&self, enabled: bool) {
        self.session.write().await.set_auto_route(enabled);
    }

    /// Sets the sampling temperature, clamped to `[0.0, 1.0]`.
    pub async fn set_temperature(&self, temperature: f64) {
        self.session.write().await.set_temperature(temperature);
    }

    /// The agent new messages currently route to.
    pub async fn active_agent(&self) -> AgentId {
        self.session.read().await.active_agent
    }

    /// A snapshot of the session's routing state.
    pub async fn session(&self) -> DispatchSession {
        self.session.read().await.clone()
    }

    /// A snapshot of the transcript, oldest message first.
    pub async fn transcript(&self) -> Vec<Message> {
        self.transcript.read().await.clone()
    }

    /// Looks up one transcript message by id.
    pub async fn find_message(&self, message_id: &str) -> Option<Message> {
        self.transcript
            .read()
            .await
            .iter()
            .find(|message| message.id == message_id)
            .cloned()
    }

    /// A usage snapshot for one agent.
    pub async fn agent_usage(&self, agent_id: AgentId) -> UsageCounter {
        self.ledger.read().await.counter(agent_id)
    }

    /// A usage snapshot for every agent with recorded usage.
    pub async fn usage(&self) -> HashMap<AgentId, UsageCounter> {
        self.ledger.read().await.snapshot()
    }

    /// Closes the session.
    ///
    /// Subsequent sends report [`DispatchOutcome::Closed`], and a response
    /// already in flight is discarded when it arrives.
    pub fn close(&self) {
        if !self.shutdown.is_cancelled() {
            tracing::info!("[Dispatcher] Session closed");
            self.shutdown.cancel();
        }
    }

    /// True once [`Dispatcher::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}
