use std::time::Duration;

use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::{debug, warn};
use rst_common::with_tokio::tokio;
use rst_common::with_tokio::tokio::sync::broadcast::error::RecvError;
use rst_common::with_tokio::tokio::sync::broadcast::Receiver;

use tokio_util::sync::CancellationToken;

use super::types::{ConnectionID, MediatorError, STATE_COMPLETED, TOPIC_DIDEXCHANGE_STATES};

/// `EventType` is the class of a state notification emitted by the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub enum EventType {
    #[serde(rename = "pre_state")]
    PreState,

    #[serde(rename = "post_state")]
    PostState,
}

/// `AgentEvent` is a single state notification of some protocol running at the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct AgentEvent {
    pub event_type: EventType,
    pub state_id: String,
    pub connection_id: ConnectionID,
    pub topic: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl AgentEvent {
    pub fn new(
        event_type: EventType,
        state_id: &str,
        connection_id: ConnectionID,
        topic: &str,
    ) -> Self {
        Self {
            event_type,
            state_id: state_id.to_string(),
            connection_id,
            topic: topic.to_string(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// `EventFilter` selects the notification a flow is waiting for, an event
/// matches when all of its fields are equal
#[derive(Debug, Clone, PartialEq)]
pub struct EventFilter {
    pub event_type: EventType,
    pub state_id: String,
    pub connection_id: ConnectionID,
    pub topic: String,
}

impl EventFilter {
    /// Terminal state of a `DID Exchange` for the given connection
    pub fn did_exchange_completed(connection_id: ConnectionID) -> Self {
        Self {
            event_type: EventType::PostState,
            state_id: STATE_COMPLETED.to_string(),
            connection_id,
            topic: TOPIC_DIDEXCHANGE_STATES.to_string(),
        }
    }

    pub fn matches(&self, event: &AgentEvent) -> bool {
        self.event_type == event.event_type
            && self.state_id == event.state_id
            && self.connection_id == event.connection_id
            && self.topic == event.topic
    }
}

/// `wait_for_event` suspends until an event matching the filter is received
///
/// The wait is bounded by `bound` and aborted once `cancel` is triggered. Events published
/// before the receiver was created are never observed, callers must subscribe before
/// triggering the transition they wait for
pub async fn wait_for_event(
    receiver: &mut Receiver<AgentEvent>,
    filter: &EventFilter,
    bound: Duration,
    cancel: &CancellationToken,
) -> Result<AgentEvent, MediatorError> {
    let waiter = async {
        loop {
            match receiver.recv().await {
                Ok(event) if filter.matches(&event) => return Ok(event),
                Ok(event) => {
                    debug!(
                        "[events:wait] skip event: topic: {} | state: {} | connection: {}",
                        event.topic, event.state_id, event.connection_id
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("[events:wait] receiver lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return Err(MediatorError::EventChannelClosed),
            }
        }
    };

    tokio::select! {
        _ = cancel.cancelled() => Err(MediatorError::Cancelled(format!(
            "waiting for {} on connection {}",
            filter.state_id, filter.connection_id
        ))),
        result = tokio::time::timeout(bound, waiter) => match result {
            Ok(event) => event,
            Err(_) => Err(MediatorError::Timeout(bound)),
        },
    }
}
