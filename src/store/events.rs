use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::model::{AuthIdentity, QuizResult, UserProfile};

const CHANNEL_CAPACITY: usize = 256;

/// Change notifications published by the session store. Field events
/// carry the identity id that owns the data (`None` before sign-in, which
/// maps to the legacy non-namespaced storage keys).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum StateEvent {
    #[serde(rename = "IDENTITY_ACTIVATED")]
    IdentityActivated { identity: AuthIdentity },

    #[serde(rename = "IDENTITY_CLEARED")]
    IdentityCleared { uid: String },

    #[serde(rename = "PROFILE_UPDATED")]
    ProfileUpdated {
        uid: Option<String>,
        profile: UserProfile,
    },

    #[serde(rename = "QUIZ_RESULT_APPENDED")]
    QuizResultAppended {
        uid: Option<String>,
        history: Vec<QuizResult>,
    },

    #[serde(rename = "ONBOARDING_COMPLETED")]
    OnboardingCompleted { uid: Option<String> },

    #[serde(rename = "ASSESSMENT_COMPLETED")]
    AssessmentCompleted { uid: Option<String> },

    #[serde(rename = "ATTENTION_UPDATED")]
    AttentionUpdated { uid: Option<String>, score: u8 },
}

impl StateEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            StateEvent::IdentityActivated { .. } => "IDENTITY_ACTIVATED",
            StateEvent::IdentityCleared { .. } => "IDENTITY_CLEARED",
            StateEvent::ProfileUpdated { .. } => "PROFILE_UPDATED",
            StateEvent::QuizResultAppended { .. } => "QUIZ_RESULT_APPENDED",
            StateEvent::OnboardingCompleted { .. } => "ONBOARDING_COMPLETED",
            StateEvent::AssessmentCompleted { .. } => "ASSESSMENT_COMPLETED",
            StateEvent::AttentionUpdated { .. } => "ATTENTION_UPDATED",
        }
    }
}

/// Broadcast channel between the store and its observers. The persistence
/// mirror subscribes once for the process lifetime; additional observers
/// (UI layers) may subscribe as well.
pub struct ChangeBus {
    sender: broadcast::Sender<StateEvent>,
}

impl ChangeBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn publish(&self, event: StateEvent) {
        let event_type = event.event_type();
        match self.sender.send(event) {
            Ok(delivered) => debug!(event_type, delivered, "state event published"),
            Err(_) => debug!(event_type, "state event dropped, no subscribers"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_subscriber() {
        let bus = ChangeBus::new();
        let mut receiver = bus.subscribe();

        bus.publish(StateEvent::AttentionUpdated {
            uid: Some("u1".to_string()),
            score: 85,
        });

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.event_type(), "ATTENTION_UPDATED");
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = ChangeBus::new();
        bus.publish(StateEvent::IdentityCleared {
            uid: "u1".to_string(),
        });
        assert_eq!(bus.subscriber_count(), 0);
    }
}
