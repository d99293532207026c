//! Observer that mirrors session state into durable storage. The store
//! publishes change events; this component subscribes and writes each
//! field to its namespaced key, and rehydrates the store when an
//! identity becomes active. Storage failures are fail-soft: a corrupted
//! value counts as missing, a failed write is logged and skipped.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::model::{QuizResult, UserProfile};
use crate::store::events::StateEvent;
use crate::store::{RestoredState, SessionStore};

use super::{get_json, keys, set_json, Storage};

pub struct PersistenceMirror {
    storage: Arc<dyn Storage>,
    store: Arc<SessionStore>,
}

impl PersistenceMirror {
    pub fn new(store: Arc<SessionStore>, storage: Arc<dyn Storage>) -> Self {
        Self { storage, store }
    }

    /// Subscribes to the store and applies events until the store is
    /// dropped. The receiver is created here, before any event can be
    /// published through the returned task.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        let mut receiver = self.store.subscribe();
        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => self.handle_event(&event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "persistence mirror lagged behind the store");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Applies a single state event. Each field is an independent,
    /// synchronous write; there is no batching and no schema versioning.
    pub fn handle_event(&self, event: &StateEvent) {
        match event {
            StateEvent::IdentityActivated { identity } => self.rehydrate(&identity.uid),
            // Durable data under the old identity key is retained.
            StateEvent::IdentityCleared { .. } => {}
            StateEvent::ProfileUpdated { uid, profile } => {
                self.write(&keys::profile_key(uid.as_deref()), profile);
            }
            StateEvent::QuizResultAppended { uid, history } => {
                self.write(&keys::quiz_results_key(uid.as_deref()), history);
            }
            StateEvent::OnboardingCompleted { uid } => {
                self.write(&keys::onboarded_key(uid.as_deref()), &true);
            }
            StateEvent::AssessmentCompleted { uid } => {
                self.write(&keys::quiz_completed_key(uid.as_deref()), &true);
            }
            StateEvent::AttentionUpdated { uid, score } => {
                self.write(&keys::attention_key(uid.as_deref()), score);
            }
        }
    }

    /// Reads every namespaced key for the now-active identity and pushes
    /// the recovered fields back into the store. Missing keys leave the
    /// in-memory defaults in place.
    fn rehydrate(&self, uid: &str) {
        let restored = RestoredState {
            profile: self.read::<UserProfile>(&keys::profile_key(Some(uid))),
            quiz_results: self.read::<Vec<QuizResult>>(&keys::quiz_results_key(Some(uid))),
            is_onboarded: self.read::<bool>(&keys::onboarded_key(Some(uid))),
            is_quiz_completed: self.read::<bool>(&keys::quiz_completed_key(Some(uid))),
            attention_score: self.read::<u8>(&keys::attention_key(Some(uid))),
        };
        self.store.restore_session(uid, restored);
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(err) = set_json(self.storage.as_ref(), key, value) {
            error!(key, error = %err, "persistence write failed, value dropped");
        }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match get_json(self.storage.as_ref(), key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "stored value unreadable, falling back to default");
                None
            }
        }
    }
}
