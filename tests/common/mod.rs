#![allow(dead_code)]

use std::sync::Arc;

use tokio::sync::broadcast::Receiver;

use mindtutor::identity::MockIdentityProvider;
use mindtutor::persist::{MemoryStore, PersistenceMirror};
use mindtutor::store::events::StateEvent;
use mindtutor::store::SessionStore;

pub struct Harness {
    pub provider: Arc<MockIdentityProvider>,
    pub storage: Arc<MemoryStore>,
    pub store: Arc<SessionStore>,
    pub mirror: PersistenceMirror,
    pub events: Receiver<StateEvent>,
}

/// Store + mirror wired over in-memory components. Events are pumped by
/// hand so tests stay deterministic.
pub fn harness() -> Harness {
    let provider = Arc::new(MockIdentityProvider::new());
    let storage = Arc::new(MemoryStore::new());
    let store = Arc::new(SessionStore::new(provider.clone()));
    let events = store.subscribe();
    let mirror = PersistenceMirror::new(Arc::clone(&store), storage.clone());

    Harness {
        provider,
        storage,
        store,
        mirror,
        events,
    }
}

impl Harness {
    /// Delivers every pending store event to the mirror.
    pub fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.mirror.handle_event(&event);
        }
    }
}
