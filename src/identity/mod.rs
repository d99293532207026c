pub mod firebase;
pub mod mock;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::AuthError;
use crate::model::AuthIdentity;

pub use firebase::FirebaseAuth;
pub use mock::MockIdentityProvider;

const CHANNEL_CAPACITY: usize = 64;

/// Session transitions observed at the provider: sign-in, sign-out, or a
/// token refresh re-establishing a user.
#[derive(Debug, Clone)]
pub enum IdentityEvent {
    SignedIn(AuthIdentity),
    SignedOut,
}

/// Wraps an external authentication service and surfaces a normalized
/// identity. Implementations do not retry; failures carry the
/// provider-supplied message.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn register(&self, email: &str, password: &str) -> Result<AuthIdentity, AuthError>;

    async fn login(&self, email: &str, password: &str) -> Result<AuthIdentity, AuthError>;

    /// Federated (Google) sign-in using a pre-obtained OAuth credential.
    async fn login_federated(&self) -> Result<AuthIdentity, AuthError>;

    async fn logout(&self) -> Result<(), AuthError>;

    /// Identity-changed notifications. The session store subscribes once
    /// for the process lifetime.
    fn subscribe(&self) -> broadcast::Receiver<IdentityEvent>;
}

/// Shared emitter for provider implementations.
pub(crate) struct IdentityEvents {
    sender: broadcast::Sender<IdentityEvent>,
}

impl IdentityEvents {
    pub(crate) fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub(crate) fn emit(&self, event: IdentityEvent) {
        let _ = self.sender.send(event);
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<IdentityEvent> {
        self.sender.subscribe()
    }
}
