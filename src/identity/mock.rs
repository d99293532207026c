//! Deterministic in-memory identity provider for tests and offline runs.
//! Error messages mirror the real provider's codes so callers exercise
//! the same surfaces.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::error::AuthError;
use crate::model::AuthIdentity;

use super::{IdentityEvent, IdentityEvents, IdentityProvider};

struct Account {
    uid: String,
    password: String,
}

pub struct MockIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    federated_email: String,
    events: IdentityEvents,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            federated_email: "federated@example.com".to_string(),
            events: IdentityEvents::new(),
        }
    }

    /// Pre-creates an account, returning its identity.
    pub fn seed_account(&self, email: &str, password: &str) -> AuthIdentity {
        let uid = Uuid::new_v4().to_string();
        self.accounts.lock().insert(
            email.to_string(),
            Account {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );
        AuthIdentity {
            uid,
            email: Some(email.to_string()),
        }
    }

    /// Simulates a provider-side session transition, e.g. a token refresh
    /// establishing a user in another part of the process.
    pub fn emit_signed_in(&self, identity: AuthIdentity) {
        self.events.emit(IdentityEvent::SignedIn(identity));
    }

    pub fn emit_signed_out(&self) {
        self.events.emit(IdentityEvent::SignedOut);
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn register(&self, email: &str, password: &str) -> Result<AuthIdentity, AuthError> {
        let mut accounts = self.accounts.lock();
        if accounts.contains_key(email) {
            return Err(AuthError::Provider("EMAIL_EXISTS".to_string()));
        }

        let uid = Uuid::new_v4().to_string();
        accounts.insert(
            email.to_string(),
            Account {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );
        drop(accounts);

        let identity = AuthIdentity {
            uid,
            email: Some(email.to_string()),
        };
        self.events.emit(IdentityEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthIdentity, AuthError> {
        let accounts = self.accounts.lock();
        let Some(account) = accounts.get(email) else {
            return Err(AuthError::Provider("EMAIL_NOT_FOUND".to_string()));
        };
        if account.password != password {
            return Err(AuthError::Provider("INVALID_PASSWORD".to_string()));
        }

        let identity = AuthIdentity {
            uid: account.uid.clone(),
            email: Some(email.to_string()),
        };
        drop(accounts);

        self.events.emit(IdentityEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn login_federated(&self) -> Result<AuthIdentity, AuthError> {
        let mut accounts = self.accounts.lock();
        let account = accounts
            .entry(self.federated_email.clone())
            .or_insert_with(|| Account {
                uid: Uuid::new_v4().to_string(),
                password: String::new(),
            });

        let identity = AuthIdentity {
            uid: account.uid.clone(),
            email: Some(self.federated_email.clone()),
        };
        drop(accounts);

        self.events.emit(IdentityEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.events.emit(IdentityEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<IdentityEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let provider = MockIdentityProvider::new();
        let registered = provider.register("ana@example.com", "secret123!").await.unwrap();
        let logged_in = provider.login("ana@example.com", "secret123!").await.unwrap();
        assert_eq!(registered.uid, logged_in.uid);
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let provider = MockIdentityProvider::new();
        provider.register("ana@example.com", "secret123!").await.unwrap();
        let err = provider
            .register("ana@example.com", "other")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Provider(m) if m == "EMAIL_EXISTS"));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let provider = MockIdentityProvider::new();
        provider.seed_account("ana@example.com", "secret123!");
        let err = provider.login("ana@example.com", "nope").await.unwrap_err();
        assert!(matches!(err, AuthError::Provider(m) if m == "INVALID_PASSWORD"));
    }

    #[tokio::test]
    async fn federated_login_is_stable_across_calls() {
        let provider = MockIdentityProvider::new();
        let first = provider.login_federated().await.unwrap();
        let second = provider.login_federated().await.unwrap();
        assert_eq!(first.uid, second.uid);
    }
}
