//! REST adapter for the Firebase Identity Toolkit API. Normalizes the
//! provider user object into [`AuthIdentity`] and emits identity-changed
//! events on every session transition. No retries: a rejected credential
//! or network failure propagates to the caller as-is.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::broadcast;
use tracing::debug;

use crate::config::Config;
use crate::error::AuthError;
use crate::model::AuthIdentity;

use super::{IdentityEvent, IdentityEvents, IdentityProvider};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct FirebaseAuth {
    api_key: Option<String>,
    endpoint: String,
    google_id_token: Option<String>,
    client: reqwest::Client,
    events: IdentityEvents,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderUser {
    local_id: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

impl FirebaseAuth {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            api_key: config.auth_api_key.clone(),
            endpoint: config.auth_endpoint.trim_end_matches('/').to_string(),
            google_id_token: std::env::var("GOOGLE_ID_TOKEN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            client,
            events: IdentityEvents::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    fn url(&self, action: &str) -> Result<String, AuthError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AuthError::NotConfigured("FIREBASE_API_KEY"))?;
        Ok(format!("{}/accounts:{action}?key={api_key}", self.endpoint))
    }

    async fn post_account_action(
        &self,
        action: &str,
        payload: &serde_json::Value,
    ) -> Result<AuthIdentity, AuthError> {
        let url = self.url(action)?;
        let response = self.client.post(&url).json(payload).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            return Err(AuthError::Provider(message));
        }

        let user: ProviderUser = serde_json::from_slice(&body)
            .map_err(|err| AuthError::Payload(err.to_string()))?;

        debug!(action, uid = %user.local_id, "identity provider call succeeded");
        Ok(AuthIdentity {
            uid: user.local_id,
            email: user.email,
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuth {
    async fn register(&self, email: &str, password: &str) -> Result<AuthIdentity, AuthError> {
        let payload = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        let identity = self.post_account_action("signUp", &payload).await?;
        self.events.emit(IdentityEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthIdentity, AuthError> {
        let payload = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        let identity = self
            .post_account_action("signInWithPassword", &payload)
            .await?;
        self.events.emit(IdentityEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn login_federated(&self) -> Result<AuthIdentity, AuthError> {
        let id_token = self
            .google_id_token
            .as_deref()
            .ok_or(AuthError::NotConfigured("GOOGLE_ID_TOKEN"))?;

        let payload = serde_json::json!({
            "postBody": format!("id_token={id_token}&providerId=google.com"),
            "requestUri": "http://localhost",
            "returnIdpCredential": true,
            "returnSecureToken": true,
        });
        let identity = self.post_account_action("signInWithIdp", &payload).await?;
        self.events.emit(IdentityEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        // The Identity Toolkit has no server-side sign-out for API-key
        // clients; dropping the local session is the provider contract.
        self.events.emit(IdentityEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<IdentityEvent> {
        self.events.subscribe()
    }
}
