pub mod events;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{AppError, AuthError, ValidationError};
use crate::guards::GuardState;
use crate::identity::{IdentityEvent, IdentityProvider};
use crate::model::{AuthIdentity, NewProfile, OnboardingFlags, QuizResult, UserProfile};

use events::{ChangeBus, StateEvent};

const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_ATTENTION_SCORE: u8 = 100;

/// In-memory session snapshot.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub identity: Option<AuthIdentity>,
    pub profile: Option<UserProfile>,
    pub quiz_results: Vec<QuizResult>,
    pub flags: OnboardingFlags,
    pub attention_score: u8,
}

/// Fields recovered from durable storage when an identity becomes
/// active. A `None` leaves the corresponding in-memory default in place.
#[derive(Debug, Clone, Default)]
pub struct RestoredState {
    pub profile: Option<UserProfile>,
    pub quiz_results: Option<Vec<QuizResult>>,
    pub is_onboarded: Option<bool>,
    pub is_quiz_completed: Option<bool>,
    pub attention_score: Option<u8>,
}

/// The session state container: current identity, profile, quiz history,
/// onboarding flags, and the transient attention score. Mutations publish
/// [`StateEvent`]s; persistence is a separate subscriber. Created once at
/// application start and passed by reference to consumers.
pub struct SessionStore {
    state: RwLock<SessionState>,
    busy: AtomicBool,
    bus: ChangeBus,
    provider: Arc<dyn IdentityProvider>,
}

impl SessionStore {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            busy: AtomicBool::new(false),
            bus: ChangeBus::new(),
            provider,
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.bus.subscribe()
    }

    /// True while a login/register/logout call is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn guard_state(&self) -> GuardState {
        let state = self.state.read();
        GuardState {
            is_authenticated: state.identity.is_some(),
            is_loading: self.is_busy(),
            is_onboarded: state.flags.is_onboarded,
            is_quiz_completed: state.flags.is_quiz_completed,
        }
    }

    fn current_uid(&self) -> Option<String> {
        self.state.read().identity.as_ref().map(|i| i.uid.clone())
    }

    // ---- synchronous mutators -------------------------------------------

    /// Replaces the user profile. Only the onboarding flow calls this.
    pub fn set_profile(&self, profile: UserProfile) -> Result<(), AppError> {
        validate_profile_fields(&profile.name, &profile.learning_preferences)?;

        let uid = {
            let mut state = self.state.write();
            state.profile = Some(profile.clone());
            state.identity.as_ref().map(|i| i.uid.clone())
        };
        self.bus.publish(StateEvent::ProfileUpdated { uid, profile });
        Ok(())
    }

    /// Marks the profile step of onboarding complete. Monotone: marking
    /// an already-set flag is a no-op.
    pub fn mark_onboarded(&self) {
        let uid = {
            let mut state = self.state.write();
            if state.flags.is_onboarded {
                return;
            }
            state.flags.is_onboarded = true;
            state.identity.as_ref().map(|i| i.uid.clone())
        };
        self.bus.publish(StateEvent::OnboardingCompleted { uid });
    }

    /// Marks the assessment quiz complete. Monotone.
    pub fn mark_quiz_completed(&self) {
        let uid = {
            let mut state = self.state.write();
            if state.flags.is_quiz_completed {
                return;
            }
            state.flags.is_quiz_completed = true;
            state.identity.as_ref().map(|i| i.uid.clone())
        };
        self.bus.publish(StateEvent::AssessmentCompleted { uid });
    }

    /// Appends a result to the history in call order. Never reorders or
    /// deduplicates; the history is unbounded.
    pub fn append_quiz_result(&self, result: QuizResult) {
        let (uid, history) = {
            let mut state = self.state.write();
            state.quiz_results.push(result);
            (
                state.identity.as_ref().map(|i| i.uid.clone()),
                state.quiz_results.clone(),
            )
        };
        self.bus
            .publish(StateEvent::QuizResultAppended { uid, history });
    }

    /// Overwrites the transient attention score, clamped to [0,100].
    pub fn set_attention_score(&self, score: u8) {
        let score = score.min(MAX_ATTENTION_SCORE);
        let uid = {
            let mut state = self.state.write();
            state.attention_score = score;
            state.identity.as_ref().map(|i| i.uid.clone())
        };
        self.bus.publish(StateEvent::AttentionUpdated { uid, score });
    }

    // ---- identity operations --------------------------------------------

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthIdentity, AppError> {
        let _busy = self.acquire_busy()?;
        let identity = self.provider.login(email, password).await?;
        self.activate_identity(identity.clone());
        Ok(identity)
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        new_profile: NewProfile,
    ) -> Result<AuthIdentity, AppError> {
        validate_email(email)?;
        validate_password(password)?;
        validate_profile_fields(&new_profile.name, &new_profile.learning_preferences)?;

        let _busy = self.acquire_busy()?;
        let identity = self.provider.register(email, password).await?;
        self.activate_identity(identity.clone());

        let profile = new_profile.into_profile(
            identity.uid.clone(),
            identity.email.clone().unwrap_or_else(|| email.to_string()),
        );
        self.set_profile(profile)?;
        Ok(identity)
    }

    pub async fn login_federated(&self) -> Result<AuthIdentity, AppError> {
        let _busy = self.acquire_busy()?;
        let identity = self.provider.login_federated().await?;
        self.activate_identity(identity.clone());
        Ok(identity)
    }

    /// Signs out and clears the in-memory session. Durable data under the
    /// old identity key is retained.
    pub async fn logout(&self) -> Result<(), AppError> {
        let _busy = self.acquire_busy()?;
        self.provider.logout().await?;
        self.clear_session();
        Ok(())
    }

    fn acquire_busy(&self) -> Result<BusyGuard<'_>, AppError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AuthError::Busy.into());
        }
        Ok(BusyGuard { flag: &self.busy })
    }

    /// Central identity transition. A repeated sign-in for the already
    /// active uid is ignored so a provider echo cannot wipe restored
    /// state; a different uid resets every per-identity field before the
    /// mirror rehydrates them.
    pub(crate) fn activate_identity(&self, identity: AuthIdentity) {
        {
            let mut state = self.state.write();
            if state
                .identity
                .as_ref()
                .is_some_and(|current| current.uid == identity.uid)
            {
                debug!(uid = %identity.uid, "identity already active");
                return;
            }
            *state = SessionState {
                identity: Some(identity.clone()),
                ..SessionState::default()
            };
        }
        info!(uid = %identity.uid, "identity activated");
        self.bus.publish(StateEvent::IdentityActivated { identity });
    }

    pub(crate) fn clear_session(&self) {
        let uid = {
            let mut state = self.state.write();
            let uid = state.identity.as_ref().map(|i| i.uid.clone());
            *state = SessionState::default();
            uid
        };
        if let Some(uid) = uid {
            info!(uid = %uid, "session cleared");
            self.bus.publish(StateEvent::IdentityCleared { uid });
        }
    }

    /// Applies fields recovered from durable storage. Dropped if the
    /// active identity changed since the restore was read, so a stale
    /// load can never leak into another identity's session.
    pub fn restore_session(&self, uid: &str, restored: RestoredState) {
        let mut state = self.state.write();
        if state.identity.as_ref().map(|i| i.uid.as_str()) != Some(uid) {
            warn!(uid, "dropping restore for inactive identity");
            return;
        }

        if let Some(profile) = restored.profile {
            state.profile = Some(profile);
        }
        if let Some(results) = restored.quiz_results {
            state.quiz_results = results;
        }
        if let Some(flag) = restored.is_onboarded {
            state.flags.is_onboarded = flag;
        }
        if let Some(flag) = restored.is_quiz_completed {
            state.flags.is_quiz_completed = flag;
        }
        if let Some(score) = restored.attention_score {
            state.attention_score = score.min(MAX_ATTENTION_SCORE);
        }
        debug!(uid, "session restored from storage");
    }

    /// Consumes the provider's identity-changed stream for the process
    /// lifetime, keeping the store in step with external transitions
    /// (e.g. a token refresh establishing a user).
    pub fn spawn_identity_watch(self: &Arc<Self>) -> JoinHandle<()> {
        let store = Arc::clone(self);
        let mut receiver = store.provider.subscribe();
        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(IdentityEvent::SignedIn(identity)) => store.activate_identity(identity),
                    Ok(IdentityEvent::SignedOut) => store.clear_session(),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "identity watch lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

fn validate_profile_fields(
    name: &str,
    preferences: &[crate::model::LearningPreference],
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if preferences.is_empty() {
        return Err(ValidationError::NoLearningPreferences);
    }
    Ok(())
}

fn validate_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.contains(' ') {
        return Err(ValidationError::InvalidEmail);
    }
    let Some((local, domain)) = value.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}
