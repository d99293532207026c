//! Pure routing predicates over session state. These decide which screen
//! a navigation surface should render; they perform no navigation
//! themselves.

/// Logical routes of the application surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Login,
    Register,
    Onboarding,
    Dashboard,
    AiTutor,
    AiTutorSession,
    ConversationalAi,
    Quiz,
    QuizSession,
    NotFound,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Index => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Onboarding => "/onboarding",
            Route::Dashboard => "/dashboard",
            Route::AiTutor => "/ai-tutor",
            Route::AiTutorSession => "/ai-tutor/session",
            Route::ConversationalAi => "/conversational-ai",
            Route::Quiz => "/quiz",
            Route::QuizSession => "/quiz/session",
            Route::NotFound => "/404",
        }
    }

    /// Catch-all: anything unrecognized resolves to the not-found route.
    pub fn from_path(path: &str) -> Route {
        match path {
            "/" => Route::Index,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/onboarding" => Route::Onboarding,
            "/dashboard" => Route::Dashboard,
            "/ai-tutor" => Route::AiTutor,
            "/ai-tutor/session" => Route::AiTutorSession,
            "/conversational-ai" => Route::ConversationalAi,
            "/quiz" => Route::Quiz,
            "/quiz/session" => Route::QuizSession,
            _ => Route::NotFound,
        }
    }
}

/// The slice of session state the guards read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuardState {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub is_onboarded: bool,
    pub is_quiz_completed: bool,
}

impl GuardState {
    fn fully_onboarded(&self) -> bool {
        self.is_onboarded && self.is_quiz_completed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Route),
    /// Identity is still resolving; render a neutral waiting state and
    /// make no redirect decision (prevents redirect flicker).
    Pending,
}

/// Guard for the main application screens (dashboard, tutor, quiz).
pub fn protected(state: GuardState) -> GuardDecision {
    if state.is_loading {
        return GuardDecision::Pending;
    }
    if !state.is_authenticated {
        return GuardDecision::Redirect(Route::Login);
    }
    if !state.fully_onboarded() {
        return GuardDecision::Redirect(Route::Onboarding);
    }
    GuardDecision::Allow
}

/// Guard for the login/register screens.
pub fn auth_only(state: GuardState) -> GuardDecision {
    if state.is_loading {
        return GuardDecision::Pending;
    }
    if state.is_authenticated {
        return GuardDecision::Redirect(Route::Dashboard);
    }
    GuardDecision::Allow
}

/// Guard for the onboarding flow.
pub fn onboarding_only(state: GuardState) -> GuardDecision {
    if state.is_loading {
        return GuardDecision::Pending;
    }
    if !state.is_authenticated {
        return GuardDecision::Redirect(Route::Login);
    }
    if state.fully_onboarded() {
        return GuardDecision::Redirect(Route::Dashboard);
    }
    GuardDecision::Allow
}
