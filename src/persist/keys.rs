//! Storage key scheme: `<field>_<identityId>` once an identity is
//! active, the bare field name before one is known (legacy keys).

pub const FIELD_PROFILE: &str = "user";
pub const FIELD_QUIZ_RESULTS: &str = "quizResults";
pub const FIELD_ONBOARDED: &str = "isOnboarded";
pub const FIELD_QUIZ_COMPLETED: &str = "isOnboardingQuizCompleted";
pub const FIELD_ATTENTION: &str = "attentionScore";

pub fn namespaced(field: &str, uid: Option<&str>) -> String {
    match uid {
        Some(uid) => format!("{field}_{uid}"),
        None => field.to_string(),
    }
}

pub fn profile_key(uid: Option<&str>) -> String {
    namespaced(FIELD_PROFILE, uid)
}

pub fn quiz_results_key(uid: Option<&str>) -> String {
    namespaced(FIELD_QUIZ_RESULTS, uid)
}

pub fn onboarded_key(uid: Option<&str>) -> String {
    namespaced(FIELD_ONBOARDED, uid)
}

pub fn quiz_completed_key(uid: Option<&str>) -> String {
    namespaced(FIELD_QUIZ_COMPLETED, uid)
}

pub fn attention_key(uid: Option<&str>) -> String {
    namespaced(FIELD_ATTENTION, uid)
}
