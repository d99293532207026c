use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Education level selected during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegreeType {
    School,
    College,
    University,
}

/// VARK-style learning preference tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LearningPreference {
    Visual,
    Auditory,
    Reading,
    Writing,
}

/// User-entered profile, distinct from the authentication identity.
/// Created at registration or first federated login and mutated only by
/// the onboarding flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub degree_type: DegreeType,
    pub learning_preferences: Vec<LearningPreference>,
}

/// The authenticated principal as known to the identity provider.
/// The session store holds a read-only copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthIdentity {
    pub uid: String,
    pub email: Option<String>,
}

/// Outcome of one completed quiz attempt. Immutable once created;
/// appended to the history in call order and never edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: String,
    pub score: u32,
    pub total_questions: u32,
    /// Total elapsed time over all questions, in seconds.
    pub time_taken: f64,
    pub accuracy: f64,
    pub date: DateTime<Utc>,
    pub weak_points: Vec<String>,
}

impl QuizResult {
    /// Accuracy is derived exactly as score/total × 100.
    pub fn accuracy_of(score: u32, total_questions: u32) -> f64 {
        if total_questions == 0 {
            return 0.0;
        }
        (score as f64 / total_questions as f64) * 100.0
    }
}

/// The two one-way gates of the onboarding flow. Each flips to true at
/// most once per identity; only logout resets them (in memory).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingFlags {
    pub is_onboarded: bool,
    pub is_quiz_completed: bool,
}

impl OnboardingFlags {
    pub fn is_complete(&self) -> bool {
        self.is_onboarded && self.is_quiz_completed
    }
}

/// Profile fields collected by the onboarding form, before an identity
/// exists to attach them to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub name: String,
    pub degree_type: DegreeType,
    pub learning_preferences: Vec<LearningPreference>,
}

impl NewProfile {
    pub fn into_profile(self, uid: String, email: String) -> UserProfile {
        UserProfile {
            uid,
            email,
            name: self.name,
            degree_type: self.degree_type,
            learning_preferences: self.learning_preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_is_exact_ratio() {
        assert_eq!(QuizResult::accuracy_of(5, 7), (5.0 / 7.0) * 100.0);
        assert_eq!(QuizResult::accuracy_of(7, 7), 100.0);
        assert_eq!(QuizResult::accuracy_of(0, 7), 0.0);
        assert_eq!(QuizResult::accuracy_of(0, 0), 0.0);
    }

    #[test]
    fn profile_serializes_camel_case() {
        let profile = UserProfile {
            uid: "u1".to_string(),
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
            degree_type: DegreeType::College,
            learning_preferences: vec![LearningPreference::Visual],
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["degreeType"], "College");
        assert_eq!(json["learningPreferences"][0], "Visual");
    }
}
