//! Store + persistence mirror behavior over in-memory storage: key
//! namespacing across identities, rehydration, logout retention, and
//! fail-soft handling of corrupted values.

mod common;

use mindtutor::model::{DegreeType, LearningPreference, NewProfile, QuizResult, UserProfile};
use mindtutor::persist::{get_json, Storage};
use mindtutor::quiz::{bank, QuizAttempt};

fn profile_for(uid: &str, email: &str) -> UserProfile {
    UserProfile {
        uid: uid.to_string(),
        email: email.to_string(),
        name: "Ana".to_string(),
        degree_type: DegreeType::College,
        learning_preferences: vec![LearningPreference::Visual],
    }
}

fn finished_result() -> QuizResult {
    let mut attempt = QuizAttempt::new(bank::assessment_questions());
    while let Some(question) = attempt.current_question() {
        let answer = question.correct_answer.clone();
        attempt.record_answer(&answer, 2.0);
    }
    attempt.finish()
}

#[tokio::test]
async fn profile_round_trips_through_the_mirror() {
    let mut h = common::harness();

    let identity = h.provider.seed_account("ana@example.com", "secret123");
    h.store.login("ana@example.com", "secret123").await.unwrap();
    h.pump();

    let written = profile_for(&identity.uid, "ana@example.com");
    h.store.set_profile(written.clone()).unwrap();
    h.pump();

    // sign out, sign back in as the same identity: the mirror rehydrates
    h.store.logout().await.unwrap();
    h.pump();
    h.store.login("ana@example.com", "secret123").await.unwrap();
    h.pump();

    assert_eq!(h.store.snapshot().profile, Some(written));
}

#[tokio::test]
async fn data_never_leaks_across_identities() {
    let mut h = common::harness();

    let ana = h.provider.seed_account("ana@example.com", "secret123");
    h.provider.seed_account("ben@example.com", "secret456");

    h.store.login("ana@example.com", "secret123").await.unwrap();
    h.pump();
    h.store
        .set_profile(profile_for(&ana.uid, "ana@example.com"))
        .unwrap();
    h.store.append_quiz_result(finished_result());
    h.store.mark_onboarded();
    h.pump();

    h.store.logout().await.unwrap();
    h.pump();

    h.store.login("ben@example.com", "secret456").await.unwrap();
    h.pump();

    // nothing of Ana's session is visible while Ben is active
    let state = h.store.snapshot();
    assert!(state.profile.is_none());
    assert!(state.quiz_results.is_empty());
    assert!(!state.flags.is_onboarded);

    // and Ana's durable data is still there, under her own keys
    let stored: Option<UserProfile> =
        get_json(h.storage.as_ref(), &format!("user_{}", ana.uid)).unwrap();
    assert_eq!(stored.unwrap().email, "ana@example.com");
}

#[tokio::test]
async fn logout_retains_durable_history() {
    let mut h = common::harness();

    let identity = h.provider.seed_account("ana@example.com", "secret123");
    h.store.login("ana@example.com", "secret123").await.unwrap();
    h.pump();

    for _ in 0..3 {
        h.store.append_quiz_result(finished_result());
    }
    h.pump();

    h.store.logout().await.unwrap();
    h.pump();

    assert!(h.store.snapshot().quiz_results.is_empty());

    let stored: Option<Vec<QuizResult>> =
        get_json(h.storage.as_ref(), &format!("quizResults_{}", identity.uid)).unwrap();
    assert_eq!(stored.unwrap().len(), 3);
}

#[tokio::test]
async fn onboarding_flags_survive_reconnect() {
    let mut h = common::harness();

    h.provider.seed_account("ana@example.com", "secret123");
    h.store.login("ana@example.com", "secret123").await.unwrap();
    h.pump();

    h.store.mark_onboarded();
    h.store.mark_quiz_completed();
    h.pump();

    h.store.logout().await.unwrap();
    h.pump();
    h.store.login("ana@example.com", "secret123").await.unwrap();
    h.pump();

    assert!(h.store.snapshot().flags.is_complete());
}

#[tokio::test]
async fn corrupted_stored_value_falls_back_to_default() {
    let mut h = common::harness();

    let identity = h.provider.seed_account("ana@example.com", "secret123");
    h.storage
        .set(&format!("user_{}", identity.uid), "{not valid json")
        .unwrap();

    h.store.login("ana@example.com", "secret123").await.unwrap();
    h.pump();

    // the bad key is treated as missing; the session still came up
    let state = h.store.snapshot();
    assert!(state.profile.is_none());
    assert!(state.identity.is_some());
}

#[tokio::test]
async fn writes_before_sign_in_use_legacy_keys() {
    let mut h = common::harness();

    h.store.set_attention_score(42);
    h.pump();

    let stored: Option<u8> = get_json(h.storage.as_ref(), "attentionScore").unwrap();
    assert_eq!(stored, Some(42));
}

#[tokio::test]
async fn registration_persists_the_initial_profile() {
    let mut h = common::harness();

    let identity = h
        .store
        .register(
            "ana@example.com",
            "secret123",
            NewProfile {
                name: "Ana".to_string(),
                degree_type: DegreeType::University,
                learning_preferences: vec![LearningPreference::Writing],
            },
        )
        .await
        .unwrap();
    h.pump();

    let stored: Option<UserProfile> =
        get_json(h.storage.as_ref(), &format!("user_{}", identity.uid)).unwrap();
    assert_eq!(stored.unwrap().name, "Ana");
}
