//! Quiz attempt tracking: answer recording, scoring, and weak-point
//! derivation. Timing is supplied by the caller per answer, so the engine
//! stays deterministic.

pub mod bank;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::QuizResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "MCQ")]
    Mcq,
    TrueFalse,
    ShortAnswer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
}

#[derive(Debug, Clone)]
pub struct AnswerRecord {
    pub question_id: String,
    pub answer: String,
    pub is_correct: bool,
    /// Seconds spent on this question.
    pub time_taken: f64,
}

/// One in-progress quiz run. Answers advance through the questions in
/// order; [`QuizAttempt::finish`] produces the immutable result.
#[derive(Debug)]
pub struct QuizAttempt {
    questions: Vec<QuizQuestion>,
    answers: Vec<AnswerRecord>,
}

impl QuizAttempt {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            answers: Vec::new(),
        }
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.answers.len())
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() >= self.questions.len()
    }

    /// Records the answer for the current question and advances. Returns
    /// whether it was correct, or `None` when the attempt is already
    /// complete.
    pub fn record_answer(&mut self, answer: &str, time_taken: f64) -> Option<bool> {
        let question = self.questions.get(self.answers.len())?;
        let is_correct = answer == question.correct_answer;
        self.answers.push(AnswerRecord {
            question_id: question.id.clone(),
            answer: answer.to_string(),
            is_correct,
            time_taken,
        });
        Some(is_correct)
    }

    /// Builds the final result: score, exact accuracy, total time, and a
    /// weak-point label for every missed question, in question order.
    pub fn finish(&self) -> QuizResult {
        let total_questions = self.questions.len() as u32;
        let score = self.answers.iter().filter(|a| a.is_correct).count() as u32;
        let time_taken = self.answers.iter().map(|a| a.time_taken).sum();

        let weak_points = self
            .answers
            .iter()
            .filter(|a| !a.is_correct)
            .filter_map(|a| {
                self.questions
                    .iter()
                    .find(|q| q.id == a.question_id)
                    .map(|q| weak_point_label(&q.question))
            })
            .collect();

        QuizResult {
            id: Uuid::new_v4().to_string(),
            score,
            total_questions,
            time_taken,
            accuracy: QuizResult::accuracy_of(score, total_questions),
            date: Utc::now(),
            weak_points,
        }
    }
}

/// Free-text weak-point label derived from a missed question: the first
/// three words of its text.
pub fn weak_point_label(question: &str) -> String {
    let prefix: Vec<&str> = question.split_whitespace().take(3).collect();
    format!("Understanding {}...", prefix.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_question_attempt() -> QuizAttempt {
        QuizAttempt::new(vec![
            QuizQuestion {
                id: "1".to_string(),
                question: "What is the primary goal of machine learning?".to_string(),
                options: vec!["a".to_string(), "b".to_string()],
                correct_answer: "a".to_string(),
                kind: QuestionKind::Mcq,
            },
            QuizQuestion {
                id: "2".to_string(),
                question: "Which of these is NOT a programming language?".to_string(),
                options: vec!["True".to_string(), "False".to_string()],
                correct_answer: "False".to_string(),
                kind: QuestionKind::TrueFalse,
            },
        ])
    }

    #[test]
    fn answers_advance_in_order() {
        let mut attempt = two_question_attempt();
        assert_eq!(attempt.current_question().unwrap().id, "1");

        assert_eq!(attempt.record_answer("a", 2.0), Some(true));
        assert_eq!(attempt.current_question().unwrap().id, "2");

        assert_eq!(attempt.record_answer("True", 3.5), Some(false));
        assert!(attempt.is_complete());
        assert_eq!(attempt.record_answer("False", 1.0), None);
    }

    #[test]
    fn finish_scores_and_derives_weak_points() {
        let mut attempt = two_question_attempt();
        attempt.record_answer("a", 2.0);
        attempt.record_answer("True", 3.5);

        let result = attempt.finish();
        assert_eq!(result.score, 1);
        assert_eq!(result.total_questions, 2);
        assert_eq!(result.accuracy, 50.0);
        assert_eq!(result.time_taken, 5.5);
        assert_eq!(
            result.weak_points,
            vec!["Understanding Which of these...".to_string()]
        );
    }

    #[test]
    fn perfect_run_has_no_weak_points() {
        let mut attempt = two_question_attempt();
        attempt.record_answer("a", 1.0);
        attempt.record_answer("False", 1.0);

        let result = attempt.finish();
        assert_eq!(result.score, 2);
        assert_eq!(result.accuracy, 100.0);
        assert!(result.weak_points.is_empty());
    }

    #[test]
    fn label_uses_first_three_words() {
        assert_eq!(
            weak_point_label("What does HTML stand for?"),
            "Understanding What does HTML..."
        );
        assert_eq!(weak_point_label("Short one"), "Understanding Short one...");
    }
}
