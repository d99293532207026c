//! Hardcoded question banks. Content authoring is out of scope; these
//! mirror the shipped assessment and practice sets.

use super::{QuestionKind, QuizQuestion};

fn mcq(id: &str, question: &str, options: &[&str], correct: &str) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        question: question.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct_answer: correct.to_string(),
        kind: QuestionKind::Mcq,
    }
}

fn true_false(id: &str, question: &str, correct: &str) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        question: question.to_string(),
        options: vec!["True".to_string(), "False".to_string()],
        correct_answer: correct.to_string(),
        kind: QuestionKind::TrueFalse,
    }
}

/// The five-question onboarding assessment.
pub fn assessment_questions() -> Vec<QuizQuestion> {
    vec![
        mcq(
            "1",
            "What is the primary goal of machine learning?",
            &[
                "To create computer programs that can think like humans",
                "To enable computers to learn without explicit programming",
                "To replace human workers with robots",
                "To increase computer processing speeds",
            ],
            "To enable computers to learn without explicit programming",
        ),
        mcq(
            "2",
            "Which of these is NOT a programming language?",
            &["Python", "Java", "Linux", "JavaScript"],
            "Linux",
        ),
        mcq(
            "3",
            "What does HTML stand for?",
            &[
                "Hyper Text Markup Language",
                "High Tech Modern Language",
                "Hyper Transfer Markup Language",
                "Home Tool Markup Language",
            ],
            "Hyper Text Markup Language",
        ),
        true_false(
            "4",
            "True or False: The Internet and the World Wide Web are the same thing.",
            "False",
        ),
        mcq(
            "5",
            "What is the main function of an operating system?",
            &[
                "To provide a user interface",
                "To manage hardware resources",
                "To run applications",
                "All of the above",
            ],
            "All of the above",
        ),
    ]
}

/// The seven-question practice quiz offered from the quiz screen.
pub fn practice_questions() -> Vec<QuizQuestion> {
    vec![
        mcq(
            "1",
            "What is the primary goal of machine learning?",
            &[
                "To create computer programs that can think like humans",
                "To enable computers to learn without explicit programming",
                "To replace human workers with robots",
                "To increase computer processing speeds",
            ],
            "To enable computers to learn without explicit programming",
        ),
        mcq(
            "2",
            "Which of these is NOT a supervised learning algorithm?",
            &[
                "Linear Regression",
                "K-means Clustering",
                "Random Forest",
                "Support Vector Machines",
            ],
            "K-means Clustering",
        ),
        true_false(
            "3",
            "True or False: Deep learning is a subset of machine learning.",
            "True",
        ),
        mcq(
            "4",
            "What does CNN stand for in the context of deep learning?",
            &[
                "Computer Neural Network",
                "Convolutional Neural Network",
                "Computational Neural Network",
                "Connected Node Network",
            ],
            "Convolutional Neural Network",
        ),
        mcq(
            "5",
            "Which of the following is NOT a common activation function in neural networks?",
            &[
                "ReLU (Rectified Linear Unit)",
                "Sigmoid",
                "Tanh",
                "Quadratic",
            ],
            "Quadratic",
        ),
        mcq(
            "6",
            "What is the purpose of the backpropagation algorithm in neural networks?",
            &[
                "To calculate the output of the network",
                "To optimize network weights based on error gradient",
                "To generate new training data",
                "To compress the neural network model",
            ],
            "To optimize network weights based on error gradient",
        ),
        true_false(
            "7",
            "True or False: Overfitting occurs when a model learns the training data too well, including its noise and outliers.",
            "True",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banks_have_expected_sizes_and_valid_answers() {
        let assessment = assessment_questions();
        let practice = practice_questions();
        assert_eq!(assessment.len(), 5);
        assert_eq!(practice.len(), 7);

        for question in assessment.iter().chain(practice.iter()) {
            assert!(
                question.options.contains(&question.correct_answer),
                "correct answer missing from options for question {}",
                question.id
            );
        }
    }
}
