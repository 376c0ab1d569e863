//! Set-equality grading for exam submissions.
//!
//! A quiz is correct only when the submitted option indices match the
//! stored correct set exactly. Order and duplicates are irrelevant, which
//! is why both sides are collapsed into `HashSet`s before comparison.

use std::collections::{HashMap, HashSet};

use crate::models::quiz;

/// Outcome of grading one submission against an exam's quiz set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grading {
    /// Percentage in `[0.0, 100.0]`, rounded half-up to two decimals.
    pub score: f64,
    pub correct: i32,
    pub incorrect: i32,
}

impl Grading {
    fn empty() -> Self {
        Grading {
            score: 0.0,
            correct: 0,
            incorrect: 0,
        }
    }
}

/// Grades `answers` against `quizzes`.
///
/// Quizzes absent from the answer map are graded as an empty selection.
/// Entries in the map for quizzes outside the exam are ignored, so stale
/// client state cannot inflate a score.
pub fn grade(quizzes: &[quiz::Model], answers: &HashMap<i64, Vec<i64>>) -> Grading {
    let total = quizzes.len();
    if total == 0 {
        return Grading::empty();
    }

    let mut correct = 0usize;
    for quiz in quizzes {
        let expected: HashSet<i64> = quiz.decoded_correct_answers().into_iter().collect();
        let given: HashSet<i64> = answers
            .get(&quiz.id)
            .map(|picks| picks.iter().copied().collect())
            .unwrap_or_default();

        if expected == given {
            correct += 1;
        }
    }

    let incorrect = total - correct;
    let score = ((correct as f64 / total as f64) * 10000.0).round() / 100.0;

    Grading {
        score,
        correct: correct as i32,
        incorrect: incorrect as i32,
    }
}
