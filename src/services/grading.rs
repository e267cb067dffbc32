use std::collections::HashSet;

use crate::models::{
    domain::{GradedAnswer, Question, Quiz},
    dto::request::AnswerInput,
};

pub const FLAG_TAB_SWITCHING: &str = "Excessive tab switching detected";
pub const FLAG_FULLSCREEN_EXIT: &str = "Exited fullscreen mode";
pub const FLAG_TIME_LIMIT: &str = "Time limit exceeded";

#[derive(Debug, Clone, PartialEq)]
pub struct GradeOutcome {
    pub answers: Vec<GradedAnswer>,
    pub score: f64,
}

/// Grade submitted answers against the keyed question snapshot.
///
/// Answers for questions outside the snapshot are dropped, and only the first
/// answer per question counts. Subjective questions are recorded with zero
/// points for manual grading.
pub fn grade_answers(questions: &[Question], submitted: &[AnswerInput]) -> GradeOutcome {
    let mut seen = HashSet::new();
    let mut answers = Vec::with_capacity(submitted.len());
    let mut score = 0.0;

    for answer in submitted {
        let Some(question) = questions.iter().find(|q| q.id == answer.question_id) else {
            continue;
        };
        if !seen.insert(question.id.as_str()) {
            continue;
        }

        let is_correct =
            question.question_type.is_objective() && is_exact_match(question, &answer.selected_options);
        let points_earned = if is_correct { question.points } else { 0.0 };
        score += points_earned;

        answers.push(GradedAnswer {
            question_id: question.id.clone(),
            selected_options: answer.selected_options.clone(),
            text_answer: answer.text_answer.clone(),
            is_correct,
            points_earned,
        });
    }

    GradeOutcome { answers, score }
}

/// Correct iff the selected set equals the correct set exactly.
pub fn is_exact_match(question: &Question, selected: &[String]) -> bool {
    let correct: HashSet<&str> = question.correct_option_ids().collect();
    if correct.is_empty() {
        return false;
    }
    let selected: HashSet<&str> = selected.iter().map(String::as_str).collect();
    selected == correct
}

pub fn percentage(score: f64, total_marks: f64) -> f64 {
    if total_marks > 0.0 {
        score / total_marks * 100.0
    } else {
        0.0
    }
}

pub fn passed(score: f64, passing_marks: f64) -> bool {
    score >= passing_marks
}

pub fn suspicious_activity(
    quiz: &Quiz,
    tab_switches: i32,
    fullscreen_exits: i32,
    timed_out: bool,
) -> Vec<String> {
    let mut flags = Vec::new();

    if quiz.prevent_tab_switch && tab_switches > quiz.max_tab_switches {
        flags.push(FLAG_TAB_SWITCHING.to_string());
    }
    if quiz.require_fullscreen && fullscreen_exits > 0 {
        flags.push(FLAG_FULLSCREEN_EXIT.to_string());
    }
    if timed_out {
        flags.push(FLAG_TIME_LIMIT.to_string());
    }

    flags
}
