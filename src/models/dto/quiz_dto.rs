use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    GradedAnswer, Question, QuestionOption, QuestionType, Quiz, Submission, SubmissionStatus,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionView {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

impl OptionView {
    fn from_option(option: &QuestionOption, reveal_key: bool) -> Self {
        OptionView {
            id: option.id.clone(),
            text: option.text.clone(),
            is_correct: reveal_key.then_some(option.is_correct),
        }
    }
}

/// A question as rendered to a client. Without `reveal_key` the answer
/// markers and explanation are dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    pub points: f64,
    pub options: Vec<OptionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub order: i32,
}

impl QuestionView {
    pub fn from_question(question: &Question, reveal_key: bool) -> Self {
        QuestionView {
            id: question.id.clone(),
            question_type: question.question_type,
            text: question.text.clone(),
            points: question.points,
            options: question
                .options
                .iter()
                .map(|option| OptionView::from_option(option, reveal_key))
                .collect(),
            explanation: if reveal_key {
                question.explanation.clone()
            } else {
                None
            },
            image_url: question.image_url.clone(),
            order: question.order,
        }
    }
}

/// A recorded answer. Grading is attached only once the attempt is
/// completed and the caller may see the key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerView {
    pub question_id: String,
    pub selected_options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_earned: Option<f64>,
}

impl AnswerView {
    fn from_answer(answer: &GradedAnswer, reveal_grading: bool) -> Self {
        AnswerView {
            question_id: answer.question_id.clone(),
            selected_options: answer.selected_options.clone(),
            text_answer: answer.text_answer.clone(),
            is_correct: reveal_grading.then_some(answer.is_correct),
            points_earned: reveal_grading.then_some(answer.points_earned),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptView {
    pub id: String,
    pub quiz_id: String,
    pub student_id: String,
    pub course_id: String,
    pub attempt_number: i32,
    pub status: SubmissionStatus,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    pub time_limit: i32,
    pub time_taken: i32,
    pub questions: Vec<QuestionView>,
    pub answers: Vec<AnswerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub total_marks: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
    pub tab_switch_count: i32,
    pub fullscreen_exits: i32,
    pub suspicious_activity: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resumed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resumed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_reason: Option<String>,
}

impl AttemptView {
    /// Keys and grades are never revealed while the attempt is still open,
    /// including one reopened after an earlier evaluation.
    pub fn from_submission(submission: &Submission, reveal_key: bool) -> Self {
        let graded = submission.status.is_completed();
        let reveal_key = reveal_key && graded;

        AttemptView {
            id: submission.id.clone(),
            quiz_id: submission.quiz_id.clone(),
            student_id: submission.student_id.clone(),
            course_id: submission.course_id.clone(),
            attempt_number: submission.attempt_number,
            status: submission.status,
            started_at: submission.started_at,
            submitted_at: submission.submitted_at,
            time_limit: submission.time_limit,
            time_taken: submission.time_taken,
            questions: submission
                .questions
                .iter()
                .map(|question| QuestionView::from_question(question, reveal_key))
                .collect(),
            answers: submission
                .answers
                .iter()
                .map(|answer| AnswerView::from_answer(answer, reveal_key))
                .collect(),
            score: graded.then_some(submission.score),
            total_marks: submission.total_marks,
            percentage: graded.then_some(submission.percentage),
            passed: graded.then_some(submission.passed),
            tab_switch_count: submission.tab_switch_count,
            fullscreen_exits: submission.fullscreen_exits,
            suspicious_activity: submission.suspicious_activity.clone(),
            resumed_by: submission.resumed_by.clone(),
            resumed_at: submission.resumed_at,
            resume_reason: submission.resume_reason.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheatingPrevention {
    pub prevent_tab_switch: bool,
    pub max_tab_switches: i32,
    pub require_fullscreen: bool,
    pub disable_copy_paste: bool,
    pub enable_proctoring: bool,
}

impl From<&Quiz> for CheatingPrevention {
    fn from(quiz: &Quiz) -> Self {
        CheatingPrevention {
            prevent_tab_switch: quiz.prevent_tab_switch,
            max_tab_switches: quiz.max_tab_switches,
            require_fullscreen: quiz.require_fullscreen,
            disable_copy_paste: quiz.disable_copy_paste,
            enable_proctoring: quiz.enable_proctoring,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAttemptResponse {
    pub submission: AttemptView,
    pub resumed: bool,
    pub cheating_prevention: CheatingPrevention,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttemptResponse {
    pub submission_id: String,
    pub score: f64,
    pub total_marks: f64,
    pub percentage: f64,
    pub passed: bool,
    pub time_taken: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<GradedAnswer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspicious_activity: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAttemptResponse {
    pub submission_id: String,
    pub extended_time: i32,
    pub new_time_limit: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    #[serde(flatten)]
    pub submission: AttemptView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStatistics {
    pub total_submissions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_passed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_failed: Option<usize>,
}

impl QuizStatistics {
    pub fn count_only(submissions: &[Submission]) -> Self {
        QuizStatistics {
            total_submissions: submissions.len(),
            average_score: None,
            pass_rate: None,
            total_passed: None,
            total_failed: None,
        }
    }

    pub fn summarize(submissions: &[Submission]) -> Self {
        let total = submissions.len();
        let passed = submissions.iter().filter(|s| s.passed).count();
        let score_sum: f64 = submissions.iter().map(|s| s.score).sum();

        let (average_score, pass_rate) = if total == 0 {
            (0.0, 0.0)
        } else {
            (
                score_sum / total as f64,
                passed as f64 / total as f64 * 100.0,
            )
        };

        QuizStatistics {
            total_submissions: total,
            average_score: Some(average_score),
            pass_rate: Some(pass_rate),
            total_passed: Some(passed),
            total_failed: Some(total - passed),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResults {
    pub submissions: Vec<SubmissionResult>,
    pub statistics: QuizStatistics,
}

/// A quiz with its questions; keys are present only for staff.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDetail {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizList {
    pub quizzes: Vec<Quiz>,
}
