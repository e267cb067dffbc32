use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{question::Question, quiz::Quiz};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    InProgress,
    Submitted,
    Evaluated,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::InProgress => "in_progress",
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Evaluated => "evaluated",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(
            self,
            SubmissionStatus::Submitted | SubmissionStatus::Evaluated
        )
    }
}

/// An answer as recorded after grading.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedAnswer {
    pub question_id: String,
    #[serde(default)]
    pub selected_options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_answer: Option<String>,
    pub is_correct: bool,
    pub points_earned: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub quiz_id: String,
    pub student_id: String,
    pub course_id: String,
    pub attempt_number: i32,
    pub status: SubmissionStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Whole minutes between start and submission.
    #[serde(default)]
    pub time_taken: i32,
    /// Minutes allowed for this attempt. Starts at the quiz duration.
    pub time_limit: i32,
    /// Snapshot in presentation order, answer keys included.
    pub questions: Vec<Question>,
    #[serde(default)]
    pub answers: Vec<GradedAnswer>,
    #[serde(default)]
    pub score: f64,
    pub total_marks: f64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub passed: bool,
    #[serde(default)]
    pub tab_switch_count: i32,
    #[serde(default)]
    pub fullscreen_exits: i32,
    #[serde(default)]
    pub suspicious_activity: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resumed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resumed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    pub fn start(
        quiz: &Quiz,
        student_id: &str,
        attempt_number: i32,
        questions: Vec<Question>,
    ) -> Self {
        let now = Utc::now();
        Submission {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz.id.clone(),
            student_id: student_id.to_string(),
            course_id: quiz.course_id.clone(),
            attempt_number,
            status: SubmissionStatus::InProgress,
            started_at: now,
            submitted_at: None,
            time_taken: 0,
            time_limit: quiz.duration,
            questions,
            answers: Vec::new(),
            score: 0.0,
            total_marks: quiz.total_marks,
            percentage: 0.0,
            passed: false,
            tab_switch_count: 0,
            fullscreen_exits: 0,
            suspicious_activity: Vec::new(),
            resumed_by: None,
            resumed_at: None,
            resume_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_evaluation(&mut self, evaluation: &Evaluation) {
        self.status = SubmissionStatus::Evaluated;
        self.answers = evaluation.answers.clone();
        self.score = evaluation.score;
        self.total_marks = evaluation.total_marks;
        self.percentage = evaluation.percentage;
        self.passed = evaluation.passed;
        self.submitted_at = Some(evaluation.submitted_at);
        self.time_taken = evaluation.time_taken;
        self.tab_switch_count = evaluation.tab_switch_count;
        self.fullscreen_exits = evaluation.fullscreen_exits;
        self.suspicious_activity = evaluation.suspicious_activity.clone();
        self.updated_at = evaluation.submitted_at;
    }

    pub fn apply_reopen(&mut self, reopen: &Reopen) {
        self.status = SubmissionStatus::InProgress;
        self.resumed_by = Some(reopen.resumed_by.clone());
        self.resumed_at = Some(reopen.resumed_at);
        self.resume_reason = reopen.reason.clone();
        self.time_limit = self.time_limit.saturating_add(reopen.extend_minutes);
        self.updated_at = reopen.resumed_at;
    }
}

/// Outcome of grading, written in a single guarded transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub answers: Vec<GradedAnswer>,
    pub score: f64,
    /// Quiz total at submission time; the percentage is measured against it.
    pub total_marks: f64,
    pub percentage: f64,
    pub passed: bool,
    pub submitted_at: DateTime<Utc>,
    pub time_taken: i32,
    pub tab_switch_count: i32,
    pub fullscreen_exits: i32,
    pub suspicious_activity: Vec<String>,
}

/// Teacher-initiated reopening of a completed attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reopen {
    pub resumed_by: String,
    pub resumed_at: DateTime<Utc>,
    pub reason: Option<String>,
    pub extend_minutes: i32,
}
