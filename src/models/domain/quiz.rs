use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_ATTEMPTS: i32 = 1;
pub const DEFAULT_MAX_TAB_SWITCHES: i32 = 3;

fn default_max_attempts() -> i32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub course_id: String,
    pub teacher_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructions: String,
    /// Minutes allowed per attempt.
    pub duration: i32,
    pub total_marks: f64,
    pub passing_marks: f64,
    #[serde(default)]
    pub question_count: i32,
    /// `0` means unlimited. Documents without the field allow a single attempt.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default = "default_true")]
    pub show_results_after_submit: bool,
    #[serde(default)]
    pub allow_review: bool,
    #[serde(default)]
    pub shuffle_questions: bool,
    #[serde(default)]
    pub randomize_question_order: bool,
    #[serde(default)]
    pub shuffle_options: bool,
    #[serde(default)]
    pub prevent_tab_switch: bool,
    #[serde(default)]
    pub max_tab_switches: i32,
    #[serde(default)]
    pub require_fullscreen: bool,
    #[serde(default)]
    pub disable_copy_paste: bool,
    #[serde(default)]
    pub enable_proctoring: bool,
    #[serde(default = "default_true")]
    pub lock_after_submit: bool,
    #[serde(default)]
    pub allow_teacher_resume: bool,
    #[serde(default)]
    pub allow_teacher_extend_time: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.teacher_id == user_id
    }

    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| now > deadline)
    }

    pub fn should_shuffle_questions(&self) -> bool {
        self.shuffle_questions || self.randomize_question_order
    }

    pub fn attempts_exhausted(&self, completed_attempts: u64) -> bool {
        self.max_attempts > 0 && completed_attempts >= self.max_attempts as u64
    }
}

/// Which quizzes a caller may see when listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizVisibility {
    All,
    OwnedBy(String),
    PublishedInCourses(Vec<String>),
}
