use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-student running totals, maintained with atomic increments.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAnalytics {
    pub id: String,
    pub student_id: String,
    #[serde(default)]
    pub quizzes_completed: i64,
    #[serde(default)]
    pub total_quiz_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    pub action: String,
    pub submission_id: String,
    pub quiz_id: String,
    pub student_id: String,
    pub actor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub extend_time: i32,
    pub timestamp: DateTime<Utc>,
}

impl AuditLogEntry {
    pub const QUIZ_RESUMED: &'static str = "quiz_resumed";
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn quiz_resumed(student_id: &str, quiz_id: &str, quiz_title: &str) -> Self {
        Notification {
            id: Uuid::new_v4().to_string(),
            user_id: student_id.to_string(),
            notification_type: AuditLogEntry::QUIZ_RESUMED.to_string(),
            title: "Quiz Resumed".to_string(),
            message: format!("Your teacher has resumed your quiz: {}", quiz_title),
            link: Some(format!("/quizzes/{}", quiz_id)),
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
