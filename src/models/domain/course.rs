use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseMaterial {
    pub title: String,
    #[serde(rename = "type")]
    pub material_type: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub syllabus: String,
    pub teacher_id: String,
    pub teacher_name: String,
    pub category: String,
    pub difficulty: CourseDifficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub materials: Vec<CourseMaterial>,
    #[serde(default)]
    pub enrollment_count: i64,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial course update. Every field is applied only when present,
/// so `is_published: Some(false)` unpublishes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub syllabus: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<CourseDifficulty>,
    pub thumbnail: Option<String>,
    pub materials: Option<Vec<CourseMaterial>>,
    pub is_published: Option<bool>,
}

impl CourseUpdate {
    pub fn is_empty(&self) -> bool {
        *self == CourseUpdate::default()
    }
}

/// Visibility filter applied when listing courses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CourseVisibility {
    Published,
    OwnedBy(String),
    All,
}
