use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Dropped,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub completed_materials: Vec<String>,
    pub last_accessed_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(student_id: &str, course_id: &str) -> Self {
        let now = Utc::now();
        Enrollment {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            enrolled_at: now,
            status: EnrollmentStatus::Active,
            progress: 0.0,
            completed_materials: Vec::new(),
            last_accessed_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EnrollmentStatus::Active
    }
}
