use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Enrollment,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the student already has an enrollment in the course.
    async fn create(&self, enrollment: Enrollment) -> AppResult<Enrollment>;
    async fn find(&self, student_id: &str, course_id: &str) -> AppResult<Option<Enrollment>>;
    async fn find_active(&self, student_id: &str, course_id: &str)
        -> AppResult<Option<Enrollment>>;
    /// Newest first.
    async fn list_for_student(&self, student_id: &str) -> AppResult<Vec<Enrollment>>;
    async fn active_course_ids(&self, student_id: &str) -> AppResult<Vec<String>>;
}

pub struct MongoEnrollmentRepository {
    collection: Collection<Enrollment>,
}

impl MongoEnrollmentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("enrollments");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let student_course_index = IndexModel::builder()
            .keys(doc! { "studentId": 1, "courseId": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("student_course_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(student_course_index).await?;

        log::info!("Created indexes for enrollments collection");
        Ok(())
    }
}

#[async_trait]
impl EnrollmentRepository for MongoEnrollmentRepository {
    async fn create(&self, enrollment: Enrollment) -> AppResult<Enrollment> {
        self.collection
            .insert_one(&enrollment)
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::AlreadyExists(_) => {
                    AppError::AlreadyExists("Already enrolled in this course".to_string())
                }
                other => other,
            })?;
        Ok(enrollment)
    }

    async fn find(&self, student_id: &str, course_id: &str) -> AppResult<Option<Enrollment>> {
        let enrollment = self
            .collection
            .find_one(doc! { "studentId": student_id, "courseId": course_id })
            .await?;
        Ok(enrollment)
    }

    async fn find_active(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> AppResult<Option<Enrollment>> {
        let enrollment = self
            .collection
            .find_one(doc! {
                "studentId": student_id,
                "courseId": course_id,
                "status": "active"
            })
            .await?;
        Ok(enrollment)
    }

    async fn list_for_student(&self, student_id: &str) -> AppResult<Vec<Enrollment>> {
        let enrollments = self
            .collection
            .find(doc! { "studentId": student_id })
            .sort(doc! { "enrolledAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(enrollments)
    }

    async fn active_course_ids(&self, student_id: &str) -> AppResult<Vec<String>> {
        let enrollments: Vec<Enrollment> = self
            .collection
            .find(doc! { "studentId": student_id, "status": "active" })
            .await?
            .try_collect()
            .await?;
        Ok(enrollments.into_iter().map(|e| e.course_id).collect())
    }
}
