use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Quiz, QuizVisibility},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    /// Newest first.
    async fn list(
        &self,
        visibility: QuizVisibility,
        course_id: Option<String>,
        limit: i64,
    ) -> AppResult<Vec<Quiz>>;
    /// Atomically bumps `questionCount` and `totalMarks`, returning the updated quiz.
    async fn record_question_added(&self, id: &str, points: f64) -> AppResult<Quiz>;
    async fn revert_question_added(&self, id: &str, points: f64) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizzes");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let course_index = IndexModel::builder()
            .keys(doc! { "courseId": 1, "createdAt": -1 })
            .options(IndexOptions::builder().name("course_recent".to_string()).build())
            .build();

        let teacher_index = IndexModel::builder()
            .keys(doc! { "teacherId": 1, "createdAt": -1 })
            .options(IndexOptions::builder().name("teacher_recent".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(course_index).await?;
        self.collection.create_index(teacher_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}

pub fn quiz_list_filter(visibility: &QuizVisibility, course_id: Option<&str>) -> Document {
    let mut filter = Document::new();
    match visibility {
        QuizVisibility::All => {
            if let Some(course_id) = course_id {
                filter.insert("courseId", course_id);
            }
        }
        QuizVisibility::OwnedBy(teacher_id) => {
            filter.insert("teacherId", teacher_id.as_str());
            if let Some(course_id) = course_id {
                filter.insert("courseId", course_id);
            }
        }
        QuizVisibility::PublishedInCourses(course_ids) => {
            let allowed: Vec<&str> = course_ids
                .iter()
                .map(String::as_str)
                .filter(|id| course_id.map_or(true, |requested| requested == *id))
                .collect();
            filter.insert("isPublished", true);
            filter.insert("courseId", doc! { "$in": allowed });
        }
    }
    filter
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn list(
        &self,
        visibility: QuizVisibility,
        course_id: Option<String>,
        limit: i64,
    ) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(quiz_list_filter(&visibility, course_id.as_deref()))
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn record_question_added(&self, id: &str, points: f64) -> AppResult<Quiz> {
        self.collection
            .find_one_and_update(
                doc! { "id": id },
                doc! {
                    "$inc": { "questionCount": 1, "totalMarks": points },
                    "$set": { "updatedAt": to_bson(&Utc::now())? }
                },
            )
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))
    }

    async fn revert_question_added(&self, id: &str, points: f64) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "id": id },
                doc! { "$inc": { "questionCount": -1, "totalMarks": -points } },
            )
            .await?;
        Ok(())
    }
}
