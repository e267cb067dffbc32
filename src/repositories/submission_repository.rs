use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Evaluation, Reopen, Submission, SubmissionStatus},
};

pub const ATTEMPT_IN_PROGRESS: &str = "An attempt is already in progress for this quiz";
pub const ATTEMPT_CONFLICT: &str = "A concurrent attempt was recorded for this quiz";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the student already has an
    /// `in_progress` attempt for the same quiz, or an attempt with the same
    /// `attemptNumber`.
    async fn create(&self, submission: Submission) -> AppResult<Submission>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>>;
    async fn find_in_progress(
        &self,
        student_id: &str,
        quiz_id: &str,
    ) -> AppResult<Option<Submission>>;
    async fn count_completed(&self, student_id: &str, quiz_id: &str) -> AppResult<u64>;
    /// Transitions `in_progress -> evaluated`. `None` when the attempt was no longer open.
    async fn record_evaluation(
        &self,
        id: &str,
        evaluation: Evaluation,
    ) -> AppResult<Option<Submission>>;
    /// Transitions `submitted|evaluated -> in_progress`. `None` when the attempt was not completed.
    async fn reopen(&self, id: &str, reopen: Reopen) -> AppResult<Option<Submission>>;
    /// Completed attempts for a quiz, most recently submitted first.
    async fn list_completed(
        &self,
        quiz_id: &str,
        student_id: Option<String>,
    ) -> AppResult<Vec<Submission>>;
}

pub struct MongoSubmissionRepository {
    collection: Collection<Submission>,
}

impl MongoSubmissionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("submissions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for submissions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // At most one open attempt per student and quiz.
        let open_attempt_index = IndexModel::builder()
            .keys(doc! { "studentId": 1, "quizId": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! { "status": "in_progress" })
                    .name("one_open_attempt".to_string())
                    .build(),
            )
            .build();

        // Attempt numbers are claimed once, which caps attempts at `maxAttempts`.
        let attempt_number_index = IndexModel::builder()
            .keys(doc! { "studentId": 1, "quizId": 1, "attemptNumber": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("attempt_number_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_status_index = IndexModel::builder()
            .keys(doc! { "quizId": 1, "status": 1 })
            .options(IndexOptions::builder().name("quiz_status".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(open_attempt_index).await?;
        self.collection.create_index(attempt_number_index).await?;
        self.collection.create_index(quiz_status_index).await?;

        log::info!("Successfully created indexes for submissions collection");
        Ok(())
    }
}

fn completed_statuses() -> Vec<&'static str> {
    vec![
        SubmissionStatus::Submitted.as_str(),
        SubmissionStatus::Evaluated.as_str(),
    ]
}

fn map_conflict(err: mongodb::error::Error, message: &str) -> AppError {
    match AppError::from(err) {
        AppError::AlreadyExists(_) => AppError::AlreadyExists(message.to_string()),
        other => other,
    }
}

pub fn evaluation_update(evaluation: &Evaluation) -> AppResult<Document> {
    Ok(doc! {
        "$set": {
            "status": SubmissionStatus::Evaluated.as_str(),
            "answers": to_bson(&evaluation.answers)?,
            "score": evaluation.score,
            "totalMarks": evaluation.total_marks,
            "percentage": evaluation.percentage,
            "passed": evaluation.passed,
            "submittedAt": to_bson(&evaluation.submitted_at)?,
            "timeTaken": evaluation.time_taken,
            "tabSwitchCount": evaluation.tab_switch_count,
            "fullscreenExits": evaluation.fullscreen_exits,
            "suspiciousActivity": to_bson(&evaluation.suspicious_activity)?,
            "updatedAt": to_bson(&evaluation.submitted_at)?,
        }
    })
}

pub fn reopen_update(reopen: &Reopen) -> AppResult<Document> {
    let mut set = doc! {
        "status": SubmissionStatus::InProgress.as_str(),
        "resumedBy": reopen.resumed_by.as_str(),
        "resumedAt": to_bson(&reopen.resumed_at)?,
        "updatedAt": to_bson(&reopen.resumed_at)?,
    };
    let unset = match &reopen.reason {
        Some(reason) => {
            set.insert("resumeReason", reason.as_str());
            None
        }
        None => Some(doc! { "resumeReason": "" }),
    };

    let mut update = doc! { "$set": set };
    if let Some(unset) = unset {
        update.insert("$unset", unset);
    }
    if reopen.extend_minutes > 0 {
        update.insert("$inc", doc! { "timeLimit": reopen.extend_minutes });
    }
    Ok(update)
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        self.collection
            .insert_one(&submission)
            .await
            .map_err(|e| map_conflict(e, ATTEMPT_CONFLICT))?;
        Ok(submission)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        let submission = self.collection.find_one(doc! { "id": id }).await?;
        Ok(submission)
    }

    async fn find_in_progress(
        &self,
        student_id: &str,
        quiz_id: &str,
    ) -> AppResult<Option<Submission>> {
        let submission = self
            .collection
            .find_one(doc! {
                "studentId": student_id,
                "quizId": quiz_id,
                "status": SubmissionStatus::InProgress.as_str()
            })
            .await?;
        Ok(submission)
    }

    async fn count_completed(&self, student_id: &str, quiz_id: &str) -> AppResult<u64> {
        let count = self
            .collection
            .count_documents(doc! {
                "studentId": student_id,
                "quizId": quiz_id,
                "status": { "$in": completed_statuses() }
            })
            .await?;
        Ok(count)
    }

    async fn record_evaluation(
        &self,
        id: &str,
        evaluation: Evaluation,
    ) -> AppResult<Option<Submission>> {
        let submission = self
            .collection
            .find_one_and_update(
                doc! { "id": id, "status": SubmissionStatus::InProgress.as_str() },
                evaluation_update(&evaluation)?,
            )
            .return_document(ReturnDocument::After)
            .await?;
        Ok(submission)
    }

    async fn reopen(&self, id: &str, reopen: Reopen) -> AppResult<Option<Submission>> {
        let submission = self
            .collection
            .find_one_and_update(
                doc! { "id": id, "status": { "$in": completed_statuses() } },
                reopen_update(&reopen)?,
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| map_conflict(e, ATTEMPT_IN_PROGRESS))?;
        Ok(submission)
    }

    async fn list_completed(
        &self,
        quiz_id: &str,
        student_id: Option<String>,
    ) -> AppResult<Vec<Submission>> {
        let mut filter = doc! {
            "quizId": quiz_id,
            "status": { "$in": completed_statuses() }
        };
        if let Some(student_id) = student_id {
            filter.insert("studentId", student_id);
        }

        let mut submissions: Vec<Submission> =
            self.collection.find(filter).await?.try_collect().await?;
        submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(submissions)
    }
}
