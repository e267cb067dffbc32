use async_trait::async_trait;
use chrono::Utc;
use mongodb::{bson::doc, bson::to_bson, options::IndexOptions, Collection, IndexModel};
use uuid::Uuid;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{AuditLogEntry, Notification, StudentAnalytics},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Adds one completed quiz and `score` to the student's totals, creating them if absent.
    async fn record_quiz_completion(&self, student_id: &str, score: f64) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn append(&self, entry: AuditLogEntry) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: Notification) -> AppResult<()>;
}

pub struct MongoAnalyticsRepository {
    collection: Collection<StudentAnalytics>,
}

impl MongoAnalyticsRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("analytics");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let student_index = IndexModel::builder()
            .keys(doc! { "studentId": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("student_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(student_index).await?;
        log::info!("Created indexes for analytics collection");
        Ok(())
    }
}

#[async_trait]
impl AnalyticsRepository for MongoAnalyticsRepository {
    async fn record_quiz_completion(&self, student_id: &str, score: f64) -> AppResult<()> {
        let now = to_bson(&Utc::now())?;

        self.collection
            .update_one(
                doc! { "studentId": student_id },
                doc! {
                    "$inc": { "quizzesCompleted": 1_i64, "totalQuizScore": score },
                    "$set": { "updatedAt": now.clone() },
                    "$setOnInsert": { "id": Uuid::new_v4().to_string(), "createdAt": now }
                },
            )
            .upsert(true)
            .await?;
        Ok(())
    }
}

pub struct MongoAuditLogRepository {
    collection: Collection<AuditLogEntry>,
}

impl MongoAuditLogRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("audit_logs");
        Self { collection }
    }
}

#[async_trait]
impl AuditLogRepository for MongoAuditLogRepository {
    async fn append(&self, entry: AuditLogEntry) -> AppResult<()> {
        self.collection.insert_one(&entry).await?;
        Ok(())
    }
}

pub struct MongoNotificationRepository {
    collection: Collection<Notification>,
}

impl MongoNotificationRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("notifications");
        Self { collection }
    }
}

#[async_trait]
impl NotificationRepository for MongoNotificationRepository {
    async fn create(&self, notification: Notification) -> AppResult<()> {
        self.collection.insert_one(&notification).await?;
        Ok(())
    }
}
