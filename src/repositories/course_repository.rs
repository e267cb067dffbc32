use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Course, CourseUpdate, CourseVisibility},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: Course) -> AppResult<Course>;
    /// Returns soft-deleted courses too; callers decide visibility.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>>;
    /// Non-deleted courses, newest first.
    async fn list(
        &self,
        visibility: CourseVisibility,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<Course>>;
    async fn update(&self, id: &str, update: CourseUpdate) -> AppResult<Course>;
    async fn soft_delete(&self, id: &str) -> AppResult<()>;
    async fn increment_enrollment_count(&self, id: &str) -> AppResult<()>;
}

pub struct MongoCourseRepository {
    collection: Collection<Course>,
}

impl MongoCourseRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("courses");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for courses collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let teacher_index = IndexModel::builder()
            .keys(doc! { "teacherId": 1, "createdAt": -1 })
            .options(IndexOptions::builder().name("teacher_recent".to_string()).build())
            .build();

        let published_index = IndexModel::builder()
            .keys(doc! { "isPublished": 1, "isDeleted": 1, "createdAt": -1 })
            .options(IndexOptions::builder().name("published_recent".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(teacher_index).await?;
        self.collection.create_index(published_index).await?;

        log::info!("Successfully created indexes for courses collection");
        Ok(())
    }
}

pub fn visibility_filter(visibility: &CourseVisibility) -> Document {
    let mut filter = doc! { "isDeleted": { "$ne": true } };
    match visibility {
        CourseVisibility::Published => {
            filter.insert("isPublished", true);
        }
        CourseVisibility::OwnedBy(teacher_id) => {
            filter.insert("teacherId", teacher_id.as_str());
        }
        CourseVisibility::All => {}
    }
    filter
}

pub fn course_update_document(update: &CourseUpdate, now: DateTime<Utc>) -> AppResult<Document> {
    let mut set = doc! { "updatedAt": to_bson(&now)? };

    if let Some(title) = &update.title {
        set.insert("title", title.as_str());
    }
    if let Some(description) = &update.description {
        set.insert("description", description.as_str());
    }
    if let Some(syllabus) = &update.syllabus {
        set.insert("syllabus", syllabus.as_str());
    }
    if let Some(category) = &update.category {
        set.insert("category", category.as_str());
    }
    if let Some(difficulty) = &update.difficulty {
        set.insert("difficulty", to_bson(difficulty)?);
    }
    if let Some(thumbnail) = &update.thumbnail {
        set.insert("thumbnail", thumbnail.as_str());
    }
    if let Some(materials) = &update.materials {
        set.insert("materials", to_bson(materials)?);
    }
    if let Some(is_published) = update.is_published {
        set.insert("isPublished", is_published);
    }

    Ok(set)
}

#[async_trait]
impl CourseRepository for MongoCourseRepository {
    async fn create(&self, course: Course) -> AppResult<Course> {
        self.collection.insert_one(&course).await?;
        Ok(course)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>> {
        let course = self.collection.find_one(doc! { "id": id }).await?;
        Ok(course)
    }

    async fn list(
        &self,
        visibility: CourseVisibility,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<Course>> {
        let courses = self
            .collection
            .find(visibility_filter(&visibility))
            .sort(doc! { "createdAt": -1 })
            .skip(offset)
            .limit(limit as i64)
            .await?
            .try_collect()
            .await?;
        Ok(courses)
    }

    async fn update(&self, id: &str, update: CourseUpdate) -> AppResult<Course> {
        let set = course_update_document(&update, Utc::now())?;

        self.collection
            .find_one_and_update(
                doc! { "id": id, "isDeleted": { "$ne": true } },
                doc! { "$set": set },
            )
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }

    async fn soft_delete(&self, id: &str) -> AppResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "id": id },
                doc! { "$set": { "isDeleted": true, "updatedAt": to_bson(&Utc::now())? } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("Course not found".to_string()));
        }
        Ok(())
    }

    async fn increment_enrollment_count(&self, id: &str) -> AppResult<()> {
        self.collection
            .update_one(doc! { "id": id }, doc! { "$inc": { "enrollmentCount": 1 } })
            .await?;
        Ok(())
    }
}
