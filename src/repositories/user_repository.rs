use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    bson::{doc, to_bson, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{User, UserRole, UserUpdate},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, uid: &str) -> AppResult<Option<User>>;
    async fn update_profile(&self, uid: &str, update: UserUpdate) -> AppResult<User>;
    async fn set_role(&self, uid: &str, role: UserRole) -> AppResult<()>;
    async fn touch_last_login(&self, uid: &str, at: DateTime<Utc>) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("users");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let uid_index = IndexModel::builder()
            .keys(doc! { "uid": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("uid_unique".to_string())
                    .build(),
            )
            .build();
        let role_index = IndexModel::builder()
            .keys(doc! { "role": 1 })
            .options(IndexOptions::builder().name("role".to_string()).build())
            .build();

        self.collection.create_index(uid_index).await?;
        self.collection.create_index(role_index).await?;

        log::info!("Created indexes for users collection");
        Ok(())
    }
}

/// `$set` document for a partial profile update. Only present fields are written.
pub fn profile_update_document(update: &UserUpdate, now: DateTime<Utc>) -> AppResult<Document> {
    let mut set = doc! { "updatedAt": to_bson(&now)? };

    if let Some(display_name) = &update.display_name {
        set.insert("displayName", display_name.as_str());
    }
    if let Some(photo_url) = &update.photo_url {
        set.insert("photoUrl", photo_url.as_str());
    }
    if let Some(department) = &update.department {
        set.insert("metadata.department", department.as_str());
    }
    if let Some(roll_number) = &update.roll_number {
        set.insert("metadata.rollNumber", roll_number.as_str());
    }
    if let Some(employee_id) = &update.employee_id {
        set.insert("metadata.employeeId", employee_id.as_str());
    }

    Ok(set)
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    async fn find_by_id(&self, uid: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "uid": uid }).await?;
        Ok(user)
    }

    async fn update_profile(&self, uid: &str, update: UserUpdate) -> AppResult<User> {
        let set = profile_update_document(&update, Utc::now())?;

        self.collection
            .find_one_and_update(doc! { "uid": uid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn set_role(&self, uid: &str, role: UserRole) -> AppResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "uid": uid },
                doc! { "$set": { "role": role.as_str(), "updatedAt": to_bson(&Utc::now())? } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    async fn touch_last_login(&self, uid: &str, at: DateTime<Utc>) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "uid": uid },
                doc! { "$set": { "metadata.lastLogin": to_bson(&at)? } },
            )
            .await?;
        Ok(())
    }
}
