use async_trait::async_trait;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Credential, UserRole},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn create(&self, credential: Credential) -> AppResult<Credential>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Credential>>;
    async fn set_role(&self, uid: &str, role: UserRole) -> AppResult<()>;
    async fn delete(&self, uid: &str) -> AppResult<()>;
}

pub struct MongoCredentialRepository {
    collection: Collection<Credential>,
}

impl MongoCredentialRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("credentials");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        for field in ["uid", "email"] {
            let mut keys = Document::new();
            keys.insert(field, 1);

            let model = IndexModel::builder()
                .keys(keys)
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name(format!("{}_unique", field))
                        .build(),
                )
                .build();
            self.collection.create_index(model).await?;
        }

        log::info!("Created indexes for credentials collection");
        Ok(())
    }
}

#[async_trait]
impl CredentialRepository for MongoCredentialRepository {
    async fn create(&self, credential: Credential) -> AppResult<Credential> {
        self.collection.insert_one(&credential).await?;
        Ok(credential)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Credential>> {
        let credential = self.collection.find_one(doc! { "email": email }).await?;
        Ok(credential)
    }

    async fn set_role(&self, uid: &str, role: UserRole) -> AppResult<()> {
        let result = self
            .collection
            .update_one(doc! { "uid": uid }, doc! { "$set": { "role": role.as_str() } })
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("Account not found".to_string()));
        }
        Ok(())
    }

    async fn delete(&self, uid: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "uid": uid }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound("Account not found".to_string()));
        }
        Ok(())
    }
}
