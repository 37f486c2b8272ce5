use bson::{Document, doc};
use mongodb::{Collection, Database, options::ReturnDocument};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DaoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("BSON serialization error: {0}")]
    BsonSer(#[from] bson::ser::Error),
    #[error("Entity not found")]
    NotFound,
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
}

pub type DaoResult<T> = Result<T, DaoError>;

pub struct BaseDao<T: Send + Sync> {
    collection: Collection<T>,
}

impl<T> BaseDao<T>
where
    T: Serialize + for<'de> Deserialize<'de> + Unpin + Send + Sync,
{
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<T>(collection_name),
        }
    }

    pub async fn find_one(&self, filter: Document) -> DaoResult<Option<T>> {
        Ok(self.collection.find_one(filter).await?)
    }

    /// Applies `$set` to the matching document, inserting it when missing.
    /// `updated_at` is always refreshed; `created_at` only on insert.
    pub async fn upsert_one(&self, filter: Document, mut set: Document) -> DaoResult<T> {
        let now = bson::DateTime::now();
        set.insert("updated_at", now);

        let update = doc! {
            "$set": set,
            "$setOnInsert": { "created_at": now },
        };

        let updated = self
            .collection
            .find_one_and_update(filter, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_duplicate_key)?
            .ok_or(DaoError::NotFound)?;

        debug!("Upserted document");
        Ok(updated)
    }

    pub async fn hard_delete(&self, filter: Document) -> DaoResult<u64> {
        let result = self.collection.delete_many(filter).await?;
        Ok(result.deleted_count)
    }
}

fn map_duplicate_key(e: mongodb::error::Error) -> DaoError {
    match *e.kind {
        mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(
            ref write_error,
        )) if write_error.code == 11000 => DaoError::DuplicateKey(write_error.message.clone()),
        mongodb::error::ErrorKind::Command(ref command_error) if command_error.code == 11000 => {
            DaoError::DuplicateKey(command_error.message.clone())
        }
        _ => DaoError::Mongo(e),
    }
}
