use mongodb::{Database, IndexModel, options::IndexOptions};
use tracing::info;

use crate::models::PaymentIntent;

pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    // Payment intents: one resumable checkout per member
    create_indexes(
        db,
        PaymentIntent::COLLECTION,
        vec![
            index_unique(bson::doc! { "member_key": 1 }),
            index(bson::doc! { "purpose": 1 }),
        ],
    )
    .await?;

    info!("All indexes ensured");
    Ok(())
}

async fn create_indexes(
    db: &Database,
    collection: &str,
    indexes: Vec<IndexModel>,
) -> Result<(), mongodb::error::Error> {
    db.collection::<bson::Document>(collection)
        .create_indexes(indexes)
        .await?;
    info!(collection, "Indexes created");
    Ok(())
}

fn index(keys: bson::Document) -> IndexModel {
    IndexModel::builder().keys(keys).build()
}

fn index_unique(keys: bson::Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}
