use bson::doc;
use mongodb::Database;
use swimbuddz_db::models::PaymentIntent;

use super::base::{BaseDao, DaoResult};

pub struct PaymentIntentDao {
    pub base: BaseDao<PaymentIntent>,
}

impl PaymentIntentDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, PaymentIntent::COLLECTION),
        }
    }

    pub async fn find_by_member(&self, member_key: &str) -> DaoResult<Option<PaymentIntent>> {
        self.base.find_one(doc! { "member_key": member_key }).await
    }

    /// Replaces the member's intent; a member has at most one open checkout.
    pub async fn upsert(
        &self,
        member_key: &str,
        purpose: &str,
        reference: Option<&str>,
        checkout_url: Option<&str>,
    ) -> DaoResult<PaymentIntent> {
        self.base
            .upsert_one(
                doc! { "member_key": member_key },
                doc! {
                    "member_key": member_key,
                    "purpose": purpose,
                    "reference": reference,
                    "checkout_url": checkout_url,
                },
            )
            .await
    }

    pub async fn delete_by_member(&self, member_key: &str) -> DaoResult<bool> {
        let deleted = self
            .base
            .hard_delete(doc! { "member_key": member_key })
            .await?;
        Ok(deleted > 0)
    }
}
