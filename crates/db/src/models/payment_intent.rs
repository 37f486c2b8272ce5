use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// An unfinished checkout the member can resume. One document per member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Member id, or the email when the id is unknown.
    pub member_key: String,
    pub purpose: String,
    pub reference: Option<String>,
    pub checkout_url: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl PaymentIntent {
    pub const COLLECTION: &'static str = "payment_intents";
}
