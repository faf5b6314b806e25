use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Shape of a review, selected by the eligibility engine: tourists review a
/// provider's service or a catalog product, providers review tourists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewType {
    Service,
    Tourist,
    Product,
}

/// Reviews start unapproved and only show publicly once an administrator
/// approves them. `target_id` holds the provider or tourist being reviewed;
/// product reviews carry the product name in `target_product` instead.
#[derive(Debug, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub review_type: ReviewType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_product: Option<String>,
    pub reviewer_id: ObjectId,
    pub rating: u8,
    pub comment: String,
    pub approved: bool,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewInput {
    pub provider_id: Option<String>,
    pub tourist_id: Option<String>,
    pub product: Option<String>,
    pub rating: u8,
    pub comment: String,
}
