use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Closed set of actor roles. Role checks are exhaustive matches so that
/// adding a role is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tourist,
    Provider,
    Admin,
}

/// The authenticated caller as the core sees it: an identity and a role,
/// resolved by the surrounding system from a bearer credential.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ObjectId,
    pub role: Role,
}
