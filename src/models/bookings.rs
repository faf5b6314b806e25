use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Lifecycle of a booking. Always created as `pending`; only administrators
/// move it from there. `confirmed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// Who is coming. Children pay a discounted share of the tier price; at
/// least one adult is required for any booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyComposition {
    pub adults: u32,
    pub children: u32,
}

impl PartyComposition {
    pub fn total_persons(&self) -> u32 {
        self.adults + self.children
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A booking as stored. Exactly one of `provider_id` / `product_name` is set
/// depending on whether the tourist booked a provider's service or a catalog
/// product. `total_price` is a frozen snapshot taken at submission time and
/// is never recomputed; bookings on the manual-pricing path carry no price
/// until an administrator sets one.
#[derive(Debug, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub tourist_id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub party: PartyComposition,
    pub date: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    pub manual_pricing: bool,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_notes: Option<String>,
    pub contact: ContactInfo,
    pub created_at: Option<DateTime>,
    pub updated_at: Option<DateTime>,
}

#[derive(Debug, Deserialize)]
pub struct ProductBookingInput {
    pub product_type: String,
    pub date: String,
    pub time: String,
    pub adults: u32,
    pub children: u32,
    pub special_notes: Option<String>,
    pub contact: ContactInfo,
}

#[derive(Debug, Deserialize)]
pub struct ProviderBookingInput {
    pub provider_id: String,
    pub date: String,
    pub time: String,
    pub adults: u32,
    pub children: u32,
    pub special_notes: Option<String>,
    pub contact: ContactInfo,
}
