use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId, Bson, DateTime};
use futures::TryStreamExt;
use mongodb::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::db::mongo::{BOOKINGS_COLLECTION, DB_NAME};
use crate::models::bookings::Booking;
use crate::services::booking_lifecycle::{BookingLifecycle, LifecycleAction};
use crate::services::pricing_service::round_currency;

pub async fn list_bookings(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Booking> =
        client.database(DB_NAME).collection(BOOKINGS_COLLECTION);

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Booking>>().await {
            Ok(bookings) => HttpResponse::Ok().json(bookings),
            Err(err) => {
                log::error!("Error collecting bookings: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve bookings")
            }
        },
        Err(err) => {
            log::error!("Error fetching bookings: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch bookings")
        }
    }
}

/// After a failed compare-and-set, tell a missing booking apart from one
/// whose status does not admit the action.
fn failed_transition_response(existing: Option<Booking>, action: LifecycleAction) -> HttpResponse {
    match existing {
        Some(existing) => HttpResponse::Conflict().body(format!(
            "Cannot {} a booking in '{}' status",
            action.as_str(),
            existing.status.as_str()
        )),
        None => HttpResponse::NotFound().body("Booking not found"),
    }
}

/// Apply a lifecycle action with a compare-and-set on the stored status:
/// the update filter only matches source states the action is legal from, so
/// two concurrent administrative actions cannot both win.
async fn transition_booking(
    client: &Client,
    booking_id: &str,
    action: LifecycleAction,
) -> HttpResponse {
    let booking_id = match ObjectId::parse_str(booking_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid booking ID format"),
    };

    let collection: mongodb::Collection<Booking> =
        client.database(DB_NAME).collection(BOOKINGS_COLLECTION);

    let sources: Vec<Bson> = BookingLifecycle::legal_sources(action)
        .iter()
        .map(|s| Bson::String(s.as_str().to_string()))
        .collect();
    let target = BookingLifecycle::target_state(action);

    let filter = doc! { "_id": booking_id, "status": { "$in": sources } };
    let update = doc! { "$set": { "status": target.as_str(), "updated_at": DateTime::now() } };

    match collection.find_one_and_update(filter, update).await {
        Ok(Some(_)) => HttpResponse::Ok().json(serde_json::json!({
            "booking_id": booking_id.to_string(),
            "status": target,
        })),
        Ok(None) => {
            // Either the booking is missing or its status does not admit
            // this action; look again to tell the two apart.
            match collection.find_one(doc! { "_id": booking_id }).await {
                Ok(existing) => failed_transition_response(existing, action),
                Err(err) => {
                    log::error!("Error fetching booking after failed transition: {:?}", err);
                    HttpResponse::InternalServerError().body("Failed to fetch booking")
                }
            }
        }
        Err(err) => {
            log::error!("Error applying booking transition: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update booking")
        }
    }
}

pub async fn approve_booking(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    transition_booking(&data, &path.into_inner(), LifecycleAction::Approve).await
}

pub async fn cancel_booking(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    transition_booking(&data, &path.into_inner(), LifecycleAction::Cancel).await
}

#[derive(Debug, Deserialize)]
pub struct BookingPriceInput {
    pub total_price: f64,
}

/// Manual pricing of contact-only bookings. Only legal while the booking is
/// still pending and flagged for manual pricing; a frozen automated price is
/// never overwritten.
pub async fn set_booking_price(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    input: web::Json<BookingPriceInput>,
) -> impl Responder {
    let booking_id = match ObjectId::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid booking ID format"),
    };

    if !input.total_price.is_finite() || input.total_price <= 0.0 {
        return HttpResponse::BadRequest().body("Price must be a positive amount");
    }
    let total_price = round_currency(input.total_price);

    let client = data.into_inner();
    let collection: mongodb::Collection<Booking> =
        client.database(DB_NAME).collection(BOOKINGS_COLLECTION);

    let filter = doc! {
        "_id": booking_id,
        "manual_pricing": true,
        "status": "pending",
    };
    let update = doc! { "$set": { "total_price": total_price, "updated_at": DateTime::now() } };

    match collection.find_one_and_update(filter, update).await {
        Ok(Some(_)) => HttpResponse::Ok().json(serde_json::json!({
            "booking_id": booking_id.to_string(),
            "total_price": total_price,
        })),
        Ok(None) => match collection.find_one(doc! { "_id": booking_id }).await {
            Ok(Some(_)) => HttpResponse::Conflict()
                .body("Only pending bookings awaiting manual pricing can be priced"),
            Ok(None) => HttpResponse::NotFound().body("Booking not found"),
            Err(err) => {
                log::error!("Error fetching booking after failed pricing: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to fetch booking")
            }
        },
        Err(err) => {
            log::error!("Error setting booking price: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update booking")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;
    use actix_web::http::StatusCode;
    use crate::models::bookings::{BookingStatus, ContactInfo, PartyComposition};

    fn booking_with_status(status: BookingStatus) -> Booking {
        Booking {
            id: Some(ObjectId::new()),
            tourist_id: ObjectId::new(),
            provider_id: None,
            product_name: Some("Jeep Safari".to_string()),
            party: PartyComposition {
                adults: 2,
                children: 0,
            },
            date: "2025-03-10".to_string(),
            time: "09:00".to_string(),
            total_price: Some(50.0),
            manual_pricing: false,
            status,
            special_notes: None,
            contact: ContactInfo {
                name: "Test Tourist".to_string(),
                email: "tourist@example.com".to_string(),
                phone: None,
                message: None,
            },
            created_at: None,
            updated_at: None,
        }
    }

    fn body_text(resp: HttpResponse) -> String {
        let bytes = resp.into_body().try_into_bytes().unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_existing_booking_in_wrong_state_is_conflict() {
        let resp = failed_transition_response(
            Some(booking_with_status(BookingStatus::Confirmed)),
            LifecycleAction::Approve,
        );
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_text(resp),
            "Cannot approve a booking in 'confirmed' status"
        );
    }

    #[test]
    fn test_cancelled_booking_cannot_be_cancelled_again() {
        let resp = failed_transition_response(
            Some(booking_with_status(BookingStatus::Cancelled)),
            LifecycleAction::Cancel,
        );
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_missing_booking_is_not_found() {
        let resp = failed_transition_response(None, LifecycleAction::Approve);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
