use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId, DateTime};
use futures::TryStreamExt;
use mongodb::Client;
use std::sync::Arc;

use crate::db::mongo::{BOOKINGS_COLLECTION, DB_NAME};
use crate::models::account::{Actor, Role};
use crate::models::bookings::{
    Booking, BookingStatus, PartyComposition, ProductBookingInput, ProviderBookingInput,
};
use crate::services::pricing_catalog::{normalize_product_name, PricingCatalog};
use crate::services::pricing_service::{PriceCalculator, PriceQuote, PricingError};

/// Turn a pricing outcome into the snapshot frozen onto the booking, or the
/// rejection for the caller. Contact-only products go through with no price
/// and the manual-pricing marker set; everything else must price cleanly.
fn freeze_product_price(
    outcome: Result<PriceQuote, PricingError>,
    raw_product: &str,
) -> Result<(Option<f64>, bool, String), HttpResponse> {
    match outcome {
        Ok(quote) => Ok((Some(quote.rounded_total()), false, quote.product)),
        Err(PricingError::ProductUnpriceable) => {
            Ok((None, true, normalize_product_name(raw_product)))
        }
        Err(PricingError::ProductNotFound) => {
            Err(HttpResponse::NotFound().body("Product not found"))
        }
        Err(PricingError::InvalidParty) => {
            Err(HttpResponse::BadRequest().body("At least 1 adult is required."))
        }
        Err(PricingError::PricingUnavailable { persons }) => {
            Err(HttpResponse::BadRequest().body(format!(
                "No pricing available for {} persons. Please contact support.",
                persons
            )))
        }
    }
}

/// Book a catalog product. The price is computed once here and stored as a
/// frozen snapshot; contact-only products go through with no price and the
/// manual-pricing marker set instead.
pub async fn add_product_booking(
    data: web::Data<Arc<Client>>,
    catalog: web::Data<PricingCatalog>,
    input: web::Json<ProductBookingInput>,
    actor: Actor,
) -> impl Responder {
    if actor.role != Role::Tourist {
        return HttpResponse::Forbidden().body("Only tourists can book");
    }

    let client = data.into_inner();
    let input = input.into_inner();

    let outcome = PriceCalculator::compute_price(
        &catalog,
        &input.product_type,
        input.adults,
        input.children,
    );
    let (total_price, manual_pricing, product_name) =
        match freeze_product_price(outcome, &input.product_type) {
            Ok(snapshot) => snapshot,
            Err(rejection) => return rejection,
        };

    let time = DateTime::now();
    let booking = Booking {
        id: None,
        tourist_id: actor.id,
        provider_id: None,
        product_name: Some(product_name),
        party: PartyComposition {
            adults: input.adults,
            children: input.children,
        },
        date: input.date,
        time: input.time,
        total_price,
        manual_pricing,
        status: BookingStatus::Pending,
        special_notes: input.special_notes,
        contact: input.contact,
        created_at: Some(time),
        updated_at: Some(time),
    };

    let collection: mongodb::Collection<Booking> =
        client.database(DB_NAME).collection(BOOKINGS_COLLECTION);

    match collection.insert_one(&booking).await {
        Ok(insert_result) => HttpResponse::Ok().json(serde_json::json!({
            "booking_id": insert_result.inserted_id.as_object_id().map(|id| id.to_string()),
            "status": BookingStatus::Pending,
            "total_price": total_price,
            "manual_pricing": manual_pricing,
        })),
        Err(err) => {
            log::error!("Error creating product booking: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create booking")
        }
    }
}

/// Book a provider's service. Provider services carry no tier table, so
/// these always take the manual-pricing path; an administrator prices them
/// before approval.
pub async fn add_provider_booking(
    data: web::Data<Arc<Client>>,
    input: web::Json<ProviderBookingInput>,
    actor: Actor,
) -> impl Responder {
    if actor.role != Role::Tourist {
        return HttpResponse::Forbidden().body("Only tourists can book");
    }

    let client = data.into_inner();
    let input = input.into_inner();

    let provider_id = match ObjectId::parse_str(&input.provider_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid provider ID format"),
    };

    if input.adults == 0 {
        return HttpResponse::BadRequest().body("At least 1 adult is required.");
    }

    let time = DateTime::now();
    let booking = Booking {
        id: None,
        tourist_id: actor.id,
        provider_id: Some(provider_id),
        product_name: None,
        party: PartyComposition {
            adults: input.adults,
            children: input.children,
        },
        date: input.date,
        time: input.time,
        total_price: None,
        manual_pricing: true,
        status: BookingStatus::Pending,
        special_notes: input.special_notes,
        contact: input.contact,
        created_at: Some(time),
        updated_at: Some(time),
    };

    let collection: mongodb::Collection<Booking> =
        client.database(DB_NAME).collection(BOOKINGS_COLLECTION);

    match collection.insert_one(&booking).await {
        Ok(insert_result) => HttpResponse::Ok().json(serde_json::json!({
            "booking_id": insert_result.inserted_id.as_object_id().map(|id| id.to_string()),
            "status": BookingStatus::Pending,
            "manual_pricing": true,
        })),
        Err(err) => {
            log::error!("Error creating provider booking: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create booking")
        }
    }
}

pub async fn my_bookings(data: web::Data<Arc<Client>>, actor: Actor) -> impl Responder {
    if actor.role != Role::Tourist {
        return HttpResponse::Forbidden().body("Forbidden");
    }

    let client = data.into_inner();
    let collection: mongodb::Collection<Booking> =
        client.database(DB_NAME).collection(BOOKINGS_COLLECTION);

    match collection.find(doc! { "tourist_id": actor.id }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Booking>>().await {
            Ok(bookings) => HttpResponse::Ok().json(bookings),
            Err(err) => {
                log::error!("Error collecting tourist bookings: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve bookings")
            }
        },
        Err(err) => {
            log::error!("Error fetching tourist bookings: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch bookings")
        }
    }
}

pub async fn provider_bookings(data: web::Data<Arc<Client>>, actor: Actor) -> impl Responder {
    if actor.role != Role::Provider {
        return HttpResponse::Forbidden().body("Forbidden");
    }

    let client = data.into_inner();
    let collection: mongodb::Collection<Booking> =
        client.database(DB_NAME).collection(BOOKINGS_COLLECTION);

    match collection.find(doc! { "provider_id": actor.id }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Booking>>().await {
            Ok(bookings) => HttpResponse::Ok().json(bookings),
            Err(err) => {
                log::error!("Error collecting provider bookings: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve bookings")
            }
        },
        Err(err) => {
            log::error!("Error fetching provider bookings: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch bookings")
        }
    }
}
