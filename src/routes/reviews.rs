use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId, DateTime};
use futures::TryStreamExt;
use mongodb::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::db::mongo::{BOOKINGS_COLLECTION, DB_NAME, REVIEWS_COLLECTION};
use crate::models::account::{Actor, Role};
use crate::models::bookings::Booking;
use crate::models::review::{Review, ReviewInput};
use crate::services::pricing_catalog::normalize_product_name;
use crate::services::review_eligibility::{ReviewEligibilityEngine, ReviewTarget};

/// Approved reviews only; unapproved ones are visible to administrators.
pub async fn get_reviews(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Review> =
        client.database(DB_NAME).collection(REVIEWS_COLLECTION);

    match collection.find(doc! { "approved": true }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Review>>().await {
            Ok(reviews) => HttpResponse::Ok().json(reviews),
            Err(err) => {
                log::error!("Error collecting reviews: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve reviews")
            }
        },
        Err(err) => {
            log::error!("Error fetching reviews: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch reviews")
        }
    }
}

/// Booking history visible to this actor: own bookings for a tourist,
/// bookings served for a provider. The eligibility engine is re-run over a
/// fresh fetch every time so a status change is picked up immediately.
async fn fetch_history(
    client: &Client,
    actor: &Actor,
) -> Result<Vec<Booking>, mongodb::error::Error> {
    let collection: mongodb::Collection<Booking> =
        client.database(DB_NAME).collection(BOOKINGS_COLLECTION);

    let filter = match actor.role {
        Role::Tourist => doc! { "tourist_id": actor.id },
        Role::Provider => doc! { "provider_id": actor.id },
        Role::Admin => return Ok(Vec::new()),
    };

    collection.find(filter).await?.try_collect().await
}

#[derive(Debug, Deserialize)]
pub struct EligibilityQuery {
    pub provider_id: Option<String>,
    pub tourist_id: Option<String>,
    pub product: Option<String>,
}

fn resolve_target(
    provider_id: &Option<String>,
    tourist_id: &Option<String>,
    product: &Option<String>,
) -> Result<ReviewTarget, &'static str> {
    match (provider_id, tourist_id, product) {
        (Some(id), None, None) => ObjectId::parse_str(id)
            .map(ReviewTarget::Provider)
            .map_err(|_| "Invalid provider ID format"),
        (None, Some(id), None) => ObjectId::parse_str(id)
            .map(ReviewTarget::Tourist)
            .map_err(|_| "Invalid tourist ID format"),
        (None, None, Some(name)) => Ok(ReviewTarget::Product(name.clone())),
        _ => Err("Exactly one of provider_id, tourist_id or product is required"),
    }
}

pub async fn review_eligibility(
    data: web::Data<Arc<Client>>,
    query: web::Query<EligibilityQuery>,
    actor: Actor,
) -> impl Responder {
    let target = match resolve_target(&query.provider_id, &query.tourist_id, &query.product) {
        Ok(target) => target,
        Err(msg) => return HttpResponse::BadRequest().body(msg),
    };

    let client = data.into_inner();
    let history = match fetch_history(&client, &actor).await {
        Ok(history) => history,
        Err(err) => {
            log::error!("Error fetching booking history: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch booking history");
        }
    };

    let eligibility = ReviewEligibilityEngine::can_review(&actor, &target, &history);
    HttpResponse::Ok().json(serde_json::json!({
        "allowed": eligibility.allowed,
        "review_type": eligibility.review_type,
    }))
}

/// Distinct tourists this provider may review, from confirmed bookings.
pub async fn reviewable_tourists(data: web::Data<Arc<Client>>, actor: Actor) -> impl Responder {
    if actor.role != Role::Provider {
        return HttpResponse::Forbidden().body("Forbidden");
    }

    let client = data.into_inner();
    let history = match fetch_history(&client, &actor).await {
        Ok(history) => history,
        Err(err) => {
            log::error!("Error fetching booking history: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch booking history");
        }
    };

    let tourists: Vec<String> = ReviewEligibilityEngine::reviewable_tourists(&actor, &history)
        .into_iter()
        .map(|id| id.to_string())
        .collect();

    HttpResponse::Ok().json(tourists)
}

pub async fn add_review(
    data: web::Data<Arc<Client>>,
    input: web::Json<ReviewInput>,
    actor: Actor,
) -> impl Responder {
    let input = input.into_inner();

    if !(1..=5).contains(&input.rating) {
        return HttpResponse::BadRequest().body("Rating must be between 1 and 5");
    }

    let target = match resolve_target(&input.provider_id, &input.tourist_id, &input.product) {
        Ok(target) => target,
        Err(msg) => return HttpResponse::BadRequest().body(msg),
    };

    let client = data.into_inner();
    let history = match fetch_history(&client, &actor).await {
        Ok(history) => history,
        Err(err) => {
            log::error!("Error fetching booking history: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch booking history");
        }
    };

    let eligibility = ReviewEligibilityEngine::can_review(&actor, &target, &history);
    let Some(review_type) = eligibility.review_type.filter(|_| eligibility.allowed) else {
        return HttpResponse::Forbidden().body("A confirmed booking is required to submit a review");
    };

    let (target_id, target_product) = match target {
        ReviewTarget::Provider(id) | ReviewTarget::Tourist(id) => (Some(id), None),
        ReviewTarget::Product(name) => (None, Some(normalize_product_name(&name))),
    };

    let time = DateTime::now();
    let review = Review {
        id: None,
        review_type,
        target_id,
        target_product,
        reviewer_id: actor.id,
        rating: input.rating,
        comment: input.comment,
        approved: false,
        created_at: Some(time),
        updated_at: Some(time),
    };

    let collection: mongodb::Collection<Review> =
        client.database(DB_NAME).collection(REVIEWS_COLLECTION);

    match collection.insert_one(&review).await {
        Ok(insert_result) => HttpResponse::Ok().json(serde_json::json!({
            "review_id": insert_result.inserted_id.as_object_id().map(|id| id.to_string()),
            "review_type": review_type,
            "approved": false,
        })),
        Err(err) => {
            log::error!("Error creating review: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create review")
        }
    }
}
