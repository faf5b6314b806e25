use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId, DateTime};
use mongodb::Client;
use std::sync::Arc;

use crate::db::mongo::{DB_NAME, REVIEWS_COLLECTION};
use crate::models::review::Review;

pub async fn approve_review(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let review_id = match ObjectId::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid review ID format"),
    };

    let client = data.into_inner();
    let collection: mongodb::Collection<Review> =
        client.database(DB_NAME).collection(REVIEWS_COLLECTION);

    let update = doc! { "$set": { "approved": true, "updated_at": DateTime::now() } };

    match collection
        .update_one(doc! { "_id": review_id }, update)
        .await
    {
        Ok(result) => {
            if result.matched_count == 0 {
                return HttpResponse::NotFound().body("Review not found");
            }
            HttpResponse::Ok().json(serde_json::json!({
                "review_id": review_id.to_string(),
                "approved": true,
            }))
        }
        Err(err) => {
            log::error!("Error approving review: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update review")
        }
    }
}
