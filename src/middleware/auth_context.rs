use std::future::{ready, Ready};

use actix_web::{dev::Payload, error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;

use crate::middleware::auth::Claims;
use crate::models::account::Actor;

/// Extractor turning validated token claims into the opaque actor descriptor
/// the core works with. Requires `AuthMiddleware` on the enclosing scope.
impl FromRequest for Actor {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(claims) = req.extensions().get::<Claims>() {
            match ObjectId::parse_str(&claims.user_id) {
                Ok(id) => ready(Ok(Actor {
                    id,
                    role: claims.role,
                })),
                Err(_) => ready(Err(ErrorUnauthorized("Malformed user id in token"))),
            }
        } else {
            ready(Err(ErrorUnauthorized("User not authenticated")))
        }
    }
}
