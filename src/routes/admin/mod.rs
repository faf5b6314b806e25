pub mod bookings;
pub mod reviews;

use actix_web::web;

use crate::middleware::auth::AuthMiddleware;
use crate::middleware::role_auth::RequireRole;
use crate::models::account::Role;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(RequireRole::new(Role::Admin))
            .wrap(AuthMiddleware)
            .route("/bookings", web::get().to(bookings::list_bookings))
            .route(
                "/bookings/{id}/approve",
                web::put().to(bookings::approve_booking),
            )
            .route(
                "/bookings/{id}/cancel",
                web::put().to(bookings::cancel_booking),
            )
            .route(
                "/bookings/{id}/price",
                web::put().to(bookings::set_booking_price),
            )
            .route(
                "/reviews/{id}/approve",
                web::put().to(reviews::approve_review),
            ),
    );
}
