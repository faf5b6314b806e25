use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use ceylon_tours_api::{db, middleware, routes, services::pricing_catalog::PricingCatalog};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    log::info!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;

    let catalog = web::Data::new(PricingCatalog::standard());

    log::info!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .route("/health", web::get().to(routes::health::health_check))
            .app_data(web::Data::new(client.clone()))
            .app_data(catalog.clone())
            .service(
                web::scope("/api")
                    // Public routes
                    .route("/products", web::get().to(routes::products::get_products))
                    .route(
                        "/products/{name}/quote",
                        web::get().to(routes::products::quote_price),
                    )
                    .service(
                        web::scope("/reviews")
                            .route("", web::get().to(routes::reviews::get_reviews))
                            // Protected routes
                            .service(
                                web::scope("")
                                    .wrap(middleware::auth::AuthMiddleware)
                                    .route("", web::post().to(routes::reviews::add_review))
                                    .route(
                                        "/eligibility",
                                        web::get().to(routes::reviews::review_eligibility),
                                    )
                                    .route(
                                        "/reviewable-tourists",
                                        web::get().to(routes::reviews::reviewable_tourists),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/bookings")
                            .wrap(middleware::auth::AuthMiddleware)
                            .route("", web::post().to(routes::bookings::add_provider_booking))
                            .route(
                                "/product",
                                web::post().to(routes::bookings::add_product_booking),
                            )
                            .route(
                                "/my-bookings",
                                web::get().to(routes::bookings::my_bookings),
                            )
                            .route(
                                "/provider-bookings",
                                web::get().to(routes::bookings::provider_bookings),
                            ),
                    )
                    .configure(routes::admin::config),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
