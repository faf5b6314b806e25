use actix_web::{test, web, App, HttpResponse, Responder};
use jsonwebtoken::{encode, EncodingKey, Header};

use ceylon_tours_api::middleware::auth::{AuthMiddleware, Claims};
use ceylon_tours_api::middleware::role_auth::RequireRole;
use ceylon_tours_api::models::account::{Actor, Role};

fn make_token(role: Role) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: "tourist@example.com".to_string(),
        exp: now + 3600,
        iat: now,
        user_id: "507f1f77bcf86cd799439011".to_string(),
        role,
    };
    let key = std::env::var("JWT_SECRET").unwrap_or_else(|_| "default_secret".to_string());
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
    .unwrap()
}

async fn whoami(actor: Actor) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "id": actor.id.to_string(),
        "role": actor.role,
    }))
}

async fn admin_only() -> impl Responder {
    HttpResponse::Ok().body("admin area")
}

#[actix_web::test]
async fn test_request_without_token_is_unauthorized() {
    let app = test::init_service(
        App::new().service(
            web::scope("")
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get().uri("/whoami").to_request();
    let resp = test::try_call_service(&app, req).await;
    assert!(resp.is_err());
}

#[actix_web::test]
async fn test_valid_token_resolves_actor() {
    let app = test::init_service(
        App::new().service(
            web::scope("")
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let token = make_token(Role::Tourist);
    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], "507f1f77bcf86cd799439011");
    assert_eq!(body["role"], "tourist");
}

#[actix_web::test]
async fn test_role_gate_rejects_non_admin() {
    let app = test::init_service(
        App::new().service(
            web::scope("/admin")
                .wrap(RequireRole::new(Role::Admin))
                .wrap(AuthMiddleware)
                .route("/area", web::get().to(admin_only)),
        ),
    )
    .await;

    let token = make_token(Role::Provider);
    let req = test::TestRequest::get()
        .uri("/admin/area")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::try_call_service(&app, req).await;
    assert!(resp.is_err());
}

#[actix_web::test]
async fn test_role_gate_admits_admin() {
    let app = test::init_service(
        App::new().service(
            web::scope("/admin")
                .wrap(RequireRole::new(Role::Admin))
                .wrap(AuthMiddleware)
                .route("/area", web::get().to(admin_only)),
        ),
    )
    .await;

    let token = make_token(Role::Admin);
    let req = test::TestRequest::get()
        .uri("/admin/area")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}
