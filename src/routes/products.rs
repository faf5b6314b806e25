use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::models::product::PriceTier;
use crate::services::pricing_catalog::PricingCatalog;
use crate::services::pricing_service::{PriceCalculator, PricingError};

#[derive(Serialize)]
struct ProductListing<'a> {
    name: &'a str,
    priceable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tiers: Option<&'a [PriceTier]>,
}

pub async fn get_products(catalog: web::Data<PricingCatalog>) -> impl Responder {
    let listings: Vec<ProductListing> = catalog
        .iter()
        .map(|(name, entry)| ProductListing {
            name,
            priceable: entry.is_priceable(),
            tiers: entry.tiers(),
        })
        .collect();

    HttpResponse::Ok().json(listings)
}

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
}

/// Display-side price quote. The rounded total returned here is for
/// rendering; the frozen booking price is computed again at submission.
pub async fn quote_price(
    catalog: web::Data<PricingCatalog>,
    path: web::Path<String>,
    query: web::Query<QuoteQuery>,
) -> impl Responder {
    let product = path.into_inner();

    match PriceCalculator::compute_price(&catalog, &product, query.adults, query.children) {
        Ok(quote) => HttpResponse::Ok().json(serde_json::json!({
            "product": quote.product,
            "adults": quote.party.adults,
            "children": quote.party.children,
            "unit_price": quote.unit_price,
            "total_price": quote.rounded_total(),
            "priceable": true,
        })),
        Err(PricingError::ProductUnpriceable) => HttpResponse::Ok().json(serde_json::json!({
            "priceable": false,
            "message": "This product cannot be booked online. Please contact support.",
        })),
        Err(PricingError::ProductNotFound) => HttpResponse::NotFound().body("Product not found"),
        Err(PricingError::InvalidParty) => {
            HttpResponse::BadRequest().body("At least 1 adult is required.")
        }
        Err(PricingError::PricingUnavailable { persons }) => HttpResponse::BadRequest().body(
            format!(
                "No pricing available for {} persons. Please contact support.",
                persons
            ),
        ),
    }
}
