use crate::models::bookings::PartyComposition;
use crate::models::product::PricingEntry;
use crate::services::pricing_catalog::{normalize_product_name, PricingCatalog};

/// Children pay half the adult per-person rate of whatever tier the whole
/// party lands in.
pub const CHILD_DISCOUNT_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Unknown product id: caller bug or stale catalog.
    ProductNotFound,
    /// Valid product with no automated price; route to the manual flow.
    ProductUnpriceable,
    /// Party size outside every tier; carries the size for UI guidance.
    PricingUnavailable { persons: u32 },
    /// Zero adults or zero total persons.
    InvalidParty,
}

/// A successful price computation. `total_price` keeps full precision;
/// rounding happens only at presentation/submission boundaries so repeated
/// re-renders never compound rounding error.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub product: String,
    pub party: PartyComposition,
    pub unit_price: f64,
    pub total_price: f64,
}

impl PriceQuote {
    pub fn rounded_total(&self) -> f64 {
        round_currency(self.total_price)
    }
}

/// Half-up rounding to two decimal places, for currency display and for the
/// frozen snapshot stored at booking submission.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub struct PriceCalculator;

impl PriceCalculator {
    /// Pure and idempotent: same inputs, same quote, no hidden state.
    pub fn compute_price(
        catalog: &PricingCatalog,
        product_id: &str,
        adults: u32,
        children: u32,
    ) -> Result<PriceQuote, PricingError> {
        let product = normalize_product_name(product_id);
        let entry = catalog
            .lookup(&product)
            .ok_or(PricingError::ProductNotFound)?;
        let tiers = match entry {
            PricingEntry::ContactOnly => return Err(PricingError::ProductUnpriceable),
            PricingEntry::Tiered(tiers) => tiers,
        };

        let party = PartyComposition { adults, children };
        if party.adults == 0 || party.total_persons() == 0 {
            return Err(PricingError::InvalidParty);
        }

        let persons = party.total_persons();
        // Bounds are inclusive and tiers must not overlap; first match wins
        // if a catalog ever violates that.
        let tier = tiers
            .iter()
            .find(|t| t.covers(persons))
            .ok_or(PricingError::PricingUnavailable { persons })?;

        let total_price = adults as f64 * tier.unit_price
            + children as f64 * tier.unit_price * CHILD_DISCOUNT_FACTOR;

        Ok(PriceQuote {
            product,
            party,
            unit_price: tier.unit_price,
            total_price,
        })
    }
}
