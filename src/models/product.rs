use serde::{Deserialize, Serialize};

/// A price-per-person band for a contiguous range of total party sizes.
/// Bounds are inclusive on both ends; `max_persons: None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    pub min_persons: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_persons: Option<u32>,
    pub unit_price: f64,
}

impl PriceTier {
    pub fn covers(&self, persons: u32) -> bool {
        persons >= self.min_persons && self.max_persons.map_or(true, |max| persons <= max)
    }
}

/// A catalog entry: either an ordered tier list, or a marker that the
/// product has no machine-computable price and must go through the
/// manual/contact booking flow.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingEntry {
    Tiered(Vec<PriceTier>),
    ContactOnly,
}

impl PricingEntry {
    pub fn is_priceable(&self) -> bool {
        matches!(self, PricingEntry::Tiered(_))
    }

    pub fn tiers(&self) -> Option<&[PriceTier]> {
        match self {
            PricingEntry::Tiered(tiers) => Some(tiers),
            PricingEntry::ContactOnly => None,
        }
    }
}
