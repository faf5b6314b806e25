use crate::models::product::{PriceTier, PricingEntry};

/// Immutable single source of truth for per-product price tiers. Lookups are
/// case-sensitive; callers receive product names URL-encoded, so they are
/// whitespace-normalized (runs collapsed, ends trimmed) before matching.
pub struct PricingCatalog {
    entries: Vec<(String, PricingEntry)>,
}

/// Collapse whitespace runs to a single space and trim the ends. Decoded
/// URL segments arrive with `+`/`%20` artifacts already turned into spaces.
pub fn normalize_product_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn tier(min_persons: u32, max_persons: Option<u32>, unit_price: f64) -> PriceTier {
    PriceTier {
        min_persons,
        max_persons,
        unit_price,
    }
}

impl PricingCatalog {
    /// The production catalog. Tier bounds are inclusive and must not
    /// overlap; the calculator takes the first match in list order.
    pub fn standard() -> Self {
        let mut entries: Vec<(String, PricingEntry)> = Vec::new();

        let mut tiered = |name: &str, tiers: Vec<PriceTier>| {
            entries.push((name.to_string(), PricingEntry::Tiered(tiers)));
        };

        tiered(
            "Jeep Safari",
            vec![
                tier(1, Some(1), 38.0),
                tier(2, Some(5), 25.0),
                tier(6, Some(10), 20.0),
            ],
        );
        tiered(
            "Catamaran Boat Ride",
            vec![tier(1, Some(1), 9.8), tier(2, None, 7.0)],
        );
        tiered(
            "Village Cooking Experience",
            vec![
                tier(1, Some(5), 15.0),
                tier(6, Some(10), 13.0),
                tier(11, Some(20), 11.0),
                tier(21, Some(50), 10.0),
            ],
        );
        tiered(
            "Bullock Cart Ride",
            vec![
                tier(1, Some(5), 9.9),
                tier(6, Some(20), 5.0),
                tier(21, Some(50), 4.0),
            ],
        );
        tiered(
            "Village Tour",
            vec![
                tier(1, Some(5), 19.9),
                tier(6, Some(10), 18.2),
                tier(11, Some(20), 17.3),
                tier(21, Some(30), 16.3),
                tier(31, Some(50), 15.0),
            ],
        );
        tiered("Traditional Village Lunch", vec![tier(1, None, 15.0)]);
        tiered("Motor Bikes Rent", vec![tier(1, None, 17.0)]);
        tiered("Village Walk Tour", vec![tier(1, None, 5.0)]);
        tiered(
            "Hiriwadunna Village Tour and Jeep Safari One Day Tour",
            vec![tier(1, None, 45.0)],
        );
        tiered(
            "Village Tour and Jeep Safari Sigiriya Tour Dambulla Temple",
            vec![tier(1, None, 78.0)],
        );

        for name in [
            "Sundowners Cocktail",
            "High Tea",
            "Tuk Tuk Adventures",
            "Bicycle Tour",
            "Sigiriya Lion Rock",
            "Pidurangala Rock",
            "Polonnaruwa City Tour",
        ] {
            entries.push((name.to_string(), PricingEntry::ContactOnly));
        }

        PricingCatalog { entries }
    }

    #[cfg(test)]
    pub fn from_entries(entries: Vec<(String, PricingEntry)>) -> Self {
        PricingCatalog { entries }
    }

    /// `None` means the product does not exist at all, which is distinct
    /// from a `ContactOnly` entry (exists, but not machine-priceable).
    pub fn lookup(&self, product_id: &str) -> Option<&PricingEntry> {
        self.entries
            .iter()
            .find(|(name, _)| name.as_str() == product_id)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PricingEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_product_name("  Jeep   Safari "), "Jeep Safari");
        assert_eq!(normalize_product_name("Jeep Safari"), "Jeep Safari");
        assert_eq!(normalize_product_name("Jeep\tSafari"), "Jeep Safari");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = PricingCatalog::standard();
        assert!(catalog.lookup("Jeep Safari").is_some());
        assert!(catalog.lookup("jeep safari").is_none());
    }

    #[test]
    fn test_not_found_distinct_from_contact_only() {
        let catalog = PricingCatalog::standard();
        assert!(catalog.lookup("Submarine Tour").is_none());
        assert_eq!(
            catalog.lookup("Sundowners Cocktail"),
            Some(&PricingEntry::ContactOnly)
        );
    }

    #[test]
    fn test_tiers_partition_without_overlap_or_gap() {
        let catalog = PricingCatalog::standard();
        for (name, entry) in catalog.iter() {
            let Some(tiers) = entry.tiers() else { continue };
            assert!(!tiers.is_empty(), "{} has an empty tier list", name);
            assert_eq!(tiers[0].min_persons, 1, "{} does not start at 1", name);
            for window in tiers.windows(2) {
                let max = window[0]
                    .max_persons
                    .unwrap_or_else(|| panic!("{} has an unbounded inner tier", name));
                assert_eq!(
                    window[1].min_persons,
                    max + 1,
                    "{} has a gap or overlap at {} persons",
                    name,
                    max
                );
            }
        }
    }
}
