use mongodb::bson::oid::ObjectId;

use crate::models::account::{Actor, Role};
use crate::models::bookings::{Booking, BookingStatus};
use crate::models::review::ReviewType;
use crate::services::pricing_catalog::normalize_product_name;

/// What a review would be written against.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewTarget {
    Provider(ObjectId),
    Product(String),
    Tourist(ObjectId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub allowed: bool,
    pub review_type: Option<ReviewType>,
}

impl Eligibility {
    fn granted(review_type: ReviewType) -> Self {
        Eligibility {
            allowed: true,
            review_type: Some(review_type),
        }
    }

    fn denied() -> Self {
        Eligibility {
            allowed: false,
            review_type: None,
        }
    }
}

pub struct ReviewEligibilityEngine;

impl ReviewEligibilityEngine {
    /// Pure predicate over already-fetched booking history; retrieval is the
    /// caller's job and the answer must be recomputed from scratch after any
    /// status change. Only confirmed bookings count.
    pub fn can_review(actor: &Actor, target: &ReviewTarget, history: &[Booking]) -> Eligibility {
        match actor.role {
            Role::Tourist => match target {
                ReviewTarget::Provider(provider_id) => {
                    let served = history.iter().any(|b| {
                        b.status == BookingStatus::Confirmed
                            && b.tourist_id == actor.id
                            && b.provider_id.as_ref() == Some(provider_id)
                    });
                    if served {
                        Eligibility::granted(ReviewType::Service)
                    } else {
                        Eligibility::denied()
                    }
                }
                ReviewTarget::Product(name) => {
                    let wanted = normalize_product_name(name);
                    let booked = history.iter().any(|b| {
                        b.status == BookingStatus::Confirmed
                            && b.tourist_id == actor.id
                            && b.product_name.as_deref().map(normalize_product_name)
                                == Some(wanted.clone())
                    });
                    if booked {
                        Eligibility::granted(ReviewType::Product)
                    } else {
                        Eligibility::denied()
                    }
                }
                ReviewTarget::Tourist(_) => Eligibility::denied(),
            },
            Role::Provider => match target {
                ReviewTarget::Tourist(tourist_id) => {
                    let served = history.iter().any(|b| {
                        b.status == BookingStatus::Confirmed
                            && b.provider_id == Some(actor.id)
                            && b.tourist_id == *tourist_id
                    });
                    if served {
                        Eligibility::granted(ReviewType::Tourist)
                    } else {
                        Eligibility::denied()
                    }
                }
                ReviewTarget::Provider(_) | ReviewTarget::Product(_) => Eligibility::denied(),
            },
            Role::Admin => Eligibility::denied(),
        }
    }

    /// Distinct tourists a provider may review: one entry per tourist with a
    /// confirmed booking against this provider, first-seen order.
    pub fn reviewable_tourists(provider: &Actor, history: &[Booking]) -> Vec<ObjectId> {
        if provider.role != Role::Provider {
            return Vec::new();
        }
        let mut tourists: Vec<ObjectId> = Vec::new();
        for booking in history {
            if booking.status == BookingStatus::Confirmed
                && booking.provider_id == Some(provider.id)
                && !tourists.contains(&booking.tourist_id)
            {
                tourists.push(booking.tourist_id);
            }
        }
        tourists
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bookings::{ContactInfo, PartyComposition};

    fn booking(
        tourist_id: ObjectId,
        provider_id: Option<ObjectId>,
        product_name: Option<&str>,
        status: BookingStatus,
    ) -> Booking {
        Booking {
            id: Some(ObjectId::new()),
            tourist_id,
            provider_id,
            product_name: product_name.map(String::from),
            party: PartyComposition {
                adults: 2,
                children: 0,
            },
            date: "2025-03-10".to_string(),
            time: "09:00".to_string(),
            total_price: Some(50.0),
            manual_pricing: false,
            status,
            special_notes: None,
            contact: ContactInfo {
                name: "Test Tourist".to_string(),
                email: "tourist@example.com".to_string(),
                phone: None,
                message: None,
            },
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_pending_booking_does_not_unlock_service_review() {
        let tourist = Actor {
            id: ObjectId::new(),
            role: Role::Tourist,
        };
        let provider_id = ObjectId::new();
        let history = vec![booking(
            tourist.id,
            Some(provider_id),
            None,
            BookingStatus::Pending,
        )];

        let result = ReviewEligibilityEngine::can_review(
            &tourist,
            &ReviewTarget::Provider(provider_id),
            &history,
        );
        assert!(!result.allowed);
        assert_eq!(result.review_type, None);
    }

    #[test]
    fn test_confirmed_booking_unlocks_service_review() {
        let tourist = Actor {
            id: ObjectId::new(),
            role: Role::Tourist,
        };
        let provider_id = ObjectId::new();
        let history = vec![booking(
            tourist.id,
            Some(provider_id),
            None,
            BookingStatus::Confirmed,
        )];

        let result = ReviewEligibilityEngine::can_review(
            &tourist,
            &ReviewTarget::Provider(provider_id),
            &history,
        );
        assert!(result.allowed);
        assert_eq!(result.review_type, Some(ReviewType::Service));
    }

    #[test]
    fn test_confirmed_booking_against_other_provider_does_not_count() {
        let tourist = Actor {
            id: ObjectId::new(),
            role: Role::Tourist,
        };
        let history = vec![booking(
            tourist.id,
            Some(ObjectId::new()),
            None,
            BookingStatus::Confirmed,
        )];

        let result = ReviewEligibilityEngine::can_review(
            &tourist,
            &ReviewTarget::Provider(ObjectId::new()),
            &history,
        );
        assert!(!result.allowed);
    }

    #[test]
    fn test_product_review_matches_normalized_name() {
        let tourist = Actor {
            id: ObjectId::new(),
            role: Role::Tourist,
        };
        let history = vec![booking(
            tourist.id,
            None,
            Some("Jeep Safari"),
            BookingStatus::Confirmed,
        )];

        let result = ReviewEligibilityEngine::can_review(
            &tourist,
            &ReviewTarget::Product("  Jeep   Safari ".to_string()),
            &history,
        );
        assert!(result.allowed);
        assert_eq!(result.review_type, Some(ReviewType::Product));
    }

    #[test]
    fn test_provider_reviews_served_tourist_only() {
        let provider = Actor {
            id: ObjectId::new(),
            role: Role::Provider,
        };
        let served = ObjectId::new();
        let unserved = ObjectId::new();
        let history = vec![
            booking(served, Some(provider.id), None, BookingStatus::Confirmed),
            booking(unserved, Some(provider.id), None, BookingStatus::Pending),
        ];

        let ok = ReviewEligibilityEngine::can_review(
            &provider,
            &ReviewTarget::Tourist(served),
            &history,
        );
        assert!(ok.allowed);
        assert_eq!(ok.review_type, Some(ReviewType::Tourist));

        let denied = ReviewEligibilityEngine::can_review(
            &provider,
            &ReviewTarget::Tourist(unserved),
            &history,
        );
        assert!(!denied.allowed);
    }

    #[test]
    fn test_reviewable_tourists_deduplicated() {
        let provider = Actor {
            id: ObjectId::new(),
            role: Role::Provider,
        };
        let repeat_guest = ObjectId::new();
        let other_guest = ObjectId::new();
        let history = vec![
            booking(
                repeat_guest,
                Some(provider.id),
                None,
                BookingStatus::Confirmed,
            ),
            booking(
                repeat_guest,
                Some(provider.id),
                None,
                BookingStatus::Confirmed,
            ),
            booking(
                other_guest,
                Some(provider.id),
                None,
                BookingStatus::Confirmed,
            ),
            booking(
                ObjectId::new(),
                Some(provider.id),
                None,
                BookingStatus::Cancelled,
            ),
        ];

        let tourists = ReviewEligibilityEngine::reviewable_tourists(&provider, &history);
        assert_eq!(tourists, vec![repeat_guest, other_guest]);
    }

    #[test]
    fn test_admin_cannot_review() {
        let admin = Actor {
            id: ObjectId::new(),
            role: Role::Admin,
        };
        let result = ReviewEligibilityEngine::can_review(
            &admin,
            &ReviewTarget::Provider(ObjectId::new()),
            &[],
        );
        assert!(!result.allowed);
    }

    #[test]
    fn test_tourist_cannot_review_tourist() {
        let tourist = Actor {
            id: ObjectId::new(),
            role: Role::Tourist,
        };
        let result = ReviewEligibilityEngine::can_review(
            &tourist,
            &ReviewTarget::Tourist(ObjectId::new()),
            &[],
        );
        assert!(!result.allowed);
    }
}
