pub mod booking_lifecycle;
pub mod pricing_catalog;
pub mod pricing_service;
pub mod review_eligibility;
