pub mod account;
pub mod bookings;
pub mod product;
pub mod review;
