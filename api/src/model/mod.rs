pub mod auth;
pub mod booking;
pub mod category;
pub mod preference;
pub mod timeslot;
pub mod user;
