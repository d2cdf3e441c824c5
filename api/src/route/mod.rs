pub mod auth;
pub mod booking;
pub mod category;
pub mod health;
pub mod timeslot;
pub mod user;
pub mod v1;
