pub mod auth;
pub mod booking;
pub mod category;
pub mod id;
pub mod role;
pub mod timeslot;
pub mod user;
