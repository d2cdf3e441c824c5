pub mod booking;
pub mod category;
pub mod timeslot;
pub mod user;
