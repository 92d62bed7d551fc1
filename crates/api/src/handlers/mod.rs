pub mod photos;
pub mod tickets;
pub mod views;
