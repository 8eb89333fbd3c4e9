pub mod admin;
pub mod auth;
pub mod collectors;
pub mod orders;
pub mod pickups;
pub mod products;
pub mod vendors;
