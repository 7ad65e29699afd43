pub mod auth;
pub mod collections;
pub mod config;
pub mod places;
pub mod stories;
pub mod tags;
