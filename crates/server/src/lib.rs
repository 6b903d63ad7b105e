pub mod config;
pub mod discover;
pub mod error;
pub mod region;
pub mod routes;
pub mod state;
pub mod views;
