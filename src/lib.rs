// Library exports for the api binary and integration tests
pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use state::AppState;
