pub mod config;
pub mod db;
pub mod models;
pub mod responses;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trigger;

#[cfg(test)]
mod test_utils;

pub use state::AppState;
