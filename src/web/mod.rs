//! HTTP boundary for the chat agent.

pub mod routes;

pub use routes::{AppState, app_routes};
