//! HTTP API handlers for songslide-relay

pub mod health;
pub mod submit;

pub use health::health_routes;
pub use submit::submit;
