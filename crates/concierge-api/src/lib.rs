//! HTTP surface for the Concierge relay.
//!
//! Exposes the message relay and transcript-delivery endpoints behind a
//! bearer-token check, plus public health and widget-bootstrap routes.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{create_router, start_server};
pub use state::AppState;
