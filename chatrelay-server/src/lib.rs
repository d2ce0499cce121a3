//! HTTP front-end for the chat relay
//!
//! Exposes `POST /chat`, `GET /health` and the embedded browser client at
//! `GET /`. All relay behaviour lives in `chatrelay_core::relay`.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use server::start_server;
pub use state::AppState;
