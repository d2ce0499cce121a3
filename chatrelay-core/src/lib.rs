//! Chatrelay Core Library
//!
//! Building blocks for a stateless chat relay: configuration, the wire types
//! spoken by clients and by the upstream completion API, the upstream HTTP
//! client, the relay service with its audit log, and the chat-client session.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod protocol;
pub mod relay;

pub use config::RelayConfig;
pub use error::{ValidationError, ValidationErrorKind};
pub use protocol::{ChatRequest, ChatResponse, ErrorBody};
pub use relay::{validate_message, RelayError, RelayService};

/// Returns the version of the Chatrelay Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
