//! Chat client: a local transcript driven against the relay
//!
//! The terminal binary and tests build on [`ChatSession`]; the transport is
//! pluggable through [`RelayApi`].

pub mod error;
pub mod http;
pub mod render;
pub mod session;
pub mod transcript;

pub use error::ClientError;
pub use http::{RelayHttpClient, DEFAULT_CLIENT_TIMEOUT, DEFAULT_RELAY_URL};
pub use render::{format_elapsed, render_transcript, render_turn};
pub use session::{ChatSession, RelayApi};
pub use transcript::{Role, Transcript, Turn};
