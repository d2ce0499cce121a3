//! Protocol module for relay and upstream request/response structures
//!
//! Two wire formats live here:
//! - the relay's own `POST /chat` bodies (`types`)
//! - the upstream chat completion bodies (`upstream`)

pub mod types;
pub mod upstream;

pub use types::{ChatRequest, ChatResponse, ErrorBody, MAX_MESSAGE_CHARS};
pub use upstream::{
    ChoiceMessage, CompletionChoice, CompletionRequest, CompletionResponse, CompletionUsage,
    Message, MessageRole,
};
