//! Plain-text rendering of a transcript

use crate::client::transcript::{Role, Transcript, Turn};
use std::time::Duration;

/// Seconds with two decimals, as shown next to bot replies
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}", elapsed.as_secs_f64())
}

pub fn render_turn(turn: &Turn) -> String {
    match turn.role {
        Role::User => format!("{}: {}", turn.role.label(), turn.content),
        Role::Bot => format!(
            "{}: {}\n  ({} tokens, {}s)",
            turn.role.label(),
            turn.content,
            turn.tokens,
            turn.elapsed_time
        ),
    }
}

/// Render every turn in order, one block per turn
pub fn render_transcript(transcript: &Transcript) -> String {
    transcript
        .turns()
        .iter()
        .map(render_turn)
        .collect::<Vec<_>>()
        .join("\n")
}
