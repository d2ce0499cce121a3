//! In-memory conversation history for one chat session

use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Bot => "Bot",
        }
    }
}

/// One displayed exchange entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    /// Tokens reported by the relay; always 0 for user turns
    pub tokens: u32,
    /// Wall-clock seconds with two decimals; "0.00" for user turns
    pub elapsed_time: String,
}

/// Ordered list of turns, appended in send order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &Turn {
        self.push(Turn {
            role: Role::User,
            content: content.into(),
            tokens: 0,
            elapsed_time: "0.00".to_string(),
        })
    }

    pub fn push_bot(
        &mut self,
        content: impl Into<String>,
        tokens: u32,
        elapsed_time: impl Into<String>,
    ) -> &Turn {
        self.push(Turn {
            role: Role::Bot,
            content: content.into(),
            tokens,
            elapsed_time: elapsed_time.into(),
        })
    }

    fn push(&mut self, turn: Turn) -> &Turn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn user_turns(&self) -> usize {
        self.count(Role::User)
    }

    pub fn bot_turns(&self) -> usize {
        self.count(Role::Bot)
    }

    fn count(&self, role: Role) -> usize {
        self.turns.iter().filter(|t| t.role == role).count()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
