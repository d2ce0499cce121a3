//! `chatrelay` binary: interactive terminal chat against a running relay

use anyhow::Context;
use chatrelay_core::client::{
    render_transcript, render_turn, ChatSession, RelayHttpClient, DEFAULT_RELAY_URL,
};
use chatrelay_core::logging::init_tracing_with_default;
use clap::Parser;
use std::io::{self, Write};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "chatrelay", version, about = "Terminal chat client for the chat relay", long_about = None)]
struct Cli {
    /// Base URL of the relay
    #[arg(long, env = "CHATRELAY_URL", default_value = DEFAULT_RELAY_URL)]
    relay_url: String,

    /// Give up on a single reply after this many seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // Relay failures are already shown inline.
    init_tracing_with_default("error");

    let client = RelayHttpClient::with_timeout(&cli.relay_url, Duration::from_secs(cli.timeout_secs))
        .context("failed to create relay client")?;
    let mut session = ChatSession::new(client);

    println!("--- Chatrelay Terminal Chat ---");
    println!("Relay: {}", cli.relay_url);
    println!("Type /history to show the conversation, /exit to quit.");
    println!("-------------------------------");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\nYou> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let text = line.trim();

        if text.is_empty() {
            continue;
        }
        if text == "/exit" || text == "/quit" {
            break;
        }
        if text == "/history" {
            if session.transcript().is_empty() {
                println!("No messages yet.");
            } else {
                println!("{}", render_transcript(session.transcript()));
            }
            continue;
        }

        print!("Waiting for a reply...");
        io::stdout().flush()?;
        let outcome = session.send(text).await;
        print!("\r{:<22}\r", "");

        match outcome {
            Ok(turn) => println!("{}", render_turn(turn)),
            Err(e) => println!("Error: {}", e.user_message()),
        }
    }

    Ok(())
}
