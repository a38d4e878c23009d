//! Interactive remote console against a running Hearth daemon.
//!
//! Demonstrates:
//! - Connecting a Client to a daemon endpoint
//! - Watching connection, now-playing, wifi, and error streams
//! - Sending commands typed on stdin
//!
//! Usage:
//!   cargo run --example remote_console -- <host> [port] [path]
//!   RUST_LOG=hearthlink=debug cargo run --example remote_console -- 192.168.1.20

// ============================================================================
// Imports
// ============================================================================

use std::env;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use hearthlink::{Client, ConnectionTarget};

// ============================================================================
// Constants
// ============================================================================

const DEFAULT_PORT: u16 = 8765;
const DEFAULT_PATH: &str = "/ws";

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let Some(host) = args.next() else {
        eprintln!("usage: remote_console <host> [port] [path]");
        std::process::exit(1);
    };
    let port = args
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let path = args.next().unwrap_or_else(|| DEFAULT_PATH.to_string());

    let target = ConnectionTarget::new(host, port, path);
    println!("=== Hearth remote console: {target} ===");
    println!("type a command (e.g. player_toggle, git_status); Ctrl-D quits\n");

    let client = Client::new();
    client.connect(target);

    // ========================================================================
    // Stream Watchers
    // ========================================================================

    let mut connection = client.connection_state();
    tokio::spawn(async move {
        while connection.changed().await.is_ok() {
            println!("[connection] {:?}", *connection.borrow());
        }
    });

    let mut now_playing = client.now_playing();
    tokio::spawn(async move {
        while now_playing.changed().await.is_ok() {
            if let Some(now) = now_playing.borrow().as_ref() {
                println!(
                    "[player] {} - {} ({})",
                    now.media.artist.as_deref().unwrap_or("?"),
                    now.media.title.as_deref().unwrap_or("?"),
                    now.media.status.as_deref().unwrap_or("unknown"),
                );
            }
        }
    });

    let mut wifi = client.wifi_info();
    tokio::spawn(async move {
        while wifi.changed().await.is_ok() {
            if let Some(info) = wifi.borrow().as_ref() {
                println!(
                    "[wifi] {} down {:?} up {:?}",
                    info.ssid.as_deref().unwrap_or("?"),
                    info.download_speed_mbps,
                    info.upload_speed_mbps,
                );
            }
        }
    });

    let mut console = client.console_output();
    tokio::spawn(async move {
        while console.changed().await.is_ok() {
            println!("[output]\n{}", *console.borrow());
        }
    });

    let mut errors = client.last_error();
    tokio::spawn(async move {
        while errors.changed().await.is_ok() {
            if let Some(event) = errors.borrow().as_ref() {
                eprintln!("[error] {}", event.message);
            }
        }
    });

    // ========================================================================
    // Command Loop
    // ========================================================================

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let command = line.trim();
        if !command.is_empty() {
            client.send(command);
        }
    }

    client.close();
    println!("bye");
}
