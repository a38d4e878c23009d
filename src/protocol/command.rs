//! Outbound command frames.
//!
//! Every outbound message is a single-field JSON object:
//!
//! ```json
//! {"command": "player_toggle"}
//! ```
//!
//! The connection manager treats the command as an opaque string and never
//! validates membership; [`Command`] just names the vocabulary the Hearth
//! daemon is known to understand, with [`Command::Custom`] for the rest.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

// ============================================================================
// Command
// ============================================================================

/// Known daemon commands, plus an escape hatch for anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Toggle play/pause on the active player.
    PlayerToggle,
    /// Skip to the next track.
    PlayerNext,
    /// Return to the previous track.
    PlayerPrev,
    /// Run the system package update.
    SystemUpdate,
    /// List the daemon's home directory.
    ListHome,
    /// Report git status of the daemon's working tree.
    GitStatus,
    /// Launch Firefox on the host.
    OpenFirefox,
    /// Launch VS Code on the host.
    OpenVscode,
    /// Launch Edge on the host.
    OpenEdge,
    /// Any command string not covered above; sent verbatim.
    Custom(String),
}

impl Command {
    /// Returns the wire string for this command.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::PlayerToggle => "player_toggle",
            Self::PlayerNext => "player_next",
            Self::PlayerPrev => "player_prev",
            Self::SystemUpdate => "system_update",
            Self::ListHome => "list_home",
            Self::GitStatus => "git_status",
            Self::OpenFirefox => "open_firefox",
            Self::OpenVscode => "open_vscode",
            Self::OpenEdge => "open_edge",
            Self::Custom(command) => command,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Command> for String {
    fn from(command: Command) -> Self {
        match command {
            Command::Custom(command) => command,
            other => other.as_str().to_string(),
        }
    }
}

// ============================================================================
// CommandFrame
// ============================================================================

/// Wire shape of an outbound command.
///
/// # Format
///
/// ```json
/// {"command": "<string>"}
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CommandFrame<'a> {
    /// The command string, sent verbatim.
    pub command: &'a str,
}

impl<'a> CommandFrame<'a> {
    /// Creates a frame wrapping the given command string.
    #[inline]
    #[must_use]
    pub const fn new(command: &'a str) -> Self {
        Self { command }
    }
}

// ============================================================================
// Tests
// ============================================================================
