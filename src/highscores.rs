//! Session history and high scores
//!
//! Every completed run is appended to a session log keyed by player name.
//! The log is the source of truth for high scores; nothing is derived
//! ahead of time. Storage failures never surface to gameplay: a full or
//! broken store logs a warning and the run continues.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Sessions kept when the store hits its size limit
pub const SESSION_RETENTION: usize = 100;

/// One completed (or ended) run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    /// Player name the session is recorded under
    pub player: String,
    pub score: u32,
    /// Run duration in seconds
    pub time: f32,
    /// Lives remaining at the end
    pub lives: u32,
    /// Unix timestamp in milliseconds; stamped at save time if unset
    #[serde(default)]
    pub timestamp: Option<f64>,
}

/// Persistence seam for session records
pub trait SessionStore {
    fn save_session(&mut self, session: GameSession);
    fn high_score(&self, player: &str) -> u32;
}

fn unix_millis() -> f64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as f64,
        Err(_) => 0.0,
    }
}

/// JSON-file-backed session store
pub struct FileSessionStore {
    path: PathBuf,
    sessions: Vec<GameSession>,
}

impl FileSessionStore {
    /// Open a store at `path`, loading any existing session log.
    /// A missing or unreadable file starts an empty log.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let sessions = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<Vec<GameSession>>(&json) {
                Ok(sessions) => {
                    log::info!("loaded {} sessions from {}", sessions.len(), path.display());
                    sessions
                }
                Err(err) => {
                    log::warn!("session log at {} is corrupt: {err}", path.display());
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self { path, sessions }
    }

    pub fn sessions(&self) -> &[GameSession] {
        &self.sessions
    }

    fn write(&self) -> std::io::Result<()> {
        let json = serde_json::to_string(&self.sessions)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        std::fs::write(&self.path, json)
    }
}

impl SessionStore for FileSessionStore {
    fn save_session(&mut self, mut session: GameSession) {
        if session.timestamp.is_none() {
            session.timestamp = Some(unix_millis());
        }
        self.sessions.push(session);

        if self.write().is_ok() {
            return;
        }
        // Out of space or similar. Drop everything but the most recent
        // sessions and retry once.
        let start = self.sessions.len().saturating_sub(SESSION_RETENTION);
        self.sessions.drain(..start);
        if let Err(err) = self.write() {
            log::warn!("failed to persist session log: {err}");
        }
    }

    fn high_score(&self, player: &str) -> u32 {
        self.sessions
            .iter()
            .filter(|s| s.player == player)
            .map(|s| s.score)
            .max()
            .unwrap_or(0)
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    pub sessions: Vec<GameSession>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save_session(&mut self, mut session: GameSession) {
        if session.timestamp.is_none() {
            session.timestamp = Some(unix_millis());
        }
        self.sessions.push(session);
    }

    fn high_score(&self, player: &str) -> u32 {
        self.sessions
            .iter()
            .filter(|s| s.player == player)
            .map(|s| s.score)
            .max()
            .unwrap_or(0)
    }
}
