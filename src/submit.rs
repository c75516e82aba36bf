//! Fire-and-forget score upload
//!
//! Completed runs can be posted to a leaderboard service. Upload is best
//! effort: a dead endpoint logs a warning and gameplay is unaffected. The
//! request runs on a throwaway thread so the caller never blocks on the
//! network.

use crate::highscores::GameSession;

/// Outbound seam for completed-run submission
pub trait ScoreUploader {
    fn submit(&self, session: &GameSession);
}

/// Uploader that drops every submission; used offline and in tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NullUploader;

impl ScoreUploader for NullUploader {
    fn submit(&self, _session: &GameSession) {}
}

/// POSTs the session as JSON to a leaderboard endpoint
pub struct HttpScoreUploader {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpScoreUploader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl ScoreUploader for HttpScoreUploader {
    fn submit(&self, session: &GameSession) {
        let endpoint = self.endpoint.clone();
        let client = self.client.clone();
        let session = session.clone();
        std::thread::spawn(move || {
            match client.post(&endpoint).json(&session).send() {
                Ok(response) if response.status().is_success() => {
                    log::info!("score {} submitted for {}", session.score, session.player);
                }
                Ok(response) => {
                    log::warn!("score submission rejected: {}", response.status());
                }
                Err(err) => {
                    log::warn!("score submission failed: {err}");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_uploader_accepts_sessions() {
        let uploader = NullUploader;
        uploader.submit(&GameSession {
            player: "ada".to_string(),
            score: 7,
            time: 90.0,
            lives: 1,
            timestamp: None,
        });
    }
}
