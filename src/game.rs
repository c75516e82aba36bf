//! Game orchestrator
//!
//! Owns the sim state plus the ambient services the sim itself must not
//! know about: the session store, the score uploader, and the audio sink.
//! The frontend feeds it one `TickInput` per fixed step and reads the
//! state back for rendering.

use crate::audio::AudioSink;
use crate::consts::TICK_RATE;
use crate::highscores::{GameSession, SessionStore};
use crate::sim::state::{GamePhase, GameState};
use crate::sim::tick::{TickEvents, TickInput, tick};
use crate::submit::ScoreUploader;

pub struct Game {
    pub state: GameState,
    store: Box<dyn SessionStore>,
    uploader: Box<dyn ScoreUploader>,
    audio: Box<dyn AudioSink>,
    player_name: String,
    /// One session record per run
    session_recorded: bool,
}

impl Game {
    pub fn new(
        seed: u64,
        player_name: impl Into<String>,
        store: Box<dyn SessionStore>,
        uploader: Box<dyn ScoreUploader>,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        let player_name = player_name.into();
        let mut state = GameState::new(seed);
        state.high_score = store.high_score(&player_name);
        Self {
            state,
            store,
            uploader,
            audio,
            player_name,
            session_recorded: false,
        }
    }

    /// Advance one fixed step
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> TickEvents {
        if input.restart
            && matches!(
                self.state.phase,
                GamePhase::GameOver | GamePhase::LevelComplete
            )
        {
            self.restart();
            return TickEvents::default();
        }

        let events = tick(&mut self.state, input, dt, self.audio.as_mut());

        if (events.completed_run || events.game_over) && !self.session_recorded {
            self.session_recorded = true;
            self.record_session(events.completed_run);
        }
        events
    }

    /// Start a fresh run, keeping the persisted high score visible
    pub fn restart(&mut self) {
        log::info!("restarting run for {}", self.player_name);
        self.state = GameState::new(self.state.seed);
        self.state.high_score = self.store.high_score(&self.player_name);
        self.session_recorded = false;
    }

    fn record_session(&mut self, completed: bool) {
        let session = GameSession {
            player: self.player_name.clone(),
            score: self.state.score,
            time: self.state.frame as f32 / TICK_RATE,
            lives: self.state.lives,
            timestamp: None,
        };
        self.store.save_session(session.clone());
        if completed {
            self.uploader.submit(&session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::consts::SIM_DT;
    use crate::highscores::MemorySessionStore;
    use crate::submit::NullUploader;
    use glam::Vec2;

    fn game() -> Game {
        Game::new(
            7,
            "ada",
            Box::new(MemorySessionStore::new()),
            Box::new(NullUploader),
            Box::new(NullAudio),
        )
    }

    fn run(game: &mut Game, input: &TickInput, ticks: u32) -> TickEvents {
        let mut events = TickEvents::default();
        for _ in 0..ticks {
            events = game.tick(input, SIM_DT);
        }
        events
    }

    fn force_game_over(game: &mut Game) {
        game.state.lives = 1;
        game.state.player.pos = Vec2::new(850.0, 800.0);
        let events = run(game, &TickInput::default(), 1);
        assert!(events.game_over);
    }

    #[test]
    fn test_game_over_records_session_and_restart_reads_it() {
        let mut game = game();
        run(&mut game, &TickInput::default(), 60);

        // Grab a collectible so the recorded score is nonzero
        game.state.player.pos = game.state.collectibles[0].center() - Vec2::splat(10.0);
        run(&mut game, &TickInput::default(), 1);
        assert_eq!(game.state.score, 1);

        force_game_over(&mut game);

        let restart = TickInput {
            restart: true,
            ..TickInput::default()
        };
        game.tick(&restart, SIM_DT);
        assert_eq!(game.state.phase, GamePhase::Playing);
        assert_eq!(game.state.score, 0);
        // The previous run's score came back from the store
        assert_eq!(game.state.high_score, 1);
    }

    #[test]
    fn test_session_recorded_once_per_run() {
        let mut game = game();
        run(&mut game, &TickInput::default(), 60);
        force_game_over(&mut game);
        assert!(game.session_recorded);

        // Further game-over ticks must not record again
        run(&mut game, &TickInput::default(), 10);
        assert!(game.session_recorded);
    }

    #[test]
    fn test_restart_ignored_mid_run() {
        let mut game = game();
        run(&mut game, &TickInput::default(), 60);
        let frame = game.state.frame;

        let restart = TickInput {
            restart: true,
            ..TickInput::default()
        };
        game.tick(&restart, SIM_DT);
        assert_eq!(game.state.frame, frame + 1);
    }
}
