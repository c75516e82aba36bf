//! Warp Dash - a side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `audio`: Audio cue seam (the host synthesizes or maps the cues)
//! - `highscores`: Session persistence and high scores
//! - `submit`: Fire-and-forget score upload
//! - `game`: Orchestrator binding the sim to its collaborators

pub mod audio;
pub mod game;
pub mod highscores;
pub mod sim;
pub mod submit;

pub use audio::{AudioCue, AudioSink, NullAudio, RecordingAudio};
pub use game::Game;
pub use highscores::{FileSessionStore, GameSession, MemorySessionStore, SessionStore};
pub use submit::{HttpScoreUploader, NullUploader, ScoreUploader};

/// Game configuration constants
///
/// World units are pixels, top-left origin, +y down. Velocities are
/// pixels per tick; integration scales by `dt * TICK_RATE` so a stable
/// 60 Hz cadence reproduces the tuned numbers exactly.
pub mod consts {
    /// Fixed simulation rate (Hz)
    pub const TICK_RATE: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE;

    /// World dimensions (the visible canvas; levels scroll past the right edge)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player kinematics
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_POWER: f32 = 12.0;
    pub const MOVE_SPEED: f32 = 5.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const GROUND_ACCEL: f32 = 0.8;
    pub const AIR_ACCEL: f32 = 0.4;
    pub const GROUND_FRICTION: f32 = 0.85;
    pub const AIR_FRICTION: f32 = 0.95;
    /// Extra damping applied while accelerating against current motion
    pub const TURNAROUND_DAMPING: f32 = 0.7;
    /// Horizontal speeds below this snap to zero
    pub const VX_DEADBAND: f32 = 0.1;
    /// Grace window for jumping after walking off a ledge (seconds)
    pub const COYOTE_TIME: f32 = 0.1;
    /// How long a jump press is remembered before landing (seconds)
    pub const JUMP_BUFFER_TIME: f32 = 0.1;
    /// Gravity multiplier while falling or after an early jump release
    pub const FALL_GRAVITY_MULTIPLIER: f32 = 1.5;
    /// Minimum impact speed (px/tick) for landing dust and shake
    pub const LANDING_DUST_THRESHOLD: f32 = 3.0;

    /// Time warp (rewind)
    pub const MAX_TIME_WARPS: u32 = 3;
    pub const REWIND_HISTORY_SECONDS: f32 = 2.5;
    /// History capacity in samples (one per tick)
    pub const REWIND_HISTORY_CAPACITY: usize = (REWIND_HISTORY_SECONDS * TICK_RATE) as usize;
    /// Minimum recorded samples before a rewind may start
    pub const MIN_REWIND_SAMPLES: usize = 30;
    /// History samples replayed per tick while rewinding
    pub const REWIND_STEP: usize = 2;

    pub const MAX_PARTICLES: usize = 500;
    pub const MAX_LIVES: u32 = 3;
    /// How far below the world bottom the player may fall before dying
    pub const OFFSCREEN_DEATH_MARGIN: f32 = 100.0;
}

/// Scale factor converting per-tick velocities to this step's displacement
#[inline]
pub fn tick_steps(dt: f32) -> f32 {
    dt * consts::TICK_RATE
}
