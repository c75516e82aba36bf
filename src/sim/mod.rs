//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (list order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod level;
pub mod obstacles;
pub mod particles;
pub mod player;
pub mod rewind;
pub mod shake;
pub mod state;
pub mod tick;

pub use collision::{Contact, Rect, classify_contact};
pub use effects::{EffectKind, StatusEffects};
pub use level::LevelData;
pub use obstacles::{
    FallingPlatform, LaserHazard, LaserOrientation, LaserPhase, MovingPlatform, Obstacle,
    SpikeOrientation, SpikeTrap,
};
pub use particles::{Particle, ParticleBuffer, ParticleKind};
pub use player::{AnimState, Player, PlayerUpdate, Surface};
pub use rewind::{KinematicSample, RewindHistory};
pub use shake::ScreenShake;
pub use state::{
    Checkpoint, Collectible, ExitGate, GamePhase, GameState, Platform, PlatformStyle,
    PowerUpPickup,
};
pub use tick::{TickEvents, TickInput, tick};
