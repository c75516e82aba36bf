//! Game state: phases, world entities, the whole simulation snapshot
//!
//! `GameState` owns everything the tick mutates: the player, the level's
//! entity lists, the status effects, shake, particles, and the seeded RNG
//! driving probabilistic emission. Two states built from the same seed and
//! fed the same inputs stay identical.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{MAX_LIVES, MAX_TIME_WARPS};
use crate::sim::collision::Rect;
use crate::sim::effects::{EffectKind, StatusEffects};
use crate::sim::level::LevelData;
use crate::sim::obstacles::Obstacle;
use crate::sim::particles::ParticleBuffer;
use crate::sim::player::Player;
use crate::sim::shake::ScreenShake;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Between levels; a short timer runs before the next level loads
    LevelTransition,
    /// Final level's exit reached
    LevelComplete,
    /// Run ended
    GameOver,
}

/// Render style for static platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformStyle {
    Stone,
    Metal,
    Neon,
}

/// Static level geometry
#[derive(Debug, Clone)]
pub struct Platform {
    pub rect: Rect,
    pub style: PlatformStyle,
}

/// Score pickup; bobbing is render-only, seeded by `bob_phase`
#[derive(Debug, Clone)]
pub struct Collectible {
    pub pos: Vec2,
    pub bob_phase: f32,
    pub collected: bool,
}

impl Collectible {
    pub const SIZE: f32 = 20.0;

    pub fn new(pos: Vec2, bob_phase: f32) -> Self {
        Self {
            pos,
            bob_phase,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(Self::SIZE),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(Self::SIZE * 0.5)
    }
}

/// Floating power-up pickup with a respawn cycle
#[derive(Debug, Clone)]
pub struct PowerUpPickup {
    pub pos: Vec2,
    pub kind: EffectKind,
    pub collected: bool,
    respawn_timer: f32,
}

impl PowerUpPickup {
    pub const SIZE: f32 = 30.0;
    pub const RESPAWN_DURATION: f32 = 10.0;

    pub fn new(pos: Vec2, kind: EffectKind) -> Self {
        Self {
            pos,
            kind,
            collected: false,
            respawn_timer: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(Self::SIZE),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(Self::SIZE * 0.5)
    }

    /// Run the respawn countdown while collected
    pub fn update(&mut self, dt: f32) {
        if self.collected {
            self.respawn_timer += dt;
            if self.respawn_timer >= Self::RESPAWN_DURATION {
                self.collected = false;
                self.respawn_timer = 0.0;
            }
        }
    }

    pub fn collect(&mut self) {
        self.collected = true;
        self.respawn_timer = 0.0;
    }
}

/// One-shot respawn marker
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub pos: Vec2,
    pub activated: bool,
}

impl Checkpoint {
    pub const WIDTH: f32 = 40.0;
    pub const HEIGHT: f32 = 60.0;

    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            activated: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::new(Self::WIDTH, Self::HEIGHT),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(Self::WIDTH, Self::HEIGHT) * 0.5
    }
}

/// Level exit
#[derive(Debug, Clone)]
pub struct ExitGate {
    pub pos: Vec2,
}

impl ExitGate {
    pub const WIDTH: f32 = 60.0;
    pub const HEIGHT: f32 = 100.0;

    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::new(Self::WIDTH, Self::HEIGHT),
        }
    }
}

/// The full simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Ticks since the run started
    pub frame: u64,
    /// 1-based index of the loaded level
    pub level_index: u32,
    /// Remaining ticks of the level transition
    pub transition_ticks: u32,

    pub score: u32,
    pub high_score: u32,
    /// One-shot guard for the new-high-score confetti
    pub confetti_fired: bool,
    pub lives: u32,
    pub time_warps: u32,
    /// Global time scale written by the slow-motion effect
    pub tick_scale: f32,

    pub player: Player,
    pub platforms: Vec<Platform>,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub powerups: Vec<PowerUpPickup>,
    pub checkpoints: Vec<Checkpoint>,
    pub exit_gate: ExitGate,

    pub effects: StatusEffects,
    pub shake: ScreenShake,
    pub particles: ParticleBuffer,
}

impl GameState {
    /// Fresh run: level 1, full lives and rewind charges
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            frame: 0,
            level_index: 1,
            transition_ticks: 0,
            score: 0,
            high_score: 0,
            confetti_fired: false,
            lives: MAX_LIVES,
            time_warps: MAX_TIME_WARPS,
            tick_scale: 1.0,
            player: Player::new(Vec2::ZERO),
            platforms: Vec::new(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            powerups: Vec::new(),
            checkpoints: Vec::new(),
            exit_gate: ExitGate::new(Vec2::ZERO),
            effects: StatusEffects::new(),
            shake: ScreenShake::new(),
            particles: ParticleBuffer::new(),
        };
        state.load_level(1, &LevelData::level(1));
        state
    }

    /// Swap in a level's entities and move the player to its spawn.
    /// Score, lives, rewind charges, and live status effects carry across
    /// levels, so the player is repositioned rather than rebuilt.
    pub fn load_level(&mut self, index: u32, data: &LevelData) {
        self.level_index = index;
        self.platforms = data.platforms.clone();
        self.obstacles = data.obstacles.clone();
        self.collectibles = data.collectibles.clone();
        self.powerups = data.powerups.clone();
        self.checkpoints = data.checkpoints.clone();
        self.exit_gate = data.exit_gate.clone();
        self.player.set_checkpoint(data.player_spawn);
        self.player.respawn();
        self.particles.clear();
    }

    pub fn is_final_level(&self) -> bool {
        self.level_index >= LevelData::LEVEL_COUNT
    }
}
