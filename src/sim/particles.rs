//! Cosmetic particle system
//!
//! Particles are pure state here; the host renders them. Ages are measured
//! in ticks and every emitter draws from the sim's seeded RNG so a replay
//! produces the same bursts.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use crate::consts::{CANVAS_WIDTH, MAX_PARTICLES};

/// Accent purple used for trails and rewind ghosts
pub const ACCENT_COLOR: u32 = 0x790ECB;

const EXPLOSION_COLORS: [u32; 3] = [0xff6b6b, 0xffd93d, 0xff8c42];
const SPARKLE_COLORS: [u32; 3] = [0xffffff, 0xffff00, ACCENT_COLOR];
const CONFETTI_COLORS: [u32; 5] = [ACCENT_COLOR, 0xff6b6b, 0x4ecdc4, 0xffd93d, 0x95e1d3];

/// Visual class of a particle; also selects its gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Default,
    Trail,
    Sparkle,
    Explosion,
    Confetti,
}

impl ParticleKind {
    /// Downward acceleration per tick
    fn gravity(self) -> f32 {
        match self {
            ParticleKind::Confetti => 0.3,
            ParticleKind::Sparkle => 0.1,
            _ => 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Packed 0xRRGGBB
    pub color: u32,
    /// Remaining lifetime in ticks
    pub life: f32,
    pub max_life: f32,
    pub kind: ParticleKind,
    /// Confetti spin (radians)
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: u32, life: f32, kind: ParticleKind) -> Self {
        Self {
            pos,
            vel,
            color,
            life,
            max_life: life,
            kind,
            rotation: 0.0,
            rotation_speed: 0.0,
        }
    }

    /// Age one tick: integrate, apply per-kind gravity, decrement life
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.kind.gravity();
        if self.kind == ParticleKind::Confetti {
            self.rotation += self.rotation_speed;
        }
        self.life -= 1.0;
    }

    /// Render alpha in [0, 1]
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Capped particle buffer; spawning past the cap evicts the oldest
#[derive(Debug, Clone, Default)]
pub struct ParticleBuffer {
    particles: Vec<Particle>,
}

impl ParticleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, particle: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// Age every particle one tick and cull the dead
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.update();
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    // === Emitters ===

    /// Single movement-trail mote
    pub fn spawn_trail(&mut self, pos: Vec2, vel: Vec2) {
        self.spawn(Particle::new(pos, vel, ACCENT_COLOR, 15.0, ParticleKind::Trail));
    }

    /// Ring of impact squares (wall hits, ceiling bonks)
    pub fn spawn_explosion(&mut self, pos: Vec2, count: usize, rng: &mut Pcg32) {
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let speed = 3.0 + rng.random::<f32>() * 2.0;
            let color = EXPLOSION_COLORS[rng.random_range(0..EXPLOSION_COLORS.len())];
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            self.spawn(Particle::new(pos, vel, color, 25.0, ParticleKind::Explosion));
        }
    }

    /// Upward-biased sparkle ring (collectibles, power-ups, checkpoints)
    pub fn spawn_sparkles(&mut self, pos: Vec2, count: usize, rng: &mut Pcg32) {
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let speed = 1.0 + rng.random::<f32>() * 2.0;
            let color = SPARKLE_COLORS[rng.random_range(0..SPARKLE_COLORS.len())];
            let vx = angle.cos() * speed;
            let vy = -((angle.sin() * speed).abs() + 1.0);
            self.spawn(Particle::new(
                pos,
                Vec2::new(vx, vy),
                color,
                30.0,
                ParticleKind::Sparkle,
            ));
        }
    }

    /// Celebration confetti raining from the top of the screen
    pub fn spawn_confetti(&mut self, count: usize, rng: &mut Pcg32) {
        for _ in 0..count {
            let pos = Vec2::new(
                rng.random::<f32>() * CANVAS_WIDTH,
                -20.0 - rng.random::<f32>() * 100.0,
            );
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * 4.0,
                rng.random::<f32>() * 2.0,
            );
            let color = CONFETTI_COLORS[rng.random_range(0..CONFETTI_COLORS.len())];
            let mut p = Particle::new(pos, vel, color, 120.0, ParticleKind::Confetti);
            p.rotation = rng.random::<f32>() * TAU;
            p.rotation_speed = (rng.random::<f32>() - 0.5) * 0.2;
            self.spawn(p);
        }
    }

    /// Generic radial burst with an upward bias (landings, deaths, rewind)
    pub fn spawn_burst(&mut self, pos: Vec2, color: u32, count: usize, rng: &mut Pcg32) {
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let speed = 2.0 + rng.random::<f32>() * 2.0;
            let vel = Vec2::new(angle.cos() * speed, angle.sin() * speed - 2.0);
            let life = 30.0 + rng.random::<f32>() * 20.0;
            self.spawn(Particle::new(pos, vel, color, life, ParticleKind::Default));
        }
    }
}
