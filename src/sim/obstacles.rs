//! Level obstacles: timed lasers, spikes, moving and falling platforms
//!
//! Obstacles are a closed enum; every variant answers the same four
//! questions each tick (update, solid collider, dangerous overlap, effect
//! on the player) with no-ops where a question does not apply. Moving and
//! falling platforms are obstacles that also act as solid surfaces for the
//! player's platform collision.

use glam::Vec2;

use crate::audio::{AudioCue, AudioSink};
use crate::consts::{CANVAS_HEIGHT, GRAVITY, OFFSCREEN_DEATH_MARGIN};
use crate::sim::collision::Rect;
use crate::sim::player::Player;
use crate::tick_steps;

/// Laser beam orientation; also fixes the beam's dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaserOrientation {
    /// 200 x 10 beam
    Horizontal,
    /// 10 x 150 beam
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaserPhase {
    Inactive,
    Warning,
    Active,
}

/// Cycling laser hazard: warning, then firing, then dormant
#[derive(Debug, Clone)]
pub struct LaserHazard {
    pub pos: Vec2,
    pub orientation: LaserOrientation,
    pub cycle_time: f32,
    pub warning_time: f32,
    pub active_time: f32,
    pub phase: LaserPhase,
    elapsed: f32,
}

impl LaserHazard {
    pub fn new(
        pos: Vec2,
        orientation: LaserOrientation,
        cycle_time: f32,
        warning_time: f32,
        active_time: f32,
    ) -> Self {
        Self {
            pos,
            orientation,
            cycle_time,
            warning_time,
            active_time,
            phase: LaserPhase::Inactive,
            elapsed: 0.0,
        }
    }

    pub fn size(&self) -> Vec2 {
        match self.orientation {
            LaserOrientation::Horizontal => Vec2::new(200.0, 10.0),
            LaserOrientation::Vertical => Vec2::new(10.0, 150.0),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size(),
        }
    }

    pub fn dangerous(&self) -> bool {
        self.phase == LaserPhase::Active
    }

    /// Phase from position within the cycle: warning window first, then
    /// the firing window, dormant for the remainder. Cues fire on phase
    /// entry only.
    pub fn update(&mut self, dt: f32, audio: &mut dyn AudioSink) {
        let previous = self.phase;
        self.elapsed += dt;
        let time_in_cycle = self.elapsed % self.cycle_time;

        self.phase = if time_in_cycle < self.warning_time {
            LaserPhase::Warning
        } else if time_in_cycle < self.warning_time + self.active_time {
            LaserPhase::Active
        } else {
            LaserPhase::Inactive
        };

        if self.phase != previous {
            match self.phase {
                LaserPhase::Warning => audio.play(AudioCue::LaserWarning),
                LaserPhase::Active => audio.play(AudioCue::LaserFire),
                LaserPhase::Inactive => {}
            }
        }
    }
}

/// Which way a spike's points face; fixes footprint and knockback axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpikeOrientation {
    Up,
    Down,
    Left,
    Right,
}

/// Static spike trap, always dangerous
#[derive(Debug, Clone)]
pub struct SpikeTrap {
    pub pos: Vec2,
    pub orientation: SpikeOrientation,
}

impl SpikeTrap {
    pub const KNOCKBACK_FORCE: f32 = 8.0;

    pub fn new(pos: Vec2, orientation: SpikeOrientation) -> Self {
        Self { pos, orientation }
    }

    pub fn size(&self) -> Vec2 {
        match self.orientation {
            SpikeOrientation::Up | SpikeOrientation::Down => Vec2::new(40.0, 20.0),
            SpikeOrientation::Left | SpikeOrientation::Right => Vec2::new(20.0, 40.0),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size(),
        }
    }

    fn apply_effect(&self, player: &mut Player) {
        if player.invincible {
            return;
        }
        match self.orientation {
            SpikeOrientation::Up => player.vel.y = -Self::KNOCKBACK_FORCE,
            SpikeOrientation::Down => player.vel.y = Self::KNOCKBACK_FORCE,
            SpikeOrientation::Left => player.vel.x = -Self::KNOCKBACK_FORCE,
            SpikeOrientation::Right => player.vel.x = Self::KNOCKBACK_FORCE,
        }
        player.hit_by_obstacle = true;
    }
}

/// Platform shuttling between waypoints, reversing at the ends
#[derive(Debug, Clone)]
pub struct MovingPlatform {
    pub pos: Vec2,
    pub size: Vec2,
    pub path: Vec<Vec2>,
    pub speed: f32,
    pub velocity: Vec2,
    index: usize,
    direction: i32,
}

impl MovingPlatform {
    pub fn new(pos: Vec2, size: Vec2, path: Vec<Vec2>, speed: f32) -> Self {
        let mut platform = Self {
            pos,
            size,
            path,
            speed,
            velocity: Vec2::ZERO,
            index: 0,
            direction: 1,
        };
        if platform.path.len() > 1 {
            platform.update_velocity();
        }
        platform
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.path.len() < 2 {
            return;
        }
        self.pos += self.velocity * tick_steps(dt);

        // Arrival tolerance is one tick's travel
        let target = self.path[self.index];
        if self.pos.distance(target) < self.speed {
            if self.direction == 1 {
                self.index += 1;
                if self.index >= self.path.len() {
                    self.index = self.path.len() - 2;
                    self.direction = -1;
                }
            } else if self.index == 0 {
                self.index = 1;
                self.direction = 1;
            } else {
                self.index -= 1;
            }
            self.update_velocity();
        }
    }

    fn update_velocity(&mut self) {
        let target = self.path[self.index];
        let delta = target - self.pos;
        let distance = delta.length();
        if distance > 0.0 {
            self.velocity = delta / distance * self.speed;
        }
    }
}

/// Platform that crumbles half a second after being stood on
#[derive(Debug, Clone)]
pub struct FallingPlatform {
    pub pos: Vec2,
    pub size: Vec2,
    pub falling: bool,
    original_y: f32,
    fall_timer: f32,
    fall_speed: f32,
    respawn_timer: f32,
    player_on: bool,
}

impl FallingPlatform {
    pub const FALL_DELAY: f32 = 0.5;
    pub const RESPAWN_TIME: f32 = 5.0;

    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            falling: false,
            original_y: pos.y,
            fall_timer: 0.0,
            fall_speed: 0.0,
            respawn_timer: 0.0,
            player_on: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Mark the platform as stood on this tick. The flag is consumed at
    /// the end of the next update, so the collision step must re-assert
    /// it every tick the player stays on.
    pub fn notify_stand(&mut self) {
        if !self.falling && self.pos.y == self.original_y {
            self.player_on = true;
        }
    }

    pub fn update(&mut self, dt: f32) {
        let steps = tick_steps(dt);
        if self.falling {
            self.fall_speed += GRAVITY * 2.0 * steps;
            self.pos.y += self.fall_speed * steps;

            if self.pos.y > CANVAS_HEIGHT + OFFSCREEN_DEATH_MARGIN {
                self.falling = false;
                self.respawn_timer = 0.0;
            }
        } else if self.pos.y > self.original_y {
            self.respawn_timer += dt;
            if self.respawn_timer >= Self::RESPAWN_TIME {
                self.pos.y = self.original_y;
                self.fall_speed = 0.0;
                self.fall_timer = 0.0;
                self.respawn_timer = 0.0;
            }
        } else if self.player_on {
            self.fall_timer += dt;
            if self.fall_timer >= Self::FALL_DELAY {
                self.falling = true;
            }
        } else {
            // Stand flag not re-asserted since the last tick: no partial credit
            self.fall_timer = 0.0;
        }

        self.player_on = false;
    }
}

/// Closed set of obstacle variants
#[derive(Debug, Clone)]
pub enum Obstacle {
    Laser(LaserHazard),
    Spike(SpikeTrap),
    MovingPlatform(MovingPlatform),
    FallingPlatform(FallingPlatform),
}

impl Obstacle {
    /// Per-tick state advance (kinematics, hazard cycles)
    pub fn update(&mut self, dt: f32, audio: &mut dyn AudioSink) {
        match self {
            Obstacle::Laser(laser) => laser.update(dt, audio),
            Obstacle::Spike(_) => {}
            Obstacle::MovingPlatform(platform) => platform.update(dt),
            Obstacle::FallingPlatform(platform) => platform.update(dt),
        }
    }

    /// Solid surface (rect + carry velocity) for the platform variants
    pub fn collider(&self) -> Option<(Rect, Vec2)> {
        match self {
            Obstacle::Laser(_) | Obstacle::Spike(_) => None,
            Obstacle::MovingPlatform(platform) => Some((platform.rect(), platform.velocity)),
            Obstacle::FallingPlatform(platform) => Some((platform.rect(), Vec2::ZERO)),
        }
    }

    /// Whether overlapping this obstacle right now is harmful
    pub fn check_collision(&self, player_rect: &Rect) -> bool {
        match self {
            Obstacle::Laser(laser) => laser.dangerous() && laser.rect().overlaps(player_rect),
            Obstacle::Spike(spike) => spike.rect().overlaps(player_rect),
            Obstacle::MovingPlatform(_) | Obstacle::FallingPlatform(_) => false,
        }
    }

    /// Harmful-overlap consequence; no-op for the platform variants
    pub fn apply_effect(&self, player: &mut Player) {
        match self {
            Obstacle::Laser(laser) => {
                if laser.dangerous() && !player.invincible {
                    player.hit_by_obstacle = true;
                }
            }
            Obstacle::Spike(spike) => spike.apply_effect(player),
            Obstacle::MovingPlatform(_) | Obstacle::FallingPlatform(_) => {}
        }
    }
}
