//! Player kinematic controller
//!
//! Owns horizontal acceleration and friction, jumping (coyote time, jump
//! buffering, double jump, variable height), platform collision against a
//! per-tick surface list, the rewind history, and cosmetic emission. The
//! controller reports deaths and consumed rewind charges; lives and
//! respawn policy belong to the tick orchestration.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::audio::{AudioCue, AudioSink};
use crate::consts::{
    AIR_ACCEL, CANVAS_HEIGHT, COYOTE_TIME, FALL_GRAVITY_MULTIPLIER, GRAVITY, GROUND_ACCEL,
    GROUND_FRICTION, AIR_FRICTION, JUMP_BUFFER_TIME, JUMP_POWER, LANDING_DUST_THRESHOLD,
    MIN_REWIND_SAMPLES, MOVE_SPEED, OFFSCREEN_DEATH_MARGIN, PLAYER_HEIGHT, PLAYER_WIDTH,
    REWIND_STEP, TURNAROUND_DAMPING, VX_DEADBAND,
};
use crate::sim::collision::{Contact, Rect, classify_contact};
use crate::sim::particles::{ACCENT_COLOR, Particle, ParticleBuffer, ParticleKind};
use crate::sim::rewind::{KinematicSample, RewindHistory};
use crate::sim::shake::ScreenShake;
use crate::sim::tick::TickInput;
use crate::tick_steps;

/// One solid surface for this tick's platform collision: a rectangle plus
/// the velocity it would impart to a rider (zero for static geometry)
#[derive(Debug, Clone, Copy)]
pub struct Surface {
    pub rect: Rect,
    pub vel: Vec2,
}

/// Animation state, derived from motion each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimState {
    Idle,
    Running,
    Jumping,
    Falling,
}

/// What the controller wants the orchestrator to know after an update
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerUpdate {
    /// Fell off the world this tick
    pub died: bool,
    /// A rewind charge was consumed this tick
    pub warp_consumed: bool,
    /// Index into the surface list the player landed on, if any
    pub standing_on: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    pub anim_state: AnimState,
    pub checkpoint: Vec2,

    // Power-up hooks, written by the status-effect registry
    pub speed_multiplier: f32,
    pub invincible: bool,
    pub has_double_jump: bool,
    pub double_jump_available: bool,

    // Set by obstacle effects, consumed by the tick orchestration
    pub hit_by_obstacle: bool,

    pub history: RewindHistory,
    pub is_rewinding: bool,
    rewind_cursor: usize,

    coyote_timer: f32,
    was_on_ground: bool,
    jump_buffer_timer: f32,
    is_jumping: bool,
    was_jump_pressed: bool,
    just_landed: bool,
    previous_vy: f32,
    idle_timer: f32,
    // Velocity of the platform last stood on, for jump momentum transfer
    carried_vel: Option<Vec2>,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            on_ground: false,
            anim_state: AnimState::Idle,
            checkpoint: spawn,
            speed_multiplier: 1.0,
            invincible: false,
            has_double_jump: false,
            double_jump_available: false,
            hit_by_obstacle: false,
            history: RewindHistory::new(),
            is_rewinding: false,
            rewind_cursor: 0,
            coyote_timer: 0.0,
            was_on_ground: false,
            jump_buffer_timer: 0.0,
            is_jumping: false,
            was_jump_pressed: false,
            just_landed: false,
            previous_vy: 0.0,
            idle_timer: 0.0,
            carried_vel: None,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size() * 0.5
    }

    /// Move the respawn point (checkpoint touch)
    pub fn set_checkpoint(&mut self, pos: Vec2) {
        self.checkpoint = pos;
    }

    /// Snap back to the checkpoint with zeroed velocity and a fresh history
    pub fn respawn(&mut self) {
        self.pos = self.checkpoint;
        self.vel = Vec2::ZERO;
        self.history.clear();
        self.is_rewinding = false;
    }

    pub fn update(
        &mut self,
        input: &TickInput,
        surfaces: &[Surface],
        time_warps_remaining: u32,
        dt: f32,
        particles: &mut ParticleBuffer,
        shake: &mut ScreenShake,
        audio: &mut dyn AudioSink,
        rng: &mut Pcg32,
    ) -> PlayerUpdate {
        let mut outcome = PlayerUpdate::default();

        if self.is_rewinding {
            self.update_rewind(particles, rng);
            return outcome;
        }

        self.history.push(KinematicSample {
            pos: self.pos,
            vel: self.vel,
        });

        // Horizontal control: accelerate toward the target speed
        let max_speed = MOVE_SPEED * self.speed_multiplier;
        let target_vx = if input.left {
            -max_speed
        } else if input.right {
            max_speed
        } else {
            0.0
        };

        let accel = if self.on_ground { GROUND_ACCEL } else { AIR_ACCEL };
        let friction = if self.on_ground { GROUND_FRICTION } else { AIR_FRICTION };

        if target_vx != 0.0 {
            self.vel.x += (target_vx - self.vel.x) * accel;
            // Extra damping when pushing against current motion
            if target_vx.signum() != self.vel.x.signum() && self.vel.x.abs() > 0.5 {
                self.vel.x *= TURNAROUND_DAMPING;
            }
        } else {
            self.vel.x *= friction;
            if self.vel.x.abs() < VX_DEADBAND {
                self.vel.x = 0.0;
            }
        }

        if self.vel.x.abs() > max_speed {
            self.vel.x = self.vel.x.signum() * max_speed;
        }

        // Coyote window: refilled on the ground, runs down after leaving it
        if self.on_ground {
            self.coyote_timer = COYOTE_TIME;
            self.was_on_ground = true;
        } else if self.was_on_ground {
            self.coyote_timer -= dt;
            if self.coyote_timer <= 0.0 {
                self.was_on_ground = false;
            }
        }

        if self.jump_buffer_timer > 0.0 {
            self.jump_buffer_timer -= dt;
        }

        // A press with no jump available is remembered briefly
        if input.jump && !self.on_ground && self.coyote_timer <= 0.0 {
            self.jump_buffer_timer = JUMP_BUFFER_TIME;
        }

        let can_jump = self.on_ground || self.coyote_timer > 0.0;
        let can_double_jump = self.has_double_jump
            && self.double_jump_available
            && !self.on_ground
            && self.coyote_timer <= 0.0;
        let should_jump =
            (input.jump && can_jump) || (self.jump_buffer_timer > 0.0 && self.on_ground);
        let should_double_jump = input.jump && can_double_jump && !self.was_jump_pressed;

        if should_jump {
            self.vel.y = -JUMP_POWER;
            self.on_ground = false;
            self.coyote_timer = 0.0;
            self.was_on_ground = false;
            self.jump_buffer_timer = 0.0;
            self.is_jumping = true;

            // Inherit half the platform's horizontal velocity
            if let Some(platform_vel) = self.carried_vel {
                self.vel.x += platform_vel.x * 0.5;
            }
            audio.play(AudioCue::Jump);
        } else if should_double_jump {
            self.vel.y = -JUMP_POWER;
            self.double_jump_available = false;
            self.is_jumping = true;
            particles.spawn_sparkles(self.center(), 12, rng);
            audio.play(AudioCue::Jump);
        }

        self.was_jump_pressed = input.jump;
        if !input.jump && self.is_jumping {
            self.is_jumping = false;
        }

        // Rewind activation skips the rest of the tick entirely
        if input.rewind
            && time_warps_remaining > 0
            && !self.is_rewinding
            && self.history.len() >= MIN_REWIND_SAMPLES
        {
            self.start_rewind(particles, audio, rng);
            outcome.warp_consumed = true;
            return outcome;
        }

        // Stronger gravity while falling, or rising with the jump released
        let gravity_multiplier = if self.vel.y > 0.0 {
            FALL_GRAVITY_MULTIPLIER
        } else if self.vel.y < 0.0 && !input.jump && !self.is_jumping {
            FALL_GRAVITY_MULTIPLIER
        } else {
            1.0
        };
        self.vel.y += GRAVITY * gravity_multiplier * tick_steps(dt);

        let step = self.vel * tick_steps(dt);
        self.pos += step;

        // Movement trail
        if self.vel.length() > 1.0 && rng.random::<f32>() < 0.3 {
            let jitter = Vec2::new(
                (rng.random::<f32>() - 0.5) * 2.0,
                (rng.random::<f32>() - 0.5) * 2.0,
            );
            particles.spawn_trail(self.center(), jitter);
        }

        self.resolve_platform_collisions(surfaces, step, &mut outcome, particles, shake, audio, rng);

        // Ride the platform we are standing on
        let carried = outcome
            .standing_on
            .map(|i| surfaces[i].vel)
            .filter(|v| *v != Vec2::ZERO);
        if let Some(platform_vel) = carried {
            if self.on_ground {
                self.pos.x += platform_vel.x * tick_steps(dt);
                // Upward-moving platforms push the rider; downward ones let
                // gravity keep the rider seated
                if platform_vel.y < 0.0 {
                    self.pos.y += platform_vel.y * tick_steps(dt);
                }
                self.carried_vel = Some(platform_vel);
            }
        } else if !self.on_ground {
            self.carried_vel = None;
        }

        self.update_animation(dt, particles, rng);

        self.previous_vy = self.vel.y;
        if !self.on_ground {
            self.just_landed = false;
        }

        // Speed boost trail
        if self.speed_multiplier > 1.0 && self.vel.x.abs() > 1.0 && rng.random::<f32>() < 0.5 {
            let offset = Vec2::new(
                (rng.random::<f32>() - 0.5) * PLAYER_WIDTH,
                (rng.random::<f32>() - 0.5) * PLAYER_HEIGHT,
            );
            let jitter = Vec2::new(
                (rng.random::<f32>() - 0.5) * 2.0,
                (rng.random::<f32>() - 0.5) * 2.0,
            );
            particles.spawn(Particle::new(
                self.center() + offset,
                jitter,
                0xffd93d,
                15.0,
                ParticleKind::Trail,
            ));
        }

        if self.pos.y > CANVAS_HEIGHT + OFFSCREEN_DEATH_MARGIN {
            outcome.died = true;
        }
        outcome
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_platform_collisions(
        &mut self,
        surfaces: &[Surface],
        step: Vec2,
        outcome: &mut PlayerUpdate,
        particles: &mut ParticleBuffer,
        shake: &mut ScreenShake,
        audio: &mut dyn AudioSink,
        rng: &mut Pcg32,
    ) {
        self.on_ground = false;

        for (index, surface) in surfaces.iter().enumerate() {
            let rect = self.rect();
            if !rect.overlaps(&surface.rect) {
                continue;
            }
            match classify_contact(&rect, step, &surface.rect) {
                Some(Contact::Landing) => {
                    let landing_speed = self.previous_vy;
                    self.pos.y = surface.rect.top() - PLAYER_HEIGHT;
                    self.vel.y = 0.0;
                    self.on_ground = true;
                    outcome.standing_on = Some(index);

                    if self.has_double_jump {
                        self.double_jump_available = true;
                    }

                    if !self.just_landed && landing_speed > LANDING_DUST_THRESHOLD {
                        self.just_landed = true;
                        let impact = (landing_speed / 15.0).min(1.0);
                        let count = (8.0 + impact * 8.0) as usize;
                        let feet = Vec2::new(self.center().x, self.pos.y + PLAYER_HEIGHT);
                        particles.spawn_explosion(feet, count, rng);
                        shake.trigger(3.0 + impact * 5.0, 0.2);
                        audio.play(AudioCue::Land);
                    }
                }
                Some(Contact::Ceiling) => {
                    self.pos.y = surface.rect.bottom();
                    self.vel.y = 0.0;
                    let head = Vec2::new(self.center().x, self.pos.y);
                    particles.spawn_explosion(head, 8, rng);
                }
                Some(Contact::WallRight) => {
                    self.pos.x = surface.rect.left() - PLAYER_WIDTH;
                    self.vel.x = 0.0;
                    let side = Vec2::new(self.pos.x + PLAYER_WIDTH, self.center().y);
                    particles.spawn_explosion(side, 8, rng);
                }
                Some(Contact::WallLeft) => {
                    self.pos.x = surface.rect.right();
                    self.vel.x = 0.0;
                    let side = Vec2::new(self.pos.x, self.center().y);
                    particles.spawn_explosion(side, 8, rng);
                }
                None => {}
            }
        }
    }

    fn update_animation(&mut self, dt: f32, particles: &mut ParticleBuffer, rng: &mut Pcg32) {
        if !self.on_ground {
            self.anim_state = if self.vel.y < 0.0 {
                AnimState::Jumping
            } else {
                AnimState::Falling
            };
            self.idle_timer = 0.0;
        } else if self.vel.x.abs() > 0.5 {
            self.anim_state = AnimState::Running;
            self.idle_timer = 0.0;

            // Running dust
            if rng.random::<f32>() < 0.15 {
                let feet = Vec2::new(
                    self.center().x + (rng.random::<f32>() - 0.5) * PLAYER_WIDTH,
                    self.pos.y + PLAYER_HEIGHT,
                );
                let vel = Vec2::new(
                    (rng.random::<f32>() - 0.5) * 1.0,
                    -rng.random::<f32>() * 0.5,
                );
                particles.spawn_trail(feet, vel);
            }
        } else {
            self.anim_state = AnimState::Idle;
            self.idle_timer += dt;

            // Ambient motes after standing still for a second
            if self.idle_timer > 1.0 && rng.random::<f32>() < 0.02 {
                let pos = Vec2::new(
                    self.center().x + (rng.random::<f32>() - 0.5) * PLAYER_WIDTH,
                    self.center().y,
                );
                let vel = Vec2::new(
                    (rng.random::<f32>() - 0.5) * 0.5,
                    -rng.random::<f32>() * 0.3,
                );
                particles.spawn_trail(pos, vel);
            }
        }
    }

    fn start_rewind(
        &mut self,
        particles: &mut ParticleBuffer,
        audio: &mut dyn AudioSink,
        rng: &mut Pcg32,
    ) {
        self.is_rewinding = true;
        self.rewind_cursor = self.history.newest_index().unwrap_or(0);
        particles.spawn_burst(self.center(), ACCENT_COLOR, 20, rng);
        audio.play(AudioCue::TimeWarp);
    }

    /// Step the cursor backwards at double speed, copying samples into the
    /// live state. The rewinding flag clears on the tick the cursor lands
    /// on 0; the stale samples ahead of it are overwritten by later
    /// recording.
    fn update_rewind(&mut self, particles: &mut ParticleBuffer, rng: &mut Pcg32) {
        if self.rewind_cursor == 0 || self.history.is_empty() {
            self.is_rewinding = false;
            return;
        }

        self.rewind_cursor = self.rewind_cursor.saturating_sub(REWIND_STEP);
        if let Some(sample) = self.history.get(self.rewind_cursor) {
            self.pos = sample.pos;
            self.vel = sample.vel;
        }

        // Ghost trail
        if rng.random::<f32>() < 0.3 {
            let jitter = Vec2::new(
                (rng.random::<f32>() - 0.5) * 2.0,
                (rng.random::<f32>() - 0.5) * 2.0,
            );
            particles.spawn(Particle::new(
                self.center(),
                jitter,
                ACCENT_COLOR,
                20.0,
                ParticleKind::Default,
            ));
        }

        if self.rewind_cursor == 0 {
            self.is_rewinding = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::consts::{MAX_TIME_WARPS, SIM_DT};
    use rand::SeedableRng;

    struct Harness {
        particles: ParticleBuffer,
        shake: ScreenShake,
        audio: NullAudio,
        rng: Pcg32,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                particles: ParticleBuffer::new(),
                shake: ScreenShake::new(),
                audio: NullAudio,
                rng: Pcg32::seed_from_u64(42),
            }
        }

        fn step(
            &mut self,
            player: &mut Player,
            input: &TickInput,
            surfaces: &[Surface],
        ) -> PlayerUpdate {
            player.update(
                input,
                surfaces,
                MAX_TIME_WARPS,
                SIM_DT,
                &mut self.particles,
                &mut self.shake,
                &mut self.audio,
                &mut self.rng,
            )
        }
    }

    fn ground() -> Vec<Surface> {
        vec![Surface {
            rect: Rect::new(0.0, 550.0, 4000.0, 50.0),
            vel: Vec2::ZERO,
        }]
    }

    /// Player resting on the ground surface
    fn grounded_player(harness: &mut Harness, surfaces: &[Surface]) -> Player {
        let mut player = Player::new(Vec2::new(100.0, 510.0));
        for _ in 0..3 {
            harness.step(&mut player, &TickInput::default(), surfaces);
        }
        assert!(player.on_ground);
        player
    }

    #[test]
    fn test_accelerates_toward_max_speed_without_overshoot() {
        let mut harness = Harness::new();
        let surfaces = ground();
        let mut player = grounded_player(&mut harness, &surfaces);

        let input = TickInput {
            right: true,
            ..TickInput::default()
        };
        let mut last_vx = 0.0;
        for _ in 0..60 {
            harness.step(&mut player, &input, &surfaces);
            assert!(player.vel.x >= last_vx - 1e-3);
            assert!(player.vel.x <= MOVE_SPEED);
            last_vx = player.vel.x;
        }
        assert!((player.vel.x - MOVE_SPEED).abs() < 0.1);
    }

    #[test]
    fn test_turnaround_damping_applies() {
        let mut harness = Harness::new();
        // Airborne at full speed, steering hard the other way: the air
        // blend leaves the velocity still opposing the target, so the
        // turnaround damping kicks in on top
        let mut player = Player::new(Vec2::new(100.0, 200.0));
        player.vel.x = 5.0;

        let input = TickInput {
            left: true,
            ..TickInput::default()
        };
        harness.step(&mut player, &input, &[]);
        let blended = 5.0 + (-5.0 - 5.0) * AIR_ACCEL;
        assert!((player.vel.x - blended * TURNAROUND_DAMPING).abs() < 1e-3);
    }

    #[test]
    fn test_friction_snaps_to_zero_below_deadband() {
        let mut harness = Harness::new();
        let surfaces = ground();
        let mut player = grounded_player(&mut harness, &surfaces);
        player.vel.x = 3.0;

        for _ in 0..60 {
            harness.step(&mut player, &TickInput::default(), &surfaces);
        }
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_jump_from_ground_resets_windows() {
        let mut harness = Harness::new();
        let surfaces = ground();
        let mut player = grounded_player(&mut harness, &surfaces);

        let input = TickInput {
            jump: true,
            ..TickInput::default()
        };
        harness.step(&mut player, &input, &surfaces);
        // Gravity has already been applied on top of the impulse this tick
        assert!((player.vel.y - (-JUMP_POWER + GRAVITY)).abs() < 1e-3);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_coyote_jump_shortly_after_leaving_ledge() {
        let mut harness = Harness::new();
        let surfaces = ground();
        let mut player = grounded_player(&mut harness, &surfaces);

        // Walk off: two ticks with no surfaces at all
        harness.step(&mut player, &TickInput::default(), &[]);
        harness.step(&mut player, &TickInput::default(), &[]);
        assert!(!player.on_ground);

        let input = TickInput {
            jump: true,
            ..TickInput::default()
        };
        harness.step(&mut player, &input, &[]);
        assert!(player.vel.y < -JUMP_POWER + 1.0);
    }

    #[test]
    fn test_no_coyote_jump_after_window_expires() {
        let mut harness = Harness::new();
        let surfaces = ground();
        let mut player = grounded_player(&mut harness, &surfaces);

        for _ in 0..9 {
            harness.step(&mut player, &TickInput::default(), &[]);
        }
        let vy_before = player.vel.y;
        assert!(vy_before > 0.0);

        let input = TickInput {
            jump: true,
            ..TickInput::default()
        };
        harness.step(&mut player, &input, &[]);
        // Still falling; the press was buffered, not honored
        assert!(player.vel.y > vy_before);
    }

    #[test]
    fn test_buffered_jump_fires_on_landing() {
        let mut harness = Harness::new();
        let surfaces = ground();
        // Airborne just above the ground, no coyote credit
        let mut player = Player::new(Vec2::new(100.0, 506.0));

        // One press in the air, then released
        let pressed = TickInput {
            jump: true,
            ..TickInput::default()
        };
        harness.step(&mut player, &pressed, &surfaces);

        let mut jumped = false;
        for _ in 0..8 {
            harness.step(&mut player, &TickInput::default(), &surfaces);
            if player.vel.y < -1.0 {
                jumped = true;
                break;
            }
        }
        assert!(jumped);
    }

    #[test]
    fn test_double_jump_needs_fresh_press() {
        let mut harness = Harness::new();
        let surfaces = ground();
        let mut player = grounded_player(&mut harness, &surfaces);
        player.has_double_jump = true;
        player.double_jump_available = true;

        let pressed = TickInput {
            jump: true,
            ..TickInput::default()
        };
        harness.step(&mut player, &pressed, &surfaces);
        assert!(!player.on_ground);

        // Holding the button must not trigger the double jump
        for _ in 0..5 {
            harness.step(&mut player, &pressed, &surfaces);
        }
        assert!(player.double_jump_available);

        // Release, then a fresh press mid-air
        harness.step(&mut player, &TickInput::default(), &surfaces);
        harness.step(&mut player, &pressed, &surfaces);
        assert!(!player.double_jump_available);
        assert!(player.vel.y < -JUMP_POWER + 1.0);
    }

    #[test]
    fn test_double_jump_charge_refills_on_landing() {
        let mut harness = Harness::new();
        let surfaces = ground();
        let mut player = grounded_player(&mut harness, &surfaces);
        player.has_double_jump = true;
        player.double_jump_available = false;

        // Fall back onto the ground
        player.pos.y = 480.0;
        player.on_ground = false;
        for _ in 0..30 {
            harness.step(&mut player, &TickInput::default(), &surfaces);
            if player.on_ground {
                break;
            }
        }
        assert!(player.on_ground);
        assert!(player.double_jump_available);
    }

    #[test]
    fn test_early_release_falls_faster_than_held_jump() {
        let mut harness_a = Harness::new();
        let mut harness_b = Harness::new();
        let surfaces = ground();
        let mut holder = grounded_player(&mut harness_a, &surfaces);
        let mut releaser = grounded_player(&mut harness_b, &surfaces);

        let pressed = TickInput {
            jump: true,
            ..TickInput::default()
        };
        harness_a.step(&mut holder, &pressed, &surfaces);
        harness_b.step(&mut releaser, &pressed, &surfaces);

        for _ in 0..8 {
            harness_a.step(&mut holder, &pressed, &surfaces);
            harness_b.step(&mut releaser, &TickInput::default(), &surfaces);
        }
        // Both still rising, but the released jump has bled more speed
        assert!(releaser.vel.y > holder.vel.y);
    }

    #[test]
    fn test_fall_gravity_multiplier_accumulates() {
        let mut harness = Harness::new();
        let mut player = Player::new(Vec2::new(100.0, 0.0));

        for _ in 0..10 {
            harness.step(&mut player, &TickInput::default(), &[]);
        }
        // From rest every tick runs the falling branch except the first
        let expected = GRAVITY + 9.0 * GRAVITY * FALL_GRAVITY_MULTIPLIER;
        assert!((player.vel.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_landing_effects_fire_once() {
        let mut harness = Harness::new();
        let surfaces = ground();
        // High drop so the impact speed clears the dust threshold
        let mut player = Player::new(Vec2::new(100.0, 300.0));

        for _ in 0..60 {
            harness.step(&mut player, &TickInput::default(), &surfaces);
            if player.on_ground {
                break;
            }
        }
        assert!(player.on_ground);
        let explosions = harness
            .particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Explosion)
            .count();
        assert!(explosions >= 8);
        assert!(harness.shake.is_active());

        // Standing still afterwards must not re-trigger the burst
        for _ in 0..5 {
            harness.step(&mut player, &TickInput::default(), &surfaces);
        }
        let explosions_after = harness
            .particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Explosion)
            .count();
        assert_eq!(explosions_after, explosions);
    }

    #[test]
    fn test_wall_blocks_walking_even_from_inside_overlap() {
        let mut harness = Harness::new();
        let surfaces = vec![
            Surface {
                rect: Rect::new(0.0, 550.0, 4000.0, 50.0),
                vel: Vec2::ZERO,
            },
            Surface {
                rect: Rect::new(300.0, 350.0, 40.0, 200.0),
                vel: Vec2::ZERO,
            },
        ];
        let mut player = grounded_player(&mut harness, &surfaces);
        // Start already clipped into the wall
        player.pos.x = 280.0;

        let input = TickInput {
            right: true,
            ..TickInput::default()
        };
        for _ in 0..30 {
            harness.step(&mut player, &input, &surfaces);
        }
        // Snapped against the wall's near edge every tick, never through
        assert_eq!(player.pos.x, 260.0);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_moving_platform_carries_and_shares_momentum() {
        let mut harness = Harness::new();
        let surfaces = vec![Surface {
            rect: Rect::new(0.0, 550.0, 4000.0, 50.0),
            vel: Vec2::new(2.0, 0.0),
        }];
        let mut player = Player::new(Vec2::new(100.0, 510.0));

        harness.step(&mut player, &TickInput::default(), &surfaces);
        let x_after_landing = player.pos.x;
        harness.step(&mut player, &TickInput::default(), &surfaces);
        // Carried by the platform despite zero own velocity
        assert!((player.pos.x - x_after_landing - 2.0).abs() < 1e-3);

        let input = TickInput {
            jump: true,
            ..TickInput::default()
        };
        harness.step(&mut player, &input, &surfaces);
        // Half the platform velocity transfers on takeoff
        assert!((player.vel.x - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_rewind_consumes_charge_and_restores_past() {
        let mut harness = Harness::new();
        let surfaces = ground();
        let mut player = grounded_player(&mut harness, &surfaces);
        let start_x = player.pos.x;

        let run = TickInput {
            right: true,
            ..TickInput::default()
        };
        for _ in 0..60 {
            harness.step(&mut player, &run, &surfaces);
        }
        let far_x = player.pos.x;
        assert!(far_x > start_x + 100.0);

        let warp = TickInput {
            rewind: true,
            ..TickInput::default()
        };
        let outcome = harness.step(&mut player, &warp, &surfaces);
        assert!(outcome.warp_consumed);
        assert!(player.is_rewinding);

        for _ in 0..200 {
            harness.step(&mut player, &TickInput::default(), &surfaces);
            if !player.is_rewinding {
                break;
            }
        }
        assert!(!player.is_rewinding);
        assert!(player.pos.x < far_x - 50.0);
    }

    #[test]
    fn test_rewind_terminates_after_half_history_length() {
        let mut harness = Harness::new();
        let surfaces = ground();
        let mut player = Player::new(Vec2::new(100.0, 510.0));
        for _ in 0..40 {
            harness.step(&mut player, &TickInput::default(), &surfaces);
        }
        assert_eq!(player.history.len(), 40);

        let warp = TickInput {
            rewind: true,
            ..TickInput::default()
        };
        let outcome = harness.step(&mut player, &warp, &surfaces);
        assert!(outcome.warp_consumed);

        // Cursor starts at 39 and steps down 2 per tick, flooring at 0
        let mut ticks = 0;
        while player.is_rewinding {
            harness.step(&mut player, &TickInput::default(), &surfaces);
            ticks += 1;
            assert!(ticks <= 40);
        }
        assert_eq!(ticks, 20);
    }

    #[test]
    fn test_rewind_denied_with_insufficient_history() {
        let mut harness = Harness::new();
        let surfaces = ground();
        let mut player = Player::new(Vec2::new(100.0, 510.0));
        for _ in 0..10 {
            harness.step(&mut player, &TickInput::default(), &surfaces);
        }

        let warp = TickInput {
            rewind: true,
            ..TickInput::default()
        };
        let outcome = harness.step(&mut player, &warp, &surfaces);
        assert!(!outcome.warp_consumed);
        assert!(!player.is_rewinding);
    }

    #[test]
    fn test_falling_off_world_reports_death() {
        let mut harness = Harness::new();
        let mut player = Player::new(Vec2::new(100.0, 400.0));

        let mut died = false;
        for _ in 0..200 {
            let outcome = harness.step(&mut player, &TickInput::default(), &[]);
            if outcome.died {
                died = true;
                assert!(player.pos.y > CANVAS_HEIGHT + OFFSCREEN_DEATH_MARGIN);
                break;
            }
        }
        assert!(died);
    }

    #[test]
    fn test_respawn_returns_to_latest_checkpoint() {
        let mut player = Player::new(Vec2::new(100.0, 400.0));
        player.set_checkpoint(Vec2::new(1000.0, 290.0));
        player.set_checkpoint(Vec2::new(2000.0, 290.0));
        player.pos = Vec2::new(2500.0, 700.0);
        player.vel = Vec2::new(4.0, 9.0);
        player.history.push(KinematicSample {
            pos: player.pos,
            vel: player.vel,
        });

        player.respawn();
        assert_eq!(player.pos, Vec2::new(2000.0, 290.0));
        assert_eq!(player.vel, Vec2::ZERO);
        assert!(player.history.is_empty());
    }
}
