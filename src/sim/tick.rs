//! Main simulation tick
//!
//! One call advances the world exactly one fixed step. Phase order within
//! a tick is a contract: shake decay, status-effect aging, obstacle
//! kinematics, obstacle-vs-player collision, the player's own update
//! (which resolves platform collisions), then checkpoint, collectible and
//! gate evaluation, and finally particle aging. Reordering these phases
//! produces observable bugs, e.g. a spike knockback applied after the
//! player's collision resolution would be zeroed the same tick.

use glam::Vec2;

use crate::audio::{AudioCue, AudioSink};
use crate::consts::TICK_RATE;
use crate::sim::obstacles::Obstacle;
use crate::sim::player::Surface;
use crate::sim::state::{GamePhase, GameState};

/// Seconds spent in the between-levels transition
const LEVEL_TRANSITION_SECONDS: f32 = 2.0;

/// Input snapshot for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Activate the time warp
    pub rewind: bool,
    /// Restart request; acted on by the orchestrator, not the sim
    pub restart: bool,
}

/// What happened this tick that the orchestrator cares about
#[derive(Debug, Clone, Copy, Default)]
pub struct TickEvents {
    /// The final level's exit was reached
    pub completed_run: bool,
    /// The last life was lost
    pub game_over: bool,
    /// A non-final exit was reached; the next level loads shortly
    pub level_transition: bool,
}

/// Advance the simulation by one fixed step
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    audio: &mut dyn AudioSink,
) -> TickEvents {
    let mut events = TickEvents::default();

    state.frame += 1;
    state.shake.update(dt);

    match state.phase {
        GamePhase::LevelTransition => {
            state.transition_ticks = state.transition_ticks.saturating_sub(1);
            if state.transition_ticks == 0 {
                let next = state.level_index + 1;
                log::info!("loading level {next}");
                state.load_level(next, &crate::sim::level::LevelData::level(next));
                state.phase = GamePhase::Playing;
            }
            state.particles.update();
            return events;
        }
        GamePhase::GameOver | GamePhase::LevelComplete => {
            state.particles.update();
            return events;
        }
        GamePhase::Playing => {}
    }

    // Status effects age on real time so slow motion cannot extend itself
    state
        .effects
        .tick(dt, &mut state.player, &mut state.tick_scale);
    let scaled_dt = dt * state.tick_scale;

    update_powerups(state, dt, audio);

    for obstacle in &mut state.obstacles {
        obstacle.update(scaled_dt, audio);
    }

    // Obstacle effects land before the player's own collision resolution
    let player_rect = state.player.rect();
    for obstacle in &state.obstacles {
        if obstacle.check_collision(&player_rect) {
            obstacle.apply_effect(&mut state.player);
        }
    }
    if state.player.hit_by_obstacle {
        state.player.hit_by_obstacle = false;
        handle_death(state, audio, &mut events);
    }

    if state.phase == GamePhase::Playing {
        let (surfaces, surface_obstacle) = collect_surfaces(state);
        let outcome = state.player.update(
            input,
            &surfaces,
            state.time_warps,
            scaled_dt,
            &mut state.particles,
            &mut state.shake,
            audio,
            &mut state.rng,
        );

        if outcome.warp_consumed {
            state.time_warps -= 1;
        }

        // Re-assert the stand flag on a crumbling platform
        if let Some(surface_index) = outcome.standing_on {
            if let Some(obstacle_index) = surface_obstacle[surface_index] {
                if let Obstacle::FallingPlatform(platform) = &mut state.obstacles[obstacle_index] {
                    platform.notify_stand();
                }
            }
        }

        if outcome.died {
            handle_death(state, audio, &mut events);
        }
    }

    if state.phase == GamePhase::Playing {
        collect_pickups(state, audio);
        check_exit_gate(state, audio, &mut events);
    }

    state.particles.update();
    events
}

/// Solid surfaces for this tick: static platforms first, then obstacle
/// colliders. The second vector maps each surface back to the obstacle
/// that produced it.
fn collect_surfaces(state: &GameState) -> (Vec<Surface>, Vec<Option<usize>>) {
    let mut surfaces = Vec::with_capacity(state.platforms.len() + state.obstacles.len());
    let mut surface_obstacle = Vec::with_capacity(surfaces.capacity());

    for platform in &state.platforms {
        surfaces.push(Surface {
            rect: platform.rect,
            vel: Vec2::ZERO,
        });
        surface_obstacle.push(None);
    }
    for (index, obstacle) in state.obstacles.iter().enumerate() {
        if let Some((rect, vel)) = obstacle.collider() {
            surfaces.push(Surface { rect, vel });
            surface_obstacle.push(Some(index));
        }
    }
    (surfaces, surface_obstacle)
}

fn update_powerups(state: &mut GameState, dt: f32, audio: &mut dyn AudioSink) {
    let player_rect = state.player.rect();
    for pickup in &mut state.powerups {
        pickup.update(dt);
        if !pickup.collected && pickup.rect().overlaps(&player_rect) {
            pickup.collect();
            let center = pickup.center();
            state.particles.spawn_sparkles(center, 12, &mut state.rng);
            audio.play(AudioCue::Collect);
            state
                .effects
                .activate(pickup.kind, &mut state.player, &mut state.tick_scale, audio);
        }
    }
}

/// Collectibles, checkpoints, and the score bookkeeping
fn collect_pickups(state: &mut GameState, audio: &mut dyn AudioSink) {
    let player_rect = state.player.rect();

    for collectible in &mut state.collectibles {
        if !collectible.collected && collectible.rect().overlaps(&player_rect) {
            collectible.collected = true;
            state.score += 1;
            state
                .particles
                .spawn_sparkles(collectible.center(), 8, &mut state.rng);
            audio.play(AudioCue::Collect);
        }
    }

    if state.score > state.high_score {
        state.high_score = state.score;
        if !state.confetti_fired {
            state.confetti_fired = true;
            state.particles.spawn_confetti(50, &mut state.rng);
        }
    }

    for checkpoint in &mut state.checkpoints {
        if !checkpoint.activated && checkpoint.rect().overlaps(&player_rect) {
            checkpoint.activated = true;
            state.player.set_checkpoint(checkpoint.pos);
            state
                .particles
                .spawn_sparkles(checkpoint.center(), 12, &mut state.rng);
            audio.play(AudioCue::Collect);
        }
    }
}

fn check_exit_gate(state: &mut GameState, audio: &mut dyn AudioSink, events: &mut TickEvents) {
    if !state.player.rect().overlaps(&state.exit_gate.rect()) {
        return;
    }
    audio.play(AudioCue::Collect);
    if state.is_final_level() {
        log::info!("run complete: score {}", state.score);
        state.phase = GamePhase::LevelComplete;
        events.completed_run = true;
    } else {
        log::info!("level {} cleared", state.level_index);
        state.phase = GamePhase::LevelTransition;
        state.transition_ticks = (LEVEL_TRANSITION_SECONDS * TICK_RATE) as u32;
        events.level_transition = true;
    }
}

/// Death consequences: invincibility no-ops, otherwise a life is lost and
/// the player returns to the checkpoint, or the run ends
fn handle_death(state: &mut GameState, audio: &mut dyn AudioSink, events: &mut TickEvents) {
    if state.player.invincible {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    state.shake.trigger(12.0, 0.4);
    let center = state.player.center();
    state
        .particles
        .spawn_burst(center, 0xff0000, 15, &mut state.rng);
    audio.play(AudioCue::Damage);

    if state.lives == 0 {
        log::info!("game over at score {}", state.score);
        state.phase = GamePhase::GameOver;
        events.game_over = true;
    } else {
        state.player.respawn();
    }
}
