//! Status-effect registry
//!
//! Effects are keyed by a closed enum with a static duration table and
//! explicit apply/revert pairs over the player and the global tick scale.
//! Activating a live effect refreshes its timer; apply and revert each run
//! exactly once per activation span.

use crate::audio::{AudioCue, AudioSink};
use crate::sim::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// 1.5x horizontal speed
    Speed,
    /// Immune to hazards and death
    Invincibility,
    /// Grants the mid-air jump
    DoubleJump,
    /// Halves the simulation tick scale
    SlowMotion,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Speed,
        EffectKind::Invincibility,
        EffectKind::DoubleJump,
        EffectKind::SlowMotion,
    ];

    /// Full duration in seconds
    pub fn duration(self) -> f32 {
        match self {
            EffectKind::Speed => 5.0,
            EffectKind::Invincibility => 8.0,
            EffectKind::DoubleJump => 10.0,
            EffectKind::SlowMotion => 4.0,
        }
    }

    /// Cue played on activation
    pub fn cue(self) -> AudioCue {
        match self {
            EffectKind::Invincibility => AudioCue::Collect,
            _ => AudioCue::Jump,
        }
    }

    fn index(self) -> usize {
        match self {
            EffectKind::Speed => 0,
            EffectKind::Invincibility => 1,
            EffectKind::DoubleJump => 2,
            EffectKind::SlowMotion => 3,
        }
    }

    fn apply(self, player: &mut Player, tick_scale: &mut f32) {
        match self {
            EffectKind::Speed => player.speed_multiplier = 1.5,
            EffectKind::Invincibility => player.invincible = true,
            EffectKind::DoubleJump => {
                player.has_double_jump = true;
                player.double_jump_available = true;
            }
            EffectKind::SlowMotion => *tick_scale = 0.5,
        }
    }

    fn revert(self, player: &mut Player, tick_scale: &mut f32) {
        match self {
            EffectKind::Speed => player.speed_multiplier = 1.0,
            EffectKind::Invincibility => player.invincible = false,
            EffectKind::DoubleJump => {
                player.has_double_jump = false;
                player.double_jump_available = false;
            }
            EffectKind::SlowMotion => *tick_scale = 1.0,
        }
    }
}

/// Live effect timers, one slot per kind
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusEffects {
    remaining: [Option<f32>; 4],
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate or refresh an effect. Apply runs only on the idle-to-active
    /// transition; a refresh just resets the timer.
    pub fn activate(
        &mut self,
        kind: EffectKind,
        player: &mut Player,
        tick_scale: &mut f32,
        audio: &mut dyn AudioSink,
    ) {
        let slot = &mut self.remaining[kind.index()];
        if slot.is_none() {
            kind.apply(player, tick_scale);
        }
        *slot = Some(kind.duration());
        audio.play(kind.cue());
    }

    /// Age all live effects by real (unscaled) dt, reverting the expired
    pub fn tick(&mut self, dt: f32, player: &mut Player, tick_scale: &mut f32) {
        for kind in EffectKind::ALL {
            let slot = &mut self.remaining[kind.index()];
            if let Some(t) = slot {
                *t -= dt;
                if *t <= 0.0 {
                    *slot = None;
                    kind.revert(player, tick_scale);
                }
            }
        }
    }

    /// Force-revert everything (used on restart and respawn-to-menu paths)
    pub fn deactivate_all(&mut self, player: &mut Player, tick_scale: &mut f32) {
        for kind in EffectKind::ALL {
            if self.remaining[kind.index()].take().is_some() {
                kind.revert(player, tick_scale);
            }
        }
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.remaining[kind.index()].is_some()
    }

    pub fn remaining(&self, kind: EffectKind) -> Option<f32> {
        self.remaining[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::consts::SIM_DT;
    use glam::Vec2;
    use proptest::prelude::*;

    fn setup() -> (StatusEffects, Player, f32, NullAudio) {
        (
            StatusEffects::new(),
            Player::new(Vec2::new(100.0, 400.0)),
            1.0,
            NullAudio,
        )
    }

    #[test]
    fn test_speed_applies_and_reverts_once() {
        let (mut fx, mut player, mut scale, mut audio) = setup();
        fx.activate(EffectKind::Speed, &mut player, &mut scale, &mut audio);
        assert_eq!(player.speed_multiplier, 1.5);

        // 5 s at 60 Hz, plus one spare tick for float accumulation
        for _ in 0..301 {
            fx.tick(SIM_DT, &mut player, &mut scale);
        }
        assert!(!fx.is_active(EffectKind::Speed));
        assert_eq!(player.speed_multiplier, 1.0);
    }

    #[test]
    fn test_refresh_resets_timer_without_reapplying() {
        let (mut fx, mut player, mut scale, mut audio) = setup();
        fx.activate(EffectKind::SlowMotion, &mut player, &mut scale, &mut audio);
        assert_eq!(scale, 0.5);

        // Age half the duration, then refresh
        for _ in 0..120 {
            fx.tick(SIM_DT, &mut player, &mut scale);
        }
        fx.activate(EffectKind::SlowMotion, &mut player, &mut scale, &mut audio);
        let t = fx.remaining(EffectKind::SlowMotion).unwrap();
        assert!((t - 4.0).abs() < 1e-3);
        assert_eq!(scale, 0.5);
    }

    #[test]
    fn test_double_jump_grant_and_expiry() {
        let (mut fx, mut player, mut scale, mut audio) = setup();
        fx.activate(EffectKind::DoubleJump, &mut player, &mut scale, &mut audio);
        assert!(player.has_double_jump);
        assert!(player.double_jump_available);

        for _ in 0..601 {
            fx.tick(SIM_DT, &mut player, &mut scale);
        }
        assert!(!player.has_double_jump);
        assert!(!player.double_jump_available);
    }

    #[test]
    fn test_deactivate_all_reverts_every_live_effect() {
        let (mut fx, mut player, mut scale, mut audio) = setup();
        for kind in EffectKind::ALL {
            fx.activate(kind, &mut player, &mut scale, &mut audio);
        }
        assert_eq!(scale, 0.5);
        assert!(player.invincible);

        fx.deactivate_all(&mut player, &mut scale);
        assert_eq!(scale, 1.0);
        assert!(!player.invincible);
        assert_eq!(player.speed_multiplier, 1.0);
        assert!(!player.has_double_jump);
        for kind in EffectKind::ALL {
            assert!(!fx.is_active(kind));
        }
    }

    proptest! {
        /// An effect refreshed at any point expires duration() after the
        /// last refresh, never sooner
        #[test]
        fn prop_refresh_extends_to_full_duration(refresh_at in 1u32..250) {
            let (mut fx, mut player, mut scale, mut audio) = setup();
            fx.activate(EffectKind::Speed, &mut player, &mut scale, &mut audio);
            for _ in 0..refresh_at {
                fx.tick(SIM_DT, &mut player, &mut scale);
            }
            if fx.is_active(EffectKind::Speed) {
                fx.activate(EffectKind::Speed, &mut player, &mut scale, &mut audio);
                let t = fx.remaining(EffectKind::Speed).unwrap();
                prop_assert!((t - EffectKind::Speed.duration()).abs() < 1e-3);
                prop_assert_eq!(player.speed_multiplier, 1.5);
            }
        }
    }
}
