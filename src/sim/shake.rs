//! Screen shake impulse generator
//!
//! Impacts trigger a shake with an intensity and duration; a stronger
//! trigger replaces a weaker live one, a weaker trigger is ignored. The
//! host samples `offset` once per rendered frame.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenShake {
    pub intensity: f32,
    duration: f32,
    max_duration: f32,
}

impl ScreenShake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a shake; only overrides a live shake that is strictly weaker
    pub fn trigger(&mut self, intensity: f32, duration: f32) {
        if intensity > self.intensity {
            self.intensity = intensity;
            self.duration = duration;
            self.max_duration = duration;
        }
    }

    /// Decay one step; intensity scales down with remaining duration
    pub fn update(&mut self, dt: f32) {
        if self.duration > 0.0 {
            self.duration -= dt;
            let progress = self.duration / self.max_duration;
            self.intensity *= progress.max(0.0);
            if self.duration <= 0.0 {
                self.intensity = 0.0;
                self.duration = 0.0;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.intensity > 0.0
    }

    /// Random-angle offset of magnitude `intensity`
    pub fn offset(&self, rng: &mut Pcg32) -> Vec2 {
        if self.intensity <= 0.0 {
            return Vec2::ZERO;
        }
        let angle = rng.random::<f32>() * TAU;
        Vec2::new(angle.cos(), angle.sin()) * self.intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use rand::SeedableRng;

    #[test]
    fn test_weaker_trigger_does_not_override() {
        let mut shake = ScreenShake::new();
        shake.trigger(8.0, 0.4);
        shake.trigger(3.0, 1.0);
        assert_eq!(shake.intensity, 8.0);
    }

    #[test]
    fn test_stronger_trigger_overrides() {
        let mut shake = ScreenShake::new();
        shake.trigger(3.0, 0.2);
        shake.trigger(12.0, 0.4);
        assert_eq!(shake.intensity, 12.0);
    }

    #[test]
    fn test_decays_to_zero_within_duration() {
        let mut shake = ScreenShake::new();
        shake.trigger(10.0, 0.2);
        let mut prev = shake.intensity;
        // 0.2 s at 60 Hz is 12 ticks; one spare for float accumulation
        for _ in 0..13 {
            shake.update(SIM_DT);
            assert!(shake.intensity <= prev);
            prev = shake.intensity;
        }
        assert_eq!(shake.intensity, 0.0);
        assert!(!shake.is_active());
    }

    #[test]
    fn test_offset_magnitude_matches_intensity() {
        let mut shake = ScreenShake::new();
        shake.trigger(5.0, 0.5);
        let mut rng = Pcg32::seed_from_u64(1);
        let off = shake.offset(&mut rng);
        assert!((off.length() - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_idle_offset_is_zero() {
        let shake = ScreenShake::new();
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(shake.offset(&mut rng), Vec2::ZERO);
    }
}
