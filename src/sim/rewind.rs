//! Kinematic history for the time-warp rewind
//!
//! A bounded ring of per-tick position/velocity samples. While rewinding,
//! the player steps a cursor backwards through this ring and copies the
//! samples back into its live state.

use glam::Vec2;
use std::collections::VecDeque;

use crate::consts::REWIND_HISTORY_CAPACITY;

/// One tick's worth of player kinematics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicSample {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Ring of the last `REWIND_HISTORY_CAPACITY` samples, oldest evicted
#[derive(Debug, Clone, Default)]
pub struct RewindHistory {
    samples: VecDeque<KinematicSample>,
}

impl RewindHistory {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(REWIND_HISTORY_CAPACITY),
        }
    }

    pub fn push(&mut self, sample: KinematicSample) {
        if self.samples.len() >= REWIND_HISTORY_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn get(&self, index: usize) -> Option<KinematicSample> {
        self.samples.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Index of the newest sample, if any
    pub fn newest_index(&self) -> Option<usize> {
        self.samples.len().checked_sub(1)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f32) -> KinematicSample {
        KinematicSample {
            pos: Vec2::new(x, 0.0),
            vel: Vec2::ZERO,
        }
    }

    #[test]
    fn test_ring_evicts_oldest_at_capacity() {
        let mut history = RewindHistory::new();
        for i in 0..(REWIND_HISTORY_CAPACITY + 10) {
            history.push(sample(i as f32));
        }
        assert_eq!(history.len(), REWIND_HISTORY_CAPACITY);
        // Oldest surviving sample is the 11th pushed
        assert_eq!(history.get(0).unwrap().pos.x, 10.0);
        let newest = history.newest_index().unwrap();
        assert_eq!(
            history.get(newest).unwrap().pos.x,
            (REWIND_HISTORY_CAPACITY + 9) as f32
        );
    }

    #[test]
    fn test_capacity_covers_two_and_a_half_seconds() {
        assert_eq!(REWIND_HISTORY_CAPACITY, 150);
    }

    #[test]
    fn test_clear_empties() {
        let mut history = RewindHistory::new();
        history.push(sample(1.0));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.newest_index(), None);
    }
}
