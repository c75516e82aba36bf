//! Built-in level layouts
//!
//! A `LevelData` is an opaque construction-time bundle: the sim never
//! parses level files, it is handed entity lists and a spawn point.

use glam::Vec2;

use crate::sim::collision::Rect;
use crate::sim::effects::EffectKind;
use crate::sim::obstacles::{
    FallingPlatform, LaserHazard, LaserOrientation, MovingPlatform, Obstacle, SpikeOrientation,
    SpikeTrap,
};
use crate::sim::state::{
    Checkpoint, Collectible, ExitGate, Platform, PlatformStyle, PowerUpPickup,
};

/// Everything needed to populate a level
#[derive(Debug, Clone)]
pub struct LevelData {
    pub platforms: Vec<Platform>,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub powerups: Vec<PowerUpPickup>,
    pub checkpoints: Vec<Checkpoint>,
    pub exit_gate: ExitGate,
    pub player_spawn: Vec2,
}

fn platform(x: f32, y: f32, w: f32, h: f32, style: PlatformStyle) -> Platform {
    Platform {
        rect: Rect::new(x, y, w, h),
        style,
    }
}

fn collectibles(coords: &[(f32, f32)]) -> Vec<Collectible> {
    coords
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Collectible::new(Vec2::new(x, y), i as f32 * 0.7))
        .collect()
}

impl LevelData {
    pub const LEVEL_COUNT: u32 = 2;

    pub fn level(index: u32) -> LevelData {
        match index {
            2 => Self::level_two(),
            _ => Self::level_one(),
        }
    }

    fn level_one() -> LevelData {
        use PlatformStyle::*;

        let platforms = vec![
            platform(0.0, 550.0, 800.0, 50.0, Stone),
            platform(900.0, 550.0, 400.0, 50.0, Metal),
            platform(1400.0, 450.0, 300.0, 30.0, Neon),
            platform(1800.0, 350.0, 250.0, 30.0, Stone),
            platform(2150.0, 450.0, 200.0, 30.0, Metal),
            platform(2450.0, 350.0, 300.0, 30.0, Neon),
            platform(2850.0, 450.0, 250.0, 30.0, Stone),
            platform(3200.0, 550.0, 600.0, 50.0, Metal),
        ];

        let obstacles = vec![
            Obstacle::MovingPlatform(MovingPlatform::new(
                Vec2::new(1000.0, 400.0),
                Vec2::new(100.0, 20.0),
                vec![Vec2::new(1000.0, 400.0), Vec2::new(1200.0, 400.0)],
                2.0,
            )),
            Obstacle::MovingPlatform(MovingPlatform::new(
                Vec2::new(2600.0, 300.0),
                Vec2::new(100.0, 20.0),
                vec![Vec2::new(2600.0, 300.0), Vec2::new(2600.0, 450.0)],
                1.5,
            )),
            Obstacle::Laser(LaserHazard::new(
                Vec2::new(1300.0, 500.0),
                LaserOrientation::Horizontal,
                3.0,
                1.0,
                1.0,
            )),
            Obstacle::Laser(LaserHazard::new(
                Vec2::new(2100.0, 400.0),
                LaserOrientation::Vertical,
                4.0,
                1.0,
                1.5,
            )),
            Obstacle::Spike(SpikeTrap::new(Vec2::new(1700.0, 330.0), SpikeOrientation::Up)),
            Obstacle::Spike(SpikeTrap::new(Vec2::new(2800.0, 430.0), SpikeOrientation::Up)),
            Obstacle::FallingPlatform(FallingPlatform::new(
                Vec2::new(2000.0, 400.0),
                Vec2::new(80.0, 20.0),
            )),
        ];

        LevelData {
            platforms,
            obstacles,
            collectibles: collectibles(&[
                (400.0, 480.0),
                (1100.0, 480.0),
                (1500.0, 380.0),
                (1900.0, 280.0),
                (2250.0, 380.0),
                (2550.0, 280.0),
                (2950.0, 380.0),
                (3400.0, 480.0),
                (3600.0, 480.0),
            ]),
            powerups: vec![
                PowerUpPickup::new(Vec2::new(600.0, 480.0), EffectKind::Speed),
                PowerUpPickup::new(Vec2::new(1600.0, 380.0), EffectKind::Invincibility),
                PowerUpPickup::new(Vec2::new(2300.0, 380.0), EffectKind::DoubleJump),
                PowerUpPickup::new(Vec2::new(3000.0, 380.0), EffectKind::SlowMotion),
            ],
            checkpoints: Vec::new(),
            exit_gate: ExitGate::new(Vec2::new(3700.0, 450.0)),
            player_spawn: Vec2::new(100.0, 400.0),
        }
    }

    fn level_two() -> LevelData {
        use PlatformStyle::*;

        let platforms = vec![
            platform(0.0, 550.0, 200.0, 50.0, Stone),
            platform(350.0, 500.0, 120.0, 30.0, Neon),
            platform(600.0, 450.0, 100.0, 30.0, Metal),
            platform(850.0, 400.0, 100.0, 30.0, Stone),
            platform(1100.0, 350.0, 120.0, 30.0, Neon),
            platform(1400.0, 450.0, 100.0, 30.0, Metal),
            platform(1650.0, 400.0, 100.0, 30.0, Stone),
            platform(1900.0, 350.0, 120.0, 30.0, Neon),
            platform(2200.0, 450.0, 100.0, 30.0, Metal),
            platform(2500.0, 400.0, 100.0, 30.0, Stone),
            platform(2800.0, 350.0, 120.0, 30.0, Neon),
            platform(3100.0, 450.0, 100.0, 30.0, Metal),
            platform(3400.0, 400.0, 100.0, 30.0, Stone),
            platform(3700.0, 550.0, 400.0, 50.0, Neon),
        ];

        let obstacles = vec![
            Obstacle::MovingPlatform(MovingPlatform::new(
                Vec2::new(750.0, 300.0),
                Vec2::new(100.0, 20.0),
                vec![Vec2::new(750.0, 300.0), Vec2::new(950.0, 300.0)],
                2.0,
            )),
            Obstacle::MovingPlatform(MovingPlatform::new(
                Vec2::new(1250.0, 250.0),
                Vec2::new(100.0, 20.0),
                vec![
                    Vec2::new(1250.0, 250.0),
                    Vec2::new(1250.0, 450.0),
                    Vec2::new(1350.0, 450.0),
                ],
                1.5,
            )),
            Obstacle::MovingPlatform(MovingPlatform::new(
                Vec2::new(2350.0, 300.0),
                Vec2::new(100.0, 20.0),
                vec![Vec2::new(2350.0, 300.0), Vec2::new(2350.0, 500.0)],
                2.0,
            )),
            Obstacle::MovingPlatform(MovingPlatform::new(
                Vec2::new(3250.0, 250.0),
                Vec2::new(100.0, 20.0),
                vec![Vec2::new(3250.0, 250.0), Vec2::new(3250.0, 400.0)],
                1.8,
            )),
            Obstacle::Laser(LaserHazard::new(
                Vec2::new(550.0, 500.0),
                LaserOrientation::Horizontal,
                2.5,
                0.8,
                1.0,
            )),
            Obstacle::Laser(LaserHazard::new(
                Vec2::new(1500.0, 500.0),
                LaserOrientation::Horizontal,
                3.0,
                1.0,
                1.2,
            )),
            Obstacle::Laser(LaserHazard::new(
                Vec2::new(1800.0, 250.0),
                LaserOrientation::Vertical,
                3.5,
                1.0,
                1.5,
            )),
            Obstacle::Laser(LaserHazard::new(
                Vec2::new(2650.0, 500.0),
                LaserOrientation::Horizontal,
                2.8,
                0.9,
                1.1,
            )),
            Obstacle::Laser(LaserHazard::new(
                Vec2::new(3300.0, 300.0),
                LaserOrientation::Vertical,
                3.2,
                1.0,
                1.3,
            )),
            Obstacle::Spike(SpikeTrap::new(Vec2::new(700.0, 430.0), SpikeOrientation::Up)),
            Obstacle::Spike(SpikeTrap::new(Vec2::new(1550.0, 380.0), SpikeOrientation::Up)),
            Obstacle::Spike(SpikeTrap::new(Vec2::new(2300.0, 430.0), SpikeOrientation::Up)),
            Obstacle::Spike(SpikeTrap::new(Vec2::new(3050.0, 330.0), SpikeOrientation::Up)),
            Obstacle::FallingPlatform(FallingPlatform::new(
                Vec2::new(1550.0, 300.0),
                Vec2::new(80.0, 20.0),
            )),
            Obstacle::FallingPlatform(FallingPlatform::new(
                Vec2::new(2650.0, 350.0),
                Vec2::new(80.0, 20.0),
            )),
        ];

        LevelData {
            platforms,
            obstacles,
            collectibles: collectibles(&[
                (400.0, 470.0),
                (650.0, 420.0),
                (900.0, 370.0),
                (1150.0, 320.0),
                (1450.0, 420.0),
                (1700.0, 370.0),
                (1950.0, 320.0),
                (2250.0, 420.0),
                (2550.0, 370.0),
                (2850.0, 320.0),
                (3150.0, 420.0),
                (3450.0, 370.0),
                (3800.0, 480.0),
                (3900.0, 480.0),
            ]),
            powerups: vec![
                PowerUpPickup::new(Vec2::new(500.0, 470.0), EffectKind::Speed),
                PowerUpPickup::new(Vec2::new(1250.0, 320.0), EffectKind::Invincibility),
                PowerUpPickup::new(Vec2::new(2050.0, 320.0), EffectKind::DoubleJump),
                PowerUpPickup::new(Vec2::new(2950.0, 320.0), EffectKind::SlowMotion),
            ],
            checkpoints: vec![
                Checkpoint::new(Vec2::new(1000.0, 290.0)),
                Checkpoint::new(Vec2::new(2000.0, 290.0)),
                Checkpoint::new(Vec2::new(3000.0, 290.0)),
            ],
            exit_gate: ExitGate::new(Vec2::new(3900.0, 450.0)),
            player_spawn: Vec2::new(100.0, 400.0),
        }
    }
}
