//! Neon Dash - a side-scrolling neon-city runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, physics, collisions)
//! - `renderer`: WebGPU rendering pipeline
//! - `levels`: Static campaign table and layout patterns
//! - `highscores`: Local leaderboard persistence
//! - `settings`: Render quality settings

pub mod highscores;
pub mod levels;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::Leaderboard;
pub use levels::{LevelConfig, Theme};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Logical viewport size in world units. The canvas scales to fit but the
    /// simulation always sees this coordinate space.
    pub const GAME_WIDTH: f32 = 960.0;
    pub const GAME_HEIGHT: f32 = 540.0;

    /// Width of one tile column in world units.
    pub const TILE_SIZE: f32 = 40.0;
    /// Thickness of the ground strip below the run surface.
    pub const GROUND_HEIGHT: f32 = 60.0;

    /// Nominal display rate the per-tick physics constants are tuned for.
    pub const NOMINAL_TICK_RATE: f32 = 60.0;
    /// Upper clamp on per-frame elapsed time, in seconds. A backgrounded tab
    /// must not produce a catastrophic physics step on resume.
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Horizontal lead the camera keeps between the level start and the player.
    pub const CAMERA_MARGIN: f32 = 150.0;
    /// Falling past this y kills the player.
    pub const DEATH_DEPTH: f32 = GAME_HEIGHT + 100.0;

    /// Player body size and fixed spawn point.
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const SPAWN_X: f32 = 100.0;
    pub const SPAWN_Y: f32 = 300.0;

    /// Trap collisions are tested against a hitbox shrunk by this margin on
    /// every side, forgiving near-misses.
    pub const HITBOX_INSET: f32 = 5.0;
    /// Invulnerability window granted by a powerup, in simulated seconds.
    pub const POWERUP_DURATION: f32 = 5.0;

    /// Top edge of the run surface.
    #[inline]
    pub const fn ground_y() -> f32 {
        GAME_HEIGHT - GROUND_HEIGHT
    }
}

/// World x to screen x for a layer scrolling at the given parallax factor.
#[inline]
pub fn world_to_screen(world_x: f32, camera_x: f32, factor: f32) -> f32 {
    world_x - camera_x * factor
}

/// Axis-aligned rectangle overlap test.
#[inline]
pub fn aabb_overlap(
    ax: f32,
    ay: f32,
    aw: f32,
    ah: f32,
    bx: f32,
    by: f32,
    bw: f32,
    bh: f32,
) -> bool {
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

/// Fractional course progress for the HUD bar, clamped to [0, 1].
#[inline]
pub fn progress_fraction(player_x: f32, goal_x: f32) -> f32 {
    if goal_x <= 0.0 {
        return 0.0;
    }
    (player_x / goal_x).clamp(0.0, 1.0)
}
