//! Level generation: expands a compact tile-pattern string into collidable
//! geometry.
//!
//! Generation is a pure function of the level config. The same config always
//! yields identical geometry, which is what makes runs reproducible and the
//! course testable without a renderer.

use thiserror::Error;

use crate::consts::{GROUND_HEIGHT, NOMINAL_TICK_RATE, TILE_SIZE, ground_y};
use crate::levels::{self, LevelConfig};

/// Gap-free columns prepended to every course so the player always spawns on
/// solid ground.
const SAFE_START: &str = "................";
/// Columns appended after the motifs: breathing room, the goal band, then
/// run-out past the finish.
const GOAL_SUFFIX: &str = "..........GGGG..........";
/// Motif repeats used when a level has no target duration.
const DEFAULT_REPEATS: usize = 15;

/// Fatal configuration error raised at level load.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("unknown layout key `{key}`")]
    UnknownLayout { key: String },
}

/// Trap silhouette, sized at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapKind {
    Small,
    Tall,
}

/// One ground span. Immutable once generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// A lethal obstacle. `destroyed` flips true at most once, when an
/// invulnerable player runs it down.
#[derive(Debug, Clone, PartialEq)]
pub struct Trap {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub kind: TrapKind,
    pub destroyed: bool,
}

impl Trap {
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }
}

/// A one-shot invulnerability pickup.
#[derive(Debug, Clone, PartialEq)]
pub struct Powerup {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub active: bool,
}

/// Geometry for one course: generated once, owned by the world, read by
/// collision and rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelGeometry {
    pub platforms: Vec<Platform>,
    pub traps: Vec<Trap>,
    pub powerups: Vec<Powerup>,
    pub goal_x: f32,
    pub length: f32,
}

/// Expand `config` into course geometry.
///
/// An unknown layout key is a fatal configuration error, never a silently
/// empty level.
pub fn generate(config: &LevelConfig) -> Result<LevelGeometry, LevelError> {
    let motifs = levels::layout_pattern(config.layout).ok_or_else(|| LevelError::UnknownLayout {
        key: config.layout.to_string(),
    })?;

    let repeats = match config.duration {
        Some(duration) => {
            // Size the course so that at the level's scroll speed it lasts at
            // least `duration` seconds.
            let px_per_sec = config.speed * NOMINAL_TICK_RATE;
            let motif_px = motifs[0].len() as f32 * TILE_SIZE;
            ((px_per_sec * duration) / motif_px).ceil() as usize
        }
        None => DEFAULT_REPEATS,
    };

    let mut map = String::from(SAFE_START);
    for i in 0..repeats {
        map.push_str(motifs[i % motifs.len()]);
    }
    map.push_str(GOAL_SUFFIX);

    Ok(parse_map(&map))
}

/// Single left-to-right scan: one tile column per character, emitting zero or
/// more entities per symbol.
fn parse_map(map: &str) -> LevelGeometry {
    let mut platforms = Vec::new();
    let mut traps = Vec::new();
    let mut powerups = Vec::new();
    let mut goal_x = 0.0;

    let gy = ground_y();

    for (col, ch) in map.chars().enumerate() {
        let x = col as f32 * TILE_SIZE;

        // Space and underscore are gaps; every other symbol stands on ground.
        let is_gap = matches!(ch, ' ' | '_');
        if !is_gap {
            // One extra unit of width so adjacent columns overlap instead of
            // leaving seam gaps after float rounding.
            platforms.push(Platform {
                x,
                y: gy,
                w: TILE_SIZE + 1.0,
                h: GROUND_HEIGHT,
            });
        }

        match ch {
            'x' => traps.push(Trap {
                x: x + 10.0,
                y: gy - 30.0,
                w: 20.0,
                h: 30.0,
                kind: TrapKind::Small,
                destroyed: false,
            }),
            'X' => traps.push(Trap {
                x: x + 5.0,
                y: gy - 70.0,
                w: 30.0,
                h: 70.0,
                kind: TrapKind::Tall,
                destroyed: false,
            }),
            '*' => powerups.push(Powerup {
                x: x + 10.0,
                y: gy - 100.0,
                w: 20.0,
                h: 20.0,
                active: true,
            }),
            'G' => {
                if goal_x == 0.0 {
                    goal_x = x;
                }
            }
            _ => {}
        }
    }

    LevelGeometry {
        platforms,
        traps,
        powerups,
        goal_x,
        length: map.len() as f32 * TILE_SIZE,
    }
}
