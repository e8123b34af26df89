//! Static campaign data: the level table and the tile-pattern motifs each
//! layout key expands into.
//!
//! Everything here is immutable configuration. The simulation treats it as
//! read-only input; nothing in this module depends on game state.

use serde::{Deserialize, Serialize};

/// Visual theme of a level, resolved once at level load. Rendering dispatches
/// on this tag through lookup tables instead of comparing level names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    HongKong,
    Tokyo,
    Paris,
}

impl Theme {
    /// Short identifier used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::HongKong => "hong-kong",
            Theme::Tokyo => "tokyo",
            Theme::Paris => "paris",
        }
    }
}

/// One campaign level. Speeds and forces are in world units per tick at the
/// nominal 60 Hz rate; `duration` is the target run length in seconds used to
/// size the generated course.
#[derive(Debug, Clone, Copy)]
pub struct LevelConfig {
    pub name: &'static str,
    pub subtitle: &'static str,
    pub layout: &'static str,
    pub speed: f32,
    pub gravity: f32,
    pub jump_force: f32,
    pub duration: Option<f32>,
    pub theme: Theme,
}

/// The campaign, in play order.
pub static LEVELS: &[LevelConfig] = &[
    LevelConfig {
        name: "HONG KONG",
        subtitle: "NEON HARBOR",
        layout: "harbor",
        speed: 5.0,
        gravity: 0.6,
        jump_force: 13.0,
        duration: Some(40.0),
        theme: Theme::HongKong,
    },
    LevelConfig {
        name: "TOKYO",
        subtitle: "SHIBUYA NIGHTS",
        layout: "shibuya",
        speed: 6.0,
        gravity: 0.65,
        jump_force: 14.0,
        duration: Some(45.0),
        theme: Theme::Tokyo,
    },
    LevelConfig {
        name: "PARIS",
        subtitle: "BOULEVARD PERIPHERIQUE",
        layout: "boulevard",
        speed: 7.0,
        gravity: 0.7,
        jump_force: 15.0,
        duration: Some(50.0),
        theme: Theme::Paris,
    },
];

/// Tile-pattern motifs per layout key. Symbols: `_`/space = gap, `x` = small
/// trap, `X` = tall trap, `*` = powerup, `G` = goal, anything else = ground.
/// Motifs are cycled in order while the course is long enough.
pub fn layout_pattern(key: &str) -> Option<&'static [&'static str]> {
    match key {
        "harbor" => Some(&[
            "........x.........___...........",
            "......*......x.......__.........",
            "....X.............____..........",
        ]),
        "shibuya" => Some(&[
            "......x.......x........___......",
            "....X........*......____........",
            "...x.....___.....x.......X......",
        ]),
        "boulevard" => Some(&[
            "....x...x.......____....X.......",
            "...X......___...*...___.........",
            "..x....X......_____....x........",
        ]),
        _ => None,
    }
}
