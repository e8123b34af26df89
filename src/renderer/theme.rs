//! Per-theme background styling: sky gradients, sun discs, parallax layer
//! stacks, and landmark decor.
//!
//! Styles are plain static data looked up once per level via [`theme_style`].
//! Nothing here touches the simulation; the scene builder reads these tables
//! and emits geometry.

use crate::consts::GAME_HEIGHT;
use crate::levels::Theme;
use crate::sim::LayerSpec;

/// Gradient stop as (fraction of viewport height, color).
pub type SkyStop = (f32, [f32; 4]);

/// Retro sun disc with horizontal cut bands over its lower half.
#[derive(Debug, Clone, Copy)]
pub struct SunStyle {
    pub x_frac: f32,
    pub y_frac: f32,
    pub radius: f32,
    pub top: [f32; 4],
    pub bottom: [f32; 4],
    /// Band color for the cuts, matching the sky mid-tone behind the sun.
    pub band: [f32; 4],
}

/// How a building layer dresses its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorKind {
    Plain,
    /// Vertical neon strip on columns where `sin(world_x) > 0`.
    NeonStrips,
    /// Lit window rows, alternating accent and detail color by column parity.
    WindowRows,
    /// Stone facade with a mansard roof band and a dark window grid.
    Facade,
    /// Foreground roofline with a railing strip and keyed vent boxes.
    Rooftop,
}

/// One parallax building layer plus its palette.
#[derive(Debug, Clone, Copy)]
pub struct BuildingLayer {
    pub spec: LayerSpec,
    /// Columns rise from this world-space line.
    pub y_base: f32,
    /// Constant height added on top of the noise column.
    pub lift: f32,
    pub body: [f32; 4],
    pub accent: [f32; 4],
    pub detail: [f32; 4],
    pub decor: DecorKind,
}

/// Slow one-off scenery unique to a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkKind {
    /// Water strip on the horizon with a sun reflection wedge.
    HarborWater,
    /// Giant gate arch repeating far behind the city.
    GateArch,
    /// Lattice tower silhouette repeating far behind the city.
    LatticeTower,
}

#[derive(Debug, Clone, Copy)]
pub struct LandmarkStyle {
    pub kind: LandmarkKind,
    pub speed: f32,
    /// World distance between repetitions. Full-width strips ignore it.
    pub spacing: f32,
    pub primary: [f32; 4],
    pub secondary: [f32; 4],
}

/// Shape family of the finish portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalKind {
    NeonPortal,
    ToriiGate,
    StoneArch,
}

#[derive(Debug, Clone, Copy)]
pub struct GoalStyle {
    pub kind: GoalKind,
    pub frame: [f32; 4],
    pub cap: [f32; 4],
    pub field: [f32; 4],
}

/// Complete visual identity of one theme.
pub struct ThemeStyle {
    pub sky: &'static [SkyStop],
    pub sun: SunStyle,
    pub landmark: LandmarkStyle,
    pub far: BuildingLayer,
    pub mid: BuildingLayer,
    pub rooftop: BuildingLayer,
    pub goal: GoalStyle,
}

pub fn theme_style(theme: Theme) -> &'static ThemeStyle {
    match theme {
        Theme::HongKong => &HONG_KONG,
        Theme::Tokyo => &TOKYO,
        Theme::Paris => &PARIS,
    }
}

static HONG_KONG: ThemeStyle = ThemeStyle {
    sky: &[
        (0.0, [0.29, 0.66, 0.72, 1.0]),
        (0.5, [0.37, 0.24, 0.52, 1.0]),
        (0.8, [0.69, 0.35, 0.48, 1.0]),
        (1.0, [0.16, 0.05, 0.21, 1.0]),
    ],
    sun: SunStyle {
        x_frac: 0.5,
        y_frac: 0.4,
        radius: 120.0,
        top: [0.78, 0.49, 1.0, 1.0],
        bottom: [1.0, 0.80, 0.41, 1.0],
        band: [0.37, 0.24, 0.52, 1.0],
    },
    landmark: LandmarkStyle {
        kind: LandmarkKind::HarborWater,
        speed: 0.0,
        spacing: 0.0,
        primary: [0.07, 0.07, 0.20, 1.0],
        secondary: [1.0, 0.42, 0.42, 0.2],
    },
    far: BuildingLayer {
        spec: LayerSpec { speed: 0.2, tile_width: 40.0, height_var: 250.0, seed_offset: 100.0 },
        y_base: GAME_HEIGHT,
        lift: 0.0,
        body: [0.13, 0.04, 0.21, 1.0],
        accent: [0.13, 0.04, 0.21, 1.0],
        detail: [0.13, 0.04, 0.21, 1.0],
        decor: DecorKind::Plain,
    },
    mid: BuildingLayer {
        spec: LayerSpec { speed: 0.5, tile_width: 60.0, height_var: 150.0, seed_offset: 200.0 },
        y_base: GAME_HEIGHT,
        lift: 0.0,
        body: [0.20, 0.07, 0.34, 1.0],
        accent: [0.79, 0.36, 0.50, 1.0],
        detail: [0.20, 0.07, 0.34, 1.0],
        decor: DecorKind::NeonStrips,
    },
    rooftop: BuildingLayer {
        spec: LayerSpec { speed: 0.8, tile_width: 200.0, height_var: 100.0, seed_offset: 700.0 },
        y_base: GAME_HEIGHT,
        lift: 50.0,
        body: [0.08, 0.08, 0.15, 1.0],
        accent: [0.33, 0.33, 0.40, 1.0],
        detail: [0.53, 0.53, 0.63, 1.0],
        decor: DecorKind::Rooftop,
    },
    goal: GoalStyle {
        kind: GoalKind::NeonPortal,
        frame: [0.0, 1.0, 1.0, 1.0],
        cap: [0.0, 1.0, 1.0, 1.0],
        field: [1.0, 0.0, 1.0, 0.25],
    },
};

static TOKYO: ThemeStyle = ThemeStyle {
    sky: &[
        (0.0, [0.17, 0.06, 0.33, 1.0]),
        (0.5, [0.46, 0.59, 0.87, 1.0]),
        (0.8, [0.85, 0.36, 0.62, 1.0]),
        (1.0, [0.93, 0.73, 0.53, 1.0]),
    ],
    sun: SunStyle {
        x_frac: 0.5,
        y_frac: 0.55,
        radius: 180.0,
        top: [1.0, 0.84, 0.0, 1.0],
        bottom: [0.78, 0.08, 0.52, 1.0],
        band: [0.17, 0.06, 0.33, 0.7],
    },
    landmark: LandmarkStyle {
        kind: LandmarkKind::GateArch,
        speed: 0.1,
        spacing: 2400.0,
        primary: [0.91, 0.20, 0.15, 1.0],
        secondary: [0.07, 0.07, 0.07, 1.0],
    },
    far: BuildingLayer {
        spec: LayerSpec { speed: 0.2, tile_width: 40.0, height_var: 150.0, seed_offset: 800.0 },
        y_base: GAME_HEIGHT * 0.75,
        lift: 0.0,
        body: [0.07, 0.02, 0.13, 1.0],
        accent: [0.07, 0.02, 0.13, 1.0],
        detail: [0.07, 0.02, 0.13, 1.0],
        decor: DecorKind::Plain,
    },
    mid: BuildingLayer {
        spec: LayerSpec { speed: 0.5, tile_width: 60.0, height_var: 250.0, seed_offset: 900.0 },
        y_base: GAME_HEIGHT,
        lift: 0.0,
        body: [0.12, 0.04, 0.21, 1.0],
        accent: [0.0, 1.0, 1.0, 1.0],
        detail: [1.0, 0.0, 1.0, 1.0],
        decor: DecorKind::WindowRows,
    },
    rooftop: BuildingLayer {
        spec: LayerSpec { speed: 0.8, tile_width: 250.0, height_var: 120.0, seed_offset: 450.0 },
        y_base: GAME_HEIGHT,
        lift: 30.0,
        body: [0.10, 0.10, 0.18, 1.0],
        accent: [0.24, 0.24, 0.37, 1.0],
        detail: [0.20, 0.20, 0.27, 1.0],
        decor: DecorKind::Rooftop,
    },
    goal: GoalStyle {
        kind: GoalKind::ToriiGate,
        frame: [0.91, 0.20, 0.15, 1.0],
        cap: [0.07, 0.07, 0.07, 1.0],
        field: [1.0, 1.0, 1.0, 0.15],
    },
};

static PARIS: ThemeStyle = ThemeStyle {
    sky: &[
        (0.0, [0.36, 0.31, 0.64, 1.0]),
        (0.5, [0.72, 0.42, 0.64, 1.0]),
        (1.0, [0.97, 0.77, 0.62, 1.0]),
    ],
    sun: SunStyle {
        x_frac: 0.85,
        y_frac: 0.3,
        radius: 100.0,
        top: [1.0, 1.0, 0.0, 1.0],
        bottom: [1.0, 0.27, 0.0, 1.0],
        band: [0.72, 0.42, 0.64, 1.0],
    },
    landmark: LandmarkStyle {
        kind: LandmarkKind::LatticeTower,
        speed: 0.1,
        spacing: 2000.0,
        primary: [0.24, 0.24, 0.33, 1.0],
        secondary: [0.42, 0.36, 0.58, 1.0],
    },
    far: BuildingLayer {
        spec: LayerSpec { speed: 0.2, tile_width: 120.0, height_var: 100.0, seed_offset: 640.0 },
        y_base: GAME_HEIGHT,
        lift: 0.0,
        body: [0.24, 0.24, 0.33, 1.0],
        accent: [0.24, 0.24, 0.33, 1.0],
        detail: [0.24, 0.24, 0.33, 1.0],
        decor: DecorKind::Plain,
    },
    mid: BuildingLayer {
        spec: LayerSpec { speed: 0.5, tile_width: 120.0, height_var: 100.0, seed_offset: 300.0 },
        y_base: GAME_HEIGHT,
        lift: 0.0,
        body: [0.90, 0.84, 0.73, 1.0],
        accent: [0.29, 0.31, 0.41, 1.0],
        detail: [0.17, 0.17, 0.33, 1.0],
        decor: DecorKind::Facade,
    },
    rooftop: BuildingLayer {
        spec: LayerSpec { speed: 0.8, tile_width: 300.0, height_var: 60.0, seed_offset: 520.0 },
        y_base: GAME_HEIGHT,
        lift: 40.0,
        body: [0.16, 0.16, 0.21, 1.0],
        accent: [0.24, 0.24, 0.31, 1.0],
        detail: [0.80, 0.33, 0.0, 1.0],
        decor: DecorKind::Rooftop,
    },
    goal: GoalStyle {
        kind: GoalKind::StoneArch,
        frame: [0.29, 0.29, 0.29, 1.0],
        cap: [0.16, 0.16, 0.16, 1.0],
        field: [1.0, 0.84, 0.0, 0.5],
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_theme_resolves() {
        for theme in [Theme::HongKong, Theme::Tokyo, Theme::Paris] {
            let style = theme_style(theme);
            assert!(!style.sky.is_empty());
            assert!(style.sun.radius > 0.0);
        }
    }

    #[test]
    fn test_layer_speeds_increase_toward_foreground() {
        for theme in [Theme::HongKong, Theme::Tokyo, Theme::Paris] {
            let style = theme_style(theme);
            assert!(style.far.spec.speed < style.mid.spec.speed);
            assert!(style.mid.spec.speed < style.rooftop.spec.speed);
            assert!(style.rooftop.spec.speed < 1.0);
        }
    }

    #[test]
    fn test_sky_stops_ascend_and_reach_bottom() {
        for theme in [Theme::HongKong, Theme::Tokyo, Theme::Paris] {
            let sky = theme_style(theme).sky;
            assert_eq!(sky[0].0, 0.0);
            assert_eq!(sky[sky.len() - 1].0, 1.0);
            for pair in sky.windows(2) {
                assert!(pair[0].0 < pair[1].0);
            }
        }
    }
}
