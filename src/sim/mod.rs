//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick physics, dt only for timers (clamped at the tick boundary)
//! - Seeded RNG only, owned by the world
//! - Scenery noise is a pure function of world coordinate, never the RNG
//! - No rendering or platform dependencies

pub mod camera;
pub mod level;
pub mod parallax;
pub mod particles;
pub mod player;
pub mod tick;

pub use camera::Camera;
pub use level::{LevelError, LevelGeometry, Platform, Powerup, Trap, TrapKind, generate};
pub use parallax::{Column, LayerSpec, column_height, column_noise, layer_offset, visible_columns};
pub use particles::{EffectPool, Particle};
pub use player::Player;
pub use tick::{TickInput, TickOutcome, World, tick};
