//! Per-tick simulation: owns the world state and advances it in a fixed
//! order, reporting the outcome for the caller to switch on.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::aabb_overlap;
use crate::consts::{HITBOX_INSET, MAX_FRAME_DT, POWERUP_DURATION};
use crate::levels::LevelConfig;
use crate::sim::camera::Camera;
use crate::sim::level::{self, LevelError, LevelGeometry};
use crate::sim::particles::{COLOR_MAGENTA, COLOR_WHITE, COLOR_YELLOW, EffectPool};
use crate::sim::player::Player;

/// Dust kicked up by a jump.
const JUMP_BURST: usize = 10;
/// Celebration for running down a trap while invulnerable.
const TRAP_BURST: usize = 15;
/// Celebration for collecting a powerup.
const POWERUP_BURST: usize = 20;
/// Emitted twice on death, once white and once magenta.
const DEATH_BURST: usize = 30;

/// Player intent for one tick. One-shot flags; the caller clears them after
/// the tick consumes them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub jump: bool,
}

/// What a tick decided. On anything but `Continue` the caller must leave the
/// playing state before ticking again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Died,
    LevelComplete,
}

/// All mutable simulation state for one level attempt. Nothing outside this
/// struct is consulted during a tick, which is what makes runs reproducible
/// from (config, seed, input script).
#[derive(Debug, Clone)]
pub struct World {
    pub config: LevelConfig,
    pub geometry: LevelGeometry,
    pub player: Player,
    pub camera: Camera,
    pub particles: EffectPool,
    pub seed: u64,
    pub rng: Pcg32,
    pub frame_count: u64,
    /// Simulated seconds elapsed in this attempt.
    pub elapsed: f32,
}

impl World {
    /// Generate the course and place the player at the spawn point. Fails
    /// only on bad configuration.
    pub fn new(config: LevelConfig, seed: u64) -> Result<Self, LevelError> {
        let geometry = level::generate(&config)?;
        let mut player = Player::new();
        player.reset(config.speed);
        Ok(Self {
            config,
            geometry,
            player,
            camera: Camera::new(),
            particles: EffectPool::new(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame_count: 0,
            elapsed: 0.0,
        })
    }

    /// Fresh attempt at the same course: respawn, rearm every trap and
    /// powerup, drop leftover effects.
    pub fn restart(&mut self) {
        for trap in &mut self.geometry.traps {
            trap.destroyed = false;
        }
        for powerup in &mut self.geometry.powerups {
            powerup.active = true;
        }
        self.player.reset(self.config.speed);
        self.camera = Camera::new();
        self.particles.clear();
        self.frame_count = 0;
        self.elapsed = 0.0;
    }

    /// Course progress in [0, 1] for the HUD.
    pub fn progress(&self) -> f32 {
        crate::progress_fraction(self.player.pos.x, self.geometry.goal_x)
    }
}

/// Advance the world by one tick.
///
/// Fixed order: player physics, trap collisions, powerup collisions, goal
/// check, camera, particles. `dt` is wall-clock seconds since the last tick
/// and is clamped here so a backgrounded tab cannot produce a giant step;
/// physics itself is per-tick, dt only drives timers.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) -> TickOutcome {
    let dt = dt.min(MAX_FRAME_DT);
    world.elapsed += dt;

    if input.jump && world.player.jump(world.config.jump_force) {
        let feet = world.player.feet();
        world.particles.spawn(feet, JUMP_BURST, COLOR_WHITE, &mut world.rng);
    }

    let fell = world.player.update(
        dt,
        world.config.gravity,
        &world.geometry.platforms,
        world.frame_count,
    );

    let outcome = if fell {
        spawn_death_burst(world);
        TickOutcome::Died
    } else {
        resolve_collisions(world)
    };

    world.camera.update(world.player.pos.x);
    world.particles.update();
    world.frame_count += 1;

    outcome
}

/// Trap, powerup, and goal checks against the inset player hitbox, in that
/// order. Returns on the first death; effects are otherwise commutative.
fn resolve_collisions(world: &mut World) -> TickOutcome {
    let player = &world.player;
    let hx = player.pos.x + HITBOX_INSET;
    let hy = player.pos.y + HITBOX_INSET;
    let hw = player.w - 2.0 * HITBOX_INSET;
    let hh = player.h - 2.0 * HITBOX_INSET;
    let invulnerable = player.invulnerable();
    let center = player.center();

    let mut died = false;
    for trap in &mut world.geometry.traps {
        if trap.destroyed {
            continue;
        }
        if aabb_overlap(hx, hy, hw, hh, trap.x, trap.y, trap.w, trap.h) {
            if invulnerable {
                trap.destroyed = true;
                let at = Vec2::new(trap.center_x(), trap.center_y());
                world
                    .particles
                    .spawn(at, TRAP_BURST, COLOR_YELLOW, &mut world.rng);
            } else {
                died = true;
                break;
            }
        }
    }
    if died {
        spawn_death_burst(world);
        return TickOutcome::Died;
    }

    for powerup in &mut world.geometry.powerups {
        if !powerup.active {
            continue;
        }
        if aabb_overlap(hx, hy, hw, hh, powerup.x, powerup.y, powerup.w, powerup.h) {
            powerup.active = false;
            world.player.grant_invulnerability(POWERUP_DURATION);
            world
                .particles
                .spawn(center, POWERUP_BURST, COLOR_WHITE, &mut world.rng);
        }
    }

    if world.player.pos.x > world.geometry.goal_x {
        return TickOutcome::LevelComplete;
    }

    TickOutcome::Continue
}

fn spawn_death_burst(world: &mut World) {
    let center = world.player.center();
    world
        .particles
        .spawn(center, DEATH_BURST, COLOR_WHITE, &mut world.rng);
    world
        .particles
        .spawn(center, DEATH_BURST, COLOR_MAGENTA, &mut world.rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CAMERA_MARGIN, ground_y};
    use crate::levels::LEVELS;
    use crate::sim::level::{Powerup, Trap, TrapKind};

    const DT: f32 = 1.0 / 60.0;

    fn world() -> World {
        World::new(LEVELS[0], 42).unwrap()
    }

    /// Run until the player has settled on the ground.
    fn settle(world: &mut World) {
        let input = TickInput::default();
        for _ in 0..120 {
            assert_eq!(tick(world, &input, DT), TickOutcome::Continue);
            if world.player.grounded {
                return;
            }
        }
        panic!("player never settled");
    }

    fn trap_ahead(world: &World, distance: f32) -> Trap {
        Trap {
            x: world.player.pos.x + distance,
            y: ground_y() - 30.0,
            w: 20.0,
            h: 30.0,
            kind: TrapKind::Small,
            destroyed: false,
        }
    }

    #[test]
    fn test_world_rejects_unknown_layout() {
        let mut config = LEVELS[0];
        config.layout = "nowhere";
        assert!(matches!(
            World::new(config, 1),
            Err(LevelError::UnknownLayout { .. })
        ));
    }

    #[test]
    fn test_trap_collision_kills_once() {
        let mut world = world();
        settle(&mut world);
        world.geometry.traps = vec![trap_ahead(&world, 60.0)];

        let input = TickInput::default();
        let mut outcome = TickOutcome::Continue;
        for _ in 0..60 {
            outcome = tick(&mut world, &input, DT);
            if outcome != TickOutcome::Continue {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Died);
        assert!(!world.geometry.traps[0].destroyed);
        // Death burst fired, both colors.
        assert!(world.particles.len() >= 2 * DEATH_BURST);
    }

    #[test]
    fn test_trap_graze_within_inset_is_forgiven() {
        let mut world = world();
        settle(&mut world);
        // One tick of movement leaves an outer-box graze narrower than the
        // hitbox inset; the tick after that pushes past it.
        world.geometry.traps = vec![trap_ahead(&world, 32.0)];

        let input = TickInput::default();
        assert_eq!(tick(&mut world, &input, DT), TickOutcome::Continue);
        let overlap = world.player.pos.x + world.player.w - world.geometry.traps[0].x;
        assert!(overlap > 0.0);
        assert!(overlap <= HITBOX_INSET);
        assert!(!world.geometry.traps[0].destroyed);

        assert_eq!(tick(&mut world, &input, DT), TickOutcome::Died);
    }

    #[test]
    fn test_invulnerable_player_destroys_trap() {
        let mut world = world();
        settle(&mut world);
        world.geometry.traps = vec![trap_ahead(&world, 60.0)];
        world.player.grant_invulnerability(30.0);

        let input = TickInput::default();
        for _ in 0..60 {
            assert_eq!(tick(&mut world, &input, DT), TickOutcome::Continue);
            if world.geometry.traps[0].destroyed {
                break;
            }
        }
        assert!(world.geometry.traps[0].destroyed);

        // Destroyed traps stay destroyed and never kill.
        for _ in 0..10 {
            assert_eq!(tick(&mut world, &input, DT), TickOutcome::Continue);
        }
        assert!(world.geometry.traps[0].destroyed);
    }

    #[test]
    fn test_powerup_collection() {
        let mut world = world();
        settle(&mut world);
        // Directly in the player's path, at body height.
        world.geometry.powerups = vec![Powerup {
            x: world.player.pos.x + 60.0,
            y: world.player.pos.y + 10.0,
            w: 20.0,
            h: 20.0,
            active: true,
        }];

        let input = TickInput::default();
        for _ in 0..60 {
            tick(&mut world, &input, DT);
            if !world.geometry.powerups[0].active {
                break;
            }
        }
        assert!(!world.geometry.powerups[0].active);
        assert!(world.player.invulnerable());
        assert!(world.player.invuln_timer <= POWERUP_DURATION);
        assert!(!world.particles.is_empty());
    }

    #[test]
    fn test_goal_completes_level() {
        let mut world = world();
        settle(&mut world);
        world.geometry.goal_x = world.player.pos.x + 30.0;
        world.geometry.traps.clear();

        let input = TickInput::default();
        let mut outcome = TickOutcome::Continue;
        for _ in 0..60 {
            outcome = tick(&mut world, &input, DT);
            if outcome != TickOutcome::Continue {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::LevelComplete);
        assert!(world.player.pos.x > world.geometry.goal_x);
    }

    #[test]
    fn test_jump_input_spawns_dust() {
        let mut world = world();
        settle(&mut world);
        let before = world.particles.len();
        let input = TickInput { jump: true };
        tick(&mut world, &input, DT);
        assert!(world.particles.len() > before);
        assert!(world.player.vel.y < 0.0);
    }

    #[test]
    fn test_camera_follows_after_player_moves() {
        let mut world = world();
        let input = TickInput::default();
        for _ in 0..120 {
            tick(&mut world, &input, DT);
            let expected = (world.player.pos.x - CAMERA_MARGIN).max(0.0);
            assert_eq!(world.camera.x, expected);
        }
    }

    #[test]
    fn test_dt_clamped_for_timers() {
        let mut world = world();
        let input = TickInput::default();
        tick(&mut world, &input, 0.5);
        assert_eq!(world.elapsed, MAX_FRAME_DT);
    }

    #[test]
    fn test_restart_rearms_course() {
        let mut world = world();
        settle(&mut world);
        world.geometry.traps[0].destroyed = true;
        world.geometry.powerups[0].active = false;
        world.elapsed = 12.0;

        world.restart();

        assert!(world.geometry.traps.iter().all(|t| !t.destroyed));
        assert!(world.geometry.powerups.iter().all(|p| p.active));
        assert_eq!(world.elapsed, 0.0);
        assert_eq!(world.frame_count, 0);
        assert!(world.particles.is_empty());
        assert_eq!(world.player.pos.x, crate::consts::SPAWN_X);
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(LEVELS[1], 99999).unwrap();
        let mut b = World::new(LEVELS[1], 99999).unwrap();

        for frame in 0u64..600 {
            let input = TickInput {
                jump: frame % 47 == 0,
            };
            let oa = tick(&mut a, &input, DT);
            let ob = tick(&mut b, &input, DT);
            assert_eq!(oa, ob);
        }

        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.player.vel, b.player.vel);
        assert_eq!(a.camera.x, b.camera.x);
        assert_eq!(a.particles.len(), b.particles.len());
        assert_eq!(a.frame_count, b.frame_count);
    }

    #[test]
    fn test_progress_clamps() {
        let mut world = world();
        assert!(world.progress() >= 0.0);
        world.player.pos.x = world.geometry.goal_x * 2.0;
        assert_eq!(world.progress(), 1.0);
    }
}
