//! The player body: gravity integration, platform landing, the powerup
//! timer, and the cosmetic motion trail.

use glam::Vec2;

use crate::consts::{DEATH_DEPTH, PLAYER_HEIGHT, PLAYER_WIDTH, SPAWN_X, SPAWN_Y};
use crate::sim::level::Platform;

/// Trail samples kept for rendering. Oldest is evicted first.
pub const TRAIL_CAPACITY: usize = 8;
/// A trail sample is taken every this many ticks.
pub const TRAIL_INTERVAL: u64 = 3;

/// The runner. Horizontal speed is fixed per level; only vertical motion is
/// player-controlled.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub w: f32,
    pub h: f32,
    pub grounded: bool,
    /// Invulnerability window remaining, in simulated seconds. Zero or
    /// negative means inactive.
    pub invuln_timer: f32,
    /// Recent positions for the motion trail. Rendering only.
    pub trail: Vec<Vec2>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(SPAWN_X, SPAWN_Y),
            vel: Vec2::ZERO,
            w: PLAYER_WIDTH,
            h: PLAYER_HEIGHT,
            grounded: false,
            invuln_timer: 0.0,
            trail: Vec::new(),
        }
    }

    /// Back to the spawn point, running at the level's scroll speed.
    pub fn reset(&mut self, speed: f32) {
        self.pos = Vec2::new(SPAWN_X, SPAWN_Y);
        self.vel = Vec2::new(speed, 0.0);
        self.grounded = false;
        self.invuln_timer = 0.0;
        self.trail.clear();
    }

    /// Launch upward if grounded. Returns whether the jump took effect so the
    /// caller can emit the dust burst. No buffering, no double jump.
    pub fn jump(&mut self, force: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel.y = -force;
        self.grounded = false;
        true
    }

    pub fn invulnerable(&self) -> bool {
        self.invuln_timer > 0.0
    }

    pub fn grant_invulnerability(&mut self, duration: f32) {
        self.invuln_timer = duration;
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.w / 2.0, self.pos.y + self.h / 2.0)
    }

    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.w / 2.0, self.pos.y + self.h)
    }

    /// One physics tick: integrate, resolve landings, report whether the
    /// player fell past the death depth.
    ///
    /// Gravity and velocities are per-tick quantities; `dt` only drives the
    /// invulnerability countdown.
    pub fn update(
        &mut self,
        dt: f32,
        gravity: f32,
        platforms: &[Platform],
        frame_count: u64,
    ) -> bool {
        if self.invuln_timer > 0.0 {
            self.invuln_timer -= dt;
        }

        // Semi-implicit Euler, velocity before position.
        self.vel.y += gravity;
        self.pos.y += self.vel.y;
        self.pos.x += self.vel.x;

        self.grounded = false;

        // Top-only landing. The 10-unit band below the surface accepts a tick
        // whose fall distance overshoots the platform; a faster fall passes
        // through. No early exit, so the last qualifying platform wins.
        let bottom = self.pos.y + self.h;
        let prev_bottom = (self.pos.y - self.vel.y) + self.h;

        for p in platforms {
            let overlaps_x = self.pos.x + self.w > p.x && self.pos.x < p.x + p.w;
            if overlaps_x && bottom >= p.y && prev_bottom <= p.y + 10.0 && self.vel.y >= 0.0 {
                self.pos.y = p.y - self.h;
                self.vel.y = 0.0;
                self.grounded = true;
            }
        }

        let fell = self.pos.y > DEATH_DEPTH;

        if frame_count % TRAIL_INTERVAL == 0 {
            self.trail.push(self.pos);
            if self.trail.len() > TRAIL_CAPACITY {
                self.trail.remove(0);
            }
        }

        fell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ground_y;

    const DT: f32 = 1.0 / 60.0;

    fn ground() -> Vec<Platform> {
        vec![Platform {
            x: 0.0,
            y: ground_y(),
            w: 4000.0,
            h: 60.0,
        }]
    }

    fn grounded_player(platforms: &[Platform]) -> Player {
        let mut player = Player::new();
        player.reset(5.0);
        for frame in 0..120 {
            player.update(DT, 0.6, platforms, frame);
            if player.grounded {
                return player;
            }
        }
        panic!("player never landed");
    }

    #[test]
    fn test_lands_exactly_on_surface() {
        let platforms = ground();
        let player = grounded_player(&platforms);
        assert_eq!(player.pos.y + player.h, ground_y());
        assert_eq!(player.vel.y, 0.0);
        assert!(player.grounded);
    }

    #[test]
    fn test_jump_airborne_is_noop() {
        let mut player = Player::new();
        player.reset(5.0);
        assert!(!player.grounded);
        let vel_before = player.vel;
        assert!(!player.jump(13.0));
        assert_eq!(player.vel, vel_before);
        assert!(!player.grounded);
    }

    #[test]
    fn test_jump_launches_upward() {
        let platforms = ground();
        let mut player = grounded_player(&platforms);
        assert!(player.jump(13.0));
        assert_eq!(player.vel.y, -13.0);
        assert!(!player.grounded);
        // A second press mid-air does nothing.
        assert!(!player.jump(13.0));
        assert_eq!(player.vel.y, -13.0);
    }

    #[test]
    fn test_jump_clears_tall_trap_height() {
        let platforms = ground();
        let mut player = grounded_player(&platforms);
        let start_y = player.pos.y;
        player.jump(13.0);
        let mut apex = start_y;
        for frame in 0..180 {
            player.update(DT, 0.6, &platforms, frame);
            apex = apex.min(player.pos.y);
            if player.grounded {
                break;
            }
        }
        assert!(player.grounded, "jump never came back down");
        assert!(start_y - apex > 70.0, "apex {} too low", start_y - apex);
        // Landing restores the exact resting contact.
        assert_eq!(player.pos.y + player.h, ground_y());
    }

    #[test]
    fn test_overshooting_fall_still_lands() {
        let platforms = ground();
        let mut player = Player::new();
        player.reset(5.0);
        // One tick of fall carries the bottom well past the surface; the
        // tolerance band accepts it and snaps to exact contact.
        player.pos.y = ground_y() - player.h - 2.0;
        player.vel.y = 30.0;
        player.update(DT, 0.0, &platforms, 0);
        assert!(player.grounded);
        assert_eq!(player.pos.y + player.h, ground_y());
    }

    #[test]
    fn test_no_snap_when_already_below_surface() {
        let platforms = ground();
        let mut player = Player::new();
        player.reset(5.0);
        // Bottom starts 15 below the surface: outside the band, so a ledge
        // met from the side never teleports the player up.
        player.pos.y = ground_y() - player.h + 15.0;
        player.vel.y = 1.0;
        player.update(DT, 0.0, &platforms, 0);
        assert!(!player.grounded);
        assert!(player.pos.y + player.h > ground_y());
    }

    #[test]
    fn test_no_snap_while_rising() {
        let platforms = ground();
        let mut player = Player::new();
        player.reset(5.0);
        // Rising slowly through the band: bottom ends just below the surface
        // and the previous bottom was inside it, but upward motion must never
        // pull the player down onto the ledge.
        player.pos.y = ground_y() - player.h + 5.0;
        player.vel.y = -3.0;
        player.update(DT, 0.0, &platforms, 0);
        assert!(!player.grounded);
        assert_eq!(player.vel.y, -3.0);
    }

    #[test]
    fn test_invulnerability_counts_down_in_sim_time() {
        let mut player = Player::new();
        player.reset(5.0);
        player.grant_invulnerability(5.0);
        assert!(player.invulnerable());

        let platforms = ground();
        let mut ticks = 0u32;
        while player.invulnerable() {
            player.update(DT, 0.6, &platforms, u64::from(ticks));
            ticks += 1;
            assert!(ticks < 400, "timer never expired");
        }
        // 5 seconds at 60 ticks/s, give or take float accumulation.
        assert!((295..=305).contains(&ticks), "expired after {ticks} ticks");
    }

    #[test]
    fn test_trail_cadence_and_capacity() {
        let platforms = ground();
        let mut player = Player::new();
        player.reset(5.0);

        for frame in 0..9 {
            player.update(DT, 0.6, &platforms, frame);
        }
        // Frames 0, 3, 6 sampled so far.
        assert_eq!(player.trail.len(), 3);

        for frame in 9..60 {
            player.update(DT, 0.6, &platforms, frame);
        }
        assert_eq!(player.trail.len(), TRAIL_CAPACITY);
        // Oldest evicted first: samples move forward with the player.
        for pair in player.trail.windows(2) {
            assert!(pair[0].x < pair[1].x);
        }
    }

    #[test]
    fn test_reset_clears_state() {
        let platforms = ground();
        let mut player = grounded_player(&platforms);
        player.grant_invulnerability(5.0);
        player.reset(7.0);
        assert_eq!(player.pos, Vec2::new(SPAWN_X, SPAWN_Y));
        assert_eq!(player.vel, Vec2::new(7.0, 0.0));
        assert!(!player.grounded);
        assert!(!player.invulnerable());
        assert!(player.trail.is_empty());
    }

    #[test]
    fn test_falls_past_death_depth() {
        let mut player = Player::new();
        player.reset(5.0);
        let mut fell = false;
        for frame in 0..600 {
            if player.update(DT, 0.6, &[], frame) {
                fell = true;
                break;
            }
        }
        assert!(fell);
        assert!(player.pos.y > DEATH_DEPTH);
    }
}
