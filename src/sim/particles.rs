//! Ephemeral particle bursts: spawned by jumps, pickups, and deaths, decayed
//! every tick, pruned when spent.

use glam::Vec2;
use rand::Rng;

/// Palette indices, resolved to actual colors by the renderer.
pub const COLOR_WHITE: u32 = 0;
pub const COLOR_MAGENTA: u32 = 1;
pub const COLOR_YELLOW: u32 = 2;
pub const COLOR_CYAN: u32 = 3;

/// Burst velocity spread: each component is `(rand - 0.5) * BURST_SPEED`
/// world units per tick.
pub const BURST_SPEED: f32 = 8.0;
/// Life lost per tick. A fresh burst is fully drained after ~34 ticks.
pub const LIFE_DECAY: f32 = 0.03;
/// Multiplicative size shrink per tick.
pub const SIZE_DECAY: f32 = 0.95;

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub life: f32,
    pub size: f32,
}

/// Unordered particle pool. No cap: bursts self-limit through life decay.
#[derive(Debug, Clone, Default)]
pub struct EffectPool {
    particles: Vec<Particle>,
}

impl EffectPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `count` particles at `origin` with independently randomized
    /// velocities and sizes.
    pub fn spawn<R: Rng>(&mut self, origin: Vec2, count: usize, color: u32, rng: &mut R) {
        self.particles.reserve(count);
        for _ in 0..count {
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * BURST_SPEED,
                (rng.random::<f32>() - 0.5) * BURST_SPEED,
            );
            self.particles.push(Particle {
                pos: origin,
                vel,
                color,
                life: 1.0,
                size: rng.random::<f32>() * 4.0 + 2.0,
            });
        }
    }

    /// Advance and prune. Positions drift by velocity, life decays linearly,
    /// size shrinks geometrically.
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.life -= LIFE_DECAY;
            p.size *= SIZE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_count_and_ranges() {
        let mut pool = EffectPool::new();
        let mut rng = Pcg32::seed_from_u64(7);
        pool.spawn(Vec2::new(100.0, 200.0), 10, COLOR_WHITE, &mut rng);

        assert_eq!(pool.len(), 10);
        for p in pool.particles() {
            assert_eq!(p.pos, Vec2::new(100.0, 200.0));
            assert_eq!(p.life, 1.0);
            assert_eq!(p.color, COLOR_WHITE);
            assert!(p.vel.x.abs() <= BURST_SPEED / 2.0);
            assert!(p.vel.y.abs() <= BURST_SPEED / 2.0);
            assert!(p.size >= 2.0 && p.size < 6.0);
        }
    }

    #[test]
    fn test_pool_drains_to_empty() {
        let mut pool = EffectPool::new();
        let mut rng = Pcg32::seed_from_u64(7);
        pool.spawn(Vec2::ZERO, 10, COLOR_MAGENTA, &mut rng);

        let mut ticks = 0;
        while !pool.is_empty() {
            let before: Vec<f32> = pool.particles().iter().map(|p| p.life).collect();
            pool.update();
            for (p, old) in pool.particles().iter().zip(&before) {
                assert!(p.life < *old);
            }
            ticks += 1;
            assert!(ticks <= 40, "pool never drained");
        }
        // 1.0 / 0.03 rounds up to 34 ticks.
        assert_eq!(ticks, 34);
    }

    #[test]
    fn test_bursts_accumulate() {
        let mut pool = EffectPool::new();
        let mut rng = Pcg32::seed_from_u64(7);
        pool.spawn(Vec2::ZERO, 30, COLOR_WHITE, &mut rng);
        pool.spawn(Vec2::ZERO, 30, COLOR_MAGENTA, &mut rng);
        assert_eq!(pool.len(), 60);
        pool.clear();
        assert!(pool.is_empty());
    }

    #[test]
    fn test_particles_drift_and_shrink() {
        let mut pool = EffectPool::new();
        let mut rng = Pcg32::seed_from_u64(42);
        pool.spawn(Vec2::new(50.0, 50.0), 5, COLOR_YELLOW, &mut rng);

        let start: Vec<Particle> = pool.particles().to_vec();
        pool.update();
        for (after, before) in pool.particles().iter().zip(&start) {
            assert_eq!(after.pos, before.pos + before.vel);
            assert_eq!(after.size, before.size * SIZE_DECAY);
        }
    }
}
