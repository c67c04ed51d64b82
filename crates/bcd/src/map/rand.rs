//! Random rectangular-obstacle rooms with replay tokens.
//!
//! Purpose
//! - Provide reproducible maps for property tests, benches and demos.
//!
//! Model
//! - Start from an all-free grid, optionally wall the outer ring, then drop
//!   axis-aligned rectangular obstacles of random size and position (clipped).
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG, so
//!   draw `index` of a run can be regenerated on its own.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::OccupancyMap;

/// Obstacle count distribution.
#[derive(Clone, Copy, Debug)]
pub enum ObstacleCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl ObstacleCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            ObstacleCount::Fixed(n) => n,
            ObstacleCount::Uniform { min, max } => rng.gen_range(min..=max.max(min)),
        }
    }
}

/// Room sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RoomCfg {
    pub width: usize,
    pub height: usize,
    pub obstacles: ObstacleCount,
    /// Largest obstacle side as a fraction of the room side. Clamped to [0, 1];
    /// obstacles are always at least one pixel.
    pub max_extent_frac: f64,
    /// Occupy the one-pixel outer ring.
    pub border_walls: bool,
}
impl Default for RoomCfg {
    fn default() -> Self {
        Self {
            width: 64,
            height: 48,
            obstacles: ObstacleCount::Uniform { min: 1, max: 6 },
            max_extent_frac: 0.3,
            border_walls: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw one room.
pub fn draw_room(cfg: RoomCfg, tok: ReplayToken) -> OccupancyMap {
    let mut rng = tok.to_std_rng();
    let (w, h) = (cfg.width, cfg.height);
    let mut map = OccupancyMap::filled(w, h, true);
    if w == 0 || h == 0 {
        return map;
    }
    if cfg.border_walls {
        map.fill_rect(0, 0, w, 1, false);
        map.fill_rect(0, h - 1, w, h, false);
        map.fill_rect(0, 0, 1, h, false);
        map.fill_rect(w - 1, 0, w, h, false);
    }
    let frac = cfg.max_extent_frac.clamp(0.0, 1.0);
    let max_w = ((w as f64 * frac) as usize).max(1);
    let max_h = ((h as f64 * frac) as usize).max(1);
    for _ in 0..cfg.obstacles.sample(&mut rng) {
        let ow = rng.gen_range(1..=max_w);
        let oh = rng.gen_range(1..=max_h);
        let x0 = rng.gen_range(0..w);
        let y0 = rng.gen_range(0..h);
        map.fill_rect(x0, y0, x0 + ow, y0 + oh, false);
    }
    map
}
