use log::debug;
use rand::Rng;

use crate::config::GameConfig;
use crate::constants::*;
use crate::entities::{Obstacle, Pickup, Star};

/// Populates the entity sets over time: a continuous star drizzle, obstacle
/// waves with one safe corridor, and a pickup riding every few corridors.
pub struct Spawner {
    star_timer: f64,
    wave_timer: f64,
    wave_count: u64,
    pub(crate) gap_lane: usize,
    pub(crate) gap_dir: i32,
}

impl Spawner {
    pub fn new(cfg: &GameConfig) -> Self {
        Spawner {
            star_timer: 0.0,
            wave_timer: 0.0,
            wave_count: 0,
            gap_lane: cfg.max_gap_lane() / 2,
            gap_dir: 1,
        }
    }

    pub fn reset(&mut self, cfg: &GameConfig) {
        *self = Spawner::new(cfg);
    }

    pub fn gap_lane(&self) -> usize {
        self.gap_lane
    }

    /// Advance both spawn timers by `dt_ms` and emit whatever came due.
    /// The wave interval shrinks with `speed` down to a fixed floor.
    pub fn advance(
        &mut self,
        dt_ms: f64,
        speed: f64,
        cfg: &GameConfig,
        rng: &mut impl Rng,
        stars: &mut Vec<Star>,
        obstacles: &mut Vec<Obstacle>,
        pickups: &mut Vec<Pickup>,
    ) {
        self.star_timer += dt_ms;
        if self.star_timer > STAR_INTERVAL_MS {
            stars.push(Star::new(
                rng.gen_range(0.0..SIM_WIDTH),
                rng.gen_range(STAR_MIN_VY..STAR_MAX_VY),
            ));
            self.star_timer = 0.0;
        }

        self.wave_timer += dt_ms;
        let interval =
            (WAVE_BASE_INTERVAL_MS - speed * WAVE_INTERVAL_SPEED_FACTOR).max(WAVE_MIN_INTERVAL_MS);
        if self.wave_timer > interval {
            self.spawn_wave(speed, cfg, rng, obstacles, pickups);
            self.wave_timer = 0.0;
        }
    }

    /// Emit one obstacle per lane except the gap region, then walk the gap.
    /// Every `PICKUP_WAVE_CADENCE`th wave also drops a pickup centered in
    /// the corridor, slightly above and slightly slower than its wave.
    pub fn spawn_wave(
        &mut self,
        speed: f64,
        cfg: &GameConfig,
        rng: &mut impl Rng,
        obstacles: &mut Vec<Obstacle>,
        pickups: &mut Vec<Pickup>,
    ) {
        let lane_w = cfg.lane_width();
        let gap = self.gap_lane..self.gap_lane + cfg.gap_width;
        for lane in 0..cfg.lanes {
            if gap.contains(&lane) {
                continue;
            }
            obstacles.push(Obstacle::new(
                lane as f64 * lane_w + LANE_INSET,
                lane_w - 2.0 * LANE_INSET,
                speed,
            ));
        }

        self.wave_count += 1;
        if self.wave_count % PICKUP_WAVE_CADENCE == 0 {
            let corridor_center = (self.gap_lane as f64 + cfg.gap_width as f64 / 2.0) * lane_w;
            pickups.push(Pickup::new(corridor_center, speed * PICKUP_SPEED_FACTOR));
            debug!("pickup dropped in lane {} at wave {}", self.gap_lane, self.wave_count);
        }

        self.walk_gap(cfg, rng);
    }

    /// Random walk of the corridor: keep direction, reverse at the edges,
    /// and occasionally reverse mid-range so the sweep is not predictable.
    fn walk_gap(&mut self, cfg: &GameConfig, rng: &mut impl Rng) {
        let max = cfg.max_gap_lane() as i32;
        let next = self.gap_lane as i32 + self.gap_dir;
        if next < 0 || next > max {
            self.gap_dir = -self.gap_dir;
        } else if rng.gen_bool(GAP_REVERSE_CHANCE) {
            self.gap_dir = -self.gap_dir;
        }
        self.gap_lane = (self.gap_lane as i32 + self.gap_dir).clamp(0, max) as usize;
    }
}
