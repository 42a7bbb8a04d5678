use rand::Rng;

use crate::config::{ControlMode, GameConfig};
use crate::constants::*;
use crate::entities::{Obstacle, Pickup, Player, Star};
use crate::spawner::Spawner;
use crate::terminal_io::InputSnapshot;

/// Everything the render pass reads and the step mutates. Owned by the frame
/// driver; rendering never writes it.
pub struct GameState {
    pub running: bool,
    /// Accumulated simulation time in milliseconds.
    pub t: f64,
    pub speed: f64,
    pub stars: Vec<Star>,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    pub score: f64,
    pub player: Player,
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            running: true,
            t: 0.0,
            speed: BASE_SPEED,
            stars: Vec::new(),
            obstacles: Vec::new(),
            pickups: Vec::new(),
            score: 0.0,
            player: Player::new(),
        }
    }

    /// Back to the initial values; the player object itself survives.
    pub fn reset(&mut self) {
        self.t = 0.0;
        self.speed = BASE_SPEED;
        self.stars.clear();
        self.obstacles.clear();
        self.pickups.clear();
        self.score = 0.0;
        self.player.reset();
        self.running = true;
    }

    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }
}

/// Advance the game by one frame of `dt_ms` real time (clamped to 32 ms).
///
/// Callers must not invoke this once `running` is false; the ended state is
/// left exactly as the fatal frame produced it until an explicit reset.
pub fn step(
    state: &mut GameState,
    spawner: &mut Spawner,
    input: &InputSnapshot,
    dt_ms: f64,
    cfg: &GameConfig,
    rng: &mut impl Rng,
) {
    debug_assert!(state.running);
    let dt = dt_ms.min(MAX_FRAME_DT_MS);

    // Difficulty ramps as a function of total elapsed time, not per frame,
    // so a variable dt cannot drift the curve.
    state.t += dt;
    state.speed = BASE_SPEED + state.t * SPEED_RAMP_PER_MS;

    spawner.advance(
        dt,
        state.speed,
        cfg,
        rng,
        &mut state.stars,
        &mut state.obstacles,
        &mut state.pickups,
    );

    for star in &mut state.stars {
        star.update(dt);
    }
    for obstacle in &mut state.obstacles {
        obstacle.update(dt);
    }
    for pickup in &mut state.pickups {
        pickup.update(dt);
    }

    state.stars.retain(|s| !s.offscreen());
    state.obstacles.retain(|o| !o.offscreen());
    state.pickups.retain(|p| !p.offscreen());

    apply_control(&mut state.player, input, cfg);

    for obstacle in &state.obstacles {
        if circle_rect_hit(state.player.x, state.player.y, state.player.r, obstacle) {
            state.running = false;
            break;
        }
    }

    let player = &state.player;
    let score = &mut state.score;
    state.pickups.retain(|p| {
        if circles_overlap(player.x, player.y, player.r, p.x, p.y, p.r) {
            *score += PICKUP_BONUS;
            false
        } else {
            true
        }
    });

    // Survival credit still lands on the fatal frame; the score freezes
    // because ended states are never stepped again.
    state.score += dt * SURVIVAL_SCORE_PER_MS;
}

fn apply_control(player: &mut Player, input: &InputSnapshot, cfg: &GameConfig) {
    match cfg.control {
        ControlMode::Keys => {
            if input.left_held && !input.right_held {
                player.vx -= PLAYER_ACCEL;
            }
            if input.right_held && !input.left_held {
                player.vx += PLAYER_ACCEL;
            }
            if !input.left_held && !input.right_held {
                player.vx *= PLAYER_DAMPING;
            }
            player.vx = player.vx.clamp(-PLAYER_MAX_VX, PLAYER_MAX_VX);
            player.x += player.vx;
        }
        ControlMode::Pointer => {
            if let Some(target) = input.pointer_x {
                let step = (target - player.x) * POINTER_FOLLOW_RATE;
                player.vx = step;
                player.x += step;
            } else {
                player.vx *= POINTER_COAST_DAMPING;
                player.x += player.vx;
            }
        }
    }
    player.clamp_to_field();
}

/// Circle vs axis-aligned rectangle: clamp the circle center onto the
/// rectangle and compare the squared distance against r². Strict `<`, so a
/// circle exactly touching an edge does not collide.
pub fn circle_rect_hit(cx: f64, cy: f64, r: f64, o: &Obstacle) -> bool {
    let nearest_x = cx.clamp(o.x, o.x + o.w);
    let nearest_y = cy.clamp(o.y, o.y + o.h);
    let dx = cx - nearest_x;
    let dy = cy - nearest_y;
    dx * dx + dy * dy < r * r
}

/// Strict `<` again: centers exactly (r1 + r2) apart do not overlap.
pub fn circles_overlap(x1: f64, y1: f64, r1: f64, x2: f64, y2: f64, r2: f64) -> bool {
    let dx = x1 - x2;
    let dy = y1 - y2;
    let r = r1 + r2;
    dx * dx + dy * dy < r * r
}
