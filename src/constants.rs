// --- Game Constants ---

// Simulation runs in a fixed virtual space; the renderer scales it to the
// terminal and pointer input is mapped back by SIM_WIDTH / rendered width.
pub const SIM_WIDTH: f64 = 360.0;
pub const SIM_HEIGHT: f64 = 560.0;

// Player craft
pub const PLAYER_RADIUS: f64 = 18.0;
pub const PLAYER_Y_FRACTION: f64 = 0.78; // Fixed vertical position
pub const PLAYER_ACCEL: f64 = 0.7; // Per step while a key is held
pub const PLAYER_DAMPING: f64 = 0.88; // Per step with no key held
pub const PLAYER_MAX_VX: f64 = 6.5;
pub const POINTER_FOLLOW_RATE: f64 = 0.15; // Fraction of remaining distance per step
pub const POINTER_COAST_DAMPING: f64 = 0.90;

// Difficulty ramp: speed = BASE_SPEED + elapsed_ms * SPEED_RAMP_PER_MS
pub const BASE_SPEED: f64 = 3.0;
pub const SPEED_RAMP_PER_MS: f64 = 0.0015;

// All vertical motion integrates as y += vy * dt_ms * MOTION_SCALE
pub const MOTION_SCALE: f64 = 0.06;

// Background stars
pub const STAR_INTERVAL_MS: f64 = 80.0;
pub const STAR_MIN_VY: f64 = 0.5;
pub const STAR_MAX_VY: f64 = 1.5;
pub const STAR_SPAWN_Y: f64 = -10.0;
pub const STAR_CULL_MARGIN: f64 = 10.0;

// Obstacle waves
pub const LANES: usize = 5;
pub const GAP_WIDTH: usize = 1;
pub const WAVE_BASE_INTERVAL_MS: f64 = 380.0;
pub const WAVE_INTERVAL_SPEED_FACTOR: f64 = 40.0;
pub const WAVE_MIN_INTERVAL_MS: f64 = 180.0;
pub const GAP_REVERSE_CHANCE: f64 = 0.17; // Early direction flip mid-range
pub const OBSTACLE_HEIGHT: f64 = 18.0;
pub const OBSTACLE_SPAWN_Y: f64 = -30.0;
pub const OBSTACLE_CULL_MARGIN: f64 = 40.0;
pub const LANE_INSET: f64 = 4.0;

// Pickups ride the safe corridor, slightly above their wave
pub const PICKUP_WAVE_CADENCE: u64 = 4; // Every 4th wave
pub const PICKUP_RADIUS: f64 = 10.0;
pub const PICKUP_SPAWN_Y: f64 = -44.0;
pub const PICKUP_SPEED_FACTOR: f64 = 0.95;
pub const PICKUP_CULL_MARGIN: f64 = 20.0;
pub const PICKUP_BONUS: f64 = 10.0;

// Scoring
pub const SURVIVAL_SCORE_PER_MS: f64 = 0.01;

// Frame driver
pub const MAX_FRAME_DT_MS: f64 = 32.0; // A stalled frame may not jump further
pub const DEFAULT_FRAME_MS: f64 = 16.0; // First frame / headless step
pub const FRAME_POLL_MS: u64 = 16; // Event poll wait doubles as frame pacing

// Terminals without key-release reporting keep a held key alive for this
// many frames after the last press or repeat event.
pub const KEY_HOLD_FRAMES: u8 = 9;
