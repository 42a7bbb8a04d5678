use crate::constants::*;
use crate::rendering::GameGrid;

// --- Entity records ---
// Plain data: spawned by the Spawner, advanced and culled by the simulation
// step, drawn by the render pass. None of them own behavior beyond motion.

/// The player craft. Created once; repositioned on reset, never destroyed.
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub vx: f64,
}

impl Player {
    pub fn new() -> Self {
        Player {
            x: SIM_WIDTH / 2.0,
            y: SIM_HEIGHT * PLAYER_Y_FRACTION,
            r: PLAYER_RADIUS,
            vx: 0.0,
        }
    }

    /// Back to the center with zero velocity. The vertical position and
    /// radius are fixed for the lifetime of the game.
    pub fn reset(&mut self) {
        self.x = SIM_WIDTH / 2.0;
        self.vx = 0.0;
    }

    pub fn clamp_to_field(&mut self) {
        self.x = self.x.clamp(self.r, SIM_WIDTH - self.r);
    }

    pub fn draw(&self, grid: &mut GameGrid) {
        let (cx, cy) = grid.to_cell(self.x, self.y);
        grid.set_signed(cx, cy - 1, '^');
        grid.set_signed(cx - 1, cy, '/');
        grid.set_signed(cx, cy, 'A');
        grid.set_signed(cx + 1, cy, '\\');
        // Thruster flare
        grid.set_signed(cx, cy + 1, '*');
    }
}

/// Decorative background particle. No collision.
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub vy: f64,
}

impl Star {
    pub fn new(x: f64, vy: f64) -> Self {
        Star {
            x,
            y: STAR_SPAWN_Y,
            vy,
        }
    }

    pub fn update(&mut self, dt_ms: f64) {
        self.y += self.vy * dt_ms * MOTION_SCALE;
    }

    pub fn offscreen(&self) -> bool {
        self.y > SIM_HEIGHT + STAR_CULL_MARGIN
    }

    pub fn draw(&self, grid: &mut GameGrid) {
        grid.plot(self.x, self.y, '.');
    }
}

/// Axis-aligned falling rectangle; contact with the player ends the run.
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub vy: f64,
}

impl Obstacle {
    pub fn new(x: f64, w: f64, vy: f64) -> Self {
        Obstacle {
            x,
            y: OBSTACLE_SPAWN_Y,
            w,
            h: OBSTACLE_HEIGHT,
            vy,
        }
    }

    pub fn update(&mut self, dt_ms: f64) {
        self.y += self.vy * dt_ms * MOTION_SCALE;
    }

    pub fn offscreen(&self) -> bool {
        self.y > SIM_HEIGHT + OBSTACLE_CULL_MARGIN
    }

    pub fn draw(&self, grid: &mut GameGrid) {
        grid.plot_rect(self.x, self.y, self.w, self.h, '#');
    }
}

/// Falling collectible circle; worth a fixed score bonus on contact.
pub struct Pickup {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub vy: f64,
}

impl Pickup {
    pub fn new(x: f64, vy: f64) -> Self {
        Pickup {
            x,
            y: PICKUP_SPAWN_Y,
            r: PICKUP_RADIUS,
            vy,
        }
    }

    pub fn update(&mut self, dt_ms: f64) {
        self.y += self.vy * dt_ms * MOTION_SCALE;
    }

    pub fn offscreen(&self) -> bool {
        self.y > SIM_HEIGHT + PICKUP_CULL_MARGIN
    }

    pub fn draw(&self, grid: &mut GameGrid) {
        grid.plot(self.x, self.y, 'o');
    }
}
