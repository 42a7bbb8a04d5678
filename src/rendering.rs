use std::io::{self, Write};

use crossterm::{cursor::MoveTo, execute};
use log::info;

use crate::constants::{SIM_HEIGHT, SIM_WIDTH};

// --- GameGrid: character frame buffer in terminal cells ---
// The simulation works in virtual pixels; the grid maps them to cells once
// per draw call. Out-of-range plots (entities above the visible area) are
// silently dropped.
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    cell_per_sim_x: f64,
    cell_per_sim_y: f64,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cell_per_sim_x: width as f64 / SIM_WIDTH,
            cell_per_sim_y: height as f64 / SIM_HEIGHT,
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(' ');
        }
    }

    /// Simulation coordinates to cell coordinates (may be out of range).
    /// Floored, not truncated: anything above the field stays on a negative
    /// row instead of popping into row 0 early.
    pub fn to_cell(&self, sim_x: f64, sim_y: f64) -> (i32, i32) {
        (
            (sim_x * self.cell_per_sim_x).floor() as i32,
            (sim_y * self.cell_per_sim_y).floor() as i32,
        )
    }

    pub fn set_signed(&mut self, x: i32, y: i32, c: char) {
        if x >= 0 && y >= 0 && (x as u16) < self.width && (y as u16) < self.height {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    /// Plot a single simulation-space point.
    pub fn plot(&mut self, sim_x: f64, sim_y: f64, c: char) {
        let (cx, cy) = self.to_cell(sim_x, sim_y);
        self.set_signed(cx, cy, c);
    }

    /// Fill a simulation-space rectangle. A rectangle thinner than one cell
    /// still paints one row so shallow obstacles stay visible.
    pub fn plot_rect(&mut self, sim_x: f64, sim_y: f64, sim_w: f64, sim_h: f64, c: char) {
        let (x0, y0) = self.to_cell(sim_x, sim_y);
        let (x1, y1) = self.to_cell(sim_x + sim_w, sim_y + sim_h);
        for cy in y0..=y1.max(y0) {
            for cx in x0..=x1.max(x0) {
                self.set_signed(cx, cy, c);
            }
        }
    }

    pub fn draw_text(&mut self, x: u16, y: u16, text: &str) {
        for (i, c) in text.chars().enumerate() {
            self.set_char(x.saturating_add(i as u16), y, c);
        }
    }

    pub fn center_text(&mut self, y: u16, text: &str) {
        let x = (self.width.saturating_sub(text.chars().count() as u16)) / 2;
        self.draw_text(x, y, text);
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        Ok(())
    }
}

// --- ScreenBuffer for headless rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    cursor_x: u16,
    cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            if self.cursor_y < self.height && self.cursor_x < self.width {
                self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
            }
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn print_to_log(&self) {
        info!("--- Frame ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>());
        }
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget: real terminal or in-memory buffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            }
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}
