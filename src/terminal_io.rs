use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use log::error;

use crate::constants::KEY_HOLD_FRAMES;

/// One frame's worth of coalesced input, read by the simulation at the
/// start of its control-law phase. Plain data, no event-timing left in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub left_held: bool,
    pub right_held: bool,
    /// Pointer target in simulation coordinates, while a button is down.
    pub pointer_x: Option<f64>,
    pub restart: bool,
    pub quit: bool,
}

/// Folds asynchronous terminal events into per-frame snapshots.
///
/// Held keys are tracked as a short countdown refreshed by press/repeat
/// events and cleared by release events, so terminals that never report
/// releases still let go of a key shortly after the repeats stop.
pub struct InputResolver {
    left_frames: u8,
    right_frames: u8,
    pointer_col: Option<u16>,
    restart_pending: bool,
    quit_pending: bool,
}

impl InputResolver {
    pub fn new() -> Self {
        InputResolver {
            left_frames: 0,
            right_frames: 0,
            pointer_col: None,
            restart_pending: false,
            quit_pending: false,
        }
    }

    /// Drain every pending terminal event, blocking up to `wait` for the
    /// first one. The wait doubles as the frame pacing delay.
    pub fn poll_terminal(&mut self, wait: Duration) -> io::Result<()> {
        let mut timeout = wait;
        while event::poll(timeout).map_err(|e| {
            error!("failed to poll events: {}", e);
            e
        })? {
            let ev = event::read().map_err(|e| {
                error!("failed to read event: {}", e);
                e
            })?;
            self.apply(&ev);
            timeout = Duration::ZERO;
        }
        Ok(())
    }

    pub fn apply(&mut self, ev: &Event) {
        match ev {
            Event::Key(key) => match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => match key.code {
                    KeyCode::Left | KeyCode::Char('a') => self.left_frames = KEY_HOLD_FRAMES,
                    KeyCode::Right | KeyCode::Char('d') => self.right_frames = KEY_HOLD_FRAMES,
                    KeyCode::Char('r') => self.restart_pending = true,
                    KeyCode::Char('q') | KeyCode::Esc => self.quit_pending = true,
                    _ => {}
                },
                KeyEventKind::Release => match key.code {
                    KeyCode::Left | KeyCode::Char('a') => self.left_frames = 0,
                    KeyCode::Right | KeyCode::Char('d') => self.right_frames = 0,
                    _ => {}
                },
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    self.pointer_col = Some(mouse.column);
                    // A tap doubles as the restart gesture while ended.
                    self.restart_pending = true;
                }
                MouseEventKind::Drag(MouseButton::Left) => {
                    self.pointer_col = Some(mouse.column);
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    self.pointer_col = None;
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// Close out the frame: decay key holds, map the pointer column into
    /// simulation space with `sim_per_col`, and hand out the one-shot
    /// restart/quit flags.
    pub fn snapshot(&mut self, sim_per_col: f64) -> InputSnapshot {
        self.left_frames = self.left_frames.saturating_sub(1);
        self.right_frames = self.right_frames.saturating_sub(1);
        let snap = InputSnapshot {
            left_held: self.left_frames > 0,
            right_held: self.right_frames > 0,
            pointer_x: self.pointer_col.map(|col| col as f64 * sim_per_col),
            restart: self.restart_pending,
            quit: self.quit_pending,
        };
        self.restart_pending = false;
        self.quit_pending = false;
        snap
    }
}

// --- SimulatedInput for the headless debug mode ---
pub struct SimulatedInput {
    events: HashMap<u64, Event>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Event>) -> Self {
        SimulatedInput { events }
    }

    /// The event scripted for this frame, if any.
    pub fn take(&mut self, frame: u64) -> Option<Event> {
        self.events.remove(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: crossterm::event::KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn press_holds_then_decays() {
        let mut resolver = InputResolver::new();
        resolver.apply(&press(KeyCode::Left));
        assert!(resolver.snapshot(1.0).left_held);
        // Without refresh the hold expires after the countdown.
        for _ in 0..KEY_HOLD_FRAMES {
            resolver.snapshot(1.0);
        }
        assert!(!resolver.snapshot(1.0).left_held);
    }

    #[test]
    fn release_clears_a_held_key_immediately() {
        let mut resolver = InputResolver::new();
        resolver.apply(&press(KeyCode::Right));
        assert!(resolver.snapshot(1.0).right_held);
        resolver.apply(&release(KeyCode::Right));
        assert!(!resolver.snapshot(1.0).right_held);
    }

    #[test]
    fn pointer_maps_columns_into_sim_space() {
        let mut resolver = InputResolver::new();
        resolver.apply(&mouse(MouseEventKind::Down(MouseButton::Left), 40));
        // 80-column terminal over a 360-unit field: 4.5 units per column.
        let snap = resolver.snapshot(4.5);
        assert_eq!(snap.pointer_x, Some(180.0));
        assert!(snap.restart);

        resolver.apply(&mouse(MouseEventKind::Up(MouseButton::Left), 40));
        let snap = resolver.snapshot(4.5);
        assert_eq!(snap.pointer_x, None);
    }

    #[test]
    fn restart_and_quit_are_one_shot() {
        let mut resolver = InputResolver::new();
        resolver.apply(&press(KeyCode::Char('r')));
        resolver.apply(&press(KeyCode::Char('q')));
        let snap = resolver.snapshot(1.0);
        assert!(snap.restart);
        assert!(snap.quit);
        let snap = resolver.snapshot(1.0);
        assert!(!snap.restart);
        assert!(!snap.quit);
    }
}
