use std::io;
use std::time::{Duration, Instant};

use log::info;

use crate::best_score::{self, BestScoreStore};
use crate::config::GameConfig;
use crate::constants::*;
use crate::rendering::{GameGrid, OutputTarget};
use crate::sim::{self, GameState};
use crate::spawner::Spawner;
use crate::terminal_io::{InputResolver, InputSnapshot, SimulatedInput};

/// Frame driver: one cooperative loop of resolve input, step, render.
pub struct Game {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    config: GameConfig,
    store: Box<dyn BestScoreStore>,
    simulated_input: Option<SimulatedInput>,
    headless: bool,
    max_frames: Option<u64>,
    state: GameState,
    spawner: Spawner,
    best: u64,
}

impl Game {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        config: GameConfig,
        store: Box<dyn BestScoreStore>,
        simulated_input: Option<SimulatedInput>,
        headless: bool,
        max_frames: Option<u64>,
    ) -> Self {
        let best = store.load();
        info!("best score loaded: {}", best);
        Game {
            terminal_width,
            terminal_height,
            stdout_target,
            store,
            simulated_input,
            headless,
            max_frames,
            state: GameState::new(),
            spawner: Spawner::new(&config),
            best,
            config,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        let mut resolver = InputResolver::new();
        let mut grid = GameGrid::new(self.terminal_width, self.terminal_height);
        let mut rng = rand::thread_rng();

        let mut last_frame: Option<Instant> = None;
        let mut frame: u64 = 0;

        loop {
            if let Some(max) = self.max_frames {
                if frame >= max {
                    break;
                }
            }

            let input = self.resolve_input(&mut resolver, frame)?;
            if input.quit {
                info!("quit requested at frame {}", frame);
                break;
            }

            // Variable timestep, clamped so a stalled frame cannot produce
            // a large simulation jump.
            let dt = if self.headless {
                DEFAULT_FRAME_MS
            } else {
                let now = Instant::now();
                let dt = match last_frame {
                    Some(prev) => now.duration_since(prev).as_secs_f64() * 1000.0,
                    None => DEFAULT_FRAME_MS,
                };
                last_frame = Some(now);
                dt.min(MAX_FRAME_DT_MS)
            };

            // Ended states are never stepped; the fatal frame's state stays
            // untouched until an explicit restart.
            if self.state.running {
                sim::step(
                    &mut self.state,
                    &mut self.spawner,
                    &input,
                    dt,
                    &self.config,
                    &mut rng,
                );
                if !self.state.running {
                    info!(
                        "run ended at score {} after {:.1}s",
                        self.state.display_score(),
                        self.state.t / 1000.0
                    );
                }
            } else if input.restart {
                self.best =
                    best_score::commit(self.store.as_ref(), self.best, self.state.display_score());
                info!("restart; best is now {}", self.best);
                self.state.reset();
                self.spawner.reset(&self.config);
            }

            self.render(&mut grid)?;
            frame += 1;
        }
        Ok(())
    }

    fn resolve_input(&mut self, resolver: &mut InputResolver, frame: u64) -> io::Result<InputSnapshot> {
        if let Some(script) = &mut self.simulated_input {
            if let Some(ev) = script.take(frame) {
                resolver.apply(&ev);
            }
        } else {
            resolver.poll_terminal(Duration::from_millis(FRAME_POLL_MS))?;
        }
        let sim_per_col = SIM_WIDTH / self.terminal_width as f64;
        Ok(resolver.snapshot(sim_per_col))
    }

    /// Render pass: read-only over the game state.
    fn render(&mut self, grid: &mut GameGrid) -> io::Result<()> {
        grid.clear();
        for star in &self.state.stars {
            star.draw(grid);
        }
        for obstacle in &self.state.obstacles {
            obstacle.draw(grid);
        }
        for pickup in &self.state.pickups {
            pickup.draw(grid);
        }
        self.state.player.draw(grid);

        grid.draw_text(
            0,
            0,
            &format!("Score: {}   Best: {}", self.state.display_score(), self.best),
        );

        if !self.state.running {
            let mid = self.terminal_height / 2;
            grid.center_text(mid.saturating_sub(1), "GAME OVER");
            grid.center_text(mid, &format!("Final score: {}", self.state.display_score()));
            grid.center_text(
                mid.saturating_add(1),
                "Tap, click or press r to restart - q to quit",
            );
        }

        grid.render(&mut self.stdout_target)?;
        if let OutputTarget::ScreenBuffer(sb) = &mut self.stdout_target {
            sb.print_to_log();
        }
        use std::io::Write;
        self.stdout_target.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_score::MemoryBestScore;
    use crate::entities::Obstacle;
    use crate::rendering::ScreenBuffer;
    use crossterm::event::{Event, KeyCode};
    use std::collections::HashMap;

    fn headless_game(events: HashMap<u64, Event>, max_frames: u64) -> Game {
        headless_game_with_store(events, max_frames, Box::new(MemoryBestScore::default()))
    }

    fn headless_game_with_store(
        events: HashMap<u64, Event>,
        max_frames: u64,
        store: Box<dyn BestScoreStore>,
    ) -> Game {
        Game::new(
            80,
            24,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(80, 24)),
            GameConfig::default(),
            store,
            Some(SimulatedInput::new(events)),
            true,
            Some(max_frames),
        )
    }

    /// An obstacle already overlapping the craft, so the first step is fatal.
    fn plant_fatal_obstacle(game: &mut Game) {
        let mut o = Obstacle::new(game.state.player.x - 15.0, 30.0, 0.0);
        o.y = game.state.player.y - 5.0;
        game.state.obstacles.push(o);
    }

    #[test]
    fn headless_run_completes() {
        let mut events = HashMap::new();
        events.insert(5, Event::Key(KeyCode::Left.into()));
        events.insert(20, Event::Key(KeyCode::Right.into()));
        let mut game = headless_game(events, 60);
        assert!(game.run().is_ok());
    }

    #[test]
    fn quit_event_stops_the_loop_early() {
        let mut events = HashMap::new();
        events.insert(3, Event::Key(KeyCode::Char('q').into()));
        let mut game = headless_game(events, 10_000);
        assert!(game.run().is_ok());
    }

    #[test]
    fn score_freezes_bit_identical_while_ended() {
        let mut game = headless_game(HashMap::new(), 50);
        plant_fatal_obstacle(&mut game);
        game.state.score = 250.0;

        game.run().unwrap();

        // The fatal first frame still earns its survival credit; the 49
        // ended frames after it must not move the score at all.
        assert!(!game.state.running);
        let expected = 250.0 + DEFAULT_FRAME_MS * SURVIVAL_SCORE_PER_MS;
        assert_eq!(game.state.score.to_bits(), expected.to_bits());
    }

    #[test]
    fn restart_through_the_loop_commits_the_best_score() {
        let mut events = HashMap::new();
        events.insert(10, Event::Key(KeyCode::Char('r').into()));
        let mut game = headless_game(events, 15);
        plant_fatal_obstacle(&mut game);
        game.state.score = 250.0;

        game.run().unwrap();

        assert_eq!(game.best, 250);
        // Restart put the state machine back into a fresh running run.
        assert!(game.state.running);
        assert!(game.state.t < 10.0 * DEFAULT_FRAME_MS);
        assert!(game.state.score < 250.0);
    }

    #[test]
    fn restart_never_lowers_a_better_stored_best() {
        let store = MemoryBestScore::default();
        store.save(400);
        let mut events = HashMap::new();
        events.insert(10, Event::Key(KeyCode::Char('r').into()));
        let mut game = headless_game_with_store(events, 15, Box::new(store));
        plant_fatal_obstacle(&mut game);
        game.state.score = 250.0;

        game.run().unwrap();
        assert_eq!(game.best, 400);
    }
}
