use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyEventKind},
};
use log::{debug, error, info, warn};
use rand::rngs::StdRng;

use vibe_asteroids::audio::SoundManager;
use vibe_asteroids::constants::{FRAME_DURATION_MS, KEY_HOLD_FRAMES};
use vibe_asteroids::game::{FrameStatus, World};
use vibe_asteroids::highscore::HighScoreStore;
use vibe_asteroids::input::{InputState, Key};
use vibe_asteroids::rendering::{GameGrid, OutputTarget, draw_world, hud_line};
use vibe_asteroids::terminal_io::{KeyAction, SimulatedInput, map_key};
use vibe_asteroids::types::Vector2D;

// Terminal cells are roughly twice as tall as they are wide.
pub const PIXELS_PER_COLUMN: f64 = 10.0;
pub const PIXELS_PER_ROW: f64 = 20.0;
const HUD_ROWS: u16 = 1;

pub struct TerminalGame {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    simulated_input: Option<SimulatedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
    key_releases: bool,
    input: InputState,
    last_pressed: HashMap<Key, u64>,
    // Releases that arrived in the same batch as their press; applied next frame.
    deferred_releases: Vec<Key>,
    sound: SoundManager,
    high_scores: HighScoreStore,
}

impl TerminalGame {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        simulated_input: Option<SimulatedInput>,
        debug_mode_active: bool,
        max_frames: Option<u64>,
        key_releases: bool,
        sound: SoundManager,
        high_scores: HighScoreStore,
    ) -> Self {
        TerminalGame {
            terminal_width,
            terminal_height,
            stdout_target,
            simulated_input,
            debug_mode_active,
            max_frames,
            key_releases,
            input: InputState::new(),
            last_pressed: HashMap::new(),
            deferred_releases: Vec::new(),
            sound,
            high_scores,
        }
    }

    /// Field size in world pixels for the current terminal.
    pub fn field_size(&self) -> (f64, f64) {
        (
            self.terminal_width as f64 * PIXELS_PER_COLUMN,
            self.terminal_height.saturating_sub(HUD_ROWS) as f64 * PIXELS_PER_ROW,
        )
    }

    pub fn run(&mut self, world: &mut World, rng: &mut StdRng) -> io::Result<()> {
        if !self.debug_mode_active {
            self.show_title_screen()?;
        }

        let mut grid = GameGrid::new(self.terminal_width, self.terminal_height.saturating_sub(HUD_ROWS));
        let mut running = true;
        let mut frame_count: u64 = 0;

        while running && self.max_frames.is_none_or(|max| frame_count < max) {
            let frame_start = Instant::now();

            let resized = self.handle_input(&mut running, frame_count)?;
            if resized {
                let (width, height) = self.field_size();
                world.resize(width, height);
                grid = GameGrid::new(self.terminal_width, self.terminal_height.saturating_sub(HUD_ROWS));
            }

            let report = world.step(&self.input, rng);
            if report.status == FrameStatus::Frozen {
                debug!("Frame {} frozen ({} left)", report.frame, world.freeze_frames);
            }
            self.sound.play_all(world.drain_sound_cues());
            if let Some(high_score) = world.take_high_score_update() {
                if self.debug_mode_active {
                    debug!("High score {} not saved in debug mode", high_score);
                } else {
                    self.save_high_score(high_score);
                }
            }

            let shake_offset = world
                .screen_shake
                .map(|shake| shake.offset(rng))
                .unwrap_or(Vector2D::ZERO);
            grid.clear();
            draw_world(&mut grid, world, shake_offset);
            self.render(&grid, world)?;

            frame_count += 1;
            if !self.debug_mode_active {
                let budget = Duration::from_millis(FRAME_DURATION_MS);
                if let Some(remaining) = budget.checked_sub(frame_start.elapsed()) {
                    std::thread::sleep(remaining);
                }
            }
        }

        info!("Game loop ended after {} frames with score {}", frame_count, world.score);
        Ok(())
    }

    fn save_high_score(&self, high_score: u32) {
        if let Err(e) = self.high_scores.save(high_score) {
            warn!("Failed to save high score {}: {}", high_score, e);
        }
    }

    /// Drain pending key events into the held-key set. Returns true when the
    /// terminal was resized.
    fn handle_input(&mut self, running: &mut bool, frame_count: u64) -> io::Result<bool> {
        for key in self.deferred_releases.drain(..) {
            self.input.release(key);
        }

        let mut events = Vec::new();
        if self.debug_mode_active {
            if let Some(sim_input) = &mut self.simulated_input {
                if sim_input.poll(frame_count) {
                    while let Some(event) = sim_input.read() {
                        events.push(event);
                    }
                }
            }
        } else {
            while event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
                events.push(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?);
            }
        }

        let mut resized = false;
        let mut pressed_now = HashSet::new();
        for event in events {
            match event {
                Event::Key(key_event) => match map_key(key_event.code) {
                    Some(KeyAction::Quit) if key_event.kind == KeyEventKind::Press => *running = false,
                    Some(KeyAction::Game(key)) => match key_event.kind {
                        // A tap inside one batch still has to be seen held for a frame.
                        KeyEventKind::Release if pressed_now.contains(&key) => self.deferred_releases.push(key),
                        KeyEventKind::Release => self.input.release(key),
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            self.input.press(key);
                            pressed_now.insert(key);
                            self.last_pressed.insert(key, frame_count);
                        }
                    },
                    _ => {}
                },
                Event::Resize(new_width, new_height) => {
                    self.terminal_width = new_width;
                    self.terminal_height = new_height;
                    resized = true;
                }
                _ => {}
            }
        }

        // Without release events, a key counts as held for a short window after its last press.
        if !self.key_releases {
            let input = &mut self.input;
            self.last_pressed.retain(|&key, &mut pressed_at| {
                let held = frame_count.saturating_sub(pressed_at) < KEY_HOLD_FRAMES;
                if !held {
                    input.release(key);
                }
                held
            });
        }
        Ok(resized)
    }

    fn render(&mut self, game_grid: &GameGrid, world: &World) -> io::Result<()> {
        self.stdout_target.execute_move_to(MoveTo(0, 0))?;
        let hud = format!("{:<width$}", hud_line(world), width = self.terminal_width as usize);
        write!(self.stdout_target, "{}", hud)?;

        game_grid.render(&mut self.stdout_target, HUD_ROWS)?;

        if world.game_over {
            let lines = [
                "GAME OVER!".to_string(),
                format!("Final Score: {}", world.score),
                "Press R to restart, Q to quit".to_string(),
            ];
            let top = (self.terminal_height / 2).saturating_sub(2);
            for (i, line) in lines.iter().enumerate() {
                let x = (self.terminal_width / 2).saturating_sub(line.len() as u16 / 2);
                self.stdout_target.execute_move_to(MoveTo(x, top + 2 * i as u16))?;
                write!(self.stdout_target, "{}", line)?;
            }
        }

        if self.debug_mode_active {
            if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
                sb.print_to_log();
            }
        }

        self.stdout_target.flush()?;
        Ok(())
    }

    fn show_title_screen(&mut self) -> io::Result<()> {
        let title_art = [
            r"VIBE-ASTEROIDS",
            r"Arrows: rotate / thrust   Space: fire   Q: quit",
        ];

        let title_start_y = (self.terminal_height / 2).saturating_sub(title_art.len() as u16 / 2);
        for (i, line) in title_art.iter().enumerate() {
            let x = (self.terminal_width / 2).saturating_sub(line.len() as u16 / 2);
            self.stdout_target.execute_move_to(MoveTo(x, title_start_y + 2 * i as u16))?;
            write!(self.stdout_target, "{}", line)?;
        }

        let press_any_key_msg = "Press any key to start...";
        let msg_x = (self.terminal_width / 2).saturating_sub(press_any_key_msg.len() as u16 / 2);
        self.stdout_target.execute_move_to(MoveTo(msg_x, self.terminal_height.saturating_sub(5)))?;
        write!(self.stdout_target, "{}", press_any_key_msg)?;
        self.stdout_target.flush()?;

        loop {
            if let Event::Key(key_event) = event::read().map_err(|e| { error!("Failed to read event: {}", e); e })? {
                if key_event.kind == KeyEventKind::Press {
                    break;
                }
            }
        }

        let game_grid_dummy = GameGrid::new(self.terminal_width, self.terminal_height);
        game_grid_dummy.clear_screen_manual(&mut self.stdout_target, self.terminal_width, self.terminal_height)?;
        self.stdout_target.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use rand::SeedableRng;
    use std::path::PathBuf;

    use vibe_asteroids::entities::{Asteroid, Bullet};
    use vibe_asteroids::rendering::ScreenBuffer;
    use vibe_asteroids::terminal_io::key_event as key;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vibe-asteroids-{}-{}", name, std::process::id()))
    }

    fn debug_game(script: HashMap<u64, Vec<Event>>, max_frames: u64, high_scores: HighScoreStore) -> TerminalGame {
        TerminalGame::new(
            80,
            24,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(80, 24)),
            Some(SimulatedInput::new(script)),
            true,
            Some(max_frames),
            true,
            SoundManager::with_sample_dir("sounds"),
            high_scores,
        )
    }

    // ── key events ────────────────────────────────────────────────────────────────

    #[test]
    fn quick_tap_is_held_for_one_frame() {
        let mut script = HashMap::new();
        script.insert(0, vec![key(KeyCode::Char(' '), KeyEventKind::Press), key(KeyCode::Char(' '), KeyEventKind::Release)]);
        let mut game = debug_game(script, 2, HighScoreStore::new(temp_path("tap")));
        let mut running = true;

        game.handle_input(&mut running, 0).unwrap();
        assert!(game.input.is_held(Key::Fire));

        game.handle_input(&mut running, 1).unwrap();
        assert!(!game.input.is_held(Key::Fire));
        assert!(running);
    }

    #[test]
    fn release_in_a_later_batch_is_immediate() {
        let mut script = HashMap::new();
        script.insert(0, vec![key(KeyCode::Up, KeyEventKind::Press)]);
        script.insert(1, vec![key(KeyCode::Up, KeyEventKind::Release)]);
        let mut game = debug_game(script, 2, HighScoreStore::new(temp_path("hold")));
        let mut running = true;

        game.handle_input(&mut running, 0).unwrap();
        assert!(game.input.is_held(Key::Up));
        game.handle_input(&mut running, 1).unwrap();
        assert!(!game.input.is_held(Key::Up));
    }

    #[test]
    fn tap_fires_a_bullet() {
        let mut script = HashMap::new();
        script.insert(0, vec![key(KeyCode::Char(' '), KeyEventKind::Press), key(KeyCode::Char(' '), KeyEventKind::Release)]);
        let mut game = debug_game(script, 1, HighScoreStore::new(temp_path("fire")));
        let (width, height) = game.field_size();
        let mut world = World::empty(width, height);
        let mut rng = StdRng::seed_from_u64(42);

        game.run(&mut world, &mut rng).unwrap();
        assert_eq!(world.bullets.len(), 1);
    }

    // ── persistence ───────────────────────────────────────────────────────────────

    #[test]
    fn debug_runs_leave_the_high_score_file_alone() {
        let path = temp_path("debug-highscore");
        let _ = std::fs::remove_file(&path);
        let mut game = debug_game(HashMap::new(), 3, HighScoreStore::new(&path));
        let (width, height) = game.field_size();
        let mut world = World::empty(width, height);
        let mut rng = StdRng::seed_from_u64(42);

        world.asteroids.push(Asteroid::new(Vector2D::new(100.0, 100.0), Vector2D::ZERO, 15.0, &mut rng));
        world.bullets.push(Bullet::new(Vector2D::new(100.0, 100.0), Vector2D::ZERO));
        world.resolve_collisions(&mut rng);
        assert!(world.high_score > 0);

        game.run(&mut world, &mut rng).unwrap();
        assert!(world.take_high_score_update().is_none());
        assert!(!path.exists());
    }
}
