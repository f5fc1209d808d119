pub(crate) mod board;
mod canvas;
pub(crate) mod cell;
mod direction;
mod engine;
pub(crate) mod food;
mod levels;
mod paddle;
mod paused;
mod snake;
use self::board::ScoreBoard;
use self::canvas::{draw_scene, level_rect};
use self::direction::Direction;
use self::engine::{Engine, EngineSettings, Scene, TickHooks};
use self::paused::{PauseChoice, PauseMenu};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::leaderboard::ScoreStore;
use crate::menu::MainMenu;
use crate::options::Background;
use crate::sprites::SpriteSheet;
use crate::util::{center_rect, get_display_area, Globals};
use crate::warning::{error_chain, Warning};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::Instant;

/// The screen on which a game is played
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    engine: Engine<R>,
    /// The level as of the last tick, one cell per grid cell
    frame: Buffer,
    state: GameState,
    globals: Globals,
    warnings: Vec<Warning>,
    next_tick: Option<Instant>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        Game::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(globals: Globals, rng: R) -> Game<R> {
        let settings = EngineSettings {
            grid: consts::LEVEL_SIZE,
            speed_interval: globals.options.speed.interval(),
            food_keys: globals.sprites.food_keys().clone(),
        };
        let engine = Engine::new_with_rng(settings, rng);
        let mut frame = Buffer::empty(level_rect(consts::LEVEL_SIZE));
        draw_scene(
            &mut frame,
            &engine.scene(),
            &globals.sprites,
            globals.options.background,
        );
        log::info!(
            "Starting new game for {:?} at speed {} with {} background",
            globals.player_name,
            globals.options.speed,
            globals.options.background
        );
        Game {
            engine,
            frame,
            state: GameState::Running,
            globals,
            warnings: Vec::new(),
            next_tick: None,
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.running() {
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + consts::FRAME_PERIOD);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.advance(Instant::now());
                self.next_tick = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn advance(&mut self, now: Instant) {
        let mut hooks = ScreenHooks {
            frame: &mut self.frame,
            sprites: &self.globals.sprites,
            background: self.globals.options.background,
            leaderboard: &mut self.globals.leaderboard,
            player_name: &self.globals.player_name,
            outcome: None,
        };
        self.engine.tick(now, &mut hooks);
        if let Some(outcome) = hooks.outcome {
            match outcome {
                Ok(rank) => self.state = GameState::Over { rank },
                Err(warning) => {
                    self.state = GameState::Over { rank: None };
                    self.warnings.push(warning);
                }
            }
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Remove & return any warnings that should be shown to the user
    pub(crate) fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if event == Event::FocusLost {
            if self.running() {
                self.pause();
            }
            return None;
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        match self.state {
            GameState::Running => match cmd {
                Command::Quit => return Some(Screen::Quit),
                Command::Up => self.turn(Direction::Up),
                Command::Down => self.turn(Direction::Down),
                Command::Left => self.turn(Direction::Left),
                Command::Right => self.turn(Direction::Right),
                Command::Esc | Command::P => self.pause(),
                _ => (),
            },
            GameState::Paused(ref mut paused) => match paused.handle_command(cmd)? {
                PauseChoice::Resume => self.resume(),
                PauseChoice::Restart => return Some(self.restart()),
                PauseChoice::MainMenu => return Some(self.main_menu()),
                PauseChoice::Quit => return Some(Screen::Quit),
            },
            GameState::Over { .. } => match cmd {
                Command::R => return Some(self.restart()),
                Command::M => return Some(self.main_menu()),
                Command::Quit | Command::Q => return Some(Screen::Quit),
                _ => (),
            },
        }
        None
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }

    fn turn(&mut self, direction: Direction) {
        if !self.engine.change_direction(direction) {
            log::trace!("Ignoring turn to {direction:?}");
        }
    }

    fn pause(&mut self) {
        self.engine.pause(Instant::now());
        self.state = GameState::Paused(PauseMenu::new());
        log::debug!("Game paused");
    }

    fn resume(&mut self) {
        self.engine.resume(Instant::now());
        self.state = GameState::Running;
        self.next_tick = None;
        log::debug!("Game resumed");
    }

    fn restart(&self) -> Screen {
        Screen::Game(Box::new(Game::new(self.globals.clone())))
    }

    fn main_menu(&self) -> Screen {
        Screen::Main(Box::new(MainMenu::new(self.globals.clone())))
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(" Score: {}", self.engine.score()),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let level = self.frame.area;
        let block_area = center_rect(
            block_area,
            Size {
                width: level.width.saturating_add(2),
                height: level.height.saturating_add(2),
            },
        );
        Block::bordered().render(block_area, buf);
        let level_area = block_area.inner(Margin::new(1, 1));
        for pos in level.positions() {
            if pos.x >= level_area.width || pos.y >= level_area.height {
                continue;
            }
            let dest = (level_area.x + pos.x, level_area.y + pos.y);
            if let (Some(src), Some(dest)) = (self.frame.cell(pos), buf.cell_mut(dest)) {
                dest.clone_from(src);
            }
        }

        match self.state {
            GameState::Running => (),
            GameState::Paused(paused) => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: PauseMenu::WIDTH,
                        height: PauseMenu::HEIGHT,
                    },
                );
                paused.render(pause_area, buf);
            }
            GameState::Over { rank } => {
                let board = ScoreBoard {
                    score: Some(self.engine.score()),
                    entries: self.globals.leaderboard.top_scores(consts::MAX_HIGH_SCORES),
                    highlight: rank,
                };
                let board_area = center_rect(
                    block_area,
                    Size {
                        width: ScoreBoard::WIDTH,
                        height: board.height(),
                    },
                );
                board.render(board_area, buf);
                Span::from(" — GAME OVER —").render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Choose One: Restart ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") — Main Menu ("),
                    Span::styled("m", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Paused(PauseMenu),
    /// The game has ended.  `rank` is the position of the final score on the
    /// leaderboard, if it made it on.
    Over { rank: Option<usize> },
}

/// Receives the engine's callbacks for a game being shown on screen
#[derive(Debug)]
struct ScreenHooks<'a> {
    frame: &'a mut Buffer,
    sprites: &'a SpriteSheet,
    background: Background,
    leaderboard: &'a mut ScoreStore,
    player_name: &'a str,
    /// Set when the game ends: the final score's leaderboard rank, or a
    /// warning if the leaderboard could not be saved
    outcome: Option<Result<Option<usize>, Warning>>,
}

impl TickHooks for ScreenHooks<'_> {
    fn render(&mut self, scene: &Scene<'_>) {
        draw_scene(self.frame, scene, self.sprites, self.background);
    }

    fn game_over(&mut self, score: u64) {
        let outcome = match self.leaderboard.submit_score(self.player_name, score) {
            Ok(rank) => {
                if let Some(r) = rank {
                    log::info!("Score {score} entered leaderboard at #{}", r + 1);
                }
                Ok(rank)
            }
            Err(e) => {
                let msgs = error_chain(&e);
                log::error!("{}", msgs.join(": "));
                Err(Warning::from_error_messages(msgs))
            }
        };
        self.outcome = Some(outcome);
    }
}
