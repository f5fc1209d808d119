use crate::command::Command;
use crate::game::Game;
use crate::menu::MainMenu;
use crate::util::Globals;
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{read, Event};
use ratatui::{backend::Backend, Frame, Terminal};
use std::collections::VecDeque;
use std::io;

/// The running program: the current screen plus any warnings queued up to be
/// shown on top of it
#[derive(Debug)]
pub(crate) struct App {
    screen: Screen,
    warnings: VecDeque<Warning>,
}

impl App {
    /// Start on the main menu, showing `warnings` (e.g., from startup) first
    pub(crate) fn new(globals: Globals, warnings: Vec<Warning>) -> App {
        App {
            screen: Screen::Main(Box::new(MainMenu::new(globals))),
            warnings: warnings.into(),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            terminal.draw(|frame| self.draw(frame))?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        match self.screen {
            Screen::Main(ref menu) => menu.draw(frame),
            Screen::Game(ref game) => game.draw(frame),
            Screen::Quit => return,
        }
        if let Some(warning) = self.warnings.front() {
            frame.render_widget(warning, frame.area());
        }
    }

    fn process_input(&mut self) -> io::Result<()> {
        if !self.warnings.is_empty() {
            // The screen underneath stays frozen until the warning is gone
            self.handle_warning_event(read()?);
            return Ok(());
        }
        let next = match self.screen {
            Screen::Main(ref mut menu) => menu.process_input()?,
            Screen::Game(ref mut game) => game.process_input()?,
            Screen::Quit => None,
        };
        self.collect_warnings();
        if let Some(screen) = next {
            self.screen = screen;
            self.collect_warnings();
        }
        Ok(())
    }

    fn handle_warning_event(&mut self, event: Event) {
        let Some(warning) = self.warnings.front_mut() else {
            return;
        };
        let outcome = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
            .and_then(|cmd| warning.handle_command(cmd));
        match outcome {
            Some(WarningOutcome::Dismissed) => {
                self.warnings.pop_front();
            }
            Some(WarningOutcome::Quit) => self.screen = Screen::Quit,
            None => (),
        }
    }

    fn collect_warnings(&mut self) {
        let new = match self.screen {
            Screen::Main(ref mut menu) => menu.take_warnings(),
            Screen::Game(ref mut game) => game.take_warnings(),
            Screen::Quit => Vec::new(),
        };
        self.warnings.extend(new);
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

/// The screen currently being shown
#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Main(Box<MainMenu>),
    Game(Box<Game>),
    Quit,
}
