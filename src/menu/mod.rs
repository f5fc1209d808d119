mod widgets;
use self::widgets::{Instructions, Logo};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::game::board::ScoreBoard;
use crate::game::Game;
use crate::options::{Adjustable, OptKey, OptValue, Options};
use crate::util::{center_rect, get_display_area, EnumExt, Globals};
use crate::warning::{error_chain, Warning};
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyModifiers};
use enum_map::{Enum, EnumMap};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};
use std::iter::once;
use unicode_width::UnicodeWidthChar;

/// The title screen, from which games are started, options adjusted, and the
/// leaderboard viewed
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MainMenu {
    focus: Focus,
    name: String,
    settings: EnumMap<OptKey, OptValue>,
    showing_scores: bool,
    globals: Globals,
    warnings: Vec<Warning>,
}

impl MainMenu {
    pub(crate) fn new(globals: Globals) -> Self {
        let options = globals.options;
        MainMenu {
            focus: Focus::default(),
            name: globals.player_name.clone(),
            settings: EnumMap::from_fn(|key| options.get(key)),
            showing_scores: false,
            globals,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    /// Remove & return any warnings that should be shown to the user
    pub(crate) fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let ev = event.as_key_press_event()?;
        if self.showing_scores {
            match Command::from_key_event(ev)? {
                Command::Quit => return Some(Screen::Quit),
                Command::Esc | Command::Enter | Command::B => self.showing_scores = false,
                _ => (),
            }
            return None;
        }
        if self.focus == Focus::Name && self.edit_name(ev) {
            return None;
        }
        let cmd = Command::from_key_event(ev)?;
        match (cmd, self.focus) {
            (Command::Quit | Command::Q, _) | (Command::Enter, Focus::Quit) => {
                return Some(Screen::Quit);
            }
            (Command::P, _) | (Command::Enter, Focus::Play | Focus::Name) => {
                return Some(self.play());
            }
            (Command::B, _) | (Command::Enter, Focus::Leaderboard) => self.showing_scores = true,
            (Command::Up, f) => self.focus = f.up(),
            (Command::Down, f) => self.focus = f.down(),
            (Command::Prev, f) => self.focus = f.above().unwrap_or_else(Focus::last),
            (Command::Next, f) => self.focus = f.below().unwrap_or_else(Focus::first),
            (Command::Home, _) => self.focus = Focus::first(),
            (Command::End, _) => self.focus = Focus::last(),
            (Command::Left, Focus::Setting(_)) => self.adjust(OptValue::decrease),
            (Command::Right, Focus::Setting(_)) => self.adjust(OptValue::increase),
            (Command::Left, f) if f.is_button() => {
                self.focus = f.above().filter(|g| g.is_button()).unwrap_or(f);
            }
            (Command::Right, f) if f.is_button() => {
                self.focus = f.below().filter(|g| g.is_button()).unwrap_or(f);
            }
            (Command::Space | Command::Enter, _) => self.adjust(OptValue::toggle),
            _ => (),
        }
        None
    }

    /// Apply a key press to the name field.  Returns `false` if the key isn't
    /// one that edits text.
    fn edit_name(&mut self, ev: KeyEvent) -> bool {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c))
                if c.width() == Some(1) =>
            {
                if self.name.chars().count() < consts::MAX_NAME_LENGTH {
                    self.name.push(c);
                }
                true
            }
            (_, KeyCode::Backspace) => {
                self.name.pop();
                true
            }
            _ => false,
        }
    }

    /// Apply `f` to the option under the cursor, if any
    fn adjust<F: FnOnce(&mut OptValue)>(&mut self, f: F) {
        if let Focus::Setting(key) = self.focus {
            f(&mut self.settings[key]);
        }
    }

    fn chosen_options(&self) -> Options {
        let mut options = Options::default();
        for (key, &value) in &self.settings {
            options.set(key, value);
        }
        options
    }

    /// Start a new game with the name & options currently shown, saving the
    /// options for future runs
    fn play(&mut self) -> Screen {
        let name = self.name.trim();
        self.globals.player_name = if name.is_empty() {
            String::from(consts::DEFAULT_PLAYER_NAME)
        } else {
            name.to_owned()
        };
        let options = self.chosen_options();
        self.globals.options = options;
        if let Err(e) = self.globals.config.save_options(options) {
            let msgs = error_chain(&e);
            log::error!("{}", msgs.join(": "));
            self.warnings.push(Warning::from_error_messages(msgs));
        }
        log::info!("Starting game as {:?}", self.globals.player_name);
        Screen::Game(Box::new(Game::new(self.globals.clone())))
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, name_area, options_area, buttons_area] =
            Layout::vertical([
                Logo::HEIGHT,
                Instructions::HEIGHT,
                1,
                OptionsBox::HEIGHT,
                1,
            ])
            .flex(Flex::Start)
            .spacing(1)
            .areas(display);
        Logo.render(centered(logo_area, Logo::WIDTH), buf);
        Instructions.render(centered(instructions_area, Instructions::WIDTH), buf);
        NameField {
            name: &self.name,
            selected: self.focus == Focus::Name,
        }
        .render(centered(name_area, NameField::WIDTH), buf);
        OptionsBox {
            settings: &self.settings,
            highlighted: match self.focus {
                Focus::Setting(key) => Some(key),
                _ => None,
            },
        }
        .render(centered(options_area, OptionsBox::WIDTH), buf);
        let buttons = BUTTONS.map(|(focus, label, key)| button(label, key, self.focus == focus));
        let widths = buttons
            .iter()
            .map(|b| u16::try_from(b.width()).unwrap_or(u16::MAX));
        let areas = Layout::horizontal(widths)
            .flex(Flex::Center)
            .spacing(2)
            .split(buttons_area);
        for (line, &button_area) in buttons.into_iter().zip(areas.iter()) {
            line.render(button_area, buf);
        }
        if self.showing_scores {
            let board = ScoreBoard {
                score: None,
                entries: self
                    .globals
                    .leaderboard
                    .top_scores(consts::MAX_HIGH_SCORES),
                highlight: None,
            };
            let board_area = center_rect(
                display,
                Size {
                    width: ScoreBoard::WIDTH,
                    height: board.height(),
                },
            );
            board.render(board_area, buf);
        }
    }
}

/// Return a `width`-column strip horizontally centered within `area`
fn centered(area: Rect, width: u16) -> Rect {
    let [strip] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
    strip
}

/// The buttons along the bottom of the menu, left to right, with their
/// shortcut keys
const BUTTONS: [(Focus, &str, &str); 3] = [
    (Focus::Play, "Play", "p"),
    (Focus::Leaderboard, "Scores", "b"),
    (Focus::Quit, "Quit", "q"),
];

/// A button of the form "[Label (k)]"
fn button(label: &str, key: &'static str, selected: bool) -> Line<'static> {
    let style = if selected {
        consts::MENU_SELECTION_STYLE
    } else {
        Style::new()
    };
    Line::from_iter([
        Span::styled(format!("[{label} ("), style),
        Span::styled(key, consts::KEY_STYLE.patch(style)),
        Span::styled(")]", style),
    ])
}

/// The item the cursor is on.  The name field and options form a column
/// above a row of buttons.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Focus {
    Name,
    Setting(OptKey),
    #[default]
    Play,
    Leaderboard,
    Quit,
}

impl Focus {
    /// Every item, in tabbing order
    fn column() -> impl Iterator<Item = Focus> {
        once(Focus::Name)
            .chain(OptKey::iter().map(Focus::Setting))
            .chain(BUTTONS.map(|(focus, _, _)| focus))
    }

    fn first() -> Focus {
        Focus::Name
    }

    fn last() -> Focus {
        Focus::Quit
    }

    fn is_button(self) -> bool {
        matches!(self, Focus::Play | Focus::Leaderboard | Focus::Quit)
    }

    fn above(self) -> Option<Focus> {
        Focus::column().take_while(|&f| f != self).last()
    }

    fn below(self) -> Option<Focus> {
        Focus::column().skip_while(|&f| f != self).nth(1)
    }

    /// All buttons sit directly below the last option
    fn up(self) -> Focus {
        if self.is_button() {
            Focus::column()
                .take_while(|f| !f.is_button())
                .last()
                .unwrap_or(self)
        } else {
            self.above().unwrap_or(self)
        }
    }

    fn down(self) -> Focus {
        if self.is_button() {
            self
        } else {
            self.below().unwrap_or(self)
        }
    }
}

/// The editable player name, shown as "Name: [Player          ]"
#[derive(Clone, Copy, Debug)]
struct NameField<'a> {
    name: &'a str,
    selected: bool,
}

impl NameField<'_> {
    #[allow(clippy::cast_possible_truncation)]
    const WIDTH: u16 = (consts::MAX_NAME_LENGTH as u16) + 8;
}

impl Widget for NameField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(format!(
            "Name: [{:<w$.w$}]",
            self.name,
            w = consts::MAX_NAME_LENGTH
        ));
        if self.selected {
            line.style(consts::MENU_SELECTION_STYLE).render(area, buf);
        } else {
            line.render(area, buf);
        }
    }
}

/// The bordered box listing each option's current value
#[derive(Clone, Copy, Debug)]
struct OptionsBox<'a> {
    settings: &'a EnumMap<OptKey, OptValue>,
    highlighted: Option<OptKey>,
}

impl OptionsBox<'_> {
    #[allow(clippy::cast_possible_truncation)]
    const HEIGHT: u16 = (OptKey::LENGTH as u16) + 2;
    const PADDING: u16 = 1;
    const MARKER_WIDTH: u16 = 2;
    const GUTTER: u16 = 2;
    const WIDTH: u16 = 2
        + 2 * Self::PADDING
        + Self::MARKER_WIDTH
        + OptKey::DISPLAY_WIDTH
        + Self::GUTTER
        + OptValue::DISPLAY_WIDTH;
}

impl Widget for OptionsBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = Block::bordered()
            .title(" Options: ")
            .padding(Padding::horizontal(Self::PADDING));
        let rows = frame.inner(area).rows();
        frame.render(area, buf);
        for ((key, value), row) in self.settings.iter().zip(rows) {
            let marker = if self.highlighted == Some(key) { "»" } else { "" };
            let line = Line::from(format!(
                "{marker:mw$}{key:kw$}{:gutter$}{value}",
                "",
                mw = usize::from(Self::MARKER_WIDTH),
                kw = usize::from(OptKey::DISPLAY_WIDTH),
                gutter = usize::from(Self::GUTTER),
            ));
            if self.highlighted == Some(key) {
                line.style(consts::MENU_SELECTION_STYLE).render(row, buf);
            } else {
                line.render(row, buf);
            }
        }
    }
}
