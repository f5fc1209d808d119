use crate::command::Command;
use crate::consts;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};

/// Menu shown over the level while the game is paused:
///
/// ```text
/// ┌──── PAUSED ─────┐
/// │ » Resume (Esc)  │
/// │   Restart (r)   │
/// │   Main Menu (m) │
/// │   Quit (q)      │
/// └─────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct PauseMenu {
    cursor: PauseChoice,
}

impl PauseMenu {
    pub(super) const HEIGHT: u16 = 6;
    pub(super) const WIDTH: u16 = 19;

    pub(super) fn new() -> PauseMenu {
        PauseMenu {
            cursor: PauseChoice::Resume,
        }
    }

    /// Move the cursor or pick a choice.  A choice is returned once the user
    /// has made one.
    pub(super) fn handle_command(&mut self, cmd: Command) -> Option<PauseChoice> {
        if let Some(choice) = PauseChoice::for_shortcut(cmd) {
            return Some(choice);
        }
        self.cursor = match cmd {
            Command::Enter => return Some(self.cursor),
            Command::Up => self.cursor.prev().unwrap_or(self.cursor),
            Command::Down => self.cursor.next().unwrap_or(self.cursor),
            Command::Next => self.cursor.next().unwrap_or_else(PauseChoice::min),
            Command::Prev => self.cursor.prev().unwrap_or_else(PauseChoice::max),
            Command::Home => PauseChoice::min(),
            Command::End => PauseChoice::max(),
            _ => self.cursor,
        };
        None
    }
}

/// What the player can do from the pause menu
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum PauseChoice {
    Resume,
    Restart,
    MainMenu,
    Quit,
}

impl PauseChoice {
    fn label(self) -> &'static str {
        match self {
            PauseChoice::Resume => "Resume",
            PauseChoice::Restart => "Restart",
            PauseChoice::MainMenu => "Main Menu",
            PauseChoice::Quit => "Quit",
        }
    }

    /// The key shown next to the label
    fn key_name(self) -> &'static str {
        match self {
            PauseChoice::Resume => "Esc",
            PauseChoice::Restart => "r",
            PauseChoice::MainMenu => "m",
            PauseChoice::Quit => "q",
        }
    }

    fn for_shortcut(cmd: Command) -> Option<PauseChoice> {
        match cmd {
            Command::Esc | Command::P => Some(PauseChoice::Resume),
            Command::R => Some(PauseChoice::Restart),
            Command::M => Some(PauseChoice::MainMenu),
            Command::Q | Command::Quit => Some(PauseChoice::Quit),
            _ => None,
        }
    }

    fn menu_line(self, under_cursor: bool) -> Line<'static> {
        let line = Line::from_iter([
            Span::raw(if under_cursor { "» " } else { "  " }),
            Span::raw(self.label()),
            Span::raw(" ("),
            Span::styled(self.key_name(), consts::KEY_STYLE),
            Span::raw(")"),
        ]);
        if under_cursor {
            line.style(consts::MENU_SELECTION_STYLE)
        } else {
            line
        }
    }
}

impl Widget for PauseMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let rows = frame.inner(area).rows();
        frame.render(area, buf);
        for (choice, row) in PauseChoice::iter().zip(rows) {
            choice.menu_line(choice == self.cursor).render(row, buf);
        }
    }
}
