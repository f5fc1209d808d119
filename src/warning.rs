use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect, Size},
    symbols::shade,
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use std::borrow::Cow;

const CAUSE_INDENT: &str = "    ";

/// A dismissible pop-up describing an error that the program recovered from.
///
/// Messages too long to fit on screen get a scrollbar.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
    scroll: Scroll,
}

impl Warning {
    const MAX_LINES: u16 = 16;
    const TEXT_WIDTH: u16 = 48;

    /// Build a warning from an error message followed by the messages of its
    /// causes, outermost first
    pub(crate) fn from_error_messages(msgs: Vec<String>) -> Self {
        let mut msgs = msgs.into_iter();
        let mut lines = match msgs.next() {
            Some(head) => wrap(&head, "", ""),
            None => vec![String::from("Something went wrong.")],
        };
        let causes = msgs.collect::<Vec<_>>();
        if !causes.is_empty() {
            lines.extend([String::new(), String::from("Caused by:")]);
        }
        match causes.as_slice() {
            [] => (),
            [only] => lines.extend(wrap(only, CAUSE_INDENT, CAUSE_INDENT)),
            several => {
                for (i, cause) in several.iter().enumerate() {
                    lines.extend(wrap(cause, &format!("{i:>5}: "), "       "));
                }
            }
        }
        let scroll = Scroll {
            top: 0,
            last_top: lines.len().saturating_sub(usize::from(Self::MAX_LINES)),
        };
        Warning { lines, scroll }
    }

    /// Returns `Some` once the user is done with the warning
    pub(crate) fn handle_command(&mut self, cmd: Command) -> Option<WarningOutcome> {
        match cmd {
            Command::Enter | Command::Esc => Some(WarningOutcome::Dismissed),
            Command::Quit => Some(WarningOutcome::Quit),
            cmd => {
                self.scroll.apply(cmd);
                None
            }
        }
    }

    fn scrolling(&self) -> bool {
        self.scroll.last_top > 0
    }

    fn visible_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .skip(self.scroll.top)
            .take(usize::from(Self::MAX_LINES))
            .map(String::as_str)
    }
}

/// Which line of a long warning is at the top of the pop-up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Scroll {
    top: usize,
    last_top: usize,
}

impl Scroll {
    fn apply(&mut self, cmd: Command) {
        self.top = match cmd {
            Command::Up => self.top.saturating_sub(1),
            Command::Down => self.top.saturating_add(1).min(self.last_top),
            Command::Home => 0,
            Command::End => self.last_top,
            _ => self.top,
        };
    }
}

fn wrap(text: &str, initial_indent: &str, subsequent_indent: &str) -> Vec<String> {
    let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
        .break_words(true)
        .initial_indent(initial_indent)
        .subsequent_indent(subsequent_indent);
    textwrap::wrap(text, opts)
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

/// Return the message of `e` followed by the messages of each of its sources
pub(crate) fn error_chain(e: &(dyn std::error::Error + 'static)) -> Vec<String> {
    std::iter::successors(Some(e), |err| err.source())
        .map(ToString::to_string)
        .collect()
}

/// How the user got rid of a warning
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl<E: std::error::Error + 'static> From<E> for Warning {
    fn from(e: E) -> Warning {
        Warning::from_error_messages(error_chain(&e))
    }
}

impl Widget for &Warning {
    /// `area` is the whole screen; the pop-up centers itself within it.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let body_height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .min(Warning::MAX_LINES);
        let bar_width = if self.scrolling() { 2 } else { 0 };
        // Borders and padding, plus a blank row and the "[OK]" row
        let popup = center_rect(
            area,
            Size {
                width: Warning::TEXT_WIDTH + 4 + bar_width,
                height: body_height + 4,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [body_area, _, ok_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(block.inner(popup));
        Clear.render(popup, buf);
        block.render(popup, buf);
        let [text_area, bar_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(bar_width)])
                .areas(body_area);
        Text::from_iter(self.visible_lines()).render(text_area, buf);
        if self.scrolling() {
            let mut state =
                ScrollbarState::new(self.scroll.last_top + 1).position(self.scroll.top);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .track_symbol(Some(shade::MEDIUM))
                .render(bar_area, buf, &mut state);
        }
        Line::from("[OK]").centered().render(ok_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::SaveError;
    use pretty_assertions::assert_eq;

    fn screen_rows(buffer: &Buffer) -> Vec<String> {
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .filter_map(|x| buffer.cell((x, y)))
                    .map(ratatui::buffer::Cell::symbol)
                    .collect::<String>()
                    .trim_end()
                    .to_owned()
            })
            .collect()
    }

    #[test]
    fn numbered_causes() {
        let e = SaveError::write(
            "leaderboard",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only disk"),
        );
        let warning = Warning::from(e);
        assert_eq!(
            warning.lines,
            [
                "failed to save leaderboard to disk",
                "",
                "Caused by:",
                "    0: failed to write file",
                "    1: read-only disk",
            ]
        );
        assert!(!warning.scrolling());
    }

    #[test]
    fn no_messages() {
        let warning = Warning::from_error_messages(Vec::new());
        assert_eq!(warning.lines, ["Something went wrong."]);
    }

    #[test]
    fn dismiss_or_quit() {
        let mut warning = Warning::from_error_messages(vec![String::from("Disk full")]);
        assert_eq!(warning.handle_command(Command::End), None);
        assert_eq!(warning.scroll.top, 0);
        assert_eq!(
            warning.handle_command(Command::Esc),
            Some(WarningOutcome::Dismissed)
        );
        assert_eq!(
            warning.handle_command(Command::Enter),
            Some(WarningOutcome::Dismissed)
        );
        assert_eq!(
            warning.handle_command(Command::Quit),
            Some(WarningOutcome::Quit)
        );
    }

    #[test]
    fn scroll_long_warning() {
        // 1 + 2 + 20 lines
        let msgs = (0..21).map(|i| format!("reason {i}")).collect();
        let mut warning = Warning::from_error_messages(msgs);
        assert_eq!(warning.scroll.last_top, 7);
        assert_eq!(warning.handle_command(Command::Up), None);
        assert_eq!(warning.scroll.top, 0);
        assert_eq!(warning.handle_command(Command::Down), None);
        assert_eq!(warning.scroll.top, 1);
        assert_eq!(warning.visible_lines().next(), Some(""));
        assert_eq!(warning.handle_command(Command::End), None);
        assert_eq!(warning.handle_command(Command::Down), None);
        assert_eq!(warning.scroll.top, 7);
        assert_eq!(warning.visible_lines().last(), Some("   19: reason 20"));
        assert_eq!(warning.handle_command(Command::Home), None);
        assert_eq!(warning.scroll.top, 0);
    }

    #[test]
    fn render_single_line() {
        let warning = Warning::from_error_messages(vec![String::from("Options not saved")]);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        let rows = screen_rows(&buffer);
        assert!(rows[..10].iter().all(String::is_empty));
        assert_eq!(
            rows[10..15],
            [
                "              ┌──────────────────── WARNING ─────────────────────┐",
                "              │ Options not saved                                │",
                "              │                                                  │",
                "              │                       [OK]                       │",
                "              └──────────────────────────────────────────────────┘",
            ]
        );
        assert!(rows[15..].iter().all(String::is_empty));
    }

    #[test]
    fn render_wrapped_cause() {
        let warning = Warning::from_error_messages(vec![
            String::from(
                "The leaderboard could not be saved, so the score from this game will be forgotten when you quit",
            ),
            String::from("no space left on device while writing leaderboard.txt"),
        ]);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        let rows = screen_rows(&buffer);
        assert!(rows[..7].iter().all(String::is_empty));
        assert_eq!(
            rows[7..17],
            [
                "              ┌──────────────────── WARNING ─────────────────────┐",
                "              │ The leaderboard could not be saved, so the score │",
                "              │ from this game will be forgotten when you quit   │",
                "              │                                                  │",
                "              │ Caused by:                                       │",
                "              │     no space left on device while writing        │",
                "              │     leaderboard.txt                              │",
                "              │                                                  │",
                "              │                       [OK]                       │",
                "              └──────────────────────────────────────────────────┘",
            ]
        );
        assert!(rows[17..].iter().all(String::is_empty));
    }

    #[test]
    fn render_scrollbar() {
        let msgs = (0..21).map(|i| format!("reason {i}")).collect();
        let warning = Warning::from_error_messages(msgs);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        let rows = screen_rows(&buffer);
        assert_eq!(
            rows[2],
            "             ┌───────────────────── WARNING ──────────────────────┐"
        );
        assert!(rows[3].starts_with("             │ reason 0 "));
        assert!(rows[3].ends_with("▲ │"));
        assert!(rows[18].ends_with("▼ │"));
        assert_eq!(
            rows[20],
            "             │                        [OK]                        │"
        );
    }
}
