use crate::consts;
use crate::leaderboard::ScoreEntry;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use unicode_width::UnicodeWidthChar;

/// A pop-up listing the leaderboard.  At the end of a game it also shows the
/// final score.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ScoreBoard<'a> {
    /// The score of the game just finished, if any
    pub(crate) score: Option<u64>,
    pub(crate) entries: &'a [ScoreEntry],
    /// Index into `entries` of the score just achieved, if it made the cut
    pub(crate) highlight: Option<usize>,
}

impl ScoreBoard<'_> {
    const NAME_WIDTH: usize = 16;

    /// The width that should be used for the `Rect` passed to
    /// `ScoreBoard::render()`
    pub(crate) const WIDTH: u16 = 31;

    /// The height that should be used for the `Rect` passed to
    /// `ScoreBoard::render()`
    pub(crate) fn height(&self) -> u16 {
        let score_rows = if self.score.is_some() { 2 } else { 0 };
        u16::try_from(self.entries.len().max(1))
            .unwrap_or(u16::MAX)
            .saturating_add(2 + score_rows)
    }
}

impl Widget for ScoreBoard<'_> {
    /*
     * ┌───────── GAME OVER ─────────┐
     * │ Final score: 50             │
     * │                             │
     * │  1. Nagini              120 │
     * │  2. Player               50 │
     * └─────────────────────────────┘
     *
     * Without a final score, the title is " HIGH SCORES " and the list
     * starts on the first row.
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(if self.score.is_some() {
                " GAME OVER "
            } else {
                " HIGH SCORES "
            })
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let list_area = if let Some(score) = self.score {
            let [score_area, list_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Fill(1)])
                    .spacing(1)
                    .areas(inner);
            Line::from(format!("Final score: {score}")).render(score_area, buf);
            list_area
        } else {
            inner
        };
        if self.entries.is_empty() {
            Line::from("No high scores yet").render(list_area, buf);
            return;
        }
        for ((i, entry), row) in self.entries.iter().enumerate().zip(list_area.rows()) {
            let style = if self.highlight == Some(i) {
                consts::NEW_SCORE_STYLE
            } else {
                Style::new()
            };
            Line::styled(
                format!(
                    "{rank:>2}. {name} {score:>6}",
                    rank = i + 1,
                    name = fit_name(&entry.name, ScoreBoard::NAME_WIDTH),
                    score = entry.score
                ),
                style,
            )
            .render(row, buf);
        }
    }
}

/// Truncate or pad `name` so that it's exactly `width` columns wide
fn fit_name(name: &str, width: usize) -> String {
    let mut fitted = String::new();
    let mut used = 0;
    for ch in name.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        fitted.push(ch);
        used += w;
    }
    fitted.push_str(&" ".repeat(width - used));
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn entry(name: &str, score: u64) -> ScoreEntry {
        ScoreEntry {
            name: name.to_owned(),
            score,
        }
    }

    #[test]
    fn render_with_highlight() {
        let entries = [entry("Nagini", 120), entry("Player", 50), entry("Kaa", 30)];
        let board = ScoreBoard {
            score: Some(50),
            entries: &entries,
            highlight: Some(1),
        };
        assert_eq!(board.height(), 7);
        let area = Rect::new(0, 0, ScoreBoard::WIDTH, board.height());
        let mut buffer = Buffer::empty(area);
        board.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌───────── GAME OVER ─────────┐",
            "│ Final score: 50             │",
            "│                             │",
            "│  1. Nagini              120 │",
            "│  2. Player               50 │",
            "│  3. Kaa                  30 │",
            "└─────────────────────────────┘",
        ]);
        expected.set_style(Rect::new(2, 4, 27, 1), consts::NEW_SCORE_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn render_empty() {
        let board = ScoreBoard {
            score: Some(0),
            entries: &[],
            highlight: None,
        };
        assert_eq!(board.height(), 5);
        let area = Rect::new(0, 0, ScoreBoard::WIDTH, board.height());
        let mut buffer = Buffer::empty(area);
        board.render(area, &mut buffer);
        let expected = Buffer::with_lines([
            "┌───────── GAME OVER ─────────┐",
            "│ Final score: 0              │",
            "│                             │",
            "│ No high scores yet          │",
            "└─────────────────────────────┘",
        ]);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn render_without_final_score() {
        let entries = [entry("Nagini", 120), entry("Kaa", 30)];
        let board = ScoreBoard {
            score: None,
            entries: &entries,
            highlight: None,
        };
        assert_eq!(board.height(), 4);
        let area = Rect::new(0, 0, ScoreBoard::WIDTH, board.height());
        let mut buffer = Buffer::empty(area);
        board.render(area, &mut buffer);
        let expected = Buffer::with_lines([
            "┌──────── HIGH SCORES ────────┐",
            "│  1. Nagini              120 │",
            "│  2. Kaa                  30 │",
            "└─────────────────────────────┘",
        ]);
        assert_eq!(buffer, expected);
    }

    #[rstest]
    #[case("Kaa", "Kaa             ")]
    #[case("Nagini the Great, Destroyer", "Nagini the Great")]
    #[case("蛇蛇蛇蛇蛇蛇蛇蛇蛇", "蛇蛇蛇蛇蛇蛇蛇蛇")]
    #[case("abcdefghijklmno蛇", "abcdefghijklmno ")]
    fn test_fit_name(#[case] name: &str, #[case] fitted: &str) {
        assert_eq!(fit_name(name, 16), fitted);
    }
}
