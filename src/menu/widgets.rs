use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::Widget,
};

/// The title art shown at the top of the main menu, with a little picture of
/// a snake heading for its food underneath
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const PADDLE_WIDTH: u16 = 31;
    const SNAKE_WIDTH: u16 = 28;
    const WORD_GAP: u16 = 1;
    const TEXT_HEIGHT: u16 = 5;
    const DIAGRAM_PADDLE_LENGTH: u16 = 2;
    const DIAGRAM_BODY_LENGTH: u16 = 10;
    const DIAGRAM_GUTTER: u16 = 2;
    pub(super) const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    pub(super) const WIDTH: u16 = Self::PADDLE_WIDTH + Self::WORD_GAP + Self::SNAKE_WIDTH;

    #[rustfmt::skip]
    const PADDLE: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " ____           _     _ _      ",
        r"|  _ \ __ _  __| | __| | | ___ ",
        r"| |_) / _` |/ _` |/ _` | |/ _ \",
         "|  __/ (_| | (_| | (_| | |  __/",
        r"|_|   \__,_|\__,_|\__,_|_|\___|",
    ];

    #[rustfmt::skip]
    const SNAKE: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " ____              _        ",
         "/ ___| _ __   __ _| | _____ ",
        r"\___ \| '_ \ / _` | |/ / _ \",
         " ___) | | | | (_| |   <  __/",
        r"|____/|_| |_|\__,_|_|\_\___|",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [words_area, diagram_area] = Layout::vertical([Self::TEXT_HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        let [paddle_area, snake_area] =
            Layout::horizontal([Self::PADDLE_WIDTH, Self::SNAKE_WIDTH])
                .flex(Flex::Start)
                .spacing(Self::WORD_GAP)
                .areas(words_area);
        Text::from_iter(Self::PADDLE)
            .style(consts::LOGO_PADDLE_STYLE)
            .render(paddle_area, buf);
        Text::from_iter(Self::SNAKE)
            .style(consts::SNAKE_STYLE)
            .render(snake_area, buf);

        // ██  ──────────<  ♥
        let [paddle_area, _, body_area, head_area, _, food_area] = Layout::horizontal([
            Self::DIAGRAM_PADDLE_LENGTH,
            Self::DIAGRAM_GUTTER,
            Self::DIAGRAM_BODY_LENGTH,
            1,
            Self::DIAGRAM_GUTTER,
            1,
        ])
        .flex(Flex::Center)
        .areas(diagram_area);
        fill(buf, paddle_area, consts::PADDLE_SYMBOL, consts::PADDLE_STYLE);
        fill(
            buf,
            body_area,
            consts::SNAKE_HORIZONTAL_SYMBOL,
            consts::SNAKE_STYLE,
        );
        fill(
            buf,
            head_area,
            consts::SNAKE_HEAD_RIGHT_SYMBOL,
            consts::SNAKE_STYLE,
        );
        fill(buf, food_area, consts::LOGO_FOOD_SYMBOL, consts::LOGO_FOOD_STYLE);
    }
}

fn fill(buf: &mut Buffer, area: Rect, symbol: char, style: Style) {
    for p in area.positions() {
        if let Some(cell) = buf.cell_mut(p) {
            cell.set_char(symbol);
            cell.set_style(style);
        }
    }
}

/// How to play, in brief
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 7;
    pub(super) const WIDTH: u16 = 20;
}

fn keys(prefix: &'static str, keys: [&'static str; 4]) -> Line<'static> {
    let mut spans = vec![Span::raw(prefix)];
    for (i, k) in keys.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(k, consts::KEY_STYLE));
    }
    Line::from(spans)
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            keys("       ", ["←", "↓", "↑", "→"]),
            keys("   or: ", ["h", "j", "k", "l"]),
            keys("   or: ", ["a", "s", "w", "d"]),
            Line::from("Eat food, but dodge"),
            Line::from("walls & paddles!"),
            Line::from_iter([
                Span::raw("Pause with "),
                Span::styled("p", consts::KEY_STYLE),
                Span::raw(" or "),
                Span::styled("Esc", consts::KEY_STYLE),
            ]),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}
