use super::cell::{GridCell, GridSize, Positionable};
use super::direction::Direction;
use super::engine::{EngineState, Scene};
use super::snake::Segment;
use crate::consts;
use crate::options::Background;
use crate::sprites::{Sprite, SpriteSheet};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

/// Return a buffer area with one terminal cell per grid cell of a level of
/// size `grid`
pub(super) fn level_rect(grid: GridSize) -> Rect {
    Rect::new(
        0,
        0,
        u16::try_from(grid.width).unwrap_or(0),
        u16::try_from(grid.height).unwrap_or(0),
    )
}

/// Draw `scene` onto `buf`, replacing whatever was there.  Grid cell (0, 0)
/// is drawn at the top-left corner of `buf`'s area.
pub(super) fn draw_scene(
    buf: &mut Buffer,
    scene: &Scene<'_>,
    sprites: &SpriteSheet,
    background: Background,
) {
    buf.reset();
    let mut canvas = Canvas {
        area: buf.area,
        buf,
    };
    if let Some(key) = background.sprite_key() {
        match sprites.get(key) {
            Some(sprite) => {
                for cell in scene.grid.cells() {
                    canvas.draw_sprite(cell, sprite);
                }
            }
            None => log::warn!("No sprite for background {key:?}; not drawing it"),
        }
    }
    for food in scene.foods {
        match sprites.get(food.sprite_key()) {
            Some(sprite) => canvas.draw_sprite(food.cell(), sprite),
            None => log::warn!("No sprite for food {:?}; not drawing it", food.sprite_key()),
        }
    }
    for paddle in scene.paddles {
        for cell in paddle.face().covered_cells() {
            canvas.draw_char(cell, consts::PADDLE_SYMBOL, consts::PADDLE_STYLE);
        }
    }
    let mut segments = scene.snake.segments();
    let head = segments.next();
    for (cell, seg) in segments {
        canvas.draw_char(cell, segment_symbol(seg), consts::SNAKE_STYLE);
    }
    // Draw the head last so that, if it's a collision, we overwrite whatever
    // it's colliding with
    if let Some((cell, seg)) = head {
        if matches!(scene.state, EngineState::Over(_)) {
            canvas.draw_char(cell, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        } else {
            canvas.draw_char(cell, segment_symbol(seg), consts::SNAKE_STYLE);
        }
    }
}

fn segment_symbol(seg: Segment) -> char {
    match seg {
        Segment::Head(Direction::Up) => consts::SNAKE_HEAD_UP_SYMBOL,
        Segment::Head(Direction::Down) => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Segment::Head(Direction::Left) => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Segment::Head(Direction::Right) => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        Segment::Horizontal => consts::SNAKE_HORIZONTAL_SYMBOL,
        Segment::Vertical => consts::SNAKE_VERTICAL_SYMBOL,
        Segment::UpRight => consts::SNAKE_UP_RIGHT_SYMBOL,
        Segment::UpLeft => consts::SNAKE_UP_LEFT_SYMBOL,
        Segment::DownRight => consts::SNAKE_DOWN_RIGHT_SYMBOL,
        Segment::DownLeft => consts::SNAKE_DOWN_LEFT_SYMBOL,
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_sprite(&mut self, cell: GridCell, sprite: &Sprite) {
        self.draw_symbol(cell, sprite.glyph(), sprite.style());
    }

    fn draw_char(&mut self, cell: GridCell, symbol: char, style: Style) {
        let mut tmp = [0u8; 4];
        self.draw_symbol(cell, symbol.encode_utf8(&mut tmp), style);
    }

    /// Cells outside the canvas are silently skipped.
    fn draw_symbol(&mut self, cell: GridCell, symbol: &str, style: Style) {
        let (Ok(x), Ok(y)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
            return;
        };
        if x >= self.area.width || y >= self.area.height {
            return;
        }
        let Some(x) = self.area.x.checked_add(x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(y) else {
            return;
        };
        if let Some(c) = self.buf.cell_mut((x, y)) {
            c.set_symbol(symbol);
            c.set_style(Style::reset().patch(style));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cell::PixelRect;
    use crate::game::engine::Ending;
    use crate::game::food::{Food, FoodKeys};
    use crate::game::paddle::Paddle;
    use crate::game::snake::Snake;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::style::Color;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;
    const GRID: GridSize = GridSize::new(8, 3);

    fn food_at(key: &str, cell: GridCell) -> Food {
        // A one-cell grid leaves the food nowhere to go but (0, 0)
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let mut food = Food::new(&mut rng, GridSize::new(1, 1), &FoodKeys::single(key));
        food.set_cell(cell);
        food
    }

    fn snake() -> Snake {
        Snake::new(
            GridCell::new(3, 1),
            3,
            Direction::Right,
            Duration::from_millis(100),
        )
    }

    fn paddle() -> Paddle {
        Paddle::new(PixelRect::new(20, 40, 40, 20), 0, 160, 3)
    }

    #[test]
    fn plain_scene() {
        let snake = snake();
        let paddles = [paddle()];
        let foods = [food_at("cherry", GridCell::new(6, 0))];
        let scene = Scene {
            grid: GRID,
            snake: &snake,
            paddles: &paddles,
            foods: &foods,
            state: EngineState::Running,
        };
        let mut buffer = Buffer::empty(level_rect(GRID));
        draw_scene(
            &mut buffer,
            &scene,
            &SpriteSheet::default(),
            Background::Plain,
        );
        let mut expected = Buffer::with_lines(["      ♥ ", " ──<    ", " ██     "]);
        expected.set_style(Rect::new(6, 0, 1, 1), Style::new().fg(Color::Red));
        expected.set_style(Rect::new(1, 1, 3, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(1, 2, 2, 1), consts::PADDLE_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn background_and_missing_food_sprite() {
        let snake = snake();
        let foods = [
            food_at("durian", GridCell::new(6, 0)),
            food_at("apple", GridCell::new(7, 2)),
        ];
        let scene = Scene {
            grid: GRID,
            snake: &snake,
            paddles: &[],
            foods: &foods,
            state: EngineState::Running,
        };
        let mut buffer = Buffer::empty(level_rect(GRID));
        draw_scene(
            &mut buffer,
            &scene,
            &SpriteSheet::default(),
            Background::Sand,
        );
        let mut expected = Buffer::with_lines(["........", ".──<....", ".......●"]);
        expected.set_style(Rect::new(0, 0, 8, 3), Style::new().fg(Color::Yellow));
        expected.set_style(Rect::new(1, 1, 3, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(7, 2, 1, 1), Style::new().fg(Color::LightRed));
        assert_eq!(buffer, expected);
    }

    #[test]
    fn collision_over_paddle() {
        let snake = Snake::new(
            GridCell::new(2, 2),
            3,
            Direction::Up,
            Duration::from_millis(100),
        );
        let paddles = [paddle()];
        let scene = Scene {
            grid: GRID,
            snake: &snake,
            paddles: &paddles,
            foods: &[],
            state: EngineState::Over(Ending::Paddle),
        };
        let mut buffer = Buffer::empty(level_rect(GRID));
        // Stale content from an earlier frame gets cleared
        buffer.set_string(0, 0, "xxxxxxxx", Style::new());
        draw_scene(
            &mut buffer,
            &scene,
            &SpriteSheet::default(),
            Background::Plain,
        );
        // The body is off the bottom of the level
        let mut expected = Buffer::with_lines(["        ", "        ", " █×     "]);
        expected.set_style(Rect::new(1, 2, 1, 1), consts::PADDLE_STYLE);
        expected.set_style(Rect::new(2, 2, 1, 1), consts::COLLISION_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn corners() {
        let mut snake = snake();
        snake.direction = Direction::Down;
        snake.body = [(2, 2), (2, 1), (1, 1), (1, 0), (0, 0)]
            .into_iter()
            .map(|(x, y)| GridCell::new(x, y))
            .collect();
        snake.segment_directions = [
            Direction::Down,
            Direction::Right,
            Direction::Down,
            Direction::Right,
            Direction::Right,
        ]
        .into_iter()
        .collect();
        let scene = Scene {
            grid: GRID,
            snake: &snake,
            paddles: &[],
            foods: &[],
            state: EngineState::Running,
        };
        let mut buffer = Buffer::empty(level_rect(GRID));
        draw_scene(
            &mut buffer,
            &scene,
            &SpriteSheet::default(),
            Background::Plain,
        );
        let mut expected = Buffer::with_lines(["─╮      ", " ╰╮     ", "  ^     "]);
        expected.set_style(Rect::new(0, 0, 2, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(1, 1, 2, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(2, 2, 1, 1), consts::SNAKE_STYLE);
        assert_eq!(buffer, expected);
    }
}
