//! Assorted constants & hard-coded configuration
use crate::game::cell::{GridCell, GridSize};
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between two ticks of the game loop.  The snake itself only moves as
/// often as the selected speed level allows.
pub(crate) const FRAME_PERIOD: Duration = Duration::from_micros(16_667);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Size of the level, in cells
pub(crate) const LEVEL_SIZE: GridSize = GridSize::new(76, 19);

/// Width & height of a grid cell in pixel space.  Paddles move in pixel space;
/// everything else moves from cell to cell.
pub(crate) const CELL_SIZE: i32 = 20;

/// Where the snake's head starts out
pub(crate) const SNAKE_START: GridCell = GridCell::new(5, 5);

/// Length of the snake before any food has been eaten
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// Points awarded for each food eaten
pub(crate) const FOOD_SCORE: u64 = 10;

/// A new paddle is added every time the score reaches a multiple of this
pub(crate) const PADDLE_SCORE_STEP: u64 = 50;

/// A new food is added every time the score reaches a multiple of this
pub(crate) const FOOD_SCORE_STEP: u64 = 30;

/// Width of a paddle in pixels
pub(crate) const PADDLE_WIDTH: i32 = 100;

/// Height of a paddle in pixels
pub(crate) const PADDLE_HEIGHT: i32 = 20;

/// How many pixels a paddle moves per tick
pub(crate) const PADDLE_MOVE_AMOUNT: i32 = 3;

/// Paddles stay at least this many pixels away from the left & right edges of
/// the level
pub(crate) const PADDLE_BOUNDS_MARGIN: i32 = 40;

/// Number of entries kept on the leaderboard
pub(crate) const MAX_HIGH_SCORES: usize = 10;

/// Player name used when none is configured
pub(crate) const DEFAULT_PLAYER_NAME: &str = "Player";

/// Longest player name, in characters, that can be typed on the main menu
pub(crate) const MAX_NAME_LENGTH: usize = 16;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

pub(crate) const SNAKE_HORIZONTAL_SYMBOL: char = '─';
pub(crate) const SNAKE_VERTICAL_SYMBOL: char = '│';
pub(crate) const SNAKE_UP_RIGHT_SYMBOL: char = '╰';
pub(crate) const SNAKE_UP_LEFT_SYMBOL: char = '╯';
pub(crate) const SNAKE_DOWN_RIGHT_SYMBOL: char = '╭';
pub(crate) const SNAKE_DOWN_LEFT_SYMBOL: char = '╮';

/// Glyph for paddles
pub(crate) const PADDLE_SYMBOL: char = '█';

/// Glyph for the snake's head when it's collided with something
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for paddles
pub(crate) const PADDLE_STYLE: Style = Style::new().fg(Color::LightGreen);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for the logo's "Paddle" half
pub(crate) const LOGO_PADDLE_STYLE: Style = Style::new().fg(Color::LightRed);

/// Glyph for the food in the logo's diagram
pub(crate) const LOGO_FOOD_SYMBOL: char = '♥';

/// Style for [`LOGO_FOOD_SYMBOL`]
pub(crate) const LOGO_FOOD_STYLE: Style = Style::new().fg(Color::Red);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the player's own entry on the leaderboard
pub(crate) const NEW_SCORE_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);
