use super::cell::{GridSize, PixelRect};
use crate::consts;
use rand::Rng;

/// An obstacle that slides back and forth horizontally across the level.
///
/// Paddles live in pixel space rather than on the grid, so they can straddle
/// cells.  The snake dies if its head overlaps a paddle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Paddle {
    face: PixelRect,
    bounds_min: i32,
    bounds_max: i32,
    move_amount: i32,
}

impl Paddle {
    /// Create a paddle whose face is `face`, confined to the horizontal span
    /// `[bounds_min, bounds_max]`, and moving `move_amount` pixels per step
    /// (negative values move left).
    ///
    /// If `face` does not start inside the bounds, it is pulled inside.
    pub(crate) fn new(
        face: PixelRect,
        bounds_min: i32,
        bounds_max: i32,
        move_amount: i32,
    ) -> Paddle {
        let mut paddle = Paddle {
            face,
            bounds_min,
            bounds_max,
            move_amount,
        };
        paddle.face.x = paddle.clamp_x(face.x);
        paddle
    }

    /// Create a paddle of the standard size at a random row of a level of
    /// size `grid`, at a random horizontal position within its bounds.
    pub(crate) fn spawn<R: Rng>(rng: &mut R, grid: GridSize) -> Paddle {
        let bounds_min = consts::PADDLE_BOUNDS_MARGIN;
        let bounds_max = grid
            .pixel_width()
            .saturating_sub(consts::PADDLE_BOUNDS_MARGIN)
            .max(bounds_min.saturating_add(consts::PADDLE_WIDTH));
        let x = rng.random_range(bounds_min..=bounds_max - consts::PADDLE_WIDTH);
        let row = rng.random_range(0..grid.height.max(1));
        let face = PixelRect::new(
            x,
            row.saturating_mul(consts::CELL_SIZE),
            consts::PADDLE_WIDTH,
            consts::PADDLE_HEIGHT,
        );
        Paddle::new(face, bounds_min, bounds_max, consts::PADDLE_MOVE_AMOUNT)
    }

    pub(crate) fn face(&self) -> PixelRect {
        self.face
    }

    /// Slide the paddle by one step.  If this step brings the paddle to (or
    /// past) either bound, the paddle is stopped at the bound and will travel
    /// the other way on the next step.
    pub(crate) fn move_step(&mut self) {
        let new_x = self.face.x.saturating_add(self.move_amount);
        if new_x <= self.bounds_min || new_x.saturating_add(self.face.width) >= self.bounds_max {
            self.move_amount = -self.move_amount;
        }
        self.face.x = self.clamp_x(new_x);
    }

    fn clamp_x(&self, x: i32) -> i32 {
        let max_x = self.bounds_max.saturating_sub(self.face.width);
        if max_x < self.bounds_min {
            // Wider than its track; pin it to the left edge
            self.bounds_min
        } else {
            x.clamp(self.bounds_min, max_x)
        }
    }
}
