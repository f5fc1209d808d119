use super::direction::Direction;
use crate::consts;

/// A position on the level grid, measured in cells rather than pixels.
///
/// Cells are plain values: moving something means replacing its cell, never
/// mutating one in place.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct GridCell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl GridCell {
    pub(crate) const fn new(x: i32, y: i32) -> GridCell {
        GridCell { x, y }
    }

    /// Return the cell adjacent to this one in `direction`.  Cells past the
    /// edge of the level are returned as-is; bounds are checked by whoever
    /// cares about them.
    pub(crate) fn step(self, direction: Direction) -> GridCell {
        let GridCell { x, y } = self;
        match direction {
            Direction::Up => GridCell::new(x, y.saturating_sub(1)),
            Direction::Down => GridCell::new(x, y.saturating_add(1)),
            Direction::Left => GridCell::new(x.saturating_sub(1), y),
            Direction::Right => GridCell::new(x.saturating_add(1), y),
        }
    }

    /// Return the area covered by this cell in pixel space
    pub(crate) fn pixel_rect(self) -> PixelRect {
        PixelRect {
            x: self.x.saturating_mul(consts::CELL_SIZE),
            y: self.y.saturating_mul(consts::CELL_SIZE),
            width: consts::CELL_SIZE,
            height: consts::CELL_SIZE,
        }
    }
}

/// Anything that occupies a single grid cell
pub(crate) trait Positionable {
    fn cell(&self) -> GridCell;
    fn set_cell(&mut self, cell: GridCell);
}

/// The dimensions of a level, in cells
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct GridSize {
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl GridSize {
    pub(crate) const fn new(width: i32, height: i32) -> GridSize {
        GridSize { width, height }
    }

    /// Is `cell` inside `[0, width) × [0, height)`?
    pub(crate) fn contains(self, cell: GridCell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Width of the level in pixels
    pub(crate) fn pixel_width(self) -> i32 {
        self.width.saturating_mul(consts::CELL_SIZE)
    }

    /// Iterate over every cell of the level in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = GridCell> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| GridCell::new(x, y)))
    }
}

/// An axis-aligned rectangle in pixel space
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct PixelRect {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl PixelRect {
    pub(crate) const fn new(x: i32, y: i32, width: i32, height: i32) -> PixelRect {
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }

    pub(crate) fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub(crate) fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Do the two rectangles overlap?  Rectangles that only share an edge do
    /// not intersect, and neither does an empty rectangle.
    pub(crate) fn intersects(self, other: PixelRect) -> bool {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Return the cells that this rectangle covers at least partially
    pub(crate) fn covered_cells(self) -> impl Iterator<Item = GridCell> {
        let (x0, x1, y0, y1) = if self.width <= 0 || self.height <= 0 {
            (0, 0, 0, 0)
        } else {
            (
                self.x.div_euclid(consts::CELL_SIZE),
                (self.right() - 1).div_euclid(consts::CELL_SIZE) + 1,
                self.y.div_euclid(consts::CELL_SIZE),
                (self.bottom() - 1).div_euclid(consts::CELL_SIZE) + 1,
            )
        };
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| GridCell::new(x, y)))
    }
}
