#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Is `other` the exact opposite of `self`?  Turning to face the opposite
    /// direction would send the snake's head straight into its neck, so such
    /// turns are never accepted.
    pub(crate) fn is_opposite(self, other: Direction) -> bool {
        self.reverse() == other
    }
}
