use super::cell::{GridCell, GridSize, Positionable};
use super::direction::Direction;
use super::food::Food;
use super::paddle::Paddle;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// The player's snake.
///
/// All positions are grid cells relative to the top-left corner of the level
/// the snake is on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells of the snake, head first and tail last.  Never empty.
    pub(super) body: VecDeque<GridCell>,

    /// For each cell in `body`, the direction the snake was heading when its
    /// head entered that cell.  Only used for picking glyphs.
    pub(super) segment_directions: VecDeque<Direction>,

    /// The direction in which the snake is currently heading
    pub(super) direction: Direction,

    /// A turn requested since the last time the snake moved
    pending_direction: Option<Direction>,

    /// Minimum time between two moves
    speed_interval: Duration,

    /// When the snake last moved; `None` if it hasn't moved yet
    last_move: Option<Instant>,

    /// How many upcoming moves should leave the tail where it is
    pending_growth: usize,

    score: u64,

    pub(super) state: SnakeState,
}

impl Snake {
    /// Create a new snake with its head at `head`, facing in `direction`, and
    /// with its body stretched out in a straight line behind it for a total
    /// of `length` cells (at least one).
    pub(crate) fn new(
        head: GridCell,
        length: usize,
        direction: Direction,
        speed_interval: Duration,
    ) -> Snake {
        let behind = direction.reverse();
        let body = std::iter::successors(Some(head), |&c| Some(c.step(behind)))
            .take(length.max(1))
            .collect::<VecDeque<_>>();
        let segment_directions = body.iter().map(|_| direction).collect();
        Snake {
            body,
            segment_directions,
            direction,
            pending_direction: None,
            speed_interval,
            last_move: None,
            pending_growth: 0,
            score: 0,
            state: SnakeState::Alive,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> GridCell {
        self.body[0]
    }

    pub(crate) fn score(&self) -> u64 {
        self.score
    }

    pub(crate) fn is_game_over(&self) -> bool {
        self.state == SnakeState::GameOver
    }

    /// Request that the snake turn to face `direction` the next time it
    /// moves.  Requests to reverse direction are ignored.  Returns whether
    /// the request was accepted.
    pub(crate) fn change_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            false
        } else {
            self.pending_direction = Some(direction);
            true
        }
    }

    /// Move the snake forwards one cell, provided at least `speed_interval`
    /// has passed since the last move.
    ///
    /// If the new head position would overlap any part of the snake, the
    /// snake dies and its body is left unchanged.
    pub(crate) fn advance(&mut self, now: Instant) -> Advance {
        if self.is_game_over() {
            return Advance::Waiting;
        }
        if let Some(last) = self.last_move {
            if now.saturating_duration_since(last) < self.speed_interval {
                return Advance::Waiting;
            }
        }
        if let Some(d) = self.pending_direction.take() {
            if !self.direction.is_opposite(d) {
                self.direction = d;
            }
        }
        let new_head = self.head().step(self.direction);
        if self.body.contains(&new_head) {
            self.state = SnakeState::GameOver;
            return Advance::Collided;
        }
        self.body.push_front(new_head);
        self.segment_directions.push_front(self.direction);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            let _ = self.body.pop_back();
            let _ = self.segment_directions.pop_back();
        }
        self.last_move = Some(now);
        Advance::Moved
    }

    /// Lengthen the snake by one cell.  The extra cell appears at the tail on
    /// the next move.
    pub(crate) fn grow(&mut self) {
        self.pending_growth = self.pending_growth.saturating_add(1);
    }

    pub(crate) fn increase_score(&mut self, amount: u64) {
        self.score = self.score.saturating_add(amount);
    }

    /// Kill the snake
    pub(crate) fn die(&mut self) {
        self.state = SnakeState::GameOver;
    }

    /// Has the snake's head left a level of size `grid`?
    pub(crate) fn is_out_of_bounds(&self, grid: GridSize) -> bool {
        !grid.contains(self.head())
    }

    pub(crate) fn is_colliding_with_food(&self, food: &Food) -> bool {
        self.head() == food.cell()
    }

    pub(crate) fn check_collision_with_paddle(&self, paddle: &Paddle) -> bool {
        self.head().pixel_rect().intersects(paddle.face())
    }

    /// Push the movement clock forwards by `by`, as though that much time
    /// never happened.  Used when resuming from a pause.
    pub(crate) fn defer_clock(&mut self, by: Duration) {
        if let Some(last) = self.last_move {
            self.last_move = Some(last.checked_add(by).unwrap_or(last));
        }
    }

    /// Iterate over the cells of the snake along with the shape of each
    /// segment, head first
    pub(crate) fn segments(&self) -> impl Iterator<Item = (GridCell, Segment)> + '_ {
        let ahead =
            std::iter::once(None).chain(self.segment_directions.iter().copied().map(Some));
        self.body
            .iter()
            .copied()
            .zip(self.segment_directions.iter().copied())
            .zip(ahead)
            .map(|((cell, own), ahead)| {
                let seg = match ahead {
                    None => Segment::Head(own),
                    Some(front) => Segment::between(own.reverse(), front),
                };
                (cell, seg)
            })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SnakeState {
    Alive,
    GameOver,
}

/// The outcome of [`Snake::advance()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Advance {
    /// Not enough time has passed since the last move (or the snake is dead)
    Waiting,
    /// The snake moved forwards
    Moved,
    /// The snake ran into itself
    Collided,
}

/// The shape of a single cell of the snake's body, for drawing purposes
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Segment {
    /// The head, facing the given direction
    Head(Direction),
    Horizontal,
    Vertical,
    /// A corner piece connecting the cells above and to the right of it, etc.
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
}

impl Segment {
    /// Return the segment connecting the neighbors in directions `back` and
    /// `front`
    fn between(back: Direction, front: Direction) -> Segment {
        use Direction::*;
        match (back, front) {
            (Left | Right, Left | Right) => Segment::Horizontal,
            (Up | Down, Up | Down) => Segment::Vertical,
            (Up, Right) | (Right, Up) => Segment::UpRight,
            (Up, Left) | (Left, Up) => Segment::UpLeft,
            (Down, Right) | (Right, Down) => Segment::DownRight,
            (Down, Left) | (Left, Down) => Segment::DownLeft,
        }
    }
}
