use super::cell::GridSize;
use super::direction::Direction;
use super::food::{Food, FoodKeys};
use super::levels::LevelManager;
use super::paddle::Paddle;
use super::snake::{Advance, Snake};
use crate::consts;
use rand::Rng;
use std::time::{Duration, Instant};

/// Callbacks through which the engine reports to whoever is displaying the
/// game
pub(crate) trait TickHooks {
    /// Draw the current state of the game.  Called at the end of every tick
    /// that did anything.
    fn render(&mut self, scene: &Scene<'_>);

    /// Called exactly once per game, with the final score, when the game ends
    fn game_over(&mut self, score: u64);
}

/// A read-only view of everything that needs to be drawn
#[derive(Clone, Copy, Debug)]
pub(crate) struct Scene<'a> {
    pub(crate) grid: GridSize,
    pub(crate) snake: &'a Snake,
    pub(crate) paddles: &'a [Paddle],
    pub(crate) foods: &'a [Food],
    pub(crate) state: EngineState,
}

/// Parameters for starting a new game
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct EngineSettings {
    pub(crate) grid: GridSize,
    /// Minimum time between two moves of the snake
    pub(crate) speed_interval: Duration,
    pub(crate) food_keys: FoodKeys,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EngineState {
    Running,
    /// The game was paused at the given moment
    Paused(Instant),
    Over(Ending),
}

/// How the game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Ending {
    /// The snake ran into itself
    SelfCollision,
    /// A paddle hit the snake's head
    Paddle,
    /// The snake left the level
    Wall,
}

/// Drives a single game of Snake from start to finish.
///
/// The engine does not keep time itself: whoever owns it calls
/// [`Engine::tick()`] once per frame with the current time, and the snake
/// moves whenever enough time has passed since its last move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Engine<R> {
    rng: R,
    grid: GridSize,
    snake: Snake,
    levels: LevelManager,
    state: EngineState,
}

impl<R: Rng> Engine<R> {
    pub(crate) fn new_with_rng(settings: EngineSettings, mut rng: R) -> Engine<R> {
        let EngineSettings {
            grid,
            speed_interval,
            food_keys,
        } = settings;
        let snake = Snake::new(
            consts::SNAKE_START,
            consts::INITIAL_SNAKE_LENGTH,
            Direction::Right,
            speed_interval,
        );
        let paddle = Paddle::spawn(&mut rng, grid);
        let food = Food::new(&mut rng, grid, &food_keys);
        let mut levels = LevelManager::new(grid, food_keys);
        levels.add_initial_elements(paddle, food);
        Engine {
            rng,
            grid,
            snake,
            levels,
            state: EngineState::Running,
        }
    }

    /// Advance the game by one frame.  Does nothing if the game is paused or
    /// over.
    pub(crate) fn tick<H: TickHooks>(&mut self, now: Instant, hooks: &mut H) {
        if self.state != EngineState::Running {
            return;
        }
        if let Some(ending) = self.step(now) {
            self.state = EngineState::Over(ending);
            log::info!(
                "Game over ({ending:?}); final score {}",
                self.snake.score()
            );
            hooks.game_over(self.snake.score());
        }
        hooks.render(&self.scene());
    }

    fn step(&mut self, now: Instant) -> Option<Ending> {
        for paddle in self.levels.paddles_mut() {
            paddle.move_step();
            if self.snake.check_collision_with_paddle(paddle) {
                self.snake.die();
                return Some(Ending::Paddle);
            }
        }
        if self.snake.advance(now) == Advance::Collided {
            return Some(Ending::SelfCollision);
        }
        let (foods, grid, keys) = self.levels.foods_mut();
        for food in foods {
            if self.snake.is_colliding_with_food(food) {
                self.snake.grow();
                self.snake.increase_score(consts::FOOD_SCORE);
                food.relocate_and_change_image(&mut self.rng, grid, keys);
            }
        }
        if self.snake.is_out_of_bounds(self.grid) {
            self.snake.die();
            return Some(Ending::Wall);
        }
        if self.snake.is_game_over() {
            return Some(Ending::SelfCollision);
        }
        let level_up = self.levels.update_level(self.snake.score(), &mut self.rng);
        if level_up.paddle {
            log::debug!(
                "Score reached {}; now {} paddles",
                self.snake.score(),
                self.levels.paddles().len()
            );
        }
        if level_up.food {
            log::debug!(
                "Score reached {}; now {} foods",
                self.snake.score(),
                self.levels.foods().len()
            );
        }
        None
    }
}

impl<R> Engine<R> {
    pub(crate) fn scene(&self) -> Scene<'_> {
        Scene {
            grid: self.grid,
            snake: &self.snake,
            paddles: self.levels.paddles(),
            foods: self.levels.foods(),
            state: self.state,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> EngineState {
        self.state
    }

    pub(crate) fn score(&self) -> u64 {
        self.snake.score()
    }

    /// Buffer a turn for the snake.  Returns `false` if the turn was rejected
    /// (because it's a reversal or the game isn't running).
    pub(crate) fn change_direction(&mut self, direction: Direction) -> bool {
        self.state == EngineState::Running && self.snake.change_direction(direction)
    }

    pub(crate) fn pause(&mut self, now: Instant) {
        if self.state == EngineState::Running {
            self.state = EngineState::Paused(now);
        }
    }

    /// Unpause the game.  Time spent paused does not count towards the
    /// snake's next move.
    pub(crate) fn resume(&mut self, now: Instant) {
        if let EngineState::Paused(since) = self.state {
            self.snake.defer_clock(now.saturating_duration_since(since));
            self.state = EngineState::Running;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cell::{GridCell, PixelRect, Positionable};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;
    const INTERVAL: Duration = Duration::from_millis(100);

    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    struct Recorder {
        heads: Vec<GridCell>,
        lengths: Vec<usize>,
        game_overs: Vec<u64>,
    }

    impl TickHooks for Recorder {
        fn render(&mut self, scene: &Scene<'_>) {
            self.heads.push(scene.snake.head());
            self.lengths.push(scene.snake.body.len());
        }

        fn game_over(&mut self, score: u64) {
            self.game_overs.push(score);
        }
    }

    fn food_keys() -> FoodKeys {
        FoodKeys::new(vec![String::from("apple"), String::from("cherry")]).unwrap()
    }

    /// An engine on a `width`×`height` level whose only paddle is parked on
    /// the bottom row, well away from the snake, and whose only food is at
    /// `food`
    fn engine_with(width: i32, height: i32, food: GridCell) -> Engine<ChaCha12Rng> {
        let grid = GridSize::new(width, height);
        let mut engine = Engine::new_with_rng(
            EngineSettings {
                grid,
                speed_interval: INTERVAL,
                food_keys: food_keys(),
            },
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        let mut levels = LevelManager::new(grid, food_keys());
        let bottom = (height - 1) * consts::CELL_SIZE;
        let paddle = Paddle::new(
            PixelRect::new(40, bottom, 100, 20),
            40,
            grid.pixel_width() - 40,
            3,
        );
        let mut f = Food::new(&mut engine.rng, grid, &food_keys());
        f.set_cell(food);
        levels.add_initial_elements(paddle, f);
        engine.levels = levels;
        engine
    }

    #[test]
    fn new_engine() {
        let engine = Engine::new_with_rng(
            EngineSettings {
                grid: consts::LEVEL_SIZE,
                speed_interval: INTERVAL,
                food_keys: food_keys(),
            },
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        assert_eq!(engine.state(), EngineState::Running);
        assert_eq!(engine.score(), 0);
        let scene = engine.scene();
        assert_eq!(scene.snake.head(), GridCell::new(5, 5));
        assert_eq!(scene.snake.body.len(), 3);
        assert_eq!(scene.snake.direction, Direction::Right);
        assert_eq!(scene.paddles.len(), 1);
        assert_eq!(scene.foods.len(), 1);
        assert!(consts::LEVEL_SIZE.contains(scene.foods[0].cell()));
    }

    #[test]
    fn eat_food() {
        let t0 = Instant::now();
        let mut engine = engine_with(40, 20, GridCell::new(6, 5));
        let mut rec = Recorder::default();
        engine.tick(t0, &mut rec);
        assert_eq!(engine.scene().snake.head(), GridCell::new(6, 5));
        assert_eq!(engine.score(), 10);
        // Growth shows up on the next move
        assert_eq!(engine.scene().snake.body.len(), 3);
        assert_eq!(engine.scene().foods.len(), 1);
        assert!(GridSize::new(40, 20).contains(engine.scene().foods[0].cell()));
        assert_ne!(engine.scene().foods[0].cell(), GridCell::new(6, 5));
        engine.tick(t0 + INTERVAL, &mut rec);
        assert_eq!(engine.scene().snake.body.len(), 4);
        assert_eq!(rec.lengths, [3, 4]);
        assert!(rec.game_overs.is_empty());
    }

    #[test]
    fn snake_waits_between_moves() {
        let t0 = Instant::now();
        let mut engine = engine_with(40, 20, GridCell::new(30, 15));
        let mut rec = Recorder::default();
        engine.tick(t0, &mut rec);
        engine.tick(t0 + Duration::from_millis(17), &mut rec);
        engine.tick(t0 + Duration::from_millis(34), &mut rec);
        engine.tick(t0 + INTERVAL, &mut rec);
        // Every tick renders, but the snake only moved twice
        assert_eq!(
            rec.heads,
            [
                GridCell::new(6, 5),
                GridCell::new(6, 5),
                GridCell::new(6, 5),
                GridCell::new(7, 5)
            ]
        );
    }

    #[test]
    fn paddle_hit() {
        let t0 = Instant::now();
        let mut engine = engine_with(40, 20, GridCell::new(30, 15));
        let grid = GridSize::new(40, 20);
        let mut levels = LevelManager::new(grid, food_keys());
        // Covers pixels [40, 140) on the snake's row; the head is at [100, 120)
        let paddle = Paddle::new(PixelRect::new(40, 100, 100, 20), 40, 760, 3);
        let food = engine.levels.foods()[0].clone();
        levels.add_initial_elements(paddle, food);
        engine.levels = levels;
        let mut rec = Recorder::default();
        engine.tick(t0, &mut rec);
        assert_eq!(engine.state(), EngineState::Over(Ending::Paddle));
        assert!(engine.scene().snake.is_game_over());
        // The snake never got to move
        assert_eq!(rec.heads, [GridCell::new(5, 5)]);
        assert_eq!(rec.game_overs, [0]);
    }

    #[test]
    fn hit_wall() {
        let t0 = Instant::now();
        let mut engine = engine_with(8, 10, GridCell::new(0, 0));
        let mut rec = Recorder::default();
        for i in 0..3 {
            engine.tick(t0 + INTERVAL * i, &mut rec);
        }
        assert_eq!(engine.state(), EngineState::Over(Ending::Wall));
        assert_eq!(
            rec.heads,
            [GridCell::new(6, 5), GridCell::new(7, 5), GridCell::new(8, 5)]
        );
        assert_eq!(rec.game_overs, [0]);
    }

    #[test]
    fn self_collision() {
        let t0 = Instant::now();
        let mut engine = engine_with(40, 20, GridCell::new(30, 15));
        engine.snake.body = [(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)]
            .into_iter()
            .map(|(x, y)| GridCell::new(x, y))
            .collect();
        engine.snake.segment_directions = [
            Direction::Left,
            Direction::Up,
            Direction::Right,
            Direction::Right,
            Direction::Right,
        ]
        .into_iter()
        .collect();
        engine.snake.direction = Direction::Left;
        assert!(engine.change_direction(Direction::Down));
        let mut rec = Recorder::default();
        engine.tick(t0, &mut rec);
        assert_eq!(engine.state(), EngineState::Over(Ending::SelfCollision));
        assert_eq!(rec.heads, [GridCell::new(5, 5)]);
        assert_eq!(rec.game_overs, [0]);
    }

    #[test]
    fn game_over_reported_once() {
        let t0 = Instant::now();
        let mut engine = engine_with(8, 10, GridCell::new(7, 5));
        let mut rec = Recorder::default();
        for i in 0..20 {
            engine.tick(t0 + INTERVAL * i, &mut rec);
        }
        assert_eq!(engine.state(), EngineState::Over(Ending::Wall));
        assert_eq!(rec.game_overs, [10]);
        // Nothing is rendered after the final frame
        assert_eq!(rec.heads.len(), 3);
        assert!(!engine.change_direction(Direction::Up));
    }

    #[test]
    fn pause_freezes_clock() {
        let t0 = Instant::now();
        let mut engine = engine_with(40, 20, GridCell::new(30, 15));
        let mut rec = Recorder::default();
        engine.tick(t0, &mut rec);
        engine.pause(t0 + Duration::from_millis(10));
        assert!(matches!(engine.state(), EngineState::Paused(_)));
        engine.tick(t0 + Duration::from_millis(500), &mut rec);
        assert_eq!(rec.heads.len(), 1);
        assert!(!engine.change_direction(Direction::Up));
        engine.resume(t0 + Duration::from_secs(1));
        assert_eq!(engine.state(), EngineState::Running);
        // Only 10ms of the interval had elapsed before pausing
        engine.tick(t0 + Duration::from_millis(1050), &mut rec);
        assert_eq!(engine.scene().snake.head(), GridCell::new(6, 5));
        engine.tick(t0 + Duration::from_millis(1090), &mut rec);
        assert_eq!(engine.scene().snake.head(), GridCell::new(7, 5));
    }

    #[test]
    fn resume_without_pause() {
        let t0 = Instant::now();
        let mut engine = engine_with(40, 20, GridCell::new(30, 15));
        engine.resume(t0);
        assert_eq!(engine.state(), EngineState::Running);
    }

    #[test]
    fn level_up_spawns_paddle() {
        let t0 = Instant::now();
        let mut engine = engine_with(40, 20, GridCell::new(6, 5));
        engine.snake.increase_score(40);
        let mut rec = Recorder::default();
        engine.tick(t0, &mut rec);
        assert_eq!(engine.score(), 50);
        assert_eq!(engine.scene().paddles.len(), 2);
        assert_eq!(engine.scene().foods.len(), 1);
    }

    #[test]
    fn level_up_spawns_food() {
        let t0 = Instant::now();
        let mut engine = engine_with(40, 20, GridCell::new(6, 5));
        engine.snake.increase_score(20);
        let mut rec = Recorder::default();
        engine.tick(t0, &mut rec);
        assert_eq!(engine.score(), 30);
        assert_eq!(engine.scene().paddles.len(), 1);
        assert_eq!(engine.scene().foods.len(), 2);
    }
}
