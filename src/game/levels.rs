use super::cell::GridSize;
use super::food::{Food, FoodKeys};
use super::paddle::Paddle;
use crate::consts;
use rand::Rng;

/// Keeps track of the paddles & food in play and adds more of them as the
/// score climbs.  Nothing is ever removed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LevelManager {
    grid: GridSize,
    food_keys: FoodKeys,
    paddles: Vec<Paddle>,
    foods: Vec<Food>,
    /// The score at which a paddle was last added
    last_paddle_added_score: u64,
    /// The score at which a food was last added
    last_food_added_score: u64,
}

impl LevelManager {
    pub(crate) fn new(grid: GridSize, food_keys: FoodKeys) -> LevelManager {
        LevelManager {
            grid,
            food_keys,
            paddles: Vec::new(),
            foods: Vec::new(),
            last_paddle_added_score: 0,
            last_food_added_score: 0,
        }
    }

    pub(crate) fn add_initial_elements(&mut self, paddle: Paddle, food: Food) {
        self.paddles.push(paddle);
        self.foods.push(food);
    }

    /// Add a paddle and/or a food if `score` has just reached a new multiple
    /// of the respective thresholds.  Calling this repeatedly with the same
    /// score adds nothing further.
    pub(crate) fn update_level<R: Rng>(&mut self, score: u64, rng: &mut R) -> LevelUp {
        let mut level_up = LevelUp::default();
        if crossed(score, consts::PADDLE_SCORE_STEP, self.last_paddle_added_score) {
            self.paddles.push(Paddle::spawn(rng, self.grid));
            self.last_paddle_added_score = score;
            level_up.paddle = true;
        }
        if crossed(score, consts::FOOD_SCORE_STEP, self.last_food_added_score) {
            self.foods.push(Food::new(rng, self.grid, &self.food_keys));
            self.last_food_added_score = score;
            level_up.food = true;
        }
        level_up
    }

    pub(crate) fn paddles(&self) -> &[Paddle] {
        &self.paddles
    }

    pub(crate) fn paddles_mut(&mut self) -> &mut [Paddle] {
        &mut self.paddles
    }

    pub(crate) fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Return the foods along with what's needed to relocate them
    pub(crate) fn foods_mut(&mut self) -> (&mut [Food], GridSize, &FoodKeys) {
        (&mut self.foods, self.grid, &self.food_keys)
    }
}

fn crossed(score: u64, step: u64, watermark: u64) -> bool {
    score >= step && score % step == 0 && score > watermark
}

/// What [`LevelManager::update_level()`] added
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct LevelUp {
    pub(crate) paddle: bool,
    pub(crate) food: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cell::Positionable;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn seeded() -> (LevelManager, ChaCha12Rng) {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let grid = GridSize::new(40, 15);
        let keys = FoodKeys::new(vec![String::from("apple")]).unwrap();
        let mut levels = LevelManager::new(grid, keys.clone());
        let paddle = Paddle::spawn(&mut rng, grid);
        let food = Food::new(&mut rng, grid, &keys);
        levels.add_initial_elements(paddle, food);
        (levels, rng)
    }

    #[test]
    fn initial_elements() {
        let (levels, _) = seeded();
        assert_eq!(levels.paddles().len(), 1);
        assert_eq!(levels.foods().len(), 1);
    }

    #[test]
    fn paddle_every_fifty() {
        let (mut levels, mut rng) = seeded();
        for score in (0..=40).step_by(10) {
            assert!(!levels.update_level(score, &mut rng).paddle);
        }
        assert_eq!(levels.paddles().len(), 1);
        assert!(levels.update_level(50, &mut rng).paddle);
        assert_eq!(levels.paddles().len(), 2);
        // Staying at 50 for several ticks doesn't add any more
        for _ in 0..5 {
            assert!(!levels.update_level(50, &mut rng).paddle);
        }
        assert_eq!(levels.paddles().len(), 2);
        for score in (60..=90).step_by(10) {
            levels.update_level(score, &mut rng);
        }
        assert_eq!(levels.paddles().len(), 2);
        assert!(levels.update_level(100, &mut rng).paddle);
        assert!(!levels.update_level(100, &mut rng).paddle);
        assert_eq!(levels.paddles().len(), 3);
    }

    #[test]
    fn food_every_thirty() {
        let (mut levels, mut rng) = seeded();
        let mut added = Vec::new();
        for score in (0..=90).step_by(10) {
            // Evaluate each score value twice, as consecutive ticks would
            for _ in 0..2 {
                if levels.update_level(score, &mut rng).food {
                    added.push(score);
                }
            }
        }
        assert_eq!(added, [30, 60, 90]);
        assert_eq!(levels.foods().len(), 4);
    }

    #[rstest]
    #[case(0, 0, false)]
    #[case(50, 0, true)]
    #[case(50, 50, false)]
    #[case(60, 50, false)]
    #[case(100, 50, true)]
    #[case(150, 200, false)]
    fn test_crossed(#[case] score: u64, #[case] watermark: u64, #[case] r: bool) {
        assert_eq!(crossed(score, 50, watermark), r);
    }

    #[test]
    fn skipped_threshold_is_not_backfilled() {
        let (mut levels, mut rng) = seeded();
        // Eating two foods in one tick can jump straight from 40 to 60
        assert_eq!(levels.update_level(40, &mut rng), LevelUp::default());
        assert_eq!(
            levels.update_level(60, &mut rng),
            LevelUp {
                paddle: false,
                food: true
            }
        );
        assert_eq!(levels.paddles().len(), 1);
    }

    #[test]
    fn spawned_food_in_bounds() {
        let (mut levels, mut rng) = seeded();
        for score in (30..=3000).step_by(30) {
            levels.update_level(score, &mut rng);
        }
        assert_eq!(levels.foods().len(), 101);
        let grid = GridSize::new(40, 15);
        for food in levels.foods() {
            assert!(grid.contains(food.cell()));
        }
    }
}
