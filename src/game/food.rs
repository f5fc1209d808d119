use super::cell::{GridCell, GridSize, Positionable};
use rand::{seq::IndexedRandom, Rng};

/// A piece of food.  When eaten, a `Food` is not removed but rather moved to
/// a new random cell and given a new random look.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    position: GridCell,
    sprite_key: String,
}

impl Food {
    pub(crate) fn new<R: Rng>(rng: &mut R, grid: GridSize, keys: &FoodKeys) -> Food {
        let mut food = Food {
            position: GridCell::new(0, 0),
            sprite_key: String::new(),
        };
        food.relocate_and_change_image(rng, grid, keys);
        food
    }

    /// Move the food to a uniformly random cell of the level and pick a new
    /// sprite for it.  The new cell may be occupied by the snake or a paddle.
    pub(crate) fn relocate_and_change_image<R: Rng>(
        &mut self,
        rng: &mut R,
        grid: GridSize,
        keys: &FoodKeys,
    ) {
        if let Some(key) = keys.0.choose(rng) {
            key.clone_into(&mut self.sprite_key);
        }
        let x = rng.random_range(0..grid.width.max(1));
        let y = rng.random_range(0..grid.height.max(1));
        self.set_cell(GridCell::new(x, y));
    }

    pub(crate) fn sprite_key(&self) -> &str {
        &self.sprite_key
    }
}

impl Positionable for Food {
    fn cell(&self) -> GridCell {
        self.position
    }

    fn set_cell(&mut self, cell: GridCell) {
        self.position = cell;
    }
}

/// The sprite keys that food may be drawn with.  Never empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FoodKeys(Vec<String>);

impl FoodKeys {
    pub(crate) fn new(keys: Vec<String>) -> Option<FoodKeys> {
        (!keys.is_empty()).then_some(FoodKeys(keys))
    }

    pub(crate) fn single(key: &str) -> FoodKeys {
        FoodKeys(vec![key.to_owned()])
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }
}
