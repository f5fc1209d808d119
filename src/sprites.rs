use crate::game::food::FoodKeys;
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// How to draw a single thing that occupies one cell
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Sprite {
    glyph: String,
    style: Style,
}

impl Sprite {
    /// Create a sprite from a glyph that must be a single printable grapheme
    /// occupying exactly one terminal column
    pub(crate) fn new(glyph: &str, style: Style) -> Result<Sprite, GlyphError> {
        validate_glyph(glyph)?;
        Ok(Sprite {
            glyph: glyph.to_owned(),
            style,
        })
    }

    fn builtin(glyph: char, style: Style) -> Sprite {
        Sprite {
            glyph: glyph.to_string(),
            style,
        }
    }

    pub(crate) fn glyph(&self) -> &str {
        &self.glyph
    }

    pub(crate) fn style(&self) -> Style {
        self.style
    }
}

/// A food sprite as written in the configuration file
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct SpriteSpec {
    glyph: String,
    #[serde(default)]
    style: parse_style::Style,
}

/// The lookup table from sprite keys to sprites
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SpriteSheet {
    sprites: BTreeMap<String, Sprite>,
    food_keys: FoodKeys,
}

impl SpriteSheet {
    /// Build a sprite sheet from the built-in sprites plus the food sprites
    /// given in the configuration file.  Configured sprites whose names match
    /// built-in foods replace them.
    pub(crate) fn with_foods(
        foods: BTreeMap<String, SpriteSpec>,
    ) -> Result<SpriteSheet, SpriteError> {
        let mut sheet = SpriteSheet::default();
        let mut keys = default_food_keys();
        for (name, SpriteSpec { glyph, style }) in foods {
            let sprite = match Sprite::new(&glyph, style.into()) {
                Ok(sprite) => sprite,
                Err(source) => return Err(SpriteError { name, source }),
            };
            if !keys.contains(&name) {
                keys.push(name.clone());
            }
            sheet.sprites.insert(name, sprite);
        }
        if let Some(food_keys) = FoodKeys::new(keys) {
            sheet.food_keys = food_keys;
        }
        log::debug!("Loaded {} sprites", sheet.sprites.len());
        Ok(sheet)
    }

    pub(crate) fn get(&self, key: &str) -> Option<&Sprite> {
        self.sprites.get(key)
    }

    /// The keys of all sprites that food can be drawn with
    pub(crate) fn food_keys(&self) -> &FoodKeys {
        &self.food_keys
    }
}

impl Default for SpriteSheet {
    fn default() -> SpriteSheet {
        let sprites = DEFAULT_FOODS
            .iter()
            .chain(DEFAULT_BACKGROUNDS)
            .map(|&(key, glyph, style)| (key.to_owned(), Sprite::builtin(glyph, style)))
            .collect();
        SpriteSheet {
            sprites,
            food_keys: FoodKeys::new(default_food_keys())
                .unwrap_or_else(|| FoodKeys::single("apple")),
        }
    }
}

fn default_food_keys() -> Vec<String> {
    DEFAULT_FOODS
        .iter()
        .map(|&(key, _, _)| key.to_owned())
        .collect()
}

static DEFAULT_FOODS: &[(&str, char, Style)] = &[
    ("apple", '●', Style::new().fg(Color::LightRed)),
    ("banana", ')', Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    ("blueberry", '•', Style::new().fg(Color::LightBlue)),
    ("cherry", '♥', Style::new().fg(Color::Red)),
    ("grape", '⁂', Style::new().fg(Color::Magenta)),
    ("lemon", '◆', Style::new().fg(Color::LightYellow)),
    ("orange", '●', Style::new().fg(Color::Indexed(208))),
    ("pear", '♦', Style::new().fg(Color::LightGreen)),
];

static DEFAULT_BACKGROUNDS: &[(&str, char, Style)] = &[
    ("background:grass", ',', Style::new().fg(Color::Green)),
    ("background:sand", '.', Style::new().fg(Color::Yellow)),
    ("background:night", '·', Style::new().fg(Color::DarkGray)),
];

fn validate_glyph(glyph: &str) -> Result<(), GlyphError> {
    if glyph.graphemes(true).count() != 1 {
        return Err(GlyphError::NotOneGrapheme(glyph.to_owned()));
    }
    if glyph.width() != 1 {
        return Err(GlyphError::Width(glyph.to_owned()));
    }
    if glyph.chars().any(|c| {
        matches!(
            c.general_category_group(),
            GeneralCategoryGroup::Separator | GeneralCategoryGroup::Other
        )
    }) {
        return Err(GlyphError::NotPrintable(glyph.to_owned()));
    }
    Ok(())
}

#[derive(Debug, Error)]
#[error("invalid sprite for food {name:?}")]
pub(crate) struct SpriteError {
    name: String,
    #[source]
    source: GlyphError,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum GlyphError {
    #[error("glyph {0:?} is not exactly one character")]
    NotOneGrapheme(String),
    #[error("glyph {0:?} is not exactly one column wide")]
    Width(String),
    #[error("glyph {0:?} contains a space, control, or unassigned character")]
    NotPrintable(String),
}
