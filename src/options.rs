use crate::util::{EnumExt, LoadError, SaveError};
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Gameplay options selectable on the main menu
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default)]
pub(crate) struct Options {
    pub(crate) speed: SpeedLevel,
    pub(crate) background: Background,
}

impl Options {
    /// Return the default path at which options are saved between runs
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("paddlesnake").join("options.json"))
    }

    /// Read options from a JSON file.  Returns `Ok(None)` if the file does
    /// not exist.
    pub(crate) fn load(path: &Path) -> Result<Option<Options>, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LoadError::read("options", e)),
        };
        serde_json::from_slice(&src)
            .map(Some)
            .map_err(|e| LoadError::deserialize("options", e))
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(|e| SaveError::mkdir("options", e))?;
        }
        let mut src =
            serde_json::to_string_pretty(self).map_err(|e| SaveError::serialize("options", e))?;
        src.push('\n');
        fs_err::write(path, &src).map_err(|e| SaveError::write("options", e))?;
        Ok(())
    }

    pub(crate) fn get(&self, key: OptKey) -> OptValue {
        match key {
            OptKey::Speed => self.speed.into(),
            OptKey::Background => self.background.into(),
        }
    }

    /// Set the option `key` to `value`.  Values of the wrong kind for `key`
    /// are ignored.
    pub(crate) fn set(&mut self, key: OptKey, value: OptValue) {
        match (key, value) {
            (OptKey::Speed, OptValue::SpeedLevel(speed)) => self.speed = speed,
            (OptKey::Background, OptValue::Background(bg)) => self.background = bg,
            (key, value) => log::error!("Option {key:?} cannot be set to {value:?}"),
        }
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum OptKey {
    Speed,
    Background,
}

impl OptKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OptKey::Speed => "Speed",
            OptKey::Background => "Background",
        }
    }
}

impl fmt::Display for OptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[enum_dispatch]
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn toggle(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptValue {
    SpeedLevel,
    Background,
}

impl OptValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (value, left, right) = match *self {
            OptValue::SpeedLevel(sp) => (sp.to_string(), sp.can_decrease(), sp.can_increase()),
            OptValue::Background(bg) => (bg.to_string(), bg.can_decrease(), bg.can_increase()),
        };
        write!(
            f,
            "{left} {value:^6} {right}",
            left = if left { '◀' } else { '◁' },
            right = if right { '▶' } else { '▷' }
        )
    }
}

/// How fast the snake moves
#[derive(Clone, Copy, Debug, Default, Enum, Eq, Hash, PartialEq)]
pub(crate) enum SpeedLevel {
    #[default]
    One,
    Two,
    Three,
}

impl SpeedLevel {
    /// Minimum time between two moves of the snake at this speed
    pub(crate) fn interval(self) -> Duration {
        match self {
            SpeedLevel::One => Duration::from_millis(100),
            SpeedLevel::Two => Duration::from_millis(50),
            SpeedLevel::Three => Duration::from_millis(25),
        }
    }

    pub(crate) fn number(self) -> u8 {
        match self {
            SpeedLevel::One => 1,
            SpeedLevel::Two => 2,
            SpeedLevel::Three => 3,
        }
    }
}

impl fmt::Display for SpeedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.number().to_string())
    }
}

impl TryFrom<u8> for SpeedLevel {
    type Error = ParseSpeedError;

    fn try_from(value: u8) -> Result<SpeedLevel, ParseSpeedError> {
        match value {
            1 => Ok(SpeedLevel::One),
            2 => Ok(SpeedLevel::Two),
            3 => Ok(SpeedLevel::Three),
            _ => Err(ParseSpeedError),
        }
    }
}

impl FromStr for SpeedLevel {
    type Err = ParseSpeedError;

    fn from_str(s: &str) -> Result<SpeedLevel, ParseSpeedError> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| ParseSpeedError)
            .and_then(SpeedLevel::try_from)
    }
}

impl Serialize for SpeedLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for SpeedLevel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = u8::deserialize(deserializer)?;
        SpeedLevel::try_from(n).map_err(serde::de::Error::custom)
    }
}

impl Adjustable for SpeedLevel {
    fn increase(&mut self) {
        if let Some(sp) = self.next() {
            *self = sp;
        }
    }

    fn decrease(&mut self) {
        if let Some(sp) = self.prev() {
            *self = sp;
        }
    }

    fn toggle(&mut self) {
        *self = self.next().unwrap_or_else(SpeedLevel::min);
    }

    fn can_increase(&self) -> bool {
        self.next().is_some()
    }

    fn can_decrease(&self) -> bool {
        self.prev().is_some()
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("speed level must be 1, 2, or 3")]
pub(crate) struct ParseSpeedError;

/// The pattern drawn behind everything in the level
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Background {
    #[default]
    Plain,
    Grass,
    Sand,
    Night,
}

impl Background {
    /// The key under which this background's fill sprite is looked up, or
    /// `None` if nothing is drawn
    pub(crate) fn sprite_key(self) -> Option<&'static str> {
        match self {
            Background::Plain => None,
            Background::Grass => Some("background:grass"),
            Background::Sand => Some("background:sand"),
            Background::Night => Some("background:night"),
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Background::Plain => "Plain",
            Background::Grass => "Grass",
            Background::Sand => "Sand",
            Background::Night => "Night",
        };
        f.pad(name)
    }
}

impl Adjustable for Background {
    fn increase(&mut self) {
        if let Some(bg) = self.next() {
            *self = bg;
        }
    }

    fn decrease(&mut self) {
        if let Some(bg) = self.prev() {
            *self = bg;
        }
    }

    fn toggle(&mut self) {
        *self = self.next().unwrap_or_else(Background::min);
    }

    fn can_increase(&self) -> bool {
        self.next().is_some()
    }

    fn can_decrease(&self) -> bool {
        self.prev().is_some()
    }
}
