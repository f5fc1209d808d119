use crate::config::Config;
use crate::consts;
use crate::leaderboard::ScoreStore;
use crate::options::Options;
use crate::sprites::SpriteSheet;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};
use thiserror::Error;

/// State shared by all screens for the lifetime of the program
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Globals {
    pub(crate) config: Config,
    pub(crate) options: Options,
    pub(crate) leaderboard: ScoreStore,
    pub(crate) sprites: SpriteSheet,
    pub(crate) player_name: String,
}

impl Default for Globals {
    fn default() -> Globals {
        Globals {
            config: Config::default(),
            options: Options::default(),
            leaderboard: ScoreStore::in_memory(),
            sprites: SpriteSheet::default(),
            player_name: String::from(consts::DEFAULT_PLAYER_NAME),
        }
    }
}

/// Navigation over the variants of a fieldless enum, in declaration order
pub(crate) trait EnumExt: Enum + Sized {
    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH.saturating_sub(1))
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize().saturating_add(1);
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

/// Return the area of the display rectangle, centered within `buffer_area`
pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a rectangle of the given size centered within `area`.  If `area` is
/// too small, the result is clipped to it.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

#[derive(Debug, Error)]
#[error("failed to save {what} to disk")]
pub(crate) struct SaveError {
    what: &'static str,
    #[source]
    source: SaveErrorSource,
}

impl SaveError {
    pub(crate) fn no_path(what: &'static str) -> Self {
        SaveError {
            what,
            source: SaveErrorSource::NoPath,
        }
    }

    pub(crate) fn mkdir(what: &'static str, e: std::io::Error) -> Self {
        SaveError {
            what,
            source: SaveErrorSource::Mkdir(e),
        }
    }

    pub(crate) fn serialize(what: &'static str, e: serde_json::Error) -> Self {
        SaveError {
            what,
            source: SaveErrorSource::Serialize(e),
        }
    }

    pub(crate) fn write(what: &'static str, e: std::io::Error) -> Self {
        SaveError {
            what,
            source: SaveErrorSource::Write(e),
        }
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize data")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("failed to read {what} from disk")]
pub(crate) struct LoadError {
    what: &'static str,
    #[source]
    source: LoadErrorSource,
}

impl LoadError {
    pub(crate) fn no_path(what: &'static str) -> Self {
        LoadError {
            what,
            source: LoadErrorSource::NoPath,
        }
    }

    pub(crate) fn read(what: &'static str, e: std::io::Error) -> Self {
        LoadError {
            what,
            source: LoadErrorSource::Read(e),
        }
    }

    pub(crate) fn deserialize(what: &'static str, e: serde_json::Error) -> Self {
        LoadError {
            what,
            source: LoadErrorSource::Deserialize(e),
        }
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize file contents")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
    enum Abc {
        A,
        B,
        C,
    }

    #[test]
    fn enum_ext_iter() {
        assert_eq!(Abc::iter().collect::<Vec<_>>(), [Abc::A, Abc::B, Abc::C]);
        assert_eq!(Abc::min(), Abc::A);
        assert_eq!(Abc::max(), Abc::C);
    }

    #[rstest]
    #[case(Abc::A, Some(Abc::B), None)]
    #[case(Abc::B, Some(Abc::C), Some(Abc::A))]
    #[case(Abc::C, None, Some(Abc::B))]
    fn enum_ext_neighbors(#[case] x: Abc, #[case] next: Option<Abc>, #[case] prev: Option<Abc>) {
        assert_eq!(x.next(), next);
        assert_eq!(x.prev(), prev);
    }

    #[rstest]
    #[case(Rect::new(0, 0, 80, 24), Rect::new(0, 0, 80, 24))]
    #[case(Rect::new(0, 0, 100, 30), Rect::new(10, 3, 80, 24))]
    fn test_get_display_area(#[case] area: Rect, #[case] display: Rect) {
        assert_eq!(get_display_area(area), display);
    }

    #[test]
    fn center_small_rect() {
        let r = center_rect(
            Rect::new(0, 0, 80, 24),
            Size {
                width: 20,
                height: 6,
            },
        );
        assert_eq!(r, Rect::new(30, 9, 20, 6));
    }

    #[test]
    fn error_chain() {
        let e = LoadError::read(
            "options",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert_eq!(e.to_string(), "failed to read options from disk");
        let src = std::error::Error::source(&e).map(ToString::to_string);
        assert_eq!(src.as_deref(), Some("failed to read file"));
    }
}
