use crate::consts;
use crate::leaderboard::ScoreStore;
use crate::options::Options;
use crate::sprites::SpriteSpec;
use crate::util::{LoadError, SaveError};
use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Config {
    /// Default options when no options file is present
    pub(crate) options: Options,

    /// Name under which scores are entered on the leaderboard
    pub(crate) player_name: String,

    /// Settings about data files
    pub(crate) files: FileConfig,

    /// Additional food sprites, keyed by name
    pub(crate) food: BTreeMap<String, SpriteSpec>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            options: Options::default(),
            player_name: String::from(consts::DEFAULT_PLAYER_NAME),
            files: FileConfig::default(),
            food: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("paddlesnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read the configuration file at `path`.  A missing file is only an
    /// error if `allow_missing` is false; otherwise the defaults are used.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid configuration.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        match fs_err::read_to_string(path) {
            Ok(src) => {
                let config = toml::from_str(&src)?;
                log::info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(e) if allow_missing && e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No configuration file at {}; using defaults", path.display());
                Ok(Config::default())
            }
            Err(e) => Err(ConfigError::Read(e)),
        }
    }

    /// Where the options chosen on the main menu are kept between runs
    fn options_path(&self) -> Option<Cow<'_, Path>> {
        match self.files.options_file {
            Some(ref p) => Some(Cow::Borrowed(p)),
            None => Options::default_path().map(Cow::Owned),
        }
    }

    /// Return the options saved by a previous run, falling back to the
    /// `[options]` table when there are none or saving is turned off
    pub(crate) fn load_options(&self) -> Result<Options, LoadError> {
        if !self.files.save_options {
            return Ok(self.options);
        }
        let path = self
            .options_path()
            .ok_or_else(|| LoadError::no_path("options"))?;
        Ok(Options::load(&path)?.unwrap_or(self.options))
    }

    /// Remember `options` for the next run.  Does nothing if saving is
    /// turned off.
    pub(crate) fn save_options(&self, options: Options) -> Result<(), SaveError> {
        if !self.files.save_options {
            return Ok(());
        }
        let path = self
            .options_path()
            .ok_or_else(|| SaveError::no_path("options"))?;
        options.save(&path)?;
        log::debug!("Saved options to {}", path.display());
        Ok(())
    }

    /// Load the leaderboard from the configured or default leaderboard file
    pub(crate) fn load_leaderboard(&self) -> Result<ScoreStore, LoadError> {
        let path = self
            .files
            .leaderboard_file
            .clone()
            .or_else(ScoreStore::default_path)
            .ok_or_else(|| LoadError::no_path("leaderboard"))?;
        ScoreStore::load(path)
    }
}

/// The `[files]` table
#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    #[serde(deserialize_with = "home_relative")]
    options_file: Option<PathBuf>,

    /// Whether the options chosen on the main menu persist between runs
    save_options: bool,

    #[serde(deserialize_with = "home_relative")]
    leaderboard_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            options_file: None,
            save_options: true,
            leaderboard_file: None,
        }
    }
}

fn home_relative<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(expand_tilde)
        .transpose()
        .map_err(serde::de::Error::custom)
}

/// Replace a leading `~` path component with the user's home directory
fn expand_tilde(path: String) -> Result<PathBuf, NoHomeError> {
    let rest = if path == "~" {
        ""
    } else if let Some(rest) = path.strip_prefix("~/") {
        rest
    } else {
        return Ok(PathBuf::from(path));
    };
    let home = dirs::home_dir().ok_or_else(|| NoHomeError(path.clone()))?;
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("could not find the home directory needed to expand {0:?}")]
pub(crate) struct NoHomeError(String);

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("could not determine the local configuration directory")]
    NoPath,
    #[error("could not read configuration file")]
    Read(#[source] std::io::Error),
    #[error("invalid configuration file")]
    Parse(#[from] toml::de::Error),
}
