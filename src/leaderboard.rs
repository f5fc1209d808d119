use crate::consts;
use crate::util::{LoadError, SaveError};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// One line of the leaderboard
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ScoreEntry {
    pub(crate) name: String,
    pub(crate) score: u64,
}

/// The top scores achieved so far, highest first.
///
/// If the store is backed by a file, the file is rewritten in full after
/// every submission.  The file format is one `name,score` pair per line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ScoreStore {
    path: Option<PathBuf>,
    entries: Vec<ScoreEntry>,
}

impl ScoreStore {
    /// Return the default path of the leaderboard file
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("paddlesnake").join("leaderboard.txt"))
    }

    /// Create an empty leaderboard that is never written to disk
    pub(crate) fn in_memory() -> ScoreStore {
        ScoreStore::default()
    }

    /// Load the leaderboard from the file at `path`.  A missing file yields an
    /// empty leaderboard.  Lines that cannot be parsed are skipped.
    pub(crate) fn load(path: PathBuf) -> Result<ScoreStore, LoadError> {
        let src = match fs_err::read_to_string(&path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(LoadError::read("leaderboard", e)),
        };
        let mut entries = Vec::new();
        for (lineno, line) in (1..).zip(src.lines()) {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Some(entry) => entries.push(entry),
                None => log::warn!(
                    "Skipping malformed line {lineno} of {}: {line:?}",
                    path.display()
                ),
            }
        }
        // `sort_by` is stable, so equal scores keep their file order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(consts::MAX_HIGH_SCORES);
        log::info!(
            "Loaded {} leaderboard entries from {}",
            entries.len(),
            path.display()
        );
        Ok(ScoreStore {
            path: Some(path),
            entries,
        })
    }

    /// Add a score to the leaderboard and save it.
    ///
    /// Returns the zero-based rank of the new entry, or `None` if it didn't
    /// make the cut.  A score tied with existing entries ranks below them.
    /// If saving fails, the in-memory leaderboard is still updated.
    pub(crate) fn submit_score(
        &mut self,
        name: &str,
        score: u64,
    ) -> Result<Option<usize>, SaveError> {
        let rank = self.insert(name, score);
        self.save()?;
        Ok(rank)
    }

    fn insert(&mut self, name: &str, score: u64) -> Option<usize> {
        let index = self.entries.partition_point(|e| e.score >= score);
        if index >= consts::MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(
            index,
            ScoreEntry {
                name: sanitize_name(name),
                score,
            },
        );
        self.entries.truncate(consts::MAX_HIGH_SCORES);
        Some(index)
    }

    /// Return the top `n` entries, highest first
    pub(crate) fn top_scores(&self, n: usize) -> &[ScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    fn save(&self) -> Result<(), SaveError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        write_entries(path, &self.entries)?;
        log::debug!("Saved leaderboard to {}", path.display());
        Ok(())
    }
}

fn write_entries(path: &Path, entries: &[ScoreEntry]) -> Result<(), SaveError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(|e| SaveError::mkdir("leaderboard", e))?;
    }
    let fp = fs_err::File::create(path).map_err(|e| SaveError::write("leaderboard", e))?;
    let mut out = BufWriter::new(fp);
    for entry in entries {
        writeln!(out, "{},{}", entry.name, entry.score)
            .map_err(|e| SaveError::write("leaderboard", e))?;
    }
    out.flush().map_err(|e| SaveError::write("leaderboard", e))?;
    Ok(())
}

/// Parse a `name,score` line.  The name may itself contain commas; the score
/// is whatever follows the last one.
fn parse_line(line: &str) -> Option<ScoreEntry> {
    let (name, score) = line.rsplit_once(',')?;
    let score = score.trim().parse::<u64>().ok()?;
    Some(ScoreEntry {
        name: name.to_owned(),
        score,
    })
}

/// Make `name` safe to store on a single line
fn sanitize_name(name: &str) -> String {
    let name = name
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>();
    let name = name.trim();
    if name.is_empty() {
        String::from(consts::DEFAULT_PLAYER_NAME)
    } else {
        name.to_owned()
    }
}
