use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid high score '{0}'")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, HighScoreError>;

/// The one scalar that outlives a session, kept as plain text in a file.
#[derive(Clone, Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is a fresh install, not an error.
    pub fn load(&self) -> Result<u32> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let trimmed = contents.trim();
        trimmed
            .parse::<u32>()
            .map_err(|_| HighScoreError::Parse(trimmed.to_string()))
    }

    /// Load, logging and falling back to 0 on any failure.
    pub fn load_or_default(&self) -> u32 {
        match self.load() {
            Ok(score) => {
                info!("Loaded high score {} from {}", score, self.path.display());
                score
            }
            Err(e) => {
                warn!("Could not load high score from {}: {}", self.path.display(), e);
                0
            }
        }
    }

    pub fn save(&self, score: u32) -> Result<()> {
        fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}
