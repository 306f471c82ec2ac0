//! File interfaces: the JSON game-state file and the player roster.
//!
//! Thin wrappers over `std::fs` + `serde_json`. Failures are always
//! surfaced as [`SaveError`] with the offending path; nothing is
//! swallowed.

use std::fs;
use std::path::Path;

use crate::codec::GameSnapshot;
use crate::error::SaveError;

/// Write a game snapshot as pretty-printed JSON.
pub fn save_game(path: impl AsRef<Path>, snapshot: &GameSnapshot) -> Result<(), SaveError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a game snapshot back from a JSON file.
pub fn load_game(path: impl AsRef<Path>) -> Result<GameSnapshot, SaveError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

/// Read player names, one per line; blank and whitespace-only lines are
/// ignored.
pub fn read_roster(path: impl AsRef<Path>) -> Result<Vec<String>, SaveError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Write player names, one per line, each with a trailing newline.
pub fn write_roster(path: impl AsRef<Path>, names: &[String]) -> Result<(), SaveError> {
    let path = path.as_ref();
    let mut text = String::new();
    for name in names {
        text.push_str(name);
        text.push('\n');
    }
    fs::write(path, text).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })
}
