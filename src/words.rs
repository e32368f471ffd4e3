use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::GameError;

static WORDS_DIR: Dir = include_dir!("src/words");

/// A secret word, lowercased and trimmed when it is loaded
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word(String);

impl Word {
    fn from_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First letter upper case, the rest lower case
    pub fn capitalized(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Word lists compiled into the binary
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BundledList {
    #[default]
    Classic,
    Animals,
    Objects,
}

impl BundledList {
    fn file_name(&self) -> String {
        format!("{self}.txt")
    }
}

/// Split a line-delimited list into words, skipping blank lines
pub fn parse(text: &str, origin: &str) -> Result<Vec<Word>, GameError> {
    let words: Vec<Word> = text.lines().filter_map(Word::from_line).collect();

    if words.is_empty() {
        return Err(GameError::EmptyWordList {
            origin: origin.to_string(),
        });
    }

    Ok(words)
}

/// Read a word list from disk
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, GameError> {
    let path = path.as_ref();
    let origin = path.display().to_string();

    let bytes = fs::read(path).map_err(|source| GameError::ResourceUnavailable {
        origin: origin.clone(),
        source,
    })?;

    let words = parse(&String::from_utf8_lossy(&bytes), &origin)?;
    log::info!("loaded {} words from {}", words.len(), origin);
    Ok(words)
}

/// Read one of the bundled word lists
pub fn bundled(list: BundledList) -> Result<Vec<Word>, GameError> {
    let file_name = list.file_name();

    let file = WORDS_DIR
        .get_file(&file_name)
        .ok_or_else(|| GameError::ResourceUnavailable {
            origin: file_name.clone(),
            source: io::Error::new(io::ErrorKind::NotFound, "bundled word list not found"),
        })?;

    parse(&String::from_utf8_lossy(file.contents()), &file_name)
}

/// Uniformly choose one word; `None` only for an empty slice
pub fn pick<'a, R: Rng + ?Sized>(words: &'a [Word], rng: &mut R) -> Option<&'a Word> {
    words.choose(rng)
}
