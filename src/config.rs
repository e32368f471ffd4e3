use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::canvas::Thickness;
use crate::error::GameError;
use crate::words::{self, BundledList, Word};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub time_limit_secs: u32,
    pub thickness: u8,
    pub word_file: Option<PathBuf>,
    pub word_list: BundledList,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_limit_secs: 10,
            thickness: Thickness::default().get(),
            word_file: None,
            word_list: BundledList::Classic,
        }
    }
}

/// Command line values that take precedence over the stored config
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub time_limit_secs: Option<u32>,
    pub thickness: Option<u8>,
    pub word_file: Option<PathBuf>,
    pub word_list: Option<BundledList>,
}

impl Config {
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(secs) = overrides.time_limit_secs {
            self.time_limit_secs = secs;
        }
        if let Some(thickness) = overrides.thickness {
            self.thickness = thickness;
        }
        // an explicit bundled list wins over a stored word file
        if let Some(list) = overrides.word_list {
            self.word_list = list;
            self.word_file = None;
        }
        if overrides.word_file.is_some() {
            self.word_file = overrides.word_file;
        }
        self
    }

    pub fn thickness(&self) -> Thickness {
        Thickness::new(self.thickness)
    }

    /// Load the configured word file, or the bundled list when none is set
    pub fn load_words(&self) -> Result<Vec<Word>, GameError> {
        match &self.word_file {
            Some(path) => words::load(path),
            None => words::bundled(self.word_list),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            log::debug!("no config at {}, using defaults", self.path.display());
            return Config::default();
        };

        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!("ignoring unreadable config {}: {err}", self.path.display());
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
