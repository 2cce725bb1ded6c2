use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the content API base URL.
pub const API_URL_VAR: &str = "ALVEO_API_URL";
/// Environment variable holding the content API key.
pub const API_KEY_VAR: &str = "ALVEO_API_KEY";

/// Credentials for the remote content API.
#[derive(Clone)]
pub struct Credentials {
    pub api_url: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Read both credentials from the environment.
    ///
    /// Fails with [`Error::MissingSetting`] naming the first variable that is
    /// unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(Error::MissingSetting(name))
        };
        Ok(Self {
            api_url: required(API_URL_VAR)?,
            api_key: required(API_KEY_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Train/test split parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitOptions {
    /// Share of records assigned to training, in `[0.0, 1.0]`.
    pub train_fraction: f64,
    pub seed: u64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            train_fraction: 0.8,
            seed: 42,
        }
    }
}

impl SplitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn train_fraction(mut self, fraction: f64) -> Result<Self> {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(Error::InvalidOption(format!(
                "train fraction must be between 0.0 and 1.0, got {fraction}"
            )));
        }
        self.train_fraction = fraction;
        Ok(self)
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Builder for a corpus preparation run.
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    /// Catalogue CSV with `speaker, item, media, prompt` columns.
    pub catalogue_path: PathBuf,
    /// Downloaded audio lands in `<audio_root>/<speaker>/<encoded_prompt>.wav`.
    pub audio_root: PathBuf,
    /// Kaldi recipe directory; data files go under `<kaldi_root>/data`.
    pub kaldi_root: PathBuf,
    pub split: SplitOptions,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            catalogue_path: PathBuf::from("dataset.csv"),
            audio_root: PathBuf::from("./audio_data"),
            kaldi_root: PathBuf::from("."),
            split: SplitOptions::default(),
        }
    }
}

impl PrepareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalogue_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalogue_path = path.into();
        self
    }

    pub fn audio_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.audio_root = dir.into();
        self
    }

    pub fn kaldi_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.kaldi_root = dir.into();
        self
    }

    pub fn split(mut self, split: SplitOptions) -> Self {
        self.split = split;
        self
    }

    /// `audio_root` made absolute against the current directory.
    pub fn resolve_audio_root(&self) -> Result<PathBuf> {
        Ok(std::path::absolute(&self.audio_root)?)
    }

    /// `<kaldi_root>/data`
    pub fn data_dir(&self) -> PathBuf {
        self.kaldi_root.join("data")
    }

    /// `<kaldi_root>/data/<name>`
    pub fn data_subdir(&self, name: &str) -> PathBuf {
        self.data_dir().join(name)
    }

    /// `<kaldi_root>/data/local`
    pub fn local_dir(&self) -> PathBuf {
        self.data_subdir("local")
    }

    pub fn catalogue(&self) -> &Path {
        &self.catalogue_path
    }
}
