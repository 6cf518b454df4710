//! Start-up configuration.
//!
//! Read once from a TOML file (see `phonebook.example.toml`) layered with
//! `PHONEBOOK_*` environment variables. Nested keys use `__`, so `db.url`
//! becomes `PHONEBOOK_DB__URL`.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context as _, bail};
use serde::Deserialize;

/// Which presentation adapter drives the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  #[default]
  Cli,
  Http,
}

/// Which storage backend holds the contacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
  #[default]
  Memory,
  Json,
  Sql,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
  pub driver:       String,
  pub url:          Option<String>,
  pub timeout_secs: u64,
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    Self { driver: "sqlite".into(), url: None, timeout_secs: 10 }
  }
}

impl DatabaseConfig {
  pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  pub mode:      Mode,
  pub storage:   StorageKind,
  pub host:      String,
  pub port:      u16,
  pub debug:     bool,
  pub json_path: PathBuf,
  pub db:        DatabaseConfig,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      mode:      Mode::default(),
      storage:   StorageKind::default(),
      host:      "127.0.0.1".into(),
      port:      8080,
      debug:     false,
      json_path: PathBuf::from("data/contact.json"),
      db:        DatabaseConfig::default(),
    }
  }
}

impl AppConfig {
  /// Load the file at `path`, apply environment overrides, and validate.
  /// A missing file is an error.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    if !path.is_file() {
      bail!("config file not found: {}", path.display());
    }

    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(true))
      .add_source(
        config::Environment::with_prefix("PHONEBOOK")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    let cfg: AppConfig = settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")?;
    cfg.validate()?;
    Ok(cfg)
  }

  /// Reject combinations that cannot start.
  pub fn validate(&self) -> anyhow::Result<()> {
    if self.storage == StorageKind::Sql {
      if self.db.driver != "sqlite" {
        bail!("database driver not supported: {:?}", self.db.driver);
      }
      if self.db.url.as_deref().is_none_or(str::is_empty) {
        bail!("database URL not found (set db.url)");
      }
    }
    Ok(())
  }
}
