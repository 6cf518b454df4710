//! `phonebook` — contact book served over an interactive menu or HTTP.
//!
//! Reads `phonebook.toml` (or the path given with `--config`), opens the
//! configured storage backend, and then either runs the numbered menu on the
//! terminal or serves the JSON API.
//!
//! # Usage
//!
//! ```text
//! phonebook --config phonebook.toml
//! phonebook --mode http
//! PHONEBOOK_STORAGE=json phonebook --no-clear
//! ```

mod backend;
mod menu;
mod settings;

use std::{io, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use backend::Backend;
use clap::Parser;
use menu::Menu;
use phonebook_core::ContactUsecase;
use settings::{AppConfig, Mode};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Contact book over a terminal menu or a JSON API")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "phonebook.toml")]
  config: PathBuf,

  /// Override the `mode` set in the configuration file.
  #[arg(long, value_enum)]
  mode: Option<Mode>,

  /// Do not clear the terminal between menu screens.
  #[arg(long)]
  no_clear: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  let mut cfg = AppConfig::load(&cli.config)?;
  if let Some(mode) = cli.mode {
    cfg.mode = mode;
  }

  // Logs go to stderr so they never interleave with the menu on stdout.
  let default_level = if cfg.debug { LevelFilter::DEBUG } else { LevelFilter::INFO };
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .init();

  let backend = Backend::from_config(&cfg).await?;
  tracing::info!(storage = backend.name(), mode = ?cfg.mode, "phonebook starting");

  let usecase = ContactUsecase::new(backend);

  match cfg.mode {
    Mode::Http => serve(&cfg, usecase).await,
    Mode::Cli => {
      let stdin    = io::stdin();
      let mut menu = Menu::new(&usecase, stdin.lock(), io::stdout())
        .clear_screen(!cli.no_clear);
      menu.run().await.context("menu loop failed")
    }
  }
}

async fn serve(cfg: &AppConfig, usecase: ContactUsecase<Backend>) -> anyhow::Result<()> {
  let app     = phonebook_api::api_router(Arc::new(usecase));
  let address = format!("{}:{}", cfg.host, cfg.port);

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
