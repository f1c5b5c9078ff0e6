//! slashterm line host.
//!
//! Reads one line per keystroke batch from stdin and feeds it to the
//! dispatcher. `ESC [ A` / `ESC [ B` recall history, a bare `ESC` leaves
//! hacker mode, a trailing TAB completes, a leading `?` lists suggestions.
//! Set `SLASHTERM_CONFIG` to a TOML file to override the defaults.

mod app_state;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use app_state::AppState;
use slashterm_types::{InputEvent, ShellConfig};

const CONFIG_ENV: &str = "SLASHTERM_CONFIG";

async fn load_config() -> Result<ShellConfig> {
    let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) else {
        return Ok(ShellConfig::default());
    };
    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(ShellConfig::from_toml(&raw)?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config().await?;
    log::info!(
        "Starting slashterm (marker '{}', content {})",
        config.marker,
        config.content_dir.display(),
    );

    let mut state = AppState::new(&config).await;
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("Welcome! Type {}help to get started.\n", config.marker).as_bytes())
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        for out in state.handle(InputEvent::from_line(&line)).await {
            stdout.write_all(out.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.flush().await?;
    }

    log::info!("stdin closed, exiting");
    Ok(())
}
