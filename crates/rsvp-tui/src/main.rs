//! `rsvp-admin` — terminal UI for reviewing and deleting RSVP responses.
//!
//! # Usage
//!
//! ```
//! rsvp-admin --project my-wedding --api-key AIza...
//! rsvp-admin --config ~/.config/rsvp/admin.toml --log-file /tmp/rsvp.log
//! ```

mod app;
mod ui;


use std::{fs::File, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use rsvp_core::{store::SubmissionStore, submission::UnknownAttendance};
use rsvp_store_firestore::{FirestoreConfig, FirestoreStore};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rsvp-admin", about = "Terminal UI for RSVP responses")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Firebase project id.
  #[arg(long, env = "RSVP_PROJECT_ID")]
  project: Option<String>,

  /// Firestore REST endpoint (default: https://firestore.googleapis.com).
  #[arg(long, env = "RSVP_FIRESTORE_URL")]
  base_url: Option<String>,

  /// Web API key, sent as the `key` query parameter.
  #[arg(long, env = "RSVP_API_KEY")]
  api_key: Option<String>,

  /// OAuth2 access token.
  #[arg(long, env = "RSVP_BEARER_TOKEN")]
  token: Option<String>,

  /// Skip responses whose attendance is not recognized.
  #[arg(long)]
  reject_unknown: bool,

  /// Write logs here; nothing is logged otherwise.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  project_id:         String,
  #[serde(default)]
  base_url:           String,
  #[serde(default)]
  api_key:            String,
  #[serde(default)]
  bearer_token:       String,
  #[serde(default)]
  unknown_attendance: UnknownAttendance,
}

fn non_empty(s: String) -> Option<String> { (!s.is_empty()).then_some(s) }

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(path) = &args.log_file {
    let file = File::create(path)
      .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
      .with_env_filter(
        EnvFilter::builder()
          .with_default_directive(LevelFilter::INFO.into())
          .from_env_lossy(),
      )
      .with_ansi(false)
      .with_writer(Mutex::new(file))
      .init();
  }

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let project = args
    .project
    .or_else(|| non_empty(file_cfg.project_id))
    .context("no Firebase project given (--project, RSVP_PROJECT_ID or project_id)")?;
  let mut firestore = FirestoreConfig::new(project);
  if let Some(base_url) = args.base_url.or_else(|| non_empty(file_cfg.base_url)) {
    firestore.base_url = base_url;
  }
  firestore.api_key = args.api_key.or_else(|| non_empty(file_cfg.api_key));
  firestore.bearer_token = args.token.or_else(|| non_empty(file_cfg.bearer_token));

  let policy = if args.reject_unknown {
    UnknownAttendance::Reject
  } else {
    file_cfg.unknown_attendance
  };

  let store = FirestoreStore::new(firestore).context("setting up Firestore client")?;
  let mut app = App::new(store, policy);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  app.start_load();
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop<S>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<S>,
) -> Result<()>
where
  S: SubmissionStore + 'static,
{
  let size = terminal.size().context("reading terminal size")?;
  app.set_columns(ui::columns_for(size.width));

  loop {
    app.drain_completions();
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    match maybe_event {
      Some(Event::Key(key)) => {
        if !app.handle_key(key) {
          break;
        }
      }
      Some(Event::Resize(width, _)) => app.set_columns(ui::columns_for(width)),
      _ => {}
    }
  }

  Ok(())
}
