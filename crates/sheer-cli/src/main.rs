//! `sheer`: terminal admin dashboard and contact-form client for Sheer.
//!
//! # Usage
//!
//! ```text
//! sheer --url http://localhost:8080 --user admin@example.com --password secret
//! sheer --config ~/.config/sheer/config.toml --log-file /tmp/sheer.log
//! sheer submit --name "Jane Doe" --email jane@example.com --message "Hi"
//! ```

mod app;
mod client;
mod session;
mod ui;

use std::{
  io,
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::{App, Msg};
use clap::{Parser, Subcommand};
use client::ApiClient;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use session::SessionGate;
use sheer_core::form::ContactForm;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8080";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sheer", about = "Lead dashboard for the Sheer contact form")]
struct Args {
  /// Path to a TOML config file (url, username, password).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the sheer server (default: http://localhost:8080).
  #[arg(long, env = "SHEER_URL")]
  url: Option<String>,

  /// Admin username.
  #[arg(long, env = "SHEER_USER")]
  user: Option<String>,

  /// Admin password (plaintext).
  #[arg(long, env = "SHEER_PASSWORD")]
  password: Option<String>,

  /// Write logs to this file. The dashboard owns the terminal, so nothing
  /// is logged without it.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Send one contact-form submission and print its id.
  Submit {
    #[arg(long)]
    name:    String,
    #[arg(long)]
    email:   String,
    #[arg(long)]
    message: String,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default, Debug, PartialEq)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
}

/// Connection settings after flags, file and defaults are merged.
#[derive(Debug, PartialEq)]
struct Resolved {
  url:      String,
  username: String,
  password: String,
}

/// CLI flags override config file, which overrides defaults.
fn resolve(args: &Args, file: ConfigFile) -> Resolved {
  let pick = |flag: &Option<String>, file: String| {
    flag.clone().or_else(|| (!file.is_empty()).then_some(file))
  };
  Resolved {
    url:      pick(&args.url, file.url).unwrap_or_else(|| DEFAULT_URL.to_owned()),
    username: pick(&args.user, file.username).unwrap_or_default(),
    password: pick(&args.password, file.password).unwrap_or_default(),
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(path) = &args.log_file {
    init_logging(path)?;
  }

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };
  let resolved = resolve(&args, file_cfg);
  let client = ApiClient::new(&resolved.url)?;

  match args.command {
    Some(Command::Submit { name, email, message }) => {
      submit(&client, ContactForm::new(name, email, message)).await
    }
    None => run_dashboard(client, resolved).await,
  }
}

fn init_logging(path: &Path) -> Result<()> {
  let file = std::fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("opening log file {}", path.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}

// ─── Submit ───────────────────────────────────────────────────────────────────

/// Drive the contact form through one submission.
async fn submit(client: &ApiClient, mut form: ContactForm) -> Result<()> {
  // Validation errors name the missing field and never reach the network.
  let input = form.begin_submit()?;

  let outcome = client.submit(&input).await;
  let id = outcome.as_ref().ok().map(|s| s.id);
  form.finish_submit(outcome.map(|_| ()).map_err(|e| {
    tracing::error!(error = %e, "submission failed");
    "Something went wrong. Please try again."
  }));

  match (id, form.last_error()) {
    (Some(id), _) => {
      println!("{id}");
      Ok(())
    }
    (None, Some(err)) => anyhow::bail!("{err}"),
    (None, None) => anyhow::bail!("submission failed"),
  }
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

async fn run_dashboard(client: ApiClient, resolved: Resolved) -> Result<()> {
  let (tx, mut rx) = mpsc::unbounded_channel();
  let mut app = App::new(SessionGate::new(client), tx);
  app.prefill(resolved.username, resolved.password);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app, &mut rx).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
  rx: &mut mpsc::UnboundedReceiver<Msg>,
) -> Result<()> {
  loop {
    app.sync_session();
    while let Ok(msg) = rx.try_recv() {
      app.apply(msg);
    }

    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && key.kind == KeyEventKind::Press
      && !app.handle_key(key)
    {
      break;
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(argv: &[&str]) -> Args { Args::parse_from(std::iter::once("sheer").chain(argv.iter().copied())) }

  #[test]
  fn flags_override_file_and_defaults() {
    let file = ConfigFile {
      url:      "http://leads.internal".into(),
      username: "file-user".into(),
      password: String::new(),
    };
    let resolved = resolve(&args(&["--user", "flag-user"]), file);
    assert_eq!(resolved, Resolved {
      url:      "http://leads.internal".into(),
      username: "flag-user".into(),
      password: String::new(),
    });
  }

  #[test]
  fn default_url_when_nothing_given() {
    let resolved = resolve(&args(&[]), ConfigFile::default());
    assert_eq!(resolved.url, DEFAULT_URL);
  }

  #[test]
  fn submit_subcommand_parses() {
    let parsed = args(&["submit", "--name", "Jane", "--email", "j@x.com", "--message", "Hi"]);
    assert!(matches!(parsed.command, Some(Command::Submit { ref name, .. }) if name == "Jane"));
  }

  #[test]
  fn config_file_fields_are_optional() {
    let cfg: ConfigFile = toml::from_str(r#"url = "http://x""#).unwrap();
    assert_eq!(cfg.url, "http://x");
    assert!(cfg.username.is_empty());
  }

  #[tokio::test]
  async fn blank_field_fails_without_network() {
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    let err = submit(&client, ContactForm::new("Jane", " ", "Hi")).await.unwrap_err();
    assert_eq!(err.to_string(), "email is required");
  }
}
