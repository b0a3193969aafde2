pub mod app;
pub mod async_ops;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod dispatch;
pub mod notify;
pub mod stores;
mod theme;
mod ui;
mod views;

use std::io::stdout;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use app::App;
use botdesk_api_client::ApiClient;
use config::ConsoleConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::debug;

/// Launch the console against the configured backend.
pub fn run(config: ConsoleConfig) -> Result<()> {
    let client = ApiClient::new(
        &config.server.url,
        Duration::from_secs(config.server.timeout_secs),
    )?;

    let mut app = App::new(config);
    app.bootstrap();

    // Terminal setup
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, client);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    client: ApiClient,
) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let client = Arc::new(client);
    let downloads_dir = Arc::new(app.config.downloads_dir());

    // Results arrive on a channel so slow requests never block the UI;
    // superseded responses are discarded by the caches on arrival.
    let (tx, rx) = mpsc::channel::<async_ops::CommandResult>();

    loop {
        // ── Spawn pending async commands ─────────────────────────────
        for cmd in app.take_pending_commands() {
            debug!(?cmd, "spawning command");
            let tx = tx.clone();
            let client = Arc::clone(&client);
            let downloads_dir = Arc::clone(&downloads_dir);
            rt.spawn(async move {
                let result = async_ops::execute(cmd, &client, &downloads_dir).await;
                let _ = tx.send(result);
            });
        }

        // ── Drain completed results ──────────────────────────────────
        let now = Instant::now();
        while let Ok(result) = rx.try_recv() {
            app.apply_command_result(result, now);
        }

        app.tick(now);

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_key(key.code, Instant::now()) {
                    break;
                }
            }
        }
    }
    Ok(())
}
