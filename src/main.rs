mod app;
mod config;
mod draft;
mod theme;
mod tools;
mod ui;
mod wizard;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use tools::{ToolKind, CATALOG};

#[derive(Parser, Debug)]
#[command(name = "penna")]
#[command(version = "0.1.0")]
#[command(about = "A terminal studio for drafting marketing content")]
struct Args {
    /// List the available drafting tools as JSON (for scripts)
    #[arg(long)]
    tools: bool,

    /// Open a specific tool directly (e.g. one-click, optimizer)
    #[arg(short, long)]
    tool: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Handle CLI-only commands
    if args.tools {
        return print_tools();
    }

    let start_tool = match args.tool.as_deref() {
        Some(slug) => match ToolKind::from_slug(slug) {
            Some(tool) => Some(tool),
            None => {
                anyhow::bail!(
                    "Unknown tool '{}'. Run with --tools to list the available ones.",
                    slug
                );
            }
        },
        None => None,
    };

    // Run TUI
    run_tui(start_tool).await
}

fn print_tools() -> Result<()> {
    let tools: Vec<_> = CATALOG
        .iter()
        .map(|tool| {
            serde_json::json!({
                "slug": tool.slug(),
                "title": tool.title(),
                "tagline": tool.tagline(),
                "steps": tool.steps().len(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&tools)?);
    Ok(())
}

async fn run_tui(start_tool: Option<ToolKind>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new()?;
    if let Some(tool) = start_tool {
        app.open_tool(tool);
    }

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.quit_on_q() => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key) {
                                app.status_message = Some(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        // Periodic refresh
        let _ = app.tick();
    }
}

pub fn notify(summary: &str, body: &str) -> Result<()> {
    notify_rust::Notification::new()
        .summary(summary)
        .body(body)
        .icon("accessories-text-editor")
        .show()?;
    Ok(())
}
