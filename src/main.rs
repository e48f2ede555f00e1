//! guidepost: A terminal reader for long-form guides with a scroll-spy table of contents.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use guidepost::app_state::{AppState, Focus, Source};
use guidepost::config::{self, Config};
use guidepost::content::{self, Guide};
use guidepost::error::Error;
use guidepost::formats::markdown::MarkdownFormat;
use guidepost::highlight::CodeHighlighter;
use guidepost::ui;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "guidepost")]
#[command(about = "Read a long-form guide with a live table of contents", long_about = None)]
struct Args {
    /// Markdown guide to read (defaults to the bundled SSRF guide)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Config file to load instead of ./guidepost.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the table of contents as JSON and exit
    #[arg(long)]
    dump_toc: bool,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    // A named config must load; the implicit one may be absent or broken.
    let config_result = match &args.config {
        Some(path) => Ok(Config::load_required(path)?),
        None => Config::load(Path::new(config::CONFIG_FILE)),
    };
    let default_filter = config_result
        .as_ref()
        .map_or_else(|_| Config::default().log_filter, |cfg| cfg.log_filter.clone());

    if let Some(log_file) = &args.log_file {
        init_logging(log_file, &default_filter)?;
    }

    let cfg = config_result.unwrap_or_else(|e| {
        warn!(path = config::CONFIG_FILE, error = %e, "ignoring config");
        Config::default()
    });

    let highlighter = CodeHighlighter::new();
    let (guide, source) = load(args.path, &highlighter, cfg.wrap_width)?;

    if args.dump_toc {
        let json = serde_json::to_string_pretty(guide.registry.sections())?;
        println!("{json}");
        return Ok(());
    }

    let state = AppState::new(guide, source, highlighter, &cfg);
    run_tui(state, &cfg)
}

fn init_logging(path: &Path, default_filter: &str) -> Result<(), Error> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| Error::Logging {
            reason: e.to_string(),
        })?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| Error::Logging {
            reason: e.to_string(),
        })
}

fn load(
    path: Option<PathBuf>,
    highlighter: &CodeHighlighter,
    wrap_width: usize,
) -> Result<(Guide, Source), Error> {
    match path {
        Some(path) => {
            let guide = content::load_guide(&path, highlighter, wrap_width)?;
            Ok((guide, Source::File(path)))
        }
        None => {
            let guide = content::parse_guide(
                content::BUNDLED_GUIDE,
                &MarkdownFormat,
                highlighter,
                wrap_width,
            )?;
            Ok((guide, Source::Bundled))
        }
    }
}

fn run_tui(mut app: AppState, cfg: &Config) -> Result<(), Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, cfg);
    app.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        warn!(error = %e, "terminal loop ended with an error");
    }
    info!("exiting");
    result.map_err(Error::from)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cfg: &Config,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app, cfg))?;

        if let Some(timeout) = app.tick_timeout() {
            if !event::poll(timeout)? {
                app.tick();
                continue;
            }
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        app.message = None;

        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Tab => app.toggle_focus(),
            KeyCode::Char('t') => app.toggle_toc(),
            KeyCode::Esc => {
                app.toc_open = false;
                app.focus = Focus::Content;
            }
            KeyCode::Char('r') => app.reload_with_message(),
            KeyCode::Char('n') => {
                app.navigate_relative(true);
            }
            KeyCode::Char('p') => {
                app.navigate_relative(false);
            }
            KeyCode::PageDown | KeyCode::Char(' ') => app.page(true),
            KeyCode::PageUp => app.page(false),
            KeyCode::Enter => {
                if !app.open_cursor_entry() {
                    app.message = Some("Section not found".to_string());
                }
            }
            KeyCode::Up | KeyCode::Char('k') => match app.focus {
                Focus::Toc => app.move_cursor(-1),
                Focus::Content => app.scroll_by(-1),
            },
            KeyCode::Down | KeyCode::Char('j') => match app.focus {
                Focus::Toc => app.move_cursor(1),
                Focus::Content => app.scroll_by(1),
            },
            KeyCode::Home | KeyCode::Char('g') => match app.focus {
                Focus::Toc => app.cursor_to_edge(false),
                Focus::Content => app.jump(false),
            },
            KeyCode::End | KeyCode::Char('G') => match app.focus {
                Focus::Toc => app.cursor_to_edge(true),
                Focus::Content => app.jump(true),
            },
            _ => {}
        }
    }
}
