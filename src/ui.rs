//! The UI renders the application state into a reading view.
//!
//! A progress gauge sits on top, the help bar at the bottom. Between them the table of contents
//! and the guide share the screen on wide terminals; on narrow ones the guide takes the full
//! width and the table of contents becomes an overlay.

use crate::app_state::{AppState, Focus};
use crate::config::Config;
use crate::document::{CalloutKind, DocLine, LineKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Renders the reading view and feeds the content height back into the tracker.
pub fn draw(f: &mut Frame, app: &mut AppState, cfg: &Config) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Progress
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let body = chunks[1];
    app.narrow = body.width < cfg.narrow_width;

    let (toc_area, content_area) = if app.narrow {
        (None, body)
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(cfg.toc_width), Constraint::Min(0)])
            .split(body);
        (Some(columns[0]), columns[1])
    };

    let content_block = Block::default().borders(Borders::ALL).title(
        app.reader()
            .document()
            .title
            .clone()
            .unwrap_or_else(|| "Guide".to_string()),
    );
    let inner = content_block.inner(content_area);
    app.viewport_resized(inner.height);

    draw_progress(f, app, chunks[0]);

    f.render_widget(content_block, content_area);
    let lines: Vec<Line> = app
        .reader()
        .visible_lines()
        .iter()
        .map(|line| render_line(line, cfg.line_numbers))
        .collect();
    f.render_widget(Paragraph::new(lines), inner);

    if let Some(area) = toc_area {
        draw_toc(f, app, area);
    } else if app.toc_open {
        let overlay = Rect {
            width: cfg.toc_width.min(body.width),
            ..body
        };
        f.render_widget(Clear, overlay);
        draw_toc(f, app, overlay);
    }

    draw_help(f, app, chunks[2]);
}

fn draw_progress(f: &mut Frame, app: &AppState, area: Rect) {
    let percent = app.reader().progress();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .percent(percent)
        .label(format!("{percent}%"));
    f.render_widget(gauge, area);
}

fn draw_toc(f: &mut Frame, app: &AppState, area: Rect) {
    let active = app.tracker.active_id();

    let items: Vec<ListItem> = app
        .registry()
        .entries()
        .map(|entry| {
            let is_active = active == Some(entry.id);
            let line = match entry.number {
                Some(n) => Line::from(vec![
                    Span::styled(format!("{n}. "), Style::default().fg(Color::DarkGray)),
                    Span::raw(entry.title.to_string()),
                ]),
                None => Line::from(format!("{}{}", "  ".repeat(entry.depth * 2), entry.title)),
            };
            let style = match (entry.depth, is_active) {
                (0, true) => Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
                (_, true) => Style::default().fg(Color::Cyan).bg(Color::DarkGray),
                (0, false) => Style::default().fg(Color::Gray),
                (_, false) => Style::default().fg(Color::DarkGray),
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let focused = app.focus == Focus::Toc;
    let title = if focused { "Contents *" } else { "Contents" };
    let mut list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    if focused {
        list = list
            .highlight_symbol("▸ ")
            .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED));
    }

    let mut state = ListState::default();
    state.select(Some(app.toc_cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_help(f: &mut Frame, app: &AppState, area: Rect) {
    let help_text = if let Some(ref msg) = app.message {
        msg.clone()
    } else {
        let section = app
            .tracker
            .active_entry()
            .map_or_else(String::new, |entry| format!("{} | ", entry.title));
        let toggle = if app.narrow { "t: Contents | " } else { "" };
        format!(
            "{section}↑/↓: Scroll | Tab: Focus | Enter: Go | n/p: Next/Prev | {toggle}r: Reload | q: Quit"
        )
    };
    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

fn callout_color(kind: CalloutKind) -> Color {
    match kind {
        CalloutKind::Note => Color::Blue,
        CalloutKind::Tip => Color::Magenta,
        CalloutKind::Important => Color::Cyan,
        CalloutKind::Warning => Color::Yellow,
        CalloutKind::Caution => Color::Red,
        CalloutKind::Success => Color::Green,
    }
}

fn render_line(line: &DocLine, line_numbers: bool) -> Line<'static> {
    let text = line.text();
    match line.kind {
        LineKind::Title => Line::styled(
            text,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        LineKind::Heading { depth, .. } => {
            let color = match depth {
                0 => Color::Cyan,
                1 => Color::White,
                _ => Color::Gray,
            };
            Line::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
        }
        LineKind::CalloutLabel(kind) => Line::styled(
            format!("▌ {text}"),
            Style::default()
                .fg(callout_color(kind))
                .add_modifier(Modifier::BOLD),
        ),
        LineKind::Callout(kind) => Line::from(vec![
            Span::styled("▌ ", Style::default().fg(callout_color(kind))),
            Span::raw(text),
        ]),
        LineKind::CodeHeader => {
            let mut spans = vec![Span::raw("  ")];
            let mut segments = line.segments.iter();
            if let Some(language) = segments.next() {
                spans.push(Span::styled(
                    language.text.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            spans.extend(segments.map(|filename| {
                Span::styled(filename.text.clone(), Style::default().fg(Color::Gray))
            }));
            Line::from(spans)
        }
        LineKind::Code { number } => {
            let gutter = if line_numbers {
                Span::styled(format!("{number:>4} │ "), Style::default().fg(Color::DarkGray))
            } else {
                Span::raw("  ")
            };
            let mut spans = vec![gutter];
            spans.extend(line.segments.iter().map(|segment| {
                let style = segment
                    .color
                    .map_or_else(Style::default, |color| Style::default().fg(color));
                Span::styled(segment.text.clone(), style)
            }));
            Line::from(spans)
        }
        LineKind::Body => Line::raw(text),
        LineKind::Blank => Line::default(),
    }
}
