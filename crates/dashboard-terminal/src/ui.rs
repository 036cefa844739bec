// crates/dashboard-terminal/src/ui.rs

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::components::{
    help::draw_help,
    holdings_table::draw_holdings_table,
    pager::draw_pager,
    status_bar::draw_status_bar,
    summary::draw_summary,
};

pub fn draw(f: &mut Frame, app: &App) {
    // Main layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),   // Header
            Constraint::Length(3),   // Portfolio summary
            Constraint::Min(6),      // Holdings
            Constraint::Length(1),   // Pager
            Constraint::Length(3),   // Status bar
        ])
        .split(f.size());

    draw_header(f, chunks[0], app);
    draw_summary(f, chunks[1], app);

    let view = app.view();
    draw_holdings_table(f, chunks[2], app, &view);
    draw_pager(f, chunks[3], app, &view);

    draw_status_bar(f, chunks[4], app);

    if app.show_help {
        draw_help(f, centered_rect(60, 60, f.size()));
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    // Left: title and user
    let mut left_text = vec![Span::styled(
        "Portfolio",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if let Some(user) = &app.user {
        left_text.push(Span::raw(" - "));
        left_text.push(Span::styled(user.as_str(), Style::default().fg(Color::White)));
    }
    let left_paragraph = Paragraph::new(Line::from(left_text))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(left_paragraph, header_chunks[0]);

    // Center: feed activity
    let updated = app
        .last_update
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());
    let center_text = format!(
        "Feed: {} | Ticks: {} | Updated: {}",
        app.source_label, app.tick_count, updated
    );
    let center_paragraph = Paragraph::new(center_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(center_paragraph, header_chunks[1]);

    // Right: help hints
    let help_text = "[F1]Help [/]Search [S]Sort";
    let right_paragraph = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(right_paragraph, header_chunks[2]);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
