// crates/dashboard-terminal/src/components/status_bar.rs

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};

pub fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (msg, style) = match app.input_mode {
        InputMode::Normal => {
            let mut shortcuts = vec![
                Span::styled("[/]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::raw("Search "),
                Span::styled("[←→]", Style::default().fg(Color::Cyan)),
                Span::raw("Column "),
                Span::styled("[S]", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw("ort "),
                Span::styled("[N/P]", Style::default().fg(Color::Green)),
                Span::raw("Page "),
                Span::styled("[Z]", Style::default().fg(Color::Magenta)),
                Span::raw("Page Size "),
                Span::styled("[Q]", Style::default().fg(Color::Gray)),
                Span::raw("uit"),
            ];
            if !app.search_query().is_empty() {
                shortcuts.push(Span::styled(
                    format!("  filter: \"{}\"", app.search_query()),
                    Style::default().fg(Color::Yellow),
                ));
            }
            (Line::from(shortcuts), Style::default())
        }
        InputMode::Search => {
            let input = vec![
                Span::raw("Search: "),
                Span::styled(app.search_query(), Style::default().fg(Color::Yellow)),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
                Span::raw(" [Enter] Keep [Esc] Clear"),
            ];
            (Line::from(input), Style::default().fg(Color::Yellow))
        }
    };

    let status_block = Block::default()
        .borders(Borders::ALL)
        .border_style(style);

    let paragraph = Paragraph::new(msg)
        .block(status_block)
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}
