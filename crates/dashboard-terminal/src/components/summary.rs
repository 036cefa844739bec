// crates/dashboard-terminal/src/components/summary.rs

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::holdings::money;

/// Portfolio value, cost basis and overall gain.
pub fn draw_summary(f: &mut Frame, area: Rect, app: &App) {
    let totals = app.totals();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let gain_color = if totals.gain() >= 0.0 { Color::Green } else { Color::Red };

    let cards = [
        ("Total Value", money(totals.value), Color::White),
        ("Total Cost", money(totals.cost), Color::Gray),
        (
            "Total Gain/Loss",
            format!("{} ({:+.2}%)", money(totals.gain()), totals.gain_percent()),
            gain_color,
        ),
    ];

    for ((title, value, color), chunk) in cards.into_iter().zip(chunks.iter()) {
        let line = Line::from(vec![Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )]);
        let card = Paragraph::new(line).block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL),
        );
        f.render_widget(card, *chunk);
    }
}
