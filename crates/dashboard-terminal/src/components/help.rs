// crates/dashboard-terminal/src/components/help.rs

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

const SHORTCUTS: &[(&str, &str, Color)] = &[
    ("/", "Search symbol or name", Color::Yellow),
    ("Esc", "Clear search", Color::Yellow),
    ("←/h →/l", "Select column", Color::Cyan),
    ("S/s Enter", "Sort by column (again to flip)", Color::Cyan),
    ("N/n PgDn", "Next page", Color::Green),
    ("P/p PgUp", "Previous page", Color::Green),
    ("Home End", "First / last page", Color::Green),
    ("Z/z", "Cycle page size", Color::Magenta),
    ("F1 ?", "Toggle help", Color::Gray),
    ("Q/q", "Quit", Color::Red),
];

pub fn draw_help(f: &mut Frame, area: Rect) {
    // Clear the area first for the overlay
    f.render_widget(Clear, area);

    let help_items: Vec<ListItem> = SHORTCUTS
        .iter()
        .map(|(keys, action, color)| {
            ListItem::new(Line::from(vec![
                Span::styled(*keys, Style::default().fg(*color).add_modifier(Modifier::BOLD)),
                Span::raw(format!(" - {}", action)),
            ]))
        })
        .collect();

    let help_list = List::new(help_items)
        .block(Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(help_list, area);

    let footer = Paragraph::new("Press F1 or ESC to close help")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    let footer_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    f.render_widget(footer, footer_area);
}
