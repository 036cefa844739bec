// crates/dashboard-terminal/src/components/pager.rs

use dashboard_core::{PageItem, TableView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::holdings::Holding;

/// "Showing x-y of n items" on the left, page links and size on the right.
pub fn draw_pager(f: &mut Frame, area: Rect, app: &App, view: &TableView<'_, Holding>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let showing = if view.showing.is_empty() {
        format!("No items on page {}", view.current_page)
    } else {
        view.showing.to_string()
    };
    f.render_widget(
        Paragraph::new(showing).style(Style::default().fg(Color::Gray)),
        chunks[0],
    );

    let mut spans = vec![Span::styled("‹ ", Style::default().fg(Color::Gray))];
    for item in &view.pages {
        let span = match item {
            PageItem::Page(n) if *n == view.current_page => Span::styled(
                format!("[{}]", n),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            PageItem::Page(n) => Span::raw(format!(" {} ", n)),
            PageItem::Ellipsis => Span::styled(" … ", Style::default().fg(Color::DarkGray)),
        };
        spans.push(span);
    }
    spans.push(Span::styled(" ›", Style::default().fg(Color::Gray)));
    spans.push(Span::raw(format!(
        "   {} / page",
        app.table.state().page_size
    )));

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        chunks[1],
    );
}
