// crates/dashboard-terminal/src/components/holdings_table.rs

use dashboard_core::{Highlight, SortDirection, TableView};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::app::{App, InputMode};
use crate::holdings::Holding;

pub fn draw_holdings_table(f: &mut Frame, area: Rect, app: &App, view: &TableView<'_, Holding>) {
    let state = app.table.state();

    let header_cells: Vec<Cell> = app
        .table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let marker = match (&state.sort_key, state.sort_direction) {
                (Some(key), SortDirection::Asc) if key == column.key() => " ↑",
                (Some(key), SortDirection::Desc) if key == column.key() => " ↓",
                _ => "",
            };
            let mut style = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
            if i == app.selected_column {
                style = style.fg(Color::Yellow).add_modifier(Modifier::UNDERLINED);
            }
            Cell::from(format!("{}{}", column.header(), marker)).style(style)
        })
        .collect();
    let header = Row::new(header_cells);

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|holding| {
            let price_style = match app.highlight(&holding.symbol) {
                Highlight::Up => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                Highlight::Down => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                Highlight::Neutral => Style::default(),
            };
            let change_style = if holding.change_percent() >= 0.0 {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };

            let cells: Vec<Cell> = app
                .table
                .columns()
                .iter()
                .map(|column| {
                    let style = match column.key() {
                        "symbol" => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                        "currentPrice" => price_style,
                        "change" => change_style,
                        _ => Style::default(),
                    };
                    Cell::from(column.render(holding)).style(style)
                })
                .collect();
            Row::new(cells)
        })
        .collect();

    let widths = [
        Constraint::Length(7),  // Symbol
        Constraint::Min(18),    // Name
        Constraint::Length(8),  // Shares
        Constraint::Length(11), // Avg cost
        Constraint::Length(11), // Price
        Constraint::Length(10), // Change
        Constraint::Length(12), // Value
    ];

    let title = if view.total_filtered == 0 && !state.search_query.is_empty() {
        format!(" Holdings - no match for \"{}\" ", state.search_query)
    } else {
        " Holdings ".to_string()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(
                if app.input_mode == InputMode::Search {
                    Color::Yellow
                } else {
                    Color::White
                }
            )));

    f.render_widget(table, area);
}
