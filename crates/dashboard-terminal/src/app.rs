// crates/dashboard-terminal/src/app.rs

use chrono::{DateTime, Local};
use dashboard_core::{
    FeedEvent, Highlight, PageSize, TableEngine, TableError, TableEvent, TableView,
};
use indexmap::IndexMap;
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::holdings::{holding_columns, Holding, Totals};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

pub struct App {
    // Table state
    pub holdings: Vec<Holding>,
    pub table: TableEngine<Holding>,
    pub selected_column: usize,

    // Live prices
    pub highlights: IndexMap<String, Highlight>,
    pub tick_count: u64,
    pub last_update: Option<DateTime<Local>>,
    pub source_label: String,
    pub user: Option<String>,

    // UI state
    pub input_mode: InputMode,
    pub should_quit: bool,
    pub show_help: bool,

    visible_tx: Option<watch::Sender<Vec<String>>>,
}

impl App {
    pub fn new(config: &ClientConfig, source_label: &str) -> Result<Self, TableError> {
        let holdings: Vec<Holding> = config.holdings.iter().map(Holding::from).collect();
        let highlights = holdings
            .iter()
            .map(|h| (h.symbol.clone(), Highlight::Neutral))
            .collect();
        let table = TableEngine::new(holding_columns())?.with_state(config.view_state());

        let selected_column = table
            .state()
            .sort_key
            .as_deref()
            .and_then(|key| table.columns().iter().position(|c| c.key() == key))
            .unwrap_or(0);

        Ok(Self {
            holdings,
            table,
            selected_column,
            highlights,
            tick_count: 0,
            last_update: None,
            source_label: source_label.to_string(),
            user: None,
            input_mode: InputMode::Normal,
            should_quit: false,
            show_help: false,
            visible_tx: None,
        })
    }

    /// Publish the visible symbols to a tick source from now on.
    pub fn set_visible_sender(&mut self, tx: watch::Sender<Vec<String>>) {
        self.visible_tx = Some(tx);
        self.publish_visible();
    }

    pub fn view(&self) -> TableView<'_, Holding> {
        self.table.project(&self.holdings)
    }

    pub fn visible_symbols(&self) -> Vec<String> {
        self.view().rows.iter().map(|h| h.symbol.clone()).collect()
    }

    pub fn highlight(&self, symbol: &str) -> Highlight {
        self.highlights.get(symbol).copied().unwrap_or_default()
    }

    pub fn totals(&self) -> Totals {
        Totals::of(&self.holdings)
    }

    pub fn search_query(&self) -> &str {
        &self.table.state().search_query
    }

    // -------------------------------------------------------------------------
    // Feed
    // -------------------------------------------------------------------------

    pub fn handle_feed_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Moved {
                symbol,
                price,
                highlight,
                ..
            } => {
                let Some(holding) = self.holdings.iter_mut().find(|h| h.symbol == symbol) else {
                    debug!(%symbol, "price for a symbol not in the portfolio");
                    return;
                };
                holding.price = price;
                self.highlights.insert(symbol, highlight);
                self.tick_count += 1;
                self.last_update = Some(Local::now());
                self.dispatch(TableEvent::DataRefreshed);
            }
            FeedEvent::Cleared { symbol } => {
                if let Some(h) = self.highlights.get_mut(&symbol) {
                    *h = Highlight::Neutral;
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Table input
    // -------------------------------------------------------------------------

    fn dispatch(&mut self, event: TableEvent) {
        trace!(?event, "table event");
        self.table.dispatch(event, &self.holdings);
        self.publish_visible();
    }

    fn publish_visible(&self) {
        let Some(tx) = &self.visible_tx else {
            return;
        };
        let symbols = self.visible_symbols();
        tx.send_if_modified(|current| {
            if *current == symbols {
                false
            } else {
                *current = symbols;
                true
            }
        });
    }

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    /// Searching is live: every keystroke re-filters.
    pub fn enter_char(&mut self, c: char) {
        let mut query = self.search_query().to_string();
        query.push(c);
        self.dispatch(TableEvent::Search(query));
    }

    pub fn delete_char(&mut self) {
        let mut query = self.search_query().to_string();
        if query.pop().is_some() {
            self.dispatch(TableEvent::Search(query));
        }
    }

    pub fn submit_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.dispatch(TableEvent::Search(String::new()));
    }

    pub fn select_next_column(&mut self) {
        let n = self.table.columns().len();
        if n > 0 {
            self.selected_column = (self.selected_column + 1) % n;
        }
    }

    pub fn select_prev_column(&mut self) {
        let n = self.table.columns().len();
        if n > 0 {
            self.selected_column = (self.selected_column + n - 1) % n;
        }
    }

    /// Sort by the selected column, flipping direction on repeat.
    pub fn sort_selected(&mut self) {
        if let Some(column) = self.table.columns().get(self.selected_column) {
            let key = column.key().to_string();
            self.dispatch(TableEvent::ToggleSort(key));
        }
    }

    pub fn next_page(&mut self) {
        self.dispatch(TableEvent::NextPage);
    }

    pub fn prev_page(&mut self) {
        self.dispatch(TableEvent::PrevPage);
    }

    pub fn first_page(&mut self) {
        self.dispatch(TableEvent::GoToPage(1));
    }

    pub fn last_page(&mut self) {
        let last = self.table.total_pages(&self.holdings).max(1);
        self.dispatch(TableEvent::GoToPage(last));
    }

    pub fn cycle_page_size(&mut self) {
        let next: PageSize = self.table.state().page_size.next();
        self.dispatch(TableEvent::SetPageSize(next));
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HoldingSeed;
    use dashboard_core::SortDirection;

    fn app() -> App {
        App::new(&ClientConfig::default(), "test").expect("app")
    }

    fn symbols(app: &App) -> Vec<String> {
        app.visible_symbols()
    }

    fn moved(symbol: &str, previous: f64, price: f64, highlight: Highlight) -> FeedEvent {
        FeedEvent::Moved {
            symbol: symbol.to_string(),
            previous,
            price,
            highlight,
        }
    }

    #[test]
    fn starts_sorted_by_value_descending() {
        let app = app();
        assert_eq!(
            symbols(&app),
            vec!["AAPL", "MSFT", "META", "TSLA", "AMZN", "NFLX", "GOOGL"]
        );
        assert_eq!(app.table.columns()[app.selected_column].key(), "value");
    }

    #[test]
    fn feed_events_move_prices_and_highlights() {
        let mut app = app();

        app.handle_feed_event(moved("GOOGL", 131.86, 700.0, Highlight::Up));
        assert_eq!(app.highlight("GOOGL"), Highlight::Up);
        assert_eq!(app.tick_count, 1);
        assert_eq!(symbols(&app)[0], "GOOGL");

        app.handle_feed_event(FeedEvent::Cleared {
            symbol: "GOOGL".into(),
        });
        assert_eq!(app.highlight("GOOGL"), Highlight::Neutral);

        app.handle_feed_event(moved("NVDA", 1.0, 2.0, Highlight::Up));
        assert_eq!(app.tick_count, 1);
        assert_eq!(app.highlight("NVDA"), Highlight::Neutral);
    }

    #[test]
    fn typing_filters_live() {
        let mut app = app();
        app.start_search();
        for c in "inc".chars() {
            app.enter_char(c);
        }
        assert_eq!(app.view().total_filtered, 6);
        assert!(!symbols(&app).contains(&"MSFT".to_string()));

        for c in "flix".chars() {
            app.enter_char(c);
        }
        assert_eq!(symbols(&app), Vec::<String>::new());

        for _ in 0..4 {
            app.delete_char();
        }
        app.delete_char();
        assert_eq!(app.search_query(), "in");

        app.cancel_search();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.view().total_filtered, 7);
    }

    #[test]
    fn sorting_selected_column_toggles() {
        let mut app = app();
        app.selected_column = 0;
        app.sort_selected();
        assert_eq!(app.table.state().sort_key.as_deref(), Some("symbol"));
        assert_eq!(app.table.state().sort_direction, SortDirection::Asc);
        assert_eq!(symbols(&app)[0], "AAPL");

        app.sort_selected();
        assert_eq!(app.table.state().sort_direction, SortDirection::Desc);
        assert_eq!(symbols(&app)[0], "TSLA");

        app.select_prev_column();
        assert_eq!(app.selected_column, 6);
        app.select_next_column();
        assert_eq!(app.selected_column, 0);
    }

    #[test]
    fn paging_through_a_large_portfolio() {
        let config = ClientConfig {
            holdings: (0..25)
                .map(|i| HoldingSeed {
                    symbol: format!("S{:02}", i),
                    name: format!("Stock {}", i),
                    shares: 1,
                    avg_cost: 1.0,
                    price: 1.0 + i as f64,
                })
                .collect(),
            ..ClientConfig::default()
        };
        let mut app = App::new(&config, "test").expect("app");

        app.next_page();
        app.next_page();
        app.next_page();
        assert_eq!(app.table.state().current_page, 3);
        assert_eq!(app.view().rows.len(), 5);

        app.first_page();
        assert_eq!(app.table.state().current_page, 1);
        app.last_page();
        assert_eq!(app.table.state().current_page, 3);

        app.cycle_page_size();
        assert_eq!(app.table.state().page_size, PageSize::TwentyFive);
        assert_eq!(app.table.state().current_page, 1);
        assert_eq!(app.view().total_pages, 1);
    }

    #[test]
    fn visible_page_is_published() {
        let mut app = app();
        let (tx, mut rx) = watch::channel(Vec::new());
        app.set_visible_sender(tx);
        assert_eq!(rx.borrow_and_update().len(), 7);

        app.start_search();
        for c in "msf".chars() {
            app.enter_char(c);
        }
        assert!(rx.has_changed().unwrap_or(false));
        assert_eq!(*rx.borrow_and_update(), vec!["MSFT".to_string()]);

        app.submit_search();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.search_query(), "msf");
    }
}
