// crates/dashboard-terminal/src/holdings.rs

use dashboard_core::{Column, Record, Value};

use crate::config::HoldingSeed;

/// Every column key of the holdings table, in display order.
pub const HOLDING_COLUMN_KEYS: &[&str] = &[
    "symbol",
    "name",
    "shares",
    "avgCost",
    "currentPrice",
    "change",
    "value",
];

/// One row of the holdings table.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub shares: u32,
    pub avg_cost: f64,
    pub price: f64,
}

impl Holding {
    pub fn market_value(&self) -> f64 {
        self.shares as f64 * self.price
    }

    pub fn cost_basis(&self) -> f64 {
        self.shares as f64 * self.avg_cost
    }

    /// Change against the average cost, in percent.
    pub fn change_percent(&self) -> f64 {
        if self.avg_cost == 0.0 {
            return 0.0;
        }
        (self.price / self.avg_cost - 1.0) * 100.0
    }
}

impl From<&HoldingSeed> for Holding {
    fn from(seed: &HoldingSeed) -> Self {
        Holding {
            symbol: seed.symbol.clone(),
            name: seed.name.clone(),
            shares: seed.shares,
            avg_cost: seed.avg_cost,
            price: seed.price,
        }
    }
}

impl Record for Holding {
    const FIELDS: &'static [&'static str] = &["symbol", "name", "shares", "avgCost", "currentPrice"];

    fn field(&self, key: &str) -> Value {
        match key {
            "symbol" => self.symbol.as_str().into(),
            "name" => self.name.as_str().into(),
            "shares" => self.shares.into(),
            "avgCost" => self.avg_cost.into(),
            "currentPrice" => self.price.into(),
            _ => Value::Null,
        }
    }
}

/// Column set of the holdings table. Only symbol and name are searched.
pub fn holding_columns() -> Vec<Column<Holding>> {
    vec![
        Column::field("symbol", "Symbol"),
        Column::field("name", "Name"),
        Column::field("shares", "Shares").searchable(false),
        Column::field("avgCost", "Avg Cost")
            .searchable(false)
            .with_cell(|h: &Holding| money(h.avg_cost)),
        Column::field("currentPrice", "Price")
            .searchable(false)
            .with_cell(|h: &Holding| money(h.price)),
        Column::computed("change", "Change", |h: &Holding| h.change_percent().into())
            .searchable(false)
            .with_cell(|h: &Holding| {
                let pct = h.change_percent();
                let arrow = if pct >= 0.0 { '▲' } else { '▼' };
                format!("{} {:.2}%", arrow, pct.abs())
            }),
        Column::computed("value", "Value", |h: &Holding| h.market_value().into())
            .searchable(false)
            .with_cell(|h: &Holding| money(h.market_value())),
    ]
}

/// Portfolio totals over every holding, not just the visible page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub value: f64,
    pub cost: f64,
}

impl Totals {
    pub fn of(holdings: &[Holding]) -> Self {
        holdings.iter().fold(Totals { value: 0.0, cost: 0.0 }, |acc, h| Totals {
            value: acc.value + h.market_value(),
            cost: acc.cost + h.cost_basis(),
        })
    }

    pub fn gain(&self) -> f64 {
        self.value - self.cost
    }

    pub fn gain_percent(&self) -> f64 {
        if self.cost == 0.0 {
            return 0.0;
        }
        (self.value / self.cost - 1.0) * 100.0
    }
}

pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::TableEngine;

    fn aapl() -> Holding {
        Holding {
            symbol: "AAPL".into(),
            name: "Apple Inc.".into(),
            shares: 10,
            avg_cost: 170.0,
            price: 187.0,
        }
    }

    #[test]
    fn columns_match_declared_keys() {
        let columns = holding_columns();
        let keys: Vec<&str> = columns.iter().map(|c| c.key()).collect();
        assert_eq!(keys, HOLDING_COLUMN_KEYS);
        assert!(TableEngine::new(columns).is_ok());
    }

    #[test]
    fn computed_cells() {
        let columns = holding_columns();
        let h = aapl();
        let cell = |key: &str| {
            columns
                .iter()
                .find(|c| c.key() == key)
                .map(|c| c.render(&h))
                .unwrap_or_default()
        };
        assert_eq!(cell("value"), "$1870.00");
        assert_eq!(cell("change"), "▲ 10.00%");
        assert_eq!(cell("currentPrice"), "$187.00");
        assert_eq!(cell("shares"), "10");
    }

    #[test]
    fn totals() {
        let mut loser = aapl();
        loser.symbol = "TSLA".into();
        loser.price = 153.0;
        let totals = Totals::of(&[aapl(), loser]);
        assert_eq!(totals.value, 3400.0);
        assert_eq!(totals.cost, 3400.0);
        assert_eq!(totals.gain(), 0.0);
        assert_eq!(money(-12.5), "-$12.50");
    }
}
