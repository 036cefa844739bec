//! Directional highlight derived from price moves.

/// Transient flag telling a view which way a price last moved.
///
/// `Up` / `Down` are only set right after a tick that moved the price in
/// that direction; the [`PriceFeed`](crate::PriceFeed) decays them back to
/// `Neutral` once the decay window passes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Hash)]
pub enum Highlight {
    #[default]
    Neutral,
    Up,
    Down,
}

impl Highlight {
    /// Direction of a move from `previous` to `current`.
    ///
    /// Returns `None` when the price did not change, which means "no
    /// transition" rather than "reset to neutral".
    pub fn from_move(previous: f64, current: f64) -> Option<Self> {
        if current > previous {
            Some(Highlight::Up)
        } else if current < previous {
            Some(Highlight::Down)
        } else {
            None
        }
    }

    /// `true` for `Up` and `Down`.
    pub fn is_active(self) -> bool {
        !matches!(self, Highlight::Neutral)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Highlight::Neutral => "none",
            Highlight::Up => "up",
            Highlight::Down => "down",
        }
    }
}
