//! REST field contracts of the trading backend.
//!
//! Only the shapes live here; issuing the HTTP calls is left to whoever
//! embeds the dashboard. Field names follow the backend's camelCase JSON
//! and its upper-case enum spelling.

use std::fmt;

use chrono::{DateTime, Utc};
use dashboard_core::{Record, SortDirection, Value, ViewState};
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::timestamp;

pub const ORDERS_PATH: &str = "/api/v1/orders";
pub const PORTFOLIOS_PATH: &str = "/api/v1/portfolios";
pub const CREATE_USER_PATH: &str = "/api/v1/users/create";

/// `GET /api/v1/portfolios/{session_id}`
pub fn portfolio_path(session_id: &str) -> String {
    format!("{}/{}", PORTFOLIOS_PATH, session_id)
}

// -----------------------------------------------------------------------------
// Orders
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDirection {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
    Failed,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderDirection::Buy => "BUY",
            OrderDirection::Sell => "SELL",
        })
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
        })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Failed => "FAILED",
        })
    }
}

/// Body of `POST /api/v1/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub symbol: String,
    pub quantity: u32,
    pub limit_price: f64,
    pub direction: OrderDirection,
    #[serde(rename = "type")]
    pub order_type: OrderType,
}

impl OrderRequest {
    pub fn market(symbol: impl Into<String>, quantity: u32, direction: OrderDirection) -> Self {
        OrderRequest {
            symbol: symbol.into(),
            quantity,
            limit_price: 0.0,
            direction,
            order_type: OrderType::Market,
        }
    }

    pub fn limit(
        symbol: impl Into<String>,
        quantity: u32,
        limit_price: f64,
        direction: OrderDirection,
    ) -> Self {
        OrderRequest {
            symbol: symbol.into(),
            quantity,
            limit_price,
            direction,
            order_type: OrderType::Limit,
        }
    }

    /// Reject requests the backend would refuse anyway.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.symbol.trim().is_empty() {
            return Err(ProtocolError::InvalidOrder("symbol is required"));
        }
        if self.quantity == 0 {
            return Err(ProtocolError::InvalidOrder("quantity must be positive"));
        }
        if self.order_type == OrderType::Limit
            && !(self.limit_price.is_finite() && self.limit_price > 0.0)
        {
            return Err(ProtocolError::InvalidOrder("limit orders need a positive price"));
        }
        Ok(())
    }
}

/// One order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: u64,
    pub symbol: String,
    pub quantity: u32,
    #[serde(default)]
    pub limit_price: Option<f64>,
    #[serde(default)]
    pub executed_price: Option<f64>,
    pub status: OrderStatus,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub direction: OrderDirection,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub executed_at: Option<DateTime<Utc>>,
}

impl Record for OrderResponse {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "symbol",
        "quantity",
        "limitPrice",
        "executedPrice",
        "status",
        "type",
        "direction",
        "createdAt",
        "executedAt",
    ];

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => self.id.into(),
            "symbol" => self.symbol.as_str().into(),
            "quantity" => self.quantity.into(),
            "limitPrice" => self.limit_price.into(),
            "executedPrice" => self.executed_price.into(),
            "status" => self.status.to_string().into(),
            "type" => self.order_type.to_string().into(),
            "direction" => self.direction.to_string().into(),
            // RFC 3339 in UTC sorts chronologically as text.
            "createdAt" => self.created_at.to_rfc3339().into(),
            "executedAt" => self.executed_at.map(|t| t.to_rfc3339()).into(),
            _ => Value::Null,
        }
    }
}

// -----------------------------------------------------------------------------
// Portfolio
// -----------------------------------------------------------------------------

/// Body of `GET /api/v1/portfolios/{sessionId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub id: u64,
    pub balance: f64,
    #[serde(default)]
    pub positions: Vec<PositionDto>,
}

impl PortfolioResponse {
    /// Cash plus the market value of every position.
    pub fn net_worth(&self) -> f64 {
        self.balance + self.positions.iter().map(|p| p.total_value).sum::<f64>()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDto {
    pub position_id: u64,
    pub stock_id: u64,
    pub stock_name: String,
    pub stock_symbol: String,
    pub quantity: u32,
    pub average_price: f64,
    pub current_price: f64,
    pub total_value: f64,
}

impl Record for PositionDto {
    const FIELDS: &'static [&'static str] = &[
        "positionId",
        "stockId",
        "stockName",
        "stockSymbol",
        "quantity",
        "averagePrice",
        "currentPrice",
        "totalValue",
    ];

    fn field(&self, key: &str) -> Value {
        match key {
            "positionId" => self.position_id.into(),
            "stockId" => self.stock_id.into(),
            "stockName" => self.stock_name.as_str().into(),
            "stockSymbol" => self.stock_symbol.as_str().into(),
            "quantity" => self.quantity.into(),
            "averagePrice" => self.average_price.into(),
            "currentPrice" => self.current_price.into(),
            "totalValue" => self.total_value.into(),
            _ => Value::Null,
        }
    }
}

// -----------------------------------------------------------------------------
// Users
// -----------------------------------------------------------------------------

/// Body of `POST /api/v1/users/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

impl CreateUserRequest {
    /// `None` for a blank username.
    pub fn new(username: &str) -> Option<Self> {
        let username = username.trim();
        if username.is_empty() {
            return None;
        }
        Some(CreateUserRequest {
            username: username.to_string(),
        })
    }
}

/// Created user. Older backends send `sessionId` instead of a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: u64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<DateTime<Utc>>,
}

// -----------------------------------------------------------------------------
// Paging
// -----------------------------------------------------------------------------

/// Query of `GET /api/v1/orders`. `page` is 0-based on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedRequest {
    pub page: usize,
    pub size: usize,
    pub sort_by: String,
    pub direction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Default for PagedRequest {
    fn default() -> Self {
        PagedRequest {
            page: 0,
            size: 10,
            sort_by: "createdAt".to_string(),
            direction: SortDirection::Desc.as_str().to_string(),
            filter: None,
        }
    }
}

impl PagedRequest {
    /// URL query string, without the leading `?`.
    pub fn to_query(&self) -> Result<String, ProtocolError> {
        Ok(serde_urlencoded::to_string(self)?)
    }
}

/// Mirror a local table's state on the server: same page, size, sort
/// and search text.
impl From<&ViewState> for PagedRequest {
    fn from(state: &ViewState) -> Self {
        let defaults = PagedRequest::default();
        let (sort_by, direction) = match &state.sort_key {
            Some(key) => (key.clone(), state.sort_direction.as_str().to_string()),
            None => (defaults.sort_by, defaults.direction),
        };
        PagedRequest {
            page: state.page() - 1,
            size: state.page_size.as_usize(),
            sort_by,
            direction,
            filter: (!state.search_query.is_empty()).then(|| state.search_query.clone()),
        }
    }
}

/// One page of a server-side listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: usize,
    /// 0-based page index.
    pub number: usize,
    pub size: usize,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.number + 1 >= self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::{PageSize, TableEngine, Column};

    #[test]
    fn order_request_uses_backend_field_names() {
        let req = OrderRequest::limit("AAPL", 5, 180.5, OrderDirection::Buy);
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "symbol": "AAPL",
                "quantity": 5,
                "limitPrice": 180.5,
                "direction": "BUY",
                "type": "LIMIT"
            })
        );
        assert!(req.validate().is_ok());
    }

    #[test]
    fn order_validation() {
        assert!(OrderRequest::market("AAPL", 0, OrderDirection::Sell).validate().is_err());
        assert!(OrderRequest::market("  ", 1, OrderDirection::Sell).validate().is_err());
        assert!(OrderRequest::limit("AAPL", 1, 0.0, OrderDirection::Buy).validate().is_err());
        assert!(OrderRequest::market("AAPL", 1, OrderDirection::Buy).validate().is_ok());
    }

    #[test]
    fn order_response_decodes_and_sorts_as_record() {
        let body = r#"[
            {"id": 2, "symbol": "MSFT", "quantity": 1, "limitPrice": null, "executedPrice": 337.1,
             "status": "COMPLETED", "type": "MARKET", "direction": "BUY",
             "createdAt": "2024-03-02T10:00:00Z", "executedAt": "2024-03-02T10:00:01Z"},
            {"id": 1, "symbol": "AAPL", "quantity": 3, "limitPrice": 170.0,
             "status": "PENDING", "type": "LIMIT", "direction": "SELL",
             "createdAt": "2024-03-01T09:30:00Z"}
        ]"#;
        let orders: Vec<OrderResponse> = serde_json::from_str(body).expect("decode");
        assert_eq!(orders[1].executed_at, None);
        assert_eq!(orders[1].field("status"), Value::from("PENDING"));
        assert_eq!(orders[0].field("limitPrice"), Value::Null);

        let engine = TableEngine::new(vec![
            Column::field("symbol", "Symbol"),
            Column::field("createdAt", "Created"),
        ])
        .expect("engine")
        .with_state(ViewState::default().with_sort("createdAt", SortDirection::Asc));
        let view = engine.project(&orders);
        assert_eq!(view.rows[0].id, 1);
    }

    #[test]
    fn portfolio_decodes() {
        let body = r#"{"id": 7, "balance": 1000.0, "positions": [
            {"positionId": 1, "stockId": 3, "stockName": "Apple Inc.", "stockSymbol": "AAPL",
             "quantity": 10, "averagePrice": 170.25, "currentPrice": 182.52, "totalValue": 1825.2}
        ]}"#;
        let portfolio: PortfolioResponse = serde_json::from_str(body).expect("decode");
        assert_eq!(portfolio.positions[0].field("stockSymbol"), Value::from("AAPL"));
        assert!((portfolio.net_worth() - 2825.2).abs() < 1e-9);
        assert_eq!(portfolio_path("abc"), "/api/v1/portfolios/abc");
    }

    #[test]
    fn user_response_accepts_either_session_shape() {
        let old: UserResponse =
            serde_json::from_str(r#"{"id": 1, "username": "ann", "sessionId": "s-1"}"#)
                .expect("decode");
        assert_eq!(old.session_id.as_deref(), Some("s-1"));
        assert_eq!(old.token, None);

        let new: UserResponse = serde_json::from_str(
            r#"{"id": 1, "username": "ann", "token": "t", "expiresAt": "2030-01-01T00:00:00Z"}"#,
        )
        .expect("decode");
        assert!(new.expires_at.is_some());
        assert!(CreateUserRequest::new("   ").is_none());
    }

    #[test]
    fn zone_less_backend_timestamps_decode() {
        let body = r#"{"id": 9, "symbol": "TSLA", "quantity": 2, "limitPrice": 178.0,
            "executedPrice": null, "status": "PENDING", "type": "LIMIT", "direction": "BUY",
            "createdAt": "2024-03-01T09:30:00.123456", "executedAt": null}"#;
        let order: OrderResponse = serde_json::from_str(body).expect("decode");
        assert_eq!(order.created_at.to_rfc3339(), "2024-03-01T09:30:00.123456+00:00");
        assert_eq!(order.executed_at, None);
        assert_eq!(order.field("createdAt"), Value::from("2024-03-01T09:30:00.123456+00:00"));

        let page: Page<OrderResponse> = serde_json::from_str(&format!(
            r#"{{"content": [{}], "totalElements": 1, "totalPages": 1, "number": 0, "size": 10}}"#,
            body
        ))
        .expect("page");
        assert_eq!(page.content[0].id, 9);

        let user: UserResponse = serde_json::from_str(
            r#"{"id": 1, "username": "ann", "token": "t", "expiresAt": "2030-01-01T00:00:00"}"#,
        )
        .expect("decode");
        assert_eq!(user.expires_at.map(|t| t.to_rfc3339()).as_deref(), Some("2030-01-01T00:00:00+00:00"));

        let bad = body.replace("2024-03-01T09:30:00.123456", "last tuesday");
        assert!(serde_json::from_str::<OrderResponse>(&bad).is_err());
    }

    #[test]
    fn paged_request_mirrors_view_state() {
        let state = ViewState {
            search_query: "AAP L".into(),
            current_page: 3,
            page_size: PageSize::TwentyFive,
            ..ViewState::default()
        }
        .with_sort("symbol", SortDirection::Asc);

        let req = PagedRequest::from(&state);
        assert_eq!(req.page, 2);
        assert_eq!(req.size, 25);
        assert_eq!(
            req.to_query().expect("query"),
            "page=2&size=25&sortBy=symbol&direction=asc&filter=AAP+L"
        );

        let unsorted = PagedRequest::from(&ViewState::default());
        assert_eq!(
            unsorted.to_query().expect("query"),
            "page=0&size=10&sortBy=createdAt&direction=desc"
        );

        let tricky = PagedRequest {
            filter: Some("a&b=c".into()),
            ..PagedRequest::default()
        };
        assert!(tricky.to_query().expect("query").ends_with("&filter=a%26b%3Dc"));
    }

    #[test]
    fn page_envelope() {
        let page: Page<u32> = serde_json::from_str(
            r#"{"content": [1, 2], "totalElements": 12, "totalPages": 2, "number": 1, "size": 10}"#,
        )
        .expect("decode");
        assert!(page.is_last());
        assert_eq!(page.content, vec![1, 2]);
    }
}
