use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// The trading API encodes every monetary field as a decimal string on the
// wire. Wire records keep them as `Option<String>`; the flat `*Info` value
// objects convert to native numerics with the defaulting rules below.

fn num(value: &Option<String>) -> f64 {
    value
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0)
}

fn num_opt(value: &Option<String>) -> Option<f64> {
    value.as_deref().and_then(|s| s.parse().ok())
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Account {
    pub account_number: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub cash: Option<String>,
    #[serde(default)]
    pub buying_power: Option<String>,
    #[serde(default)]
    pub portfolio_value: Option<String>,
    #[serde(default)]
    pub equity: Option<String>,
    #[serde(default)]
    pub long_market_value: Option<String>,
    #[serde(default)]
    pub short_market_value: Option<String>,
    #[serde(default)]
    pub initial_margin: Option<String>,
    #[serde(default)]
    pub maintenance_margin: Option<String>,
    #[serde(default)]
    pub last_equity: Option<String>,
    #[serde(default)]
    pub multiplier: Option<String>,
    #[serde(default)]
    pub pattern_day_trader: Option<bool>,
    #[serde(default)]
    pub daytrade_count: Option<u32>,
    #[serde(default)]
    pub daytrading_buying_power: Option<String>,
    #[serde(default)]
    pub regt_buying_power: Option<String>,
    #[serde(default)]
    pub trading_blocked: Option<bool>,
    #[serde(default)]
    pub account_blocked: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Account state with every monetary field as a native number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account_number: String,
    pub status: String,
    pub cash: f64,
    pub buying_power: f64,
    pub portfolio_value: f64,
    pub equity: f64,
    pub long_market_value: f64,
    pub short_market_value: f64,
    pub initial_margin: f64,
    pub maintenance_margin: f64,
    pub last_equity: f64,
    pub multiplier: f64,
    pub pattern_day_trader: bool,
    pub daytrade_count: u32,
    pub daytrading_buying_power: f64,
    pub regt_buying_power: f64,
    pub trading_blocked: bool,
    pub account_blocked: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl AccountInfo {
    pub fn from_account(account: &Account) -> Self {
        Self {
            account_number: account.account_number.clone(),
            status: account
                .status
                .clone()
                .unwrap_or_else(|| "UNKNOWN".to_string()),
            cash: num(&account.cash),
            buying_power: num(&account.buying_power),
            portfolio_value: num(&account.portfolio_value),
            equity: num(&account.equity),
            long_market_value: num(&account.long_market_value),
            short_market_value: num(&account.short_market_value),
            initial_margin: num(&account.initial_margin),
            maintenance_margin: num(&account.maintenance_margin),
            last_equity: num(&account.last_equity),
            multiplier: num_opt(&account.multiplier).unwrap_or(1.0),
            pattern_day_trader: account.pattern_day_trader.unwrap_or(false),
            daytrade_count: account.daytrade_count.unwrap_or(0),
            daytrading_buying_power: num(&account.daytrading_buying_power),
            regt_buying_power: num(&account.regt_buying_power),
            trading_blocked: account.trading_blocked.unwrap_or(false),
            account_blocked: account.account_blocked.unwrap_or(false),
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Position {
    pub symbol: String,
    pub asset_id: String,
    #[serde(default)]
    pub qty: Option<String>,
    #[serde(default)]
    pub market_value: Option<String>,
    #[serde(default)]
    pub avg_entry_price: Option<String>,
    #[serde(default)]
    pub current_price: Option<String>,
    #[serde(default)]
    pub unrealized_pl: Option<String>,
    #[serde(default)]
    pub unrealized_plpc: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub cost_basis: Option<String>,
}

/// Open position with native numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionInfo {
    pub symbol: String,
    pub qty: f64,
    pub market_value: f64,
    pub avg_entry_price: f64,
    pub current_price: f64,
    pub unrealized_pl: f64,
    pub unrealized_plpc: f64,
    pub side: String,
    pub cost_basis: f64,
    pub asset_id: String,
}

impl PositionInfo {
    pub fn from_position(position: &Position) -> Self {
        Self {
            symbol: position.symbol.clone(),
            qty: num(&position.qty),
            market_value: num(&position.market_value),
            avg_entry_price: num(&position.avg_entry_price),
            current_price: num(&position.current_price),
            unrealized_pl: num(&position.unrealized_pl),
            unrealized_plpc: num(&position.unrealized_plpc),
            side: position.side.clone().unwrap_or_else(|| "long".to_string()),
            cost_basis: num(&position.cost_basis),
            asset_id: position.asset_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub qty: Option<String>,
    #[serde(default)]
    pub notional: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default, rename = "type")]
    pub order_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub filled_qty: Option<String>,
    #[serde(default)]
    pub filled_avg_price: Option<String>,
    #[serde(default)]
    pub limit_price: Option<String>,
    #[serde(default)]
    pub stop_price: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub filled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub order_class: Option<String>,
}

/// Order state with native numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInfo {
    pub id: String,
    pub symbol: String,
    pub qty: Option<f64>,
    pub notional: Option<f64>,
    pub side: String,
    pub order_type: String,
    pub status: String,
    pub filled_qty: f64,
    pub filled_avg_price: Option<f64>,
    pub limit_price: Option<f64>,
    pub stop_price: Option<f64>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub filled_at: Option<DateTime<Utc>>,
    pub order_class: Option<String>,
}

impl OrderInfo {
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            symbol: order.symbol.clone().unwrap_or_default(),
            qty: num_opt(&order.qty),
            notional: num_opt(&order.notional),
            side: order.side.clone().unwrap_or_else(|| "buy".to_string()),
            order_type: order
                .order_type
                .clone()
                .unwrap_or_else(|| "market".to_string()),
            status: order
                .status
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            filled_qty: num(&order.filled_qty),
            filled_avg_price: num_opt(&order.filled_avg_price),
            limit_price: num_opt(&order.limit_price),
            stop_price: num_opt(&order.stop_price),
            submitted_at: order.submitted_at,
            filled_at: order.filled_at,
            order_class: order.order_class.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PortfolioHistory {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub equity: Vec<f64>,
    #[serde(default)]
    pub profit_loss: Vec<f64>,
    #[serde(default)]
    pub profit_loss_pct: Vec<Option<f64>>,
    #[serde(default)]
    pub base_value: Option<f64>,
}

/// Portfolio value over time as parallel arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHistoryData {
    pub timestamps: Vec<DateTime<Utc>>,
    pub equity: Vec<f64>,
    pub profit_loss: Vec<f64>,
    pub profit_loss_pct: Vec<f64>,
    pub base_value: f64,
}

impl PortfolioHistoryData {
    pub fn from_history(history: &PortfolioHistory) -> Self {
        Self {
            timestamps: history
                .timestamp
                .iter()
                .filter_map(|&ts| DateTime::from_timestamp(ts, 0))
                .collect(),
            equity: history.equity.clone(),
            profit_loss: history.profit_loss.clone(),
            profit_loss_pct: history
                .profit_loss_pct
                .iter()
                .map(|pct| pct.unwrap_or(0.0))
                .collect(),
            base_value: history.base_value.unwrap_or(0.0),
        }
    }
}

// ==================== Order submission ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Market,
    Limit,
    Stop,
    StopLimit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    #[default]
    Day,
    Gtc,
    Ioc,
    Fok,
    Opg,
    Cls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderClass {
    Simple,
    Bracket,
    Oco,
    Oto,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TakeProfit {
    pub limit_price: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StopLoss {
    pub stop_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<f64>,
}

/// Body of an order submission. Built through the generated builder; the
/// trading helper methods cover the common shapes.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notional: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_class: Option<OrderClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<TakeProfit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<StopLoss>,
}

#[bon::bon]
impl OrderRequest {
    #[builder]
    pub fn new(
        symbol: &str,
        side: OrderSide,
        order_type: OrderType,
        #[builder(default)] time_in_force: TimeInForce,
        qty: Option<f64>,
        notional: Option<f64>,
        limit_price: Option<f64>,
        stop_price: Option<f64>,
        order_class: Option<OrderClass>,
        take_profit: Option<TakeProfit>,
        stop_loss: Option<StopLoss>,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            side,
            order_type,
            time_in_force,
            qty,
            notional,
            limit_price,
            stop_price,
            order_class,
            take_profit,
            stop_loss,
        }
    }
}
