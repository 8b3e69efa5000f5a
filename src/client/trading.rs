use crate::client::{AlpacaClient, Credentials};
use crate::models::{
    Order, OrderClass, OrderInfo, OrderRequest, OrderSide, OrderType, Position, PositionInfo,
    StopLoss, TakeProfit, TimeInForce,
};
use crate::{Error, Result};

/// Which orders [`TradingClient::orders`] returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderStatusFilter {
    #[default]
    Open,
    Closed,
    All,
}

impl OrderStatusFilter {
    fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// Helper client for order submission and position management against the
/// live or paper trading host.
#[derive(Debug, Clone)]
pub struct TradingClient {
    client: AlpacaClient,
}

impl TradingClient {
    pub fn new(credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            client: AlpacaClient::new(credentials)?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client: AlpacaClient::from_env()?,
        })
    }

    pub fn is_paper(&self) -> bool {
        self.client.is_paper()
    }

    // ==================== Orders ====================

    #[tracing::instrument(skip(self))]
    pub async fn buy_market(
        &self,
        symbol: &str,
        qty: f64,
        time_in_force: TimeInForce,
    ) -> Result<OrderInfo> {
        let request = OrderRequest::builder()
            .symbol(symbol)
            .side(OrderSide::Buy)
            .order_type(OrderType::Market)
            .time_in_force(time_in_force)
            .qty(qty)
            .build();
        self.submit(&request).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn sell_market(
        &self,
        symbol: &str,
        qty: f64,
        time_in_force: TimeInForce,
    ) -> Result<OrderInfo> {
        let request = OrderRequest::builder()
            .symbol(symbol)
            .side(OrderSide::Sell)
            .order_type(OrderType::Market)
            .time_in_force(time_in_force)
            .qty(qty)
            .build();
        self.submit(&request).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn buy_limit(
        &self,
        symbol: &str,
        qty: f64,
        limit_price: f64,
        time_in_force: TimeInForce,
    ) -> Result<OrderInfo> {
        let request = OrderRequest::builder()
            .symbol(symbol)
            .side(OrderSide::Buy)
            .order_type(OrderType::Limit)
            .time_in_force(time_in_force)
            .qty(qty)
            .limit_price(limit_price)
            .build();
        self.submit(&request).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn sell_limit(
        &self,
        symbol: &str,
        qty: f64,
        limit_price: f64,
        time_in_force: TimeInForce,
    ) -> Result<OrderInfo> {
        let request = OrderRequest::builder()
            .symbol(symbol)
            .side(OrderSide::Sell)
            .order_type(OrderType::Limit)
            .time_in_force(time_in_force)
            .qty(qty)
            .limit_price(limit_price)
            .build();
        self.submit(&request).await
    }

    /// Market buy wrapped in a bracket: at least one of `take_profit` or
    /// `stop_loss` is required; a stop-limit leg additionally needs the stop.
    #[tracing::instrument(skip(self))]
    pub async fn buy_with_bracket(
        &self,
        symbol: &str,
        qty: f64,
        take_profit: Option<f64>,
        stop_loss: Option<f64>,
        stop_loss_limit: Option<f64>,
        time_in_force: TimeInForce,
    ) -> Result<OrderInfo> {
        let request = bracket_request(
            symbol,
            qty,
            OrderSide::Buy,
            take_profit,
            stop_loss,
            stop_loss_limit,
            time_in_force,
        )?;
        self.submit(&request).await
    }

    /// Market sell (short entry) wrapped in a bracket, with the same leg
    /// requirements as [`TradingClient::buy_with_bracket`].
    #[tracing::instrument(skip(self))]
    pub async fn sell_with_bracket(
        &self,
        symbol: &str,
        qty: f64,
        take_profit: Option<f64>,
        stop_loss: Option<f64>,
        stop_loss_limit: Option<f64>,
        time_in_force: TimeInForce,
    ) -> Result<OrderInfo> {
        let request = bracket_request(
            symbol,
            qty,
            OrderSide::Sell,
            take_profit,
            stop_loss,
            stop_loss_limit,
            time_in_force,
        )?;
        self.submit(&request).await
    }

    pub async fn submit(&self, request: &OrderRequest) -> Result<OrderInfo> {
        let url = self.client.trading_url("/v2/orders")?;
        let order: Order = self.client.post_json(url, request).await?;
        Ok(OrderInfo::from_order(&order))
    }

    #[tracing::instrument(skip(self))]
    pub async fn order(&self, order_id: &str) -> Result<OrderInfo> {
        let url = self.client.trading_url(&format!("/v2/orders/{order_id}"))?;
        let order: Order = self.client.get_json(url, &[]).await?;
        Ok(OrderInfo::from_order(&order))
    }

    #[tracing::instrument(skip(self))]
    pub async fn orders(
        &self,
        status: OrderStatusFilter,
        limit: Option<u32>,
    ) -> Result<Vec<OrderInfo>> {
        let url = self.client.trading_url("/v2/orders")?;
        let mut query = vec![("status", status.as_str().to_string())];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        let orders: Vec<Order> = self.client.get_json(url, &query).await?;
        Ok(orders.iter().map(OrderInfo::from_order).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: &str) -> Result<()> {
        let url = self.client.trading_url(&format!("/v2/orders/{order_id}"))?;
        self.client.delete(url).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn cancel_all_orders(&self) -> Result<()> {
        let url = self.client.trading_url("/v2/orders")?;
        self.client.delete(url).await
    }

    // ==================== Positions ====================

    #[tracing::instrument(skip(self))]
    pub async fn position(&self, symbol: &str) -> Result<PositionInfo> {
        let url = self.client.trading_url(&format!("/v2/positions/{symbol}"))?;
        let position: Position = self.client.get_json(url, &[]).await?;
        Ok(PositionInfo::from_position(&position))
    }

    #[tracing::instrument(skip(self))]
    pub async fn positions(&self) -> Result<Vec<PositionInfo>> {
        let url = self.client.trading_url("/v2/positions")?;
        let positions: Vec<Position> = self.client.get_json(url, &[]).await?;
        Ok(positions.iter().map(PositionInfo::from_position).collect())
    }

    /// Closes a position, entirely by default or partially via `qty` or
    /// `percentage` (mutually exclusive). Returns the closing order.
    #[tracing::instrument(skip(self))]
    pub async fn close_position(
        &self,
        symbol: &str,
        qty: Option<f64>,
        percentage: Option<f64>,
    ) -> Result<OrderInfo> {
        if qty.is_some() && percentage.is_some() {
            return Err(Error::AmbiguousCloseAmount);
        }
        let url = self.client.trading_url(&format!("/v2/positions/{symbol}"))?;
        let mut query = Vec::new();
        if let Some(qty) = qty {
            query.push(("qty", qty.to_string()));
        }
        if let Some(percentage) = percentage {
            query.push(("percentage", percentage.to_string()));
        }
        let order: Order = self.client.delete_json(url, &query).await?;
        Ok(OrderInfo::from_order(&order))
    }
}

fn bracket_request(
    symbol: &str,
    qty: f64,
    side: OrderSide,
    take_profit: Option<f64>,
    stop_loss: Option<f64>,
    stop_loss_limit: Option<f64>,
    time_in_force: TimeInForce,
) -> Result<OrderRequest> {
    if stop_loss_limit.is_some() && stop_loss.is_none() {
        return Err(Error::StopLossRequired);
    }
    if take_profit.is_none() && stop_loss.is_none() {
        return Err(Error::BracketLegMissing);
    }

    let builder = OrderRequest::builder()
        .symbol(symbol)
        .side(side)
        .order_type(OrderType::Market)
        .time_in_force(time_in_force)
        .qty(qty)
        .order_class(OrderClass::Bracket)
        .maybe_take_profit(take_profit.map(|limit_price| TakeProfit { limit_price }))
        .maybe_stop_loss(stop_loss.map(|stop_price| StopLoss {
            stop_price,
            limit_price: stop_loss_limit,
        }));
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_needs_at_least_one_leg() {
        let err = bracket_request("SPY", 10.0, OrderSide::Buy, None, None, None, TimeInForce::Day)
            .expect_err("must fail");
        assert!(matches!(err, Error::BracketLegMissing));
    }

    #[test]
    fn stop_limit_requires_a_stop() {
        let err = bracket_request(
            "SPY",
            10.0,
            OrderSide::Buy,
            Some(550.0),
            None,
            Some(449.0),
            TimeInForce::Day,
        )
        .expect_err("must fail");
        assert!(matches!(err, Error::StopLossRequired));
    }

    #[test]
    fn bracket_carries_both_legs() {
        let request = bracket_request(
            "SPY",
            10.0,
            OrderSide::Sell,
            Some(450.0),
            Some(550.0),
            Some(551.0),
            TimeInForce::Gtc,
        )
        .unwrap();
        assert_eq!(request.order_class, Some(OrderClass::Bracket));
        assert_eq!(request.take_profit.map(|tp| tp.limit_price), Some(450.0));
        let stop = request.stop_loss.unwrap();
        assert_eq!(stop.stop_price, 550.0);
        assert_eq!(stop.limit_price, Some(551.0));
    }

    #[test]
    fn stop_only_bracket_is_accepted() {
        let request = bracket_request(
            "SPY",
            10.0,
            OrderSide::Buy,
            None,
            Some(450.0),
            None,
            TimeInForce::Day,
        )
        .unwrap();
        assert!(request.take_profit.is_none());
        assert_eq!(request.stop_loss.map(|sl| sl.stop_price), Some(450.0));
    }
}
