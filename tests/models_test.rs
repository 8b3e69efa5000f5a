#[cfg(test)]
mod models {
    use alpaca_helper::models::{
        Account, AccountInfo, Bar, BarData, News, NewsArticle, OptionData, OptionSnapshot, Order,
        OrderClass, OrderInfo, OrderRequest, OrderSide, OrderType, PortfolioHistory,
        PortfolioHistoryData, Position, PositionInfo, Quote, QuoteData, Snapshot, SnapshotData,
        StopLoss, TakeProfit, TimeInForce,
    };
    use alpaca_helper::OptionType;
    use chrono::NaiveDate;

    #[test]
    fn test_bar_wire_shape_flattens() {
        let json = r#"{
            "t": "2024-01-03T09:30:00Z",
            "o": 184.22, "h": 185.88, "l": 183.43, "c": 184.25,
            "v": 58414460, "n": 666764, "vw": 184.3226
        }"#;
        let bar: Bar = serde_json::from_str(json).unwrap();
        let data = BarData::from_bar("AAPL", &bar);
        assert_eq!(data.symbol, "AAPL");
        assert_eq!(data.open, 184.22);
        assert_eq!(data.close, 184.25);
        assert_eq!(data.volume, 58_414_460);
        assert_eq!(data.trade_count, Some(666_764));
        assert_eq!(data.vwap, Some(184.3226));
    }

    #[test]
    fn test_quote_wire_shape_flattens() {
        let json = r#"{
            "t": "2024-01-03T14:45:31.185Z",
            "bp": 184.31, "bs": 2, "ap": 184.34, "as": 1,
            "c": ["R"]
        }"#;
        let quote: Quote = serde_json::from_str(json).unwrap();
        let data = QuoteData::from_quote("AAPL", &quote);
        assert_eq!(data.bid_price, 184.31);
        assert_eq!(data.bid_size, 2);
        assert_eq!(data.ask_size, 1);
        assert_eq!(data.conditions, Some(vec!["R".to_string()]));
    }

    #[test]
    fn test_snapshot_missing_sections_stay_absent() {
        let json = r#"{
            "latestQuote": {
                "t": "2024-01-03T14:45:31Z",
                "bp": 184.31, "bs": 2, "ap": 184.34, "as": 1
            }
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let data = SnapshotData::from_snapshot("AAPL", &snapshot);
        assert!(data.latest_quote.is_some());
        assert!(data.latest_trade.is_none());
        assert!(data.latest_bar.is_none());
        assert!(data.prev_daily_bar.is_none());
    }

    #[test]
    fn test_news_article_collects_image_urls() {
        let json = r#"{
            "id": 24843171,
            "headline": "Apple Releases New Products",
            "author": "Reporter Name",
            "created_at": "2024-01-03T12:00:00Z",
            "updated_at": "2024-01-03T12:30:00Z",
            "summary": "A summary.",
            "content": "<p>Full content</p>",
            "url": "https://example.com/article",
            "images": [
                {"size": "large", "url": "https://example.com/large.png"},
                {"size": "thumb", "url": "https://example.com/thumb.png"}
            ],
            "symbols": ["AAPL"],
            "source": "benzinga"
        }"#;
        let news: News = serde_json::from_str(json).unwrap();
        let article = NewsArticle::from_news(&news);
        assert_eq!(article.id, 24843171);
        assert_eq!(article.symbols, vec!["AAPL".to_string()]);
        assert_eq!(
            article.image_urls,
            vec![
                "https://example.com/large.png".to_string(),
                "https://example.com/thumb.png".to_string()
            ]
        );
    }

    #[test]
    fn test_option_snapshot_enriched_from_symbol() {
        let json = r#"{
            "latestQuote": {
                "t": "2024-01-03T14:45:31Z",
                "bp": 5.10, "bs": 12, "ap": 5.30, "as": 7
            },
            "latestTrade": {
                "t": "2024-01-03T14:40:00Z",
                "p": 5.20, "s": 2
            },
            "greeks": {
                "delta": 0.52, "gamma": 0.015, "theta": -0.08,
                "vega": 0.11, "rho": 0.04
            },
            "impliedVolatility": 0.2345
        }"#;
        let snapshot: OptionSnapshot = serde_json::from_str(json).unwrap();
        let data = OptionData::from_snapshot("AAPL250117C00150000", &snapshot);
        assert_eq!(data.strike, Some(150.0));
        assert_eq!(data.expiration, NaiveDate::from_ymd_opt(2025, 1, 17));
        assert_eq!(data.option_type, Some(OptionType::Call));
        assert_eq!(data.bid, Some(5.10));
        assert_eq!(data.ask, Some(5.30));
        assert_eq!(data.mid, Some(5.20));
        assert_eq!(data.last_price, Some(5.20));
        assert_eq!(data.delta, Some(0.52));
        assert_eq!(data.implied_volatility, Some(0.2345));
    }

    #[test]
    fn test_option_snapshot_with_unparseable_symbol_keeps_quote() {
        let json = r#"{
            "latestQuote": {
                "t": "2024-01-03T14:45:31Z",
                "bp": 1.00, "bs": 1, "ap": 2.00, "as": 1
            }
        }"#;
        let snapshot: OptionSnapshot = serde_json::from_str(json).unwrap();
        let data = OptionData::from_snapshot("WEIRD-SYMBOL", &snapshot);
        assert_eq!(data.symbol, "WEIRD-SYMBOL");
        assert!(data.strike.is_none());
        assert!(data.expiration.is_none());
        assert!(data.option_type.is_none());
        assert_eq!(data.mid, Some(1.50));
    }

    #[test]
    fn test_account_decimal_strings_become_numbers() {
        let json = r#"{
            "account_number": "PA3ABC123",
            "status": "ACTIVE",
            "cash": "10000.50",
            "buying_power": "40002.00",
            "portfolio_value": "15000.25",
            "equity": "15000.25",
            "long_market_value": "5000.00",
            "short_market_value": "0",
            "initial_margin": "2500.00",
            "maintenance_margin": "1250.00",
            "last_equity": "14900.00",
            "multiplier": "4",
            "pattern_day_trader": false,
            "daytrade_count": 1,
            "daytrading_buying_power": "60001.00",
            "regt_buying_power": "30000.50",
            "trading_blocked": false,
            "account_blocked": false,
            "created_at": "2023-06-01T00:00:00Z"
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        let info = AccountInfo::from_account(&account);
        assert_eq!(info.cash, 10000.50);
        assert_eq!(info.buying_power, 40002.00);
        assert_eq!(info.multiplier, 4.0);
        assert_eq!(info.daytrade_count, 1);
        assert!(!info.pattern_day_trader);
    }

    #[test]
    fn test_account_missing_numerics_default() {
        let json = r#"{"account_number": "PA3ABC123"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        let info = AccountInfo::from_account(&account);
        assert_eq!(info.status, "UNKNOWN");
        assert_eq!(info.cash, 0.0);
        assert_eq!(info.multiplier, 1.0);
        assert!(info.created_at.is_none());
    }

    #[test]
    fn test_position_flattens() {
        let json = r#"{
            "symbol": "SPY",
            "asset_id": "b28f4066-5c6d-479b-a2af-85dc1a8f16fb",
            "qty": "10",
            "market_value": "4750.00",
            "avg_entry_price": "450.00",
            "current_price": "475.00",
            "unrealized_pl": "250.00",
            "unrealized_plpc": "0.0555",
            "side": "long",
            "cost_basis": "4500.00"
        }"#;
        let position: Position = serde_json::from_str(json).unwrap();
        let info = PositionInfo::from_position(&position);
        assert_eq!(info.qty, 10.0);
        assert_eq!(info.unrealized_pl, 250.0);
        assert_eq!(info.side, "long");
    }

    #[test]
    fn test_order_flattens_with_optional_fields() {
        let json = r#"{
            "id": "61e69015-8549-4bfd-b9c3-01e75843f47d",
            "symbol": "SPY",
            "qty": "10",
            "side": "buy",
            "type": "limit",
            "status": "new",
            "filled_qty": "0",
            "limit_price": "450.00",
            "submitted_at": "2024-01-03T14:00:00Z",
            "order_class": "simple"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        let info = OrderInfo::from_order(&order);
        assert_eq!(info.qty, Some(10.0));
        assert!(info.notional.is_none());
        assert_eq!(info.order_type, "limit");
        assert_eq!(info.limit_price, Some(450.0));
        assert!(info.filled_at.is_none());
        assert_eq!(info.filled_qty, 0.0);
    }

    #[test]
    fn test_portfolio_history_parallel_arrays() {
        let json = r#"{
            "timestamp": [1704240000, 1704326400],
            "equity": [15000.0, 15100.0],
            "profit_loss": [0.0, 100.0],
            "profit_loss_pct": [null, 0.0066],
            "base_value": 15000.0
        }"#;
        let history: PortfolioHistory = serde_json::from_str(json).unwrap();
        let data = PortfolioHistoryData::from_history(&history);
        assert_eq!(data.timestamps.len(), 2);
        assert_eq!(data.profit_loss_pct, vec![0.0, 0.0066]);
        assert_eq!(data.base_value, 15000.0);
    }

    #[test]
    fn test_order_request_serializes_bracket_shape() {
        let request = OrderRequest::builder()
            .symbol("SPY")
            .side(OrderSide::Buy)
            .order_type(OrderType::Market)
            .time_in_force(TimeInForce::Gtc)
            .qty(10.0)
            .order_class(OrderClass::Bracket)
            .take_profit(TakeProfit { limit_price: 550.0 })
            .stop_loss(StopLoss {
                stop_price: 450.0,
                limit_price: None,
            })
            .build();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["symbol"], "SPY");
        assert_eq!(value["side"], "buy");
        assert_eq!(value["type"], "market");
        assert_eq!(value["time_in_force"], "gtc");
        assert_eq!(value["order_class"], "bracket");
        assert_eq!(value["take_profit"]["limit_price"], 550.0);
        assert_eq!(value["stop_loss"]["stop_price"], 450.0);
        assert!(value["stop_loss"].get("limit_price").is_none());
        assert!(value.get("notional").is_none());
        assert!(value.get("limit_price").is_none());
    }
}
