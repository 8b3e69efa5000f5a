use dotenv::dotenv;

use alpaca_helper::{AccountClient, OrderStatusFilter, TimeInForce, TradingClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let account = AccountClient::from_env()?;
    println!("cash: {}", account.cash().await?);
    println!("buying power: {}", account.buying_power().await?);
    println!("day trades left: {}", account.day_trades_remaining().await?);

    let trading = TradingClient::from_env()?;
    if !trading.is_paper() {
        anyhow::bail!("set ALPACA_PAPER=true before running the demo order");
    }

    let order = trading
        .buy_with_bracket("SPY", 1.0, Some(700.0), Some(400.0), None, TimeInForce::Day)
        .await?;
    println!("submitted {} ({})", order.id, order.status);

    for order in trading.orders(OrderStatusFilter::Open, Some(10)).await? {
        println!("open: {} {} {}", order.symbol, order.side, order.id);
    }

    Ok(())
}
