use dotenv::dotenv;

use alpaca_helper::{NewsClient, RangeOptions, StockClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let stocks = StockClient::from_env()?;

    let quote = stocks.latest_quote("AAPL").await?;
    println!(
        "{}: bid {} x{}  ask {} x{}",
        quote.symbol, quote.bid_price, quote.bid_size, quote.ask_price, quote.ask_size
    );

    let bars = stocks
        .bars("AAPL", "1Day", RangeOptions::new().days_back(10))
        .await?;
    for bar in &bars {
        println!("{}  o {} c {} v {}", bar.timestamp, bar.open, bar.close, bar.volume);
    }

    let news = NewsClient::from_env()?;
    for article in news.latest_news(&["AAPL", "TSLA"], 5).await? {
        println!("[{}] {}", article.source, article.headline);
    }

    Ok(())
}
