// =============================================================================
// Smoke probe - manual end-to-end check against a running server
// =============================================================================
//
// Usage:
//   MARKET_API_BASE_URL=http://127.0.0.1:4000/api/v1 cargo run --bin smoke
// =============================================================================

use market_mock::client::MarketDataClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    let client = MarketDataClient::from_env()?;

    println!("Fetching tracked stocks....");
    let stocks = client.list_tracked_stocks().await?;
    for summary in &stocks.data {
        println!(
            "  {} ({}) [{}] intervals: {}",
            summary.symbol,
            summary.name,
            summary.exchange,
            summary.available_intervals.join(", ")
        );
    }

    println!("\nFetching daily stock data....");
    let daily = client.get_daily_stock_data("AAPL", Some(3)).await?;
    println!("{}", serde_json::to_string_pretty(&daily)?);

    println!("\nFetching intraday stock data....");
    let intraday = client.get_intraday_data("AAPL", Some("5min"), Some(3)).await?;
    println!("{}", serde_json::to_string_pretty(&intraday)?);

    Ok(())
}
