//! List symbols command.

use anyhow::Result;
use insight_core::types::Asset;
use insight_signals::IndicatorKind;

pub async fn run() -> Result<()> {
    println!("Supported Symbols");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("  {:<8}{:<14}{}", "Symbol", "Market", "Fundamentals");
    println!("  ───────────────────────────────────────────────────────");
    for asset in Asset::all() {
        println!(
            "  {:<8}{:<14}{}",
            asset.symbol(),
            asset.market_ticker(),
            asset.coin_id()
        );
    }
    println!();

    println!("Indicators");
    println!("═══════════════════════════════════════════════════════════");
    for kind in IndicatorKind::ALL {
        println!("  {}", kind);
    }
    println!();
    println!("Use --indicators RSI,MACD,SMA50 to select indicators.");

    Ok(())
}
