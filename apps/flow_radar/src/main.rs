use anyhow::Context;
use chrono::Local;
use clap::{Parser, ValueEnum};
use collectors::{CryptoCollector, ListingSource, QuoteSource, StockCollector};
use colored::Colorize;
use config::ProviderConfig;
use dotenv::dotenv;
use env_logger::{Env, Target};
use log::info;
use prettytable::Table;
use radar::Radar;
use radar_coingecko::CoingeckoClient;
use radar_shared_models::MarketKind;
use radar_yahoo::YahooClient;
use std::time::Duration;
mod collectors;
mod config;
mod display;
mod radar;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum MarketFilter {
    Stocks,
    Crypto,
    All,
}

impl MarketFilter {
    fn includes(self, kind: MarketKind) -> bool {
        match self {
            MarketFilter::All => true,
            MarketFilter::Stocks => kind == MarketKind::Stocks,
            MarketFilter::Crypto => kind == MarketKind::Crypto,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Stock & Crypto Flow Radar", long_about = None)]
struct Args {
    /// What to analyze
    #[arg(long = "type", value_enum, default_value_t = MarketFilter::All)]
    market: MarketFilter,

    /// Number of items to show
    #[arg(long, default_value_t = 15)]
    limit: usize,

    /// Show details for a single stock (e.g. AAPL) instead of the radar
    #[arg(long)]
    info: Option<String>,

    /// Refresh every N seconds until interrupted
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    watch: Option<u64>,

    /// Seconds a fetched market snapshot is reused
    #[arg(long, default_value_t = 60)]
    ttl: u32,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

fn print_table(table: Table) {
    if table.len() == 0 {
        println!("{}", "No data available".red());
    } else {
        table.printstd();
    }
}

async fn display_stocks<S: QuoteSource, C: ListingSource>(radar: &mut Radar<S, C>, limit: usize) {
    println!("{}", "TOP STOCK MOVERS".bold().yellow());
    let movers = radar.get_top_movers(limit).await;
    print_table(display::movers_table(&movers));

    println!("\n{}", "MOST ACTIVE (Volume)".bold());
    let active = radar.get_most_active(limit).await;
    print_table(display::most_active_table(&active));
}

async fn display_crypto<S: QuoteSource, C: ListingSource>(radar: &mut Radar<S, C>, limit: usize) {
    println!("{}", "TOP CRYPTO GAINERS (24h)".bold().green());
    let gainers = radar.get_top_gainers(limit).await;
    print_table(display::listings_table(&gainers));

    println!("\n{}", "TOP CRYPTO LOSERS (24h)".bold().red());
    let losers = radar.get_top_losers(limit).await;
    print_table(display::listings_table(&losers));

    println!("\n{}", "MOST ACTIVE CRYPTO (Volume)".bold());
    let active = radar.get_crypto_most_active(limit).await;
    print_table(display::listings_table(&active));

    println!("\n{}", "TRENDING ON COINGECKO".bold());
    let trending = radar.get_trending().await;
    print_table(display::trending_table(&trending));
}

async fn display_stock_info<S: QuoteSource, C: ListingSource>(radar: &Radar<S, C>, symbol: &str) {
    match radar.get_stock_info(symbol).await {
        Some(info) => display::stock_info_table(&info).printstd(),
        None => println!("{}", format!("No data available for {symbol}").red()),
    }
}

async fn run_cycle<S: QuoteSource, C: ListingSource>(
    radar: &mut Radar<S, C>,
    market: MarketFilter,
    limit: usize,
) {
    println!(
        "{}\n",
        format!("FLOW RADAR - {}", Local::now().format("%Y-%m-%d %H:%M:%S"))
            .bold()
            .cyan()
    );

    if market.includes(MarketKind::Stocks) {
        display_stocks(radar, limit).await;
        println!();
    }

    if market.includes(MarketKind::Crypto) {
        display_crypto(radar, limit).await;
    }

    println!(
        "\n{}",
        "Tip: Use --type stocks/crypto for specific markets".dimmed()
    );
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    let args = Args::parse();

    let config = ProviderConfig::from_env(Duration::from_secs(args.timeout));
    let yahoo = YahooClient::with_options(&config.yahoo_base_url, config.timeout)
        .context("Failed to build Yahoo Finance client")?;
    let coingecko = CoingeckoClient::with_options(
        &config.coingecko_base_url,
        config.coingecko_api_key.as_deref(),
        config.timeout,
    )
    .context("Failed to build CoinGecko client")?;

    let mut radar = Radar::new(
        StockCollector::new(yahoo),
        CryptoCollector::new(coingecko),
        chrono::Duration::seconds(i64::from(args.ttl)),
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    if let Some(symbol) = args.info.as_deref() {
        rt.block_on(display_stock_info(&radar, symbol));
        return Ok(());
    }

    let (market, limit, watch) = (args.market, args.limit, args.watch);
    rt.block_on(async {
        loop {
            run_cycle(&mut radar, market, limit).await;

            let Some(secs) = watch else {
                break;
            };
            info!("Next refresh in {secs}s");
            tokio::time::sleep(Duration::from_secs(secs)).await;
        }
    });

    Ok(())
}
