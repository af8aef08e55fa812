use prettytable::{Cell, Row, Table, format};
use radar_shared_models::{MarketListing, Quote, StockInfo, TrendingEntry};

const NAME_WIDTH: usize = 20;

/// Groups the integer digits of an already formatted number with commas.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn format_usd(value: f64, decimals: usize) -> String {
    format!("${}", group_thousands(&format!("{value:.decimals$}")))
}

pub fn format_stock_price(price: f64) -> String {
    format_usd(price, 2)
}

/// Sub-dollar coins get four decimals.
pub fn format_crypto_price(price: f64) -> String {
    if price < 1.0 {
        format_usd(price, 4)
    } else {
        format_usd(price, 2)
    }
}

pub fn format_percent(change: f64) -> String {
    format!("{change:+.2}%")
}

pub fn format_volume(volume: f64) -> String {
    group_thousands(&format!("{volume:.0}"))
}

pub fn format_rank(rank: Option<u32>) -> String {
    match rank {
        Some(rank) => format!("#{rank}"),
        None => "N/A".to_string(),
    }
}

pub fn truncate_name(name: &str) -> String {
    name.chars().take(NAME_WIDTH).collect()
}

fn change_cell(change: Option<f64>) -> Cell {
    match change {
        Some(change) if change > 0.0 => Cell::new(&format_percent(change)).style_spec("Fgr"),
        Some(change) => Cell::new(&format_percent(change)).style_spec("Frr"),
        None => Cell::new("N/A").style_spec("r"),
    }
}

fn right(text: &str) -> Cell {
    Cell::new(text).style_spec("r")
}

fn new_table(titles: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(
        titles
            .iter()
            .map(|title| Cell::new(title).style_spec("bFc"))
            .collect(),
    ));
    table
}

pub fn movers_table(quotes: &[Quote]) -> Table {
    let mut table = new_table(&["Symbol", "Price", "Change %", "Volume"]);

    for quote in quotes {
        table.add_row(Row::new(vec![
            Cell::new(&quote.symbol).style_spec("Fc"),
            right(&format_stock_price(quote.price)),
            change_cell(quote.change_percent()),
            right(&format_volume(quote.volume as f64)),
        ]));
    }

    table
}

pub fn most_active_table(quotes: &[Quote]) -> Table {
    let mut table = new_table(&["Symbol", "Price", "Volume", "Change %"]);

    for quote in quotes {
        table.add_row(Row::new(vec![
            Cell::new(&quote.symbol).style_spec("Fc"),
            right(&format_stock_price(quote.price)),
            right(&format_volume(quote.volume as f64)),
            change_cell(quote.change_percent()),
        ]));
    }

    table
}

pub fn listings_table(listings: &[MarketListing]) -> Table {
    let mut table = new_table(&["#", "Symbol", "Name", "Price", "24h Change", "Volume ($)"]);

    for (idx, listing) in listings.iter().enumerate() {
        table.add_row(Row::new(vec![
            right(&(idx + 1).to_string()),
            Cell::new(&listing.symbol.to_uppercase()).style_spec("Fc"),
            Cell::new(&truncate_name(&listing.name)),
            right(&format_crypto_price(listing.current_price)),
            change_cell(listing.price_change_percentage_24h),
            right(&format!("${}", format_volume(listing.total_volume))),
        ]));
    }

    table
}

pub fn trending_table(entries: &[TrendingEntry]) -> Table {
    let mut table = new_table(&["#", "Symbol", "Name", "Market Cap Rank"]);

    for (idx, entry) in entries.iter().enumerate() {
        table.add_row(Row::new(vec![
            right(&(idx + 1).to_string()),
            Cell::new(&entry.symbol.to_uppercase()).style_spec("Fc"),
            Cell::new(&truncate_name(&entry.name)),
            right(&format_rank(entry.market_cap_rank)),
        ]));
    }

    table
}

pub fn stock_info_table(info: &StockInfo) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);

    let rows = [
        ("Symbol", info.symbol.clone()),
        ("Name", info.name.clone()),
        ("Price", format_stock_price(info.price)),
        ("Volume", format_volume(info.volume as f64)),
        ("52w High", format_stock_price(info.fifty_two_week_high)),
        ("52w Low", format_stock_price(info.fifty_two_week_low)),
    ];
    for (label, value) in rows {
        table.add_row(Row::new(vec![
            Cell::new(label).style_spec("bFc"),
            Cell::new(&value),
        ]));
    }

    table
}
