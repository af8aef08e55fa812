//! Orderings behind the radar views.
//!
//! All sorts are stable, so records that compare equal keep the order in which the
//! provider returned them. Losers are the one exception: they are gainers read
//! backwards, so equal changes come out in reverse fetch order.

use radar_shared_models::{MarketListing, Quote};
use std::cmp::Ordering;

/// Largest absolute percent moves first.
pub fn top_movers(mut quotes: Vec<Quote>, limit: usize) -> Vec<Quote> {
    quotes.retain(|q| q.change_percent().is_some());
    quotes.sort_by(|a, b| abs_change(b).total_cmp(&abs_change(a)));
    quotes.truncate(limit);
    quotes
}

/// Highest volume first.
pub fn most_active(mut quotes: Vec<Quote>, limit: usize) -> Vec<Quote> {
    quotes.retain(|q| q.change_percent().is_some());
    quotes.sort_by(|a, b| b.volume.cmp(&a.volume));
    quotes.truncate(limit);
    quotes
}

/// Highest signed 24h change first. Listings without a change go last.
pub fn top_gainers(mut listings: Vec<MarketListing>, limit: usize) -> Vec<MarketListing> {
    listings.sort_by(by_change_desc_missing_last);
    listings.truncate(limit);
    listings
}

/// Lowest signed 24h change first. Listings without a change go last, in fetch order.
///
/// The listings with a change are exactly the gainers order reversed, ties included.
pub fn top_losers(mut listings: Vec<MarketListing>, limit: usize) -> Vec<MarketListing> {
    listings.sort_by(by_change_desc_missing_last);
    let present = listings
        .iter()
        .take_while(|l| l.price_change_percentage_24h.is_some())
        .count();
    listings[..present].reverse();
    listings.truncate(limit);
    listings
}

fn abs_change(quote: &Quote) -> f64 {
    quote.change_percent().map(f64::abs).unwrap_or(0.0)
}

fn by_change_desc_missing_last(a: &MarketListing, b: &MarketListing) -> Ordering {
    match (a.price_change_percentage_24h, b.price_change_percentage_24h) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
