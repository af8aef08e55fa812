pub mod cache;
pub mod derive;
pub mod ranking;

pub use cache::TtlCache;
pub use derive::{derive_quote, derive_quotes};
pub use ranking::{most_active, top_gainers, top_losers, top_movers};
