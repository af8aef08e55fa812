use radar_shared_models::{Quote, SessionBar};

/// Builds a quote from the two most recent sessions that carry a close.
///
/// Returns `None` when fewer than two closes are available or when the previous
/// close is not positive, so the symbol is skipped instead of ranked.
pub fn derive_quote(symbol: &str, sessions: &[SessionBar]) -> Option<Quote> {
    let mut closed = sessions
        .iter()
        .filter(|bar| bar.close.is_some_and(f64::is_finite))
        .rev();

    let current = closed.next()?;
    let previous = closed.next()?;

    let price = current.close?;
    let previous_close = previous.close?;

    if previous_close <= 0.0 {
        return None;
    }

    Some(Quote {
        symbol: symbol.to_string(),
        price,
        previous_close,
        volume: current.volume.unwrap_or(0),
    })
}

/// Derives every symbol of a batch, keeping batch order and dropping coverage gaps.
pub fn derive_quotes<'a, I>(batch: I) -> Vec<Quote>
where
    I: IntoIterator<Item = (&'a str, &'a [SessionBar])>,
{
    batch
        .into_iter()
        .filter_map(|(symbol, sessions)| derive_quote(symbol, sessions))
        .collect()
}
