use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::feed::MarketFeed;
use crate::store::TimeSeriesStore;

/// Pulls the external market feed and persists one sample per tracked asset.
pub struct IngestService {
    feed: Arc<dyn MarketFeed>,
    store: Arc<dyn TimeSeriesStore>,
    tracked_symbols: Vec<String>,
}

impl IngestService {
    pub fn new(
        feed: Arc<dyn MarketFeed>,
        store: Arc<dyn TimeSeriesStore>,
        tracked_symbols: Vec<String>
    ) -> Self {
        Self { feed, store, tracked_symbols }
    }

    /// Fetch the feed, keep only whitelisted symbols and write one sample per
    /// surviving asset. Inserts are sequential and not wrapped in a
    /// transaction: a failure part-way through aborts the remaining writes
    /// and leaves the earlier samples in place.
    pub async fn fetch_and_save(&self) -> Result<()> {
        let entries = self.feed.fetch_market_data().await?;

        for entry in entries.into_iter().filter(|e| self.is_tracked(&e.symbol)) {
            let sample = self.store.insert(&entry.name, entry.usd_price).await?;
            info!("Saved price for {}: ${}", sample.chain, sample.price);
        }

        Ok(())
    }

    fn is_tracked(&self, symbol: &str) -> bool {
        self.tracked_symbols.iter().any(|s| s.eq_ignore_ascii_case(symbol))
    }
}
