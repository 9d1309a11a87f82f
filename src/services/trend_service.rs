use std::collections::HashSet;
use std::sync::Arc;

use chrono::{ Duration, Utc };
use futures::future::join_all;
use tracing::info;

use crate::db::entity::price;
use crate::error::Result;
use crate::notify::Notifier;
use crate::store::{ RangeOrder, TimeSeriesStore };

/// Percentage increase over one hour that triggers an operator mail.
const TREND_THRESHOLD_PCT: f64 = 3.0;

/// Percentage change from `old` to `new`, defined as 0 when `old` is 0.
fn percentage_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        return 0.0;
    }
    ((new - old) / old) * 100.0
}

/// Stateless hourly-trend watcher. Keeps no record of what it already sent,
/// so a condition that holds across cycles is reported on every one of them.
pub struct TrendService {
    store: Arc<dyn TimeSeriesStore>,
    notifier: Arc<dyn Notifier>,
    recipient: String,
    tracked_chains: usize,
}

impl TrendService {
    pub fn new(
        store: Arc<dyn TimeSeriesStore>,
        notifier: Arc<dyn Notifier>,
        recipient: String,
        tracked_chains: usize
    ) -> Self {
        Self { store, notifier, recipient, tracked_chains }
    }

    /// One check cycle: for each tracked chain, compare the latest sample
    /// against the earliest sample inside the last hour and mail the operator
    /// when the increase exceeds the threshold.
    pub async fn check_price_increases(&self) -> Result<()> {
        let n = self.tracked_chains as u64;
        let latest = self.store.find_latest(Some(n)).await?;
        if latest.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let window = self.store.find_range(
            now - Duration::hours(1),
            now,
            RangeOrder::Ascending,
            None
        ).await?;

        let mut seen = HashSet::new();
        let mut pending = Vec::new();

        for current in &latest {
            if !seen.insert(current.chain.as_str()) {
                continue;
            }

            // Earliest in-window sample for this chain stands in for the
            // price one hour ago.
            let Some(past) = window.iter().find(|s| s.chain == current.chain) else {
                continue;
            };
            if past.id == current.id {
                continue;
            }

            let pct = percentage_change(past.price, current.price);
            if pct > TREND_THRESHOLD_PCT {
                pending.push(self.notify_increase(current, past));
            }
        }

        let results = join_all(pending).await;
        for result in results {
            result?;
        }

        Ok(())
    }

    async fn notify_increase(&self, current: &price::Model, past: &price::Model) -> Result<()> {
        let subject = format!("{} Price Increase Alert", current.chain);
        let body = format!(
            "The price of {} has increased by more than 3%. Current price: ${}. Price an hour ago: ${}.",
            current.chain,
            current.price,
            past.price
        );

        self.notifier.send(&self.recipient, &subject, &body).await?;

        info!("Price increase reported for {}: ${} -> ${}", current.chain, past.price, current.price);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_is_zero_when_old_price_is_zero() {
        assert_eq!(percentage_change(0.0, 1234.5), 0.0);
    }

    #[test]
    fn computes_simple_increase() {
        assert_eq!(percentage_change(100.0, 105.0), 5.0);
    }

    #[test]
    fn computes_decrease() {
        assert_eq!(percentage_change(200.0, 150.0), -25.0);
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        assert!(!(percentage_change(100.0, 103.0) > TREND_THRESHOLD_PCT));
        assert!(percentage_change(100.0, 103.01) > TREND_THRESHOLD_PCT);
    }
}
