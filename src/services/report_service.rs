use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{ DateTime, Duration, Utc };
use sea_orm::prelude::DateTimeUtc;
use serde::Serialize;

use crate::db::entity::price;
use crate::error::Result;
use crate::store::{ RangeOrder, TimeSeriesStore };

/// One raw sample relabeled with its nearest hour. Samples are grouped by
/// hour but never merged: consumers get per-sample granularity.
#[derive(Debug, Clone, Serialize)]
pub struct HourlyPrice {
    pub hour: DateTimeUtc,
    pub chain: String,
    pub price: f64,
}

/// Round to the nearest hour, half-up on the :30 boundary.
fn round_to_nearest_hour(ts: DateTimeUtc) -> DateTimeUtc {
    let rounded = (ts.timestamp() + 1800).div_euclid(3600) * 3600;
    DateTime::from_timestamp(rounded, 0).unwrap_or(ts)
}

/// Read-side reporting over the stored time series.
pub struct ReportService {
    store: Arc<dyn TimeSeriesStore>,
    tracked_chains: usize,
}

impl ReportService {
    pub fn new(store: Arc<dyn TimeSeriesStore>, tracked_chains: usize) -> Self {
        Self { store, tracked_chains }
    }

    /// The most recent samples, one slot per tracked chain.
    pub async fn latest_prices(&self) -> Result<Vec<price::Model>> {
        self.store.find_latest(Some(self.tracked_chains as u64)).await
    }

    /// Every sample from the last 24 hours, labeled with its nearest hour and
    /// grouped hour-ascending. The output row count equals the input sample
    /// count within the window.
    pub async fn hourly_prices(&self) -> Result<Vec<HourlyPrice>> {
        let now = Utc::now();
        let samples = self.store.find_range(
            now - Duration::hours(24),
            now,
            RangeOrder::Ascending,
            None
        ).await?;

        let mut grouped: BTreeMap<DateTimeUtc, Vec<price::Model>> = BTreeMap::new();
        for sample in samples {
            let hour = round_to_nearest_hour(sample.created_at);
            grouped.entry(hour).or_default().push(sample);
        }

        let mut rows = Vec::new();
        for (hour, samples) in grouped {
            for sample in samples {
                rows.push(HourlyPrice {
                    hour,
                    chain: sample.chain,
                    price: sample.price,
                });
            }
        }

        Ok(rows)
    }
}
