//! Behavior contracts for the persistence collaborators. The evaluators and
//! reporting code depend on these traits, never on a concrete engine; the
//! sea-orm implementations live in [`crate::db`].

use async_trait::async_trait;
use sea_orm::prelude::{ DateTimeUtc, Uuid };

use crate::db::entity::{ alert, price };
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOrder {
    Ascending,
    Descending,
}

/// Append-only store of price samples.
#[async_trait]
pub trait TimeSeriesStore: Send + Sync {
    /// Persist one sample, assigning its id and creation timestamp.
    async fn insert(&self, chain: &str, price: f64) -> Result<price::Model>;

    /// Samples ordered newest-first (ties broken by id for determinism).
    /// `None` returns the full series.
    async fn find_latest(&self, limit: Option<u64>) -> Result<Vec<price::Model>>;

    /// Samples with `created_at` in the closed range `[start, end]`.
    async fn find_range(
        &self,
        start: DateTimeUtc,
        end: DateTimeUtc,
        order: RangeOrder,
        limit: Option<u64>
    ) -> Result<Vec<price::Model>>;
}

/// Registry of active threshold alerts.
#[async_trait]
pub trait AlertRegistry: Send + Sync {
    async fn create(&self, email: &str, chain: &str, alert_price: f64) -> Result<alert::Model>;

    async fn list_all(&self) -> Result<Vec<alert::Model>>;

    /// Deleting an id that is already gone is not an error.
    async fn delete_by_id(&self, id: Uuid) -> Result<()>;
}
