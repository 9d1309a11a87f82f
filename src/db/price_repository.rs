use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
    QueryOrder,
    QuerySelect,
    Set,
};
use sea_orm::prelude::DateTimeUtc;
use uuid::Uuid;

use crate::db::entity::price;
use crate::error::Result;
use crate::store::{ RangeOrder, TimeSeriesStore };

pub struct PriceRepository {
    db: DatabaseConnection,
}

impl PriceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TimeSeriesStore for PriceRepository {
    async fn insert(&self, chain: &str, price: f64) -> Result<price::Model> {
        let sample = price::ActiveModel {
            id: Set(Uuid::new_v4()),
            chain: Set(chain.to_string()),
            price: Set(price),
            created_at: Set(chrono::Utc::now()),
        };

        let sample = sample.insert(&self.db).await?;
        Ok(sample)
    }

    async fn find_latest(&self, limit: Option<u64>) -> Result<Vec<price::Model>> {
        let mut query = price::Entity
            ::find()
            .order_by_desc(price::Column::CreatedAt)
            .order_by_desc(price::Column::Id);

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let samples = query.all(&self.db).await?;
        Ok(samples)
    }

    async fn find_range(
        &self,
        start: DateTimeUtc,
        end: DateTimeUtc,
        order: RangeOrder,
        limit: Option<u64>
    ) -> Result<Vec<price::Model>> {
        let mut query = price::Entity
            ::find()
            .filter(price::Column::CreatedAt.gte(start))
            .filter(price::Column::CreatedAt.lte(end));

        query = match order {
            RangeOrder::Ascending =>
                query.order_by_asc(price::Column::CreatedAt).order_by_asc(price::Column::Id),
            RangeOrder::Descending =>
                query.order_by_desc(price::Column::CreatedAt).order_by_desc(price::Column::Id),
        };

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let samples = query.all(&self.db).await?;
        Ok(samples)
    }
}
