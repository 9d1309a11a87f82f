use async_trait::async_trait;
use sea_orm::{ ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set };
use sea_orm::prelude::Decimal;
use uuid::Uuid;

use crate::db::entity::alert;
use crate::error::{ AppError, Result };
use crate::store::AlertRegistry;

pub struct AlertRepository {
    db: DatabaseConnection,
}

impl AlertRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AlertRegistry for AlertRepository {
    async fn create(&self, email: &str, chain: &str, alert_price: f64) -> Result<alert::Model> {
        let alert_price = Decimal::from_f64_retain(alert_price).ok_or_else(||
            AppError::InvalidInput(format!("alert price is not a valid number: {}", alert_price))
        )?;

        let now = chrono::Utc::now();

        let alert = alert::ActiveModel {
            id: Set(Uuid::new_v4()),
            chain: Set(chain.to_string()),
            alert_price: Set(alert_price),
            email: Set(email.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let alert = alert.insert(&self.db).await?;
        Ok(alert)
    }

    async fn list_all(&self) -> Result<Vec<alert::Model>> {
        let alerts = alert::Entity
            ::find()
            .order_by_asc(alert::Column::CreatedAt)
            .all(&self.db).await?;

        Ok(alerts)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        alert::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
