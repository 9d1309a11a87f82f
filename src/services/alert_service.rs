use std::collections::HashSet;
use std::sync::{ Arc, Mutex };

use futures::future::join_all;
use sea_orm::prelude::Decimal;
use tracing::{ debug, info, warn };
use uuid::Uuid;

use crate::db::entity::{ alert, price };
use crate::error::Result;
use crate::notify::Notifier;
use crate::store::{ AlertRegistry, TimeSeriesStore };

/// Safely convert a Decimal to f64, returning None on parse failure
fn decimal_to_f64(d: Decimal) -> Option<f64> {
    d.to_string().parse::<f64>().ok()
}

/// Owns the threshold-alert lifecycle: registration, listing, removal and the
/// scheduled evaluation cycle that fires and retires matching alerts.
pub struct AlertService {
    registry: Arc<dyn AlertRegistry>,
    store: Arc<dyn TimeSeriesStore>,
    notifier: Arc<dyn Notifier>,
    // Per-alert single-flight guard: an id stays in this set from the moment
    // it is picked up for notification until its delete has landed, so an
    // overlapping cycle cannot fire the same alert twice in this process.
    in_flight: Mutex<HashSet<Uuid>>,
}

impl AlertService {
    pub fn new(
        registry: Arc<dyn AlertRegistry>,
        store: Arc<dyn TimeSeriesStore>,
        notifier: Arc<dyn Notifier>
    ) -> Self {
        Self {
            registry,
            store,
            notifier,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub async fn create_alert(
        &self,
        email: &str,
        chain: &str,
        alert_price: f64
    ) -> Result<alert::Model> {
        self.registry.create(email, chain, alert_price).await
    }

    pub async fn list_alerts(&self) -> Result<Vec<alert::Model>> {
        self.registry.list_all().await
    }

    pub async fn delete_alert(&self, id: Uuid) -> Result<()> {
        self.registry.delete_by_id(id).await
    }

    /// One evaluation cycle: compare every registered alert against the most
    /// recent sample for its chain, notify and remove the ones whose
    /// threshold has been reached. All matched alerts are dispatched
    /// concurrently and awaited together; failures are collected once every
    /// dispatch has finished so one bad alert cannot starve the rest.
    pub async fn check_alerts(&self) -> Result<()> {
        let alerts = self.registry.list_all().await?;
        if alerts.is_empty() {
            return Ok(());
        }

        // Newest-first with a deterministic id tie-break, so the first match
        // per chain is the sample the alert is judged against.
        let samples = self.store.find_latest(None).await?;

        let mut pending = Vec::new();

        for alert in alerts {
            let Some(latest) = samples.iter().find(|s| s.chain == alert.chain) else {
                continue;
            };

            let Some(target) = decimal_to_f64(alert.alert_price) else {
                warn!("alert {} has an unreadable threshold, skipping", alert.id);
                continue;
            };

            if latest.price < target {
                continue;
            }

            if !self.try_claim(alert.id) {
                debug!("alert {} already in flight, skipping", alert.id);
                continue;
            }

            pending.push(self.fire_alert(alert, latest));
        }

        let results = join_all(pending).await;
        for result in results {
            result?;
        }

        Ok(())
    }

    /// Notify the alert's recipient, then retire the alert. The two steps are
    /// not transactional: a delivered mail whose delete fails keeps the claim
    /// held so this process will not mail the same alert again.
    async fn fire_alert(&self, alert: alert::Model, sample: &price::Model) -> Result<()> {
        let subject = format!("{} Price Alert", alert.chain);
        let body = format!("The price of {} has reached ${}.", alert.chain, sample.price);

        if let Err(e) = self.notifier.send(&alert.email, &subject, &body).await {
            // Nothing was delivered; release so the next cycle retries.
            self.release(alert.id);
            return Err(e);
        }

        match self.registry.delete_by_id(alert.id).await {
            Ok(()) => {
                self.release(alert.id);
                info!(
                    "Alert triggered for {} - {} reached ${}",
                    alert.email,
                    alert.chain,
                    sample.price
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    "alert {} was notified but not deleted; keeping it claimed to avoid a duplicate mail",
                    alert.id
                );
                Err(e)
            }
        }
    }

    fn try_claim(&self, id: Uuid) -> bool {
        self.claims().insert(id)
    }

    fn release(&self, id: Uuid) {
        self.claims().remove(&id);
    }

    fn claims(&self) -> std::sync::MutexGuard<'_, HashSet<Uuid>> {
        match self.in_flight.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
