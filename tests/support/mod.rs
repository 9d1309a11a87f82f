#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{ AtomicBool, Ordering };

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::{ DateTimeUtc, Decimal };
use uuid::Uuid;

use pricewatch::db::entity::{ alert, price };
use pricewatch::error::{ AppError, Result };
use pricewatch::feed::{ MarketEntry, MarketFeed };
use pricewatch::notify::Notifier;
use pricewatch::store::{ AlertRegistry, RangeOrder, TimeSeriesStore };

pub struct MemoryStore {
    samples: Mutex<Vec<price::Model>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { samples: Mutex::new(Vec::new()) }
    }

    /// Insert a sample with an explicit timestamp, for shaping test series.
    pub fn seed(&self, chain: &str, price: f64, created_at: DateTimeUtc) -> price::Model {
        let sample = price::Model {
            id: Uuid::new_v4(),
            chain: chain.to_string(),
            price,
            created_at,
        };
        self.samples.lock().unwrap().push(sample.clone());
        sample
    }

    pub fn sample_count(&self) -> usize {
        self.samples.lock().unwrap().len()
    }

    pub fn samples_for(&self, chain: &str) -> Vec<price::Model> {
        self.samples
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.chain == chain)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TimeSeriesStore for MemoryStore {
    async fn insert(&self, chain: &str, price: f64) -> Result<price::Model> {
        Ok(self.seed(chain, price, Utc::now()))
    }

    async fn find_latest(&self, limit: Option<u64>) -> Result<Vec<price::Model>> {
        let mut samples = self.samples.lock().unwrap().clone();
        samples.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        if let Some(limit) = limit {
            samples.truncate(limit as usize);
        }
        Ok(samples)
    }

    async fn find_range(
        &self,
        start: DateTimeUtc,
        end: DateTimeUtc,
        order: RangeOrder,
        limit: Option<u64>
    ) -> Result<Vec<price::Model>> {
        let mut samples: Vec<price::Model> = self.samples
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.created_at >= start && s.created_at <= end)
            .cloned()
            .collect();

        match order {
            RangeOrder::Ascending =>
                samples.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id))),
            RangeOrder::Descending =>
                samples.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))),
        }

        if let Some(limit) = limit {
            samples.truncate(limit as usize);
        }
        Ok(samples)
    }
}

pub struct MemoryRegistry {
    alerts: Mutex<Vec<alert::Model>>,
    pub fail_deletes: AtomicBool,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
            fail_deletes: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl AlertRegistry for MemoryRegistry {
    async fn create(&self, email: &str, chain: &str, alert_price: f64) -> Result<alert::Model> {
        let alert_price = Decimal::from_f64_retain(alert_price).ok_or_else(||
            AppError::InvalidInput("bad alert price".to_string())
        )?;
        let now = Utc::now();
        let alert = alert::Model {
            id: Uuid::new_v4(),
            chain: chain.to_string(),
            alert_price,
            email: email.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.alerts.lock().unwrap().push(alert.clone());
        Ok(alert)
    }

    async fn list_all(&self) -> Result<Vec<alert::Model>> {
        Ok(self.alerts.lock().unwrap().clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::Internal("registry unavailable".to_string()));
        }
        self.alerts.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentMail>>,
    pub fail_all: AtomicBool,
    pub fail_recipient: Mutex<Option<String>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_all: AtomicBool::new(false),
            fail_recipient: Mutex::new(None),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn sent_to(&self, to: &str) -> Vec<SentMail> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.to == to)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(AppError::Notification("transport down".to_string()));
        }
        if self.fail_recipient.lock().unwrap().as_deref() == Some(to) {
            return Err(AppError::Notification(format!("delivery to {} refused", to)));
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

pub struct StaticFeed {
    pub entries: Mutex<Vec<MarketEntry>>,
    pub fail: AtomicBool,
}

impl StaticFeed {
    pub fn new(entries: Vec<MarketEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl MarketFeed for StaticFeed {
    async fn fetch_market_data(&self) -> Result<Vec<MarketEntry>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Network("feed unreachable".to_string()));
        }
        Ok(self.entries.lock().unwrap().clone())
    }
}

pub fn entry(symbol: &str, name: &str, usd_price: f64) -> MarketEntry {
    MarketEntry {
        symbol: symbol.to_string(),
        name: name.to_string(),
        usd_price,
    }
}
