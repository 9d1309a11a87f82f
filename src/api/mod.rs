use std::sync::Arc;

pub mod price;
pub mod alert;

use crate::services::{ AlertService, IngestService, ReportService };

#[derive(Clone)]
pub struct AppState {
    pub ingest_service: Arc<IngestService>,
    pub alert_service: Arc<AlertService>,
    pub report_service: Arc<ReportService>,
}

impl AppState {
    pub fn new(
        ingest_service: Arc<IngestService>,
        alert_service: Arc<AlertService>,
        report_service: Arc<ReportService>
    ) -> Self {
        Self {
            ingest_service,
            alert_service,
            report_service,
        }
    }
}
