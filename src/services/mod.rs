pub mod ingest_service;
pub mod alert_service;
pub mod trend_service;
pub mod report_service;

pub use ingest_service::IngestService;
pub use alert_service::AlertService;
pub use trend_service::TrendService;
pub use report_service::{ HourlyPrice, ReportService };
