pub mod entity;

mod price_repository;
pub use price_repository::PriceRepository;

mod alert_repository;
pub use alert_repository::AlertRepository;
