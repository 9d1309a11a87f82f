use std::sync::Arc;

use axum::{ Router, routing::{ delete, get, post } };
use pricewatch::{ Config, Result };
use pricewatch::db::{ AlertRepository, PriceRepository };
use pricewatch::feed::{ HttpMarketFeed, MarketFeed };
use pricewatch::notify::{ HttpMailer, Notifier };
use pricewatch::scheduler::PeriodicJob;
use pricewatch::services::{ AlertService, IngestService, ReportService, TrendService };
use pricewatch::store::{ AlertRegistry, TimeSeriesStore };
use sea_orm_migration::MigratorTrait;
use tokio::time::Duration;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber
        ::registry()
        .with(
            tracing_subscriber::EnvFilter
                ::try_from_default_env()
                .unwrap_or_else(|_| "pricewatch=debug,tower_http=debug".into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| pricewatch::AppError::Config(e.to_string()))?;

    tracing::info!("Starting pricewatch tracking {:?}", config.tracked_symbols);

    // Initialize database connection
    let db = sea_orm::Database
        ::connect(&config.database_url).await
        .map_err(pricewatch::AppError::Database)?;

    tracing::info!("Database connected successfully");

    // Run migrations
    migration::Migrator::up(&db, None).await.map_err(pricewatch::AppError::Database)?;

    tracing::info!("Migrations completed successfully");

    // Persistence collaborators behind their behavior contracts
    let store: Arc<dyn TimeSeriesStore> = Arc::new(PriceRepository::new(db.clone()));
    let registry: Arc<dyn AlertRegistry> = Arc::new(AlertRepository::new(db));

    // External collaborators
    let feed: Arc<dyn MarketFeed> = Arc::new(
        HttpMarketFeed::new(config.feed_url.clone(), config.feed_api_key.clone())?
    );
    let notifier: Arc<dyn Notifier> = Arc::new(
        HttpMailer::new(
            config.mailer_api_url.clone(),
            config.mailer_api_key.clone(),
            config.mail_from.clone()
        )?
    );

    // Initialize services
    let ingest_service = Arc::new(
        IngestService::new(feed, store.clone(), config.tracked_symbols.clone())
    );
    let alert_service = Arc::new(
        AlertService::new(registry, store.clone(), notifier.clone())
    );
    let trend_service = Arc::new(
        TrendService::new(
            store.clone(),
            notifier,
            config.trend_recipient.clone(),
            config.tracked_symbols.len()
        )
    );
    let report_service = Arc::new(ReportService::new(store, config.tracked_symbols.len()));

    // Two independent periodic triggers: the fetch job persists fresh samples
    // and then runs the threshold-alert cycle against them; the trend job
    // watches for hourly increases on its own cadence.
    let fetch_job = {
        let ingest = ingest_service.clone();
        let alerts = alert_service.clone();
        PeriodicJob::new(
            "price-fetch",
            Duration::from_secs(config.fetch_interval_secs)
        ).start(move || {
            let ingest = ingest.clone();
            let alerts = alerts.clone();
            async move {
                ingest.fetch_and_save().await?;
                alerts.check_alerts().await
            }
        })
    };

    let trend_job = {
        let trend = trend_service.clone();
        PeriodicJob::new(
            "trend-check",
            Duration::from_secs(config.check_interval_secs)
        ).start(move || {
            let trend = trend.clone();
            async move { trend.check_price_increases().await }
        })
    };

    // Create app state
    let app_state = pricewatch::api::AppState::new(ingest_service, alert_service, report_service);

    // Build application router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/prices/latest", get(pricewatch::api::price::get_latest_prices))
        .route("/api/prices/hourly", get(pricewatch::api::price::get_hourly_prices))
        .route("/api/prices/fetch", post(pricewatch::api::price::fetch_prices))
        .route(
            "/api/alerts",
            post(pricewatch::api::alert::create_alert).get(pricewatch::api::alert::list_alerts)
        )
        .route("/api/alerts/{id}", delete(pricewatch::api::alert::delete_alert))
        .with_state(app_state)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener
        ::bind(&addr).await
        .map_err(|e| pricewatch::AppError::Internal(e.to_string()))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal()).await
        .map_err(|e| pricewatch::AppError::Internal(e.to_string()))?;

    fetch_job.stop().await;
    trend_job.stop().await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn health_check() -> &'static str {
    "OK"
}
