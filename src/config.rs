use std::env;

const DEFAULT_FEED_URL: &str =
    "https://deep-index.moralis.io/api/v2.2/market-data/global/market-cap";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,

    pub feed_url: String,
    pub feed_api_key: String,
    /// Lowercased feed symbols to track (e.g. "eth", "matic").
    pub tracked_symbols: Vec<String>,

    pub fetch_interval_secs: u64,
    pub check_interval_secs: u64,

    pub trend_recipient: String,

    pub mailer_api_url: String,
    pub mailer_api_key: String,
    pub mail_from: String,

    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        let feed_url = env::var("MARKET_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string());
        let feed_api_key = env::var("MORALIS_API_KEY")?;

        let tracked_symbols = Self::parse_symbols(
            &env::var("TRACKED_SYMBOLS").unwrap_or_else(|_| "eth,matic".to_string())
        )?;

        let fetch_interval_secs = env::var("FETCH_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()?;
        let check_interval_secs = env::var("CHECK_INTERVAL_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()?;

        let trend_recipient = env::var("TREND_ALERT_RECIPIENT")?;

        let mailer_api_url = env::var("MAILER_API_URL")?;
        let mailer_api_key = env::var("MAILER_API_KEY")?;
        let mail_from = env::var("MAIL_FROM").unwrap_or_else(|_| "alerts@pricewatch.local".to_string());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;

        Ok(Config {
            database_url,
            feed_url,
            feed_api_key,
            tracked_symbols,
            fetch_interval_secs,
            check_interval_secs,
            trend_recipient,
            mailer_api_url,
            mailer_api_key,
            mail_from,
            server_host,
            server_port,
        })
    }

    fn parse_symbols(symbols_str: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        let symbols: Vec<String> = symbols_str
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        if symbols.is_empty() {
            return Err("TRACKED_SYMBOLS list cannot be empty".into());
        }

        Ok(symbols)
    }
}
