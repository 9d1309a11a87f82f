use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{ AppError, Result };
use super::Notifier;

#[derive(Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Mail delivery through an HTTP relay endpoint. The from-address is fixed
/// at construction; recipients come from the caller.
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Result<Self> {
        let client = reqwest::Client
            ::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(Self { client, api_url, api_key, from })
    }
}

#[async_trait]
impl Notifier for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let request = MailRequest {
            from: &self.from,
            to,
            subject,
            text: body,
        };

        let response = self.client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send().await
            .map_err(|e| AppError::Notification(format!("mail relay request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(
                AppError::Notification(
                    format!("mail relay returned status: {}", response.status())
                )
            );
        }

        Ok(())
    }
}
