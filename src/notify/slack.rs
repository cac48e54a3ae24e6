use crate::model::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

pub const USERNAME: &str = "nuko";
const TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct Payload<'a> {
    username: &'a str,
    text: &'a str,
}

/// Incoming-webhook endpoint of the team channel. Posts are not retried.
#[derive(Debug, Clone)]
pub struct SlackWebhook {
    client: Client,
    url: String,
}

impl SlackWebhook {
    pub fn new(url: impl ToString) -> Result<Self> {
        Self::with_timeout(url, TIMEOUT)
    }

    pub fn with_timeout(url: impl ToString, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub async fn send(&self, text: &str) -> Result<()> {
        let body = serde_json::to_vec(&Payload {
            username: USERNAME,
            text,
        })?;
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(body)
            .send()
            .await?
            .error_for_status()?;
        info!(status = %response.status(), "message delivered");
        Ok(())
    }
}
