//! Raw HTTP reply shape shared by the service transports.

use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::{AccessToken, ProviderError};

/// Status and verbatim body of one service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `"<status> - <body>"`, with the canonical reason phrase when one exists.
    pub fn describe_failure(&self) -> String {
        format!("{} - {}", status_line(self.status), self.body)
    }

    pub fn into_http_error(self) -> ProviderError {
        ProviderError::http(self.status, self.describe_failure())
    }
}

pub fn status_line(status: u16) -> String {
    match StatusCode::from_u16(status) {
        Ok(code) => code.to_string(),
        Err(_) => status.to_string(),
    }
}

/// Issues one JSON POST with a bearer token and returns the reply verbatim.
pub async fn post_json_with_bearer<B>(
    client: &Client,
    url: &str,
    body: &B,
    token: &AccessToken,
) -> Result<HttpReply, ProviderError>
where
    B: Serialize + ?Sized,
{
    let response = client
        .post(url)
        .bearer_auth(token.secret())
        .json(body)
        .send()
        .await
        .map_err(ProviderError::from_reqwest)?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(ProviderError::from_reqwest)?;
    Ok(HttpReply { status, body })
}

pub fn join_endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
