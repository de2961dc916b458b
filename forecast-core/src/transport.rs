use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::error::FetchError;

/// Issues a GET and hands back the body of a 2xx response.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, url: &str, query: &[(&'static str, String)]) -> Result<String, FetchError>;
}

/// [`Transport`] over reqwest, with the client's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &[(&'static str, String)]) -> Result<String, FetchError> {
        let transport_err = |source| FetchError::Transport { url: url.to_string(), source };

        let res = self.http.get(url).query(query).send().await.map_err(transport_err)?;

        let status = res.status();
        let body = res.text().await.map_err(transport_err)?;

        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept() {
        assert_eq!(truncate_body("{\"error\":1}"), "{\"error\":1}");
    }

    #[test]
    fn long_body_is_cut_on_char_boundary() {
        let body = "雨".repeat(300);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }
}
