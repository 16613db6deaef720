//! Client side of the computation backend.

use async_trait::async_trait;
use reqwest::Client;

use crate::{payload::Envelope, DashboardError, Result};

/// Row count used when the requested text holds no integer.
pub const DEFAULT_ROWS: u64 = 10_000;
/// Smallest row count the backend is asked for.
pub const MIN_ROWS: u64 = 1_000;

/// Normalized query shared by the request and the download links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunParams {
    pub rows: u64,
    pub force: bool,
}

impl RunParams {
    /// Normalizes free-text user input: `max(1000, leading integer or 10000)`.
    pub fn from_input(rows_text: &str, force: bool) -> Self {
        let parsed = parse_leading_int(rows_text).unwrap_or(DEFAULT_ROWS as i64);
        Self {
            rows: parsed.max(MIN_ROWS as i64) as u64,
            force,
        }
    }

    pub fn force_flag(&self) -> &'static str {
        if self.force {
            "1"
        } else {
            "0"
        }
    }

    pub fn query(&self) -> String {
        format!("n={}&force={}", self.rows, self.force_flag())
    }
}

/// Integer prefix of `text` after leading whitespace, with an optional sign.
/// Overlong digit runs saturate instead of failing.
fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let digits = &rest[..digits_len];
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// The two computation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/start`: dataset summary plus logistic regression.
    Full,
    /// `/start_mlp`: dataset summary plus the MLP network.
    Mlp,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Full => "/start",
            Self::Mlp => "/start_mlp",
        }
    }
}

/// Download targets. Only ever turned into hyperlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Download {
    Dataset,
    Results,
    MlpResults,
}

impl Download {
    pub fn path(self) -> &'static str {
        match self {
            Self::Dataset => "/download/dataset",
            Self::Results => "/download/results",
            Self::MlpResults => "/download/mlp_results",
        }
    }

    pub fn href(self, params: &RunParams) -> String {
        format!("{}?{}", self.path(), params.query())
    }
}

/// Issues one computation request and returns the decoded envelope.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn start(&self, endpoint: Endpoint, params: &RunParams) -> Result<Envelope>;
}

/// [`Backend`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: Endpoint, params: &RunParams) -> String {
        format!("{}{}?{}", self.base_url, endpoint.path(), params.query())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn start(&self, endpoint: Endpoint, params: &RunParams) -> Result<Envelope> {
        let url = self.url(endpoint, params);
        tracing::debug!(%url, "requesting computation");

        // Application failures arrive as HTTP 500 with an envelope body, so
        // the status is not inspected.
        let response = self.http.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|err| {
            DashboardError::Decode(format!("status {status}: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_row_count_text() {
        assert_eq!(RunParams::from_input("25000", false).rows, 25_000);
        assert_eq!(RunParams::from_input("  4000rows", false).rows, 4_000);
        assert_eq!(RunParams::from_input("12.9", false).rows, 1_000);
        assert_eq!(RunParams::from_input("999", false).rows, 1_000);
        assert_eq!(RunParams::from_input("-5000", false).rows, 1_000);
        assert_eq!(RunParams::from_input("", false).rows, 10_000);
        assert_eq!(RunParams::from_input("abc", false).rows, 10_000);
        assert_eq!(RunParams::from_input("+", false).rows, 10_000);
        assert_eq!(
            RunParams::from_input("99999999999999999999999", false).rows,
            i64::MAX as u64
        );
    }

    #[test]
    fn force_is_serialized_as_digit() {
        assert_eq!(RunParams::from_input("2000", true).query(), "n=2000&force=1");
        assert_eq!(RunParams::from_input("2000", false).query(), "n=2000&force=0");
    }

    #[test]
    fn builds_links_and_urls() {
        let params = RunParams::from_input("5000", true);
        assert_eq!(
            Download::Dataset.href(&params),
            "/download/dataset?n=5000&force=1"
        );
        assert_eq!(
            Download::MlpResults.href(&params),
            "/download/mlp_results?n=5000&force=1"
        );

        let backend = HttpBackend::new("http://localhost:5000/");
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(
            backend.url(Endpoint::Mlp, &params),
            "http://localhost:5000/start_mlp?n=5000&force=1"
        );
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_failure() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let backend = HttpBackend::new(format!("http://127.0.0.1:{port}"));
        let err = backend
            .start(Endpoint::Full, &RunParams::from_input("1000", false))
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Transport(_)));
    }
}
