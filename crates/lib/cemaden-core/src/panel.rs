//! Reachability check against the CEMADEN alert panel.
//!
//! The panel is a dynamically rendered dashboard rather than an API, so the
//! check only reports whether it answered; the page content is never read.

use std::{error::Error, fmt, time::Duration};

use cemaden_store::schema::URL_ALERT_PANEL;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_PANEL_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = concat!("cemaden-mcp/", env!("CARGO_PKG_VERSION"));

/// Configuration for the alert panel check.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub url: String,
    pub timeout: Duration,
}

impl PanelConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_PANEL_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::new(URL_ALERT_PANEL)
    }
}

#[derive(Debug)]
pub enum PanelError {
    Timeout { url: String, timeout: Duration },
    Unavailable { url: String, message: String },
    Client(String),
}

impl PanelError {
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Timeout { url, .. } | Self::Unavailable { url, .. } => Some(url),
            Self::Client(_) => None,
        }
    }
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { url, timeout } => write!(
                f,
                "alert panel {url} did not answer within {}s",
                timeout.as_secs()
            ),
            Self::Unavailable { url, message } => {
                write!(f, "alert panel {url} unavailable: {message}")
            }
            Self::Client(message) => write!(f, "failed to build HTTP client: {message}"),
        }
    }
}

impl Error for PanelError {}

/// Outcome of a successful panel check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PanelStatus {
    pub url: String,
    pub http_status: u16,
    pub checked_at: DateTime<Utc>,
}

/// HTTP client bound to the alert panel URL.
#[derive(Debug, Clone)]
pub struct PanelProxy {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl PanelProxy {
    /// Builds the HTTP client for the configured panel.
    ///
    /// # Errors
    /// Returns `PanelError::Client` if the HTTP client cannot be constructed.
    pub fn new(config: PanelConfig) -> Result<Self, PanelError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| PanelError::Client(err.to_string()))?;
        Ok(Self {
            client,
            url: config.url,
            timeout: config.timeout,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issues a single GET against the panel. No retries.
    ///
    /// Any 2xx or 3xx status counts as reachable.
    ///
    /// # Errors
    /// Returns `PanelError::Timeout` when the deadline passes and
    /// `PanelError::Unavailable` for any other transport failure or status.
    pub async fn check(&self) -> Result<PanelStatus, PanelError> {
        debug!(url = %self.url, "checking alert panel");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| self.classify(&err))?;

        let status = response.status();
        if status.is_success() || status.is_redirection() {
            debug!(url = %self.url, status = status.as_u16(), "alert panel reachable");
            Ok(PanelStatus {
                url: self.url.clone(),
                http_status: status.as_u16(),
                checked_at: Utc::now(),
            })
        } else {
            warn!(url = %self.url, status = status.as_u16(), "alert panel returned error status");
            Err(PanelError::Unavailable {
                url: self.url.clone(),
                message: format!("HTTP {status}"),
            })
        }
    }

    fn classify(&self, err: &reqwest::Error) -> PanelError {
        if err.is_timeout() {
            warn!(url = %self.url, "alert panel check timed out");
            PanelError::Timeout {
                url: self.url.clone(),
                timeout: self.timeout,
            }
        } else {
            warn!(url = %self.url, error = %err, "alert panel check failed");
            PanelError::Unavailable {
                url: self.url.clone(),
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn proxy_for(url: &str, timeout: Duration) -> PanelProxy {
        PanelProxy::new(PanelConfig::new(url).with_timeout(timeout)).expect("client should build")
    }

    #[tokio::test]
    async fn reachable_panel_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/", server.uri());
        let status = proxy_for(&url, Duration::from_secs(5))
            .check()
            .await
            .expect("panel should be reachable");
        assert_eq!(status.http_status, 200);
        assert_eq!(status.url, url);
    }

    #[tokio::test]
    async fn slow_panel_is_a_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let err = proxy_for(&server.uri(), Duration::from_millis(200))
            .check()
            .await
            .unwrap_err();
        assert!(matches!(err, PanelError::Timeout { .. }), "got {err}");
    }

    #[tokio::test]
    async fn server_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = proxy_for(&server.uri(), Duration::from_secs(5))
            .check()
            .await
            .unwrap_err();
        assert!(matches!(err, PanelError::Unavailable { .. }), "got {err}");
    }

    #[tokio::test]
    async fn refused_connection_is_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
        let addr = listener.local_addr().expect("probe addr");
        drop(listener);

        let url = format!("http://{addr}/");
        let err = proxy_for(&url, Duration::from_secs(5))
            .check()
            .await
            .unwrap_err();
        assert!(matches!(err, PanelError::Unavailable { .. }), "got {err}");
        assert_eq!(err.url(), Some(url.as_str()));
    }
}
