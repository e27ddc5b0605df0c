//! HTTP access to the upstream provider.
//!
//! [`Transport`] is the seam the orchestrator talks through; [`HttpTransport`]
//! is the reqwest-backed client session shared by every call.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::{fmt, time::Duration};
use tokio::time::Instant;
use tracing::{debug, info};
use url::Url;

use crate::{
    context::CallContext,
    endpoint::Endpoint,
    envelope::preview,
    error::{QWeatherError, Result},
    log_level::LogLevel,
};

pub const API_KEY_HEADER: &str = "X-QW-Api-Key";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

const MAX_LOG_BODY_LENGTH: usize = 1000;

#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// GET `endpoint` and return the undecoded body of a `200 OK` response.
    async fn get(
        &self,
        endpoint: &Endpoint,
        path_params: &[&str],
        query: &[(&str, &str)],
        ctx: &CallContext,
    ) -> Result<Vec<u8>>;

    fn log_level(&self) -> LogLevel {
        LogLevel::default()
    }
}

/// Everything needed to open a client session.
#[derive(Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub api_key: String,
    pub log_level: LogLevel,
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            log_level: LogLevel::default(),
            timeout: DEFAULT_TIMEOUT,
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
        }
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("log_level", &self.log_level)
            .field("timeout", &self.timeout)
            .field("pool_max_idle_per_host", &self.pool_max_idle_per_host)
            .field("pool_idle_timeout", &self.pool_idle_timeout)
            .finish()
    }
}

/// Client session: base URL, credential, verbosity and a pooled reqwest client.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    api_key: String,
    log_level: LogLevel,
    http: Client,
}

impl HttpTransport {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|err| QWeatherError::Client(format!(
            "invalid base URL '{base_url}': {err}"
        )))?;

        let http = Client::builder()
            .timeout(settings.timeout)
            .pool_max_idle_per_host(settings.pool_max_idle_per_host)
            .pool_idle_timeout(settings.pool_idle_timeout)
            .gzip(true)
            .build()
            .map_err(|err| QWeatherError::Client(err.to_string()))?;

        Ok(Self {
            base_url,
            api_key: settings.api_key,
            log_level: settings.log_level,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Re-configure verbosity. Needs exclusive access, so it happens before
    /// the session is shared.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    fn build_url(
        &self,
        endpoint: &Endpoint,
        path_params: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Url> {
        let path = endpoint.render_path(path_params)?;
        endpoint.check_query(query)?;

        let mut url = Url::parse(&format!("{}{}", self.base_url, path)).map_err(|err| {
            QWeatherError::InvalidRequest {
                endpoint: endpoint.path,
                message: err.to_string(),
            }
        })?;

        if !query.is_empty() {
            let mut pairs = query.to_vec();
            pairs.sort();
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    fn log_response(&self, endpoint: &Endpoint, status: StatusCode, body: &[u8]) {
        match self.log_level {
            LogLevel::Debug => debug!(
                endpoint = endpoint.path,
                status = status.as_u16(),
                body = %preview(body, MAX_LOG_BODY_LENGTH),
                "API response"
            ),
            LogLevel::Info => info!(
                endpoint = endpoint.path,
                status = status.as_u16(),
                "API response"
            ),
            LogLevel::Error | LogLevel::None => {}
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        endpoint: &Endpoint,
        path_params: &[&str],
        query: &[(&str, &str)],
        ctx: &CallContext,
    ) -> Result<Vec<u8>> {
        let url = self.build_url(endpoint, path_params, query)?;
        let target = sanitized_target(&url);

        let mut request = self.http.get(url).header(API_KEY_HEADER, &self.api_key);
        // A caller deadline replaces the session default, longer or shorter.
        if let Some(deadline) = ctx.deadline() {
            request = request.timeout(deadline.saturating_duration_since(Instant::now()));
        }

        let (status, body) = ctx
            .run(async {
                let response = request
                    .send()
                    .await
                    .map_err(|err| transport_error(err, &target))?;

                let status = response.status();
                if status != StatusCode::OK {
                    return Err(QWeatherError::HttpStatus {
                        status: status.as_u16(),
                        endpoint: target.clone(),
                    });
                }

                let body = response
                    .bytes()
                    .await
                    .map_err(|err| transport_error(err, &target))?;
                Ok((status, body))
            })
            .await?;

        self.log_response(endpoint, status, &body);
        Ok(body.to_vec())
    }

    fn log_level(&self) -> LogLevel {
        self.log_level
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}

/// Scheme, host (and port) and path: never the query string.
pub fn sanitized_target(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{host}:{port}{}", url.scheme(), url.path()),
        None => format!("{}://{host}{}", url.scheme(), url.path()),
    }
}

fn transport_error(err: reqwest::Error, target: &str) -> QWeatherError {
    if err.is_timeout() {
        return QWeatherError::TimedOut;
    }
    // reqwest's message embeds the full URL, query included.
    let err = err.without_url();
    let message = if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    };
    QWeatherError::Transport {
        endpoint: target.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{AIR_QUALITY_CURRENT, CITY_LOOKUP, WEATHER_INDICES, WEATHER_NOW};
    use crate::log_level::capture::logs_of;

    fn transport(base_url: &str) -> HttpTransport {
        HttpTransport::new(ClientSettings::new(base_url, "secret-key")).unwrap()
    }

    #[test]
    fn query_encoding_is_order_independent() {
        let t = transport("https://api.example.com");
        let a = t
            .build_url(&WEATHER_INDICES, &["1d"], &[("location", "101010100"), ("type", "1")])
            .unwrap();
        let b = t
            .build_url(&WEATHER_INDICES, &["1d"], &[("type", "1"), ("location", "101010100")])
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(
            a.as_str(),
            "https://api.example.com/v7/indices/1d?location=101010100&type=1"
        );
    }

    #[test]
    fn query_values_are_url_encoded() {
        let t = transport("https://api.example.com/");
        let url = t
            .build_url(&CITY_LOOKUP, &[], &[("location", "São Paulo & co")])
            .unwrap();
        assert_eq!(url.path(), "/geo/v2/city/lookup");
        assert_eq!(url.query(), Some("location=S%C3%A3o+Paulo+%26+co"));
    }

    #[test]
    fn no_query_leaves_no_question_mark() {
        let t = transport("https://api.example.com");
        let url = t
            .build_url(&AIR_QUALITY_CURRENT, &["39.90", "116.41"], &[])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/airquality/v1/current/39.90/116.41"
        );
    }

    #[test]
    fn sanitized_target_drops_query() {
        let url = Url::parse("http://127.0.0.1:8080/v7/weather/now?location=1&key=secret").unwrap();
        assert_eq!(sanitized_target(&url), "http://127.0.0.1:8080/v7/weather/now");
    }

    #[test]
    fn debug_output_redacts_credential() {
        let t = transport("https://api.example.com");
        let rendered = format!("{t:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));

        let settings = ClientSettings::new("https://api.example.com", "secret-key");
        assert!(!format!("{settings:?}").contains("secret-key"));
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = HttpTransport::new(ClientSettings::new("not a url", "k")).unwrap_err();
        assert!(matches!(err, QWeatherError::Client(_)));
    }

    fn logged_response(level: LogLevel, body: &[u8]) -> String {
        let mut t = transport("https://api.example.com");
        t.set_log_level(level);
        logs_of(|| t.log_response(&WEATHER_NOW, StatusCode::OK, body))
    }

    #[test]
    fn debug_logs_truncated_body_with_endpoint_and_status() {
        let body = "a".repeat(1500);
        let logs = logged_response(LogLevel::Debug, body.as_bytes());

        assert!(logs.contains("/v7/weather/now"));
        assert!(logs.contains("status=200"));
        assert!(logs.contains(&format!("{}... (truncated)", "a".repeat(1000))));
        assert!(!logs.contains(&"a".repeat(1001)));
    }

    #[test]
    fn debug_logs_short_body_whole() {
        let logs = logged_response(LogLevel::Debug, br#"{"code":"200","now":{"text":"Sunny"}}"#);
        assert!(logs.contains("Sunny"));
        assert!(!logs.contains("truncated"));
    }

    #[test]
    fn info_logs_endpoint_and_status_only() {
        let logs = logged_response(LogLevel::Info, br#"{"code":"200","now":{"text":"Sunny"}}"#);

        assert!(logs.contains("/v7/weather/now"));
        assert!(logs.contains("status=200"));
        assert!(!logs.contains("Sunny"));
    }

    #[test]
    fn error_and_none_are_silent_on_success() {
        for level in [LogLevel::Error, LogLevel::None] {
            let logs = logged_response(level, br#"{"code":"200"}"#);
            assert!(logs.is_empty(), "{level}: {logs}");
        }
    }

    #[test]
    fn log_level_is_reconfigured_through_exclusive_access() {
        let mut t = transport("https://api.example.com");
        assert_eq!(Transport::log_level(&t), LogLevel::Error);
        t.set_log_level(LogLevel::Debug);
        assert_eq!(Transport::log_level(&t), LogLevel::Debug);
    }
}
