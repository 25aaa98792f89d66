// src/net/httpclient.rs

//! Thin wrapper over a [`ureq::Agent`] with timeouts and uniform error
//! mapping. Pass-through by design: callers receive the [`ureq::Response`]
//! and decode the body themselves.

use std::time::Duration;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::cfg::config::HttpConfig;
use crate::common::{AppError, AppResult};

/// Blocking HTTP client with a base URL and connect/request timeouts.
pub struct HttpClient {
    agent: ureq::Agent,
    base_url: String,
}

/// One-line rendering of a [`ureq::Error`] without consuming a response
/// body.
pub(crate) fn describe_ureq_error(err: &ureq::Error) -> String {
    match err {
        ureq::Error::Status(code, _response) => format!("status {}", code),
        other => other.to_string(),
    }
}

impl HttpClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> HttpClient {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .timeout_connect(connect_timeout)
            .redirects(5)
            .build();

        HttpClient {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &HttpConfig) -> HttpClient {
        HttpClient::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    /// Join `path` onto the base URL. An absolute `http(s)://` path is
    /// used as-is.
    pub fn url_for(
        &self,
        path: &str,
    ) -> String {
        if path.starts_with("http://") || path.starts_with("https://") || self.base_url.is_empty()
        {
            return path.to_string();
        }

        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` with optional query pairs. Non-2xx statuses and
    /// transport failures both map to [`AppError::HttpClient`].
    pub fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<ureq::Response> {
        let url = self.url_for(path);
        defñ!("GET {} {:?}", url, query);
        let mut request = self.agent.get(&url);
        for (key, value) in query.iter() {
            request = request.query(key, value);
        }
        request.call().map_err(|err| {
            log::error!("HTTP GET failed: {} - {}", url, describe_ureq_error(&err));
            AppError::HttpClient(format!("GET {}: {}", url, describe_ureq_error(&err)))
        })
    }

    /// POST a JSON body to `path`.
    pub fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> AppResult<ureq::Response> {
        let url = self.url_for(path);
        defñ!("POST {}", url);
        self.agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|err| {
                log::error!("HTTP POST failed: {} - {}", url, describe_ureq_error(&err));
                AppError::HttpClient(format!("POST {}: {}", url, describe_ureq_error(&err)))
            })
    }
}
