// src/runner/api.rs

//! The sample HTTP API.
//!
//! Two routes demonstrate the wiring: `GET /health` reports service state,
//! `POST /jobs` accepts a job request and answers with a queued-job record.
//! Routing is a pure function over (method, url, body) so it is testable
//! without a socket; [`run_api`] is the accept loop around it, polling the
//! shutdown flag between requests.
//!
//! [`run_api`]: self::run_api

use std::io::Read;
use std::time::Duration;

use ::serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::uuid::Uuid;

use crate::cfg::config::Settings;
use crate::common::{AppError, AppResult};
use crate::runner::shutdown::GracefulShutdown;

/// How long one `recv` blocks before re-checking the shutdown flag.
const API_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// `GET /health` response body.
#[derive(Debug, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub app: String,
    pub version: String,
    pub debug: bool,
}

/// `POST /jobs` request body.
#[derive(Debug, Deserialize, Serialize)]
pub struct JobCreateRequest {
    pub name: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// `POST /jobs` response body.
#[derive(Debug, Deserialize, Serialize)]
pub struct JobResponse {
    pub job_id: String,
    pub name: String,
    pub status: String,
}

fn json_error(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

/// Map one request to `(status code, JSON body)`.
pub fn route_request(
    settings: &Settings,
    method: &str,
    url: &str,
    body: &[u8],
) -> (u16, String) {
    defñ!("{} {}", method, url);
    match (method, url) {
        ("GET", "/health") => {
            let response = HealthResponse {
                status: String::from("ok"),
                app: settings.app.name.clone(),
                version: settings.app.version.clone(),
                debug: settings.app.debug,
            };
            (200, serde_json::to_string(&response).unwrap_or_default())
        }
        ("POST", "/jobs") => {
            let request: JobCreateRequest = match serde_json::from_slice(body) {
                Ok(val) => val,
                Err(err) => {
                    return (400, json_error(&format!("invalid job request: {}", err)));
                }
            };
            log::info!("Received job request: {}", request.name);
            let response = JobResponse {
                job_id: Uuid::new_v4().to_string(),
                name: request.name,
                status: String::from("queued"),
            };
            (201, serde_json::to_string(&response).unwrap_or_default())
        }
        _ => (404, json_error("not found")),
    }
}

fn respond(
    settings: &Settings,
    mut request: tiny_http::Request,
) {
    let mut body: Vec<u8> = Vec::new();
    if let Err(err) = request.as_reader().read_to_end(&mut body) {
        log::error!("API request body read failed: {}", err);
        return;
    }
    let method = request.method().as_str().to_string();
    let url = request.url().to_string();
    let (status, payload) = route_request(settings, &method, &url, &body);
    let header =
        tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
    let response = tiny_http::Response::from_string(payload)
        .with_status_code(status)
        .with_header(header);
    if let Err(err) = request.respond(response) {
        log::error!("API response failed: {}", err);
    }
}

/// Serve the sample API on `host:port` until shutdown is requested.
pub fn run_api(
    settings: &Settings,
    shutdown: &GracefulShutdown,
    host: &str,
    port: u16,
) -> AppResult<()> {
    defn!("({}:{})", host, port);
    let addr = format!("{}:{}", host, port);
    let server = tiny_http::Server::http(addr.as_str()).map_err(|err| {
        AppError::Configuration(format!("cannot bind API server on {}: {}", addr, err))
    })?;
    log::info!(
        "Starting API server for {} on {}",
        settings.app.name,
        addr,
    );

    while !shutdown.should_exit() {
        match server.recv_timeout(API_POLL_INTERVAL) {
            Ok(Some(request)) => respond(settings, request),
            Ok(None) => {}
            Err(err) => {
                log::error!("API accept failed: {}", err);
            }
        }
    }
    log::info!("API server stopped");
    defx!();

    Ok(())
}
