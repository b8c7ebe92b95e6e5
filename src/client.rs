//! Base JSON-RPC 2.0 HTTP client.
//!
//! Owns the connection configuration and performs one POST to `/json_rpc`
//! per call, normalizing the daemon's reply into a single outcome: the
//! `result` payload, the daemon's own error object, or a transport/parse
//! failure. Supports HTTP Digest auth and a configurable timeout.

use crate::error::RpcError;
use crate::request::RpcRequest;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
use serde_json::Value;
use std::time::Duration;

/// Message surfaced for connection-level failures.
const TRANSPORT_FAILED: &str = "unable to resolve RPC wallet";

/// Configuration for a wallet RPC client.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Wallet daemon host.
    pub host: String,
    /// Wallet daemon RPC port.
    pub port: u16,
    /// Username for HTTP Digest auth; the handshake is attempted only when
    /// this is set.
    pub username: Option<String>,
    /// Password for HTTP Digest auth.
    pub password: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: crate::ports::WALLET_MAINNET,
            username: None,
            password: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Async JSON-RPC client for the wallet daemon.
pub struct RpcClient {
    http: reqwest::Client,
    config: RpcConfig,
    endpoint: String,
}

impl RpcClient {
    /// Create a client for the given host and port.
    pub fn new(host: &str, port: u16) -> Self {
        Self::with_config(RpcConfig {
            host: host.to_string(),
            port,
            ..Default::default()
        })
    }

    /// Create a client with full configuration.
    pub fn with_config(config: RpcConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            // connections are not reused across calls
            .pool_max_idle_per_host(0)
            .build()
            .expect("failed to create HTTP client");
        let endpoint = format!("http://{}:{}/json_rpc", config.host, config.port);

        Self {
            http,
            config,
            endpoint,
        }
    }

    /// The URL requests are POSTed to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Call a JSON-RPC method, building the envelope in place.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, RpcError> {
        self.send(&RpcRequest::new(method, params)).await
    }

    /// Deliver one request and resolve exactly one outcome.
    ///
    /// Expected failures (a daemon-reported error, an unreachable daemon, a
    /// malformed or anomalous body) all come back as [`RpcError`] variants;
    /// nothing on this path panics and no retries happen here.
    pub async fn send(&self, request: &RpcRequest<'_>) -> Result<Value, RpcError> {
        let body = serde_json::to_string(request)?;

        let response = match self.post(&body).await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("POST {} failed: {}", self.endpoint, e);
                return Err(RpcError::Transport {
                    message: TRANSPORT_FAILED.to_string(),
                });
            }
        };

        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                log::debug!("reading response from {} failed: {}", self.endpoint, e);
                return Err(RpcError::Transport {
                    message: TRANSPORT_FAILED.to_string(),
                });
            }
        };

        if status == 401 {
            return Err(RpcError::Unauthorized);
        }

        let parsed: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                return Err(RpcError::Parse {
                    message: e.to_string(),
                    body: text,
                })
            }
        };

        // Presence of the key decides the branch: `"result": false` is a
        // perfectly good result.
        if let Some(result) = parsed.get("result") {
            return Ok(result.clone());
        }
        if let Some(error) = parsed.get("error") {
            return Err(RpcError::Rpc {
                code: error.get("code").and_then(Value::as_i64).unwrap_or(0),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                raw: error.clone(),
            });
        }

        Err(RpcError::Unexpected { status, body: text })
    }

    /// POST the serialized body, answering a Digest challenge once if
    /// credentials are configured.
    async fn post(&self, body: &str) -> Result<reqwest::Response, reqwest::Error> {
        let response = self
            .http
            .post(&self.endpoint)
            .headers(self.base_headers())
            .body(body.to_string())
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            if let Some(auth) = self.digest_answer(&response) {
                let mut headers = self.base_headers();
                headers.insert(AUTHORIZATION, auth);
                return self
                    .http
                    .post(&self.endpoint)
                    .headers(headers)
                    .body(body.to_string())
                    .send()
                    .await;
            }
        }

        Ok(response)
    }

    fn base_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Answer a `WWW-Authenticate: Digest` challenge with the configured
    /// credentials.
    fn digest_answer(&self, response: &reqwest::Response) -> Option<HeaderValue> {
        let username = self.config.username.as_deref()?;
        let challenge = response.headers().get(WWW_AUTHENTICATE)?.to_str().ok()?;
        let mut prompt = digest_auth::parse(challenge).ok()?;
        let context = digest_auth::AuthContext::new_post(
            username,
            self.config.password.as_str(),
            "/json_rpc",
            Option::<&[u8]>::None,
        );
        let answer = prompt.respond(&context).ok()?;
        HeaderValue::from_str(&answer.to_string()).ok()
    }
}
