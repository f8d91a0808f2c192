use reqwest::Client;
use serde_json::Value;
use tokio::time::timeout;

use crate::config::UpstreamConfig;
use crate::proxy::error::ProxyError;

const MAX_ERROR_MESSAGE_LEN: usize = 500;

/// Client for the language-model Messages API.
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to build upstream client: {}", e)))?;

        Ok(Self { client })
    }

    /// POSTs `body` to `{base_url}/v1/messages` and returns the parsed JSON.
    ///
    /// The whole exchange, body included, is bounded by the request timeout.
    pub async fn send_messages(
        &self,
        config: &UpstreamConfig,
        body: &Value,
    ) -> Result<Value, ProxyError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| ProxyError::UpstreamNotConfigured {
                reason: format!("Environment variable {} not set", config.api_key_env),
            })?;

        let request_timeout = config.timeout();
        match timeout(request_timeout, self.do_send(config, &api_key, body)).await {
            Ok(result) => result,
            Err(_) => Err(ProxyError::RequestTimeout {
                duration: request_timeout.as_secs(),
            }),
        }
    }

    async fn do_send(
        &self,
        config: &UpstreamConfig,
        api_key: &str,
        body: &Value,
    ) -> Result<Value, ProxyError> {
        let url = format!("{}/v1/messages", config.base_url.trim_end_matches('/'));
        tracing::debug!(%url, model = %config.model, "Forwarding chat turn");

        let response = self
            .client
            .post(url)
            .header("x-api-key", api_key)
            .header("anthropic-version", &config.api_version)
            .json(body)
            .send()
            .await
            .map_err(|source| ProxyError::ConnectionError { source })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProxyError::Internal(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(ProxyError::UpstreamError {
                status: status.as_u16(),
                message: upstream_error_message(&bytes),
            });
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ProxyError::InvalidUpstreamResponse(format!("not JSON: {}", e)))
    }
}

/// `error.message` from a JSON error body, else the raw body (truncated).
fn upstream_error_message(body: &[u8]) -> String {
    let from_json = serde_json::from_slice::<Value>(body).ok().and_then(|v| {
        v.get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    from_json.unwrap_or_else(|| {
        String::from_utf8_lossy(body)
            .chars()
            .take(MAX_ERROR_MESSAGE_LEN)
            .collect()
    })
}
