//! The directive dispatcher.

use crate::scope::resolve_scope;
use crate::{DispatchError, DispatchResult};
use bridge_config::Config;
use reqwest::Client;
use serde_json::Value;
use tracing::{error, info, warn};

/// Home Assistant's Alexa Smart Home endpoint.
pub const SMART_HOME_PATH: &str = "/api/alexa/smart_home";

/// The only directive payload version the bridge accepts.
const PAYLOAD_VERSION: &str = "3";

/// The only credential type the bridge accepts.
const BEARER_TOKEN_TYPE: &str = "BearerToken";

/// Validates directives and forwards them to the backend.
///
/// Shared read-only across concurrent invocations; the `reqwest::Client`
/// is internally reference-counted and safe for concurrent use.
#[derive(Clone)]
pub struct DirectiveDispatcher {
    base_url: String,
    debug: bool,
    long_lived_token: String,
    client: Client,
}

impl DirectiveDispatcher {
    /// Create a dispatcher from the resolved configuration and the client
    /// produced by the transport layer.
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            base_url: config.base_url.clone(),
            debug: config.debug,
            long_lived_token: config.long_lived_token.clone(),
            client,
        }
    }

    /// Validate `event` and forward it to the backend.
    ///
    /// The entire original envelope is forwarded, never a reconstruction,
    /// so unknown fields survive the round trip. On success the backend's
    /// response document is returned unchanged. Single attempt, no retries;
    /// every failure is terminal.
    pub async fn dispatch(&self, event: &Value) -> DispatchResult<Value> {
        info!(event = %event, "Inbound directive event");

        let directive = event
            .get("directive")
            .filter(|d| d.is_object())
            .ok_or(DispatchError::MalformedRequest("missing directive"))?;

        // Absent header counts as an unsupported version: no negotiation.
        let version = directive
            .get("header")
            .and_then(|h| h.get("payloadVersion"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        if version != PAYLOAD_VERSION {
            return Err(DispatchError::UnsupportedVersion(version.to_string()));
        }

        let scope = resolve_scope(directive)
            .ok_or(DispatchError::MalformedRequest("missing scope"))?;

        let scope_type = scope
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if scope_type != BEARER_TOKEN_TYPE {
            return Err(DispatchError::UnsupportedAuthType(scope_type.to_string()));
        }

        // An empty token is forwarded as-is outside debug mode; the backend
        // surfaces the authentication failure.
        let mut token = scope
            .get("token")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if token.is_empty() && self.debug {
            token = &self.long_lived_token;
        }

        let body = serde_json::to_vec(event).map_err(|e| {
            error!(error = %e, "Failed to serialize directive envelope");
            DispatchError::Serialize(e)
        })?;

        let url = format!("{}{}", self.base_url, SMART_HOME_PATH);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Backend request failed");
                DispatchError::Transport(e)
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            warn!(status, "Backend rejected the directive");
            return Err(match status {
                401 | 403 => DispatchError::InvalidCredential(status),
                _ => DispatchError::BackendStatus(status),
            });
        }

        let document: Value = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to decode backend response");
            DispatchError::ResponseDecode(e.to_string())
        })?;
        if !document.is_object() {
            error!("Backend response is not a JSON object");
            return Err(DispatchError::ResponseDecode(
                "expected a JSON object".to_string(),
            ));
        }

        info!(response = %document, "Backend response");
        Ok(document)
    }
}

/// The `messageId` of an event's directive header, when present.
pub fn message_id(event: &Value) -> Option<&str> {
    event
        .get("directive")?
        .get("header")?
        .get("messageId")?
        .as_str()
}
