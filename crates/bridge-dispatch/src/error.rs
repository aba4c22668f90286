//! Dispatch error taxonomy.
//!
//! Every error is terminal: the dispatcher makes a single attempt per
//! invocation and surfaces the failure to the caller immediately.

use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while dispatching a directive.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Envelope is structurally unusable (missing directive or scope)
    #[error("Malformed request: {0}")]
    MalformedRequest(&'static str),

    /// Directive carries a payload version other than "3"
    #[error("Unsupported payload version: {0:?}")]
    UnsupportedVersion(String),

    /// Scope carries a credential type other than BearerToken
    #[error("Unsupported authorization type: {0:?}")]
    UnsupportedAuthType(String),

    /// Backend rejected the credential (401 or 403)
    #[error("Backend rejected the credential (status {0})")]
    InvalidCredential(u16),

    /// Backend answered with any other error status
    #[error("Backend returned status {0}")]
    BackendStatus(u16),

    /// Directive envelope could not be serialized
    #[error("Failed to serialize directive envelope: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Connection, DNS, TLS, or timeout failure
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend body was not a decodable JSON object
    #[error("Failed to decode backend response: {0}")]
    ResponseDecode(String),
}

impl DispatchError {
    /// Alexa error type for this failure.
    ///
    /// Credential rejections map to `INVALID_AUTHORIZATION_CREDENTIAL`;
    /// everything else is reported as `INTERNAL_ERROR`.
    pub fn error_type(&self) -> &'static str {
        match self {
            DispatchError::InvalidCredential(_) => "INVALID_AUTHORIZATION_CREDENTIAL",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Synthesize an Alexa `ErrorResponse` document for this failure.
    ///
    /// Echoes the incoming `messageId` when the caller still has one;
    /// otherwise a fresh UUID keeps the document well-formed.
    pub fn to_error_document(&self, message_id: Option<&str>) -> Value {
        let message_id = message_id
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        json!({
            "event": {
                "header": {
                    "namespace": "Alexa",
                    "name": "ErrorResponse",
                    "messageId": message_id,
                    "payloadVersion": "3",
                },
                "payload": {
                    "type": self.error_type(),
                    "message": self.to_string(),
                }
            }
        })
    }
}

/// Result type alias using DispatchError.
pub type DispatchResult<T> = Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_errors_map_to_invalid_authorization_credential() {
        assert_eq!(
            DispatchError::InvalidCredential(401).error_type(),
            "INVALID_AUTHORIZATION_CREDENTIAL"
        );
        assert_eq!(
            DispatchError::InvalidCredential(403).error_type(),
            "INVALID_AUTHORIZATION_CREDENTIAL"
        );
    }

    #[test]
    fn every_other_error_maps_to_internal_error() {
        assert_eq!(
            DispatchError::BackendStatus(500).error_type(),
            "INTERNAL_ERROR"
        );
        assert_eq!(
            DispatchError::MalformedRequest("missing directive").error_type(),
            "INTERNAL_ERROR"
        );
        assert_eq!(
            DispatchError::UnsupportedVersion("2".to_string()).error_type(),
            "INTERNAL_ERROR"
        );
        assert_eq!(
            DispatchError::ResponseDecode("bad body".to_string()).error_type(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn error_document_echoes_message_id() {
        let doc = DispatchError::InvalidCredential(403).to_error_document(Some("msg-1"));
        assert_eq!(doc["event"]["header"]["namespace"], "Alexa");
        assert_eq!(doc["event"]["header"]["name"], "ErrorResponse");
        assert_eq!(doc["event"]["header"]["messageId"], "msg-1");
        assert_eq!(doc["event"]["header"]["payloadVersion"], "3");
        assert_eq!(
            doc["event"]["payload"]["type"],
            "INVALID_AUTHORIZATION_CREDENTIAL"
        );
    }

    #[test]
    fn error_document_without_message_id_gets_a_fresh_one() {
        let doc = DispatchError::BackendStatus(500).to_error_document(None);
        let message_id = doc["event"]["header"]["messageId"].as_str().unwrap();
        assert!(Uuid::parse_str(message_id).is_ok());
        assert_eq!(doc["event"]["payload"]["type"], "INTERNAL_ERROR");
    }
}
