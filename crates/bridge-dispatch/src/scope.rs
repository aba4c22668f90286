//! Authorization scope resolution.
//!
//! Alexa places the scope object in different locations depending on the
//! directive family: `endpoint.scope` for device directives,
//! `payload.grantee` for AcceptGrant, `payload.scope` for discovery. Each
//! location gets its own extractor and the dispatcher takes the first match
//! in fixed priority order.

use serde_json::Value;

/// Inspects one location of the directive and returns the scope object
/// stored there, if any.
type ScopeExtractor = fn(&Value) -> Option<&Value>;

/// Recognized scope locations, highest priority first.
const SCOPE_LOCATIONS: [ScopeExtractor; 3] = [endpoint_scope, payload_grantee, payload_scope];

fn endpoint_scope(directive: &Value) -> Option<&Value> {
    directive.get("endpoint")?.get("scope").filter(|s| s.is_object())
}

fn payload_grantee(directive: &Value) -> Option<&Value> {
    directive.get("payload")?.get("grantee").filter(|s| s.is_object())
}

fn payload_scope(directive: &Value) -> Option<&Value> {
    directive.get("payload")?.get("scope").filter(|s| s.is_object())
}

/// Resolve the scope object of a directive, first match wins.
pub(crate) fn resolve_scope(directive: &Value) -> Option<&Value> {
    SCOPE_LOCATIONS
        .iter()
        .find_map(|extract| extract(directive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scope(token: &str) -> Value {
        json!({"type": "BearerToken", "token": token})
    }

    #[test]
    fn endpoint_scope_wins_over_payload_locations() {
        let directive = json!({
            "endpoint": {"scope": scope("endpoint")},
            "payload": {"grantee": scope("grantee"), "scope": scope("payload")},
        });
        let resolved = resolve_scope(&directive).unwrap();
        assert_eq!(resolved["token"], "endpoint");
    }

    #[test]
    fn grantee_wins_over_payload_scope() {
        let directive = json!({
            "payload": {"grantee": scope("grantee"), "scope": scope("payload")},
        });
        let resolved = resolve_scope(&directive).unwrap();
        assert_eq!(resolved["token"], "grantee");
    }

    #[test]
    fn payload_scope_is_the_last_resort() {
        let directive = json!({
            "payload": {"scope": scope("payload")},
        });
        let resolved = resolve_scope(&directive).unwrap();
        assert_eq!(resolved["token"], "payload");
    }

    #[test]
    fn no_recognized_location_resolves_nothing() {
        assert!(resolve_scope(&json!({})).is_none());
        assert!(resolve_scope(&json!({"payload": {}})).is_none());
        assert!(resolve_scope(&json!({"endpoint": {"endpointId": "light.kitchen"}})).is_none());
    }

    #[test]
    fn non_object_scopes_are_skipped() {
        // A string where the scope object should be does not count; the
        // next location in priority order is used instead.
        let directive = json!({
            "endpoint": {"scope": "not-an-object"},
            "payload": {"scope": scope("payload")},
        });
        let resolved = resolve_scope(&directive).unwrap();
        assert_eq!(resolved["token"], "payload");
    }
}
