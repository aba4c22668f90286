//! Handler configuration, resolved once from the environment.

use crate::{ConfigError, ConfigResult};
use url::Url;

/// Environment variable naming the Home Assistant base URL (required).
pub const ENV_BASE_URL: &str = "BASE_URL";
/// Environment variable enabling debug logging and the fallback token.
pub const ENV_DEBUG: &str = "DEBUG";
/// Environment variable holding the fallback long-lived access token.
pub const ENV_LONG_LIVED_TOKEN: &str = "LONG_LIVED_ACCESS_TOKEN";
/// Environment variable disabling TLS certificate verification.
pub const ENV_NOT_VERIFY_SSL: &str = "NOT_VERIFY_SSL";
/// Environment variable carrying the overlay-network auth key.
pub const ENV_TUNNEL_AUTH_KEY: &str = "TS_AUTHKEY";
/// Environment variable overriding the tunnel daemon's SOCKS5 listener.
pub const ENV_TUNNEL_SOCKS5_PROXY: &str = "TUNNEL_SOCKS5_PROXY";

/// Immutable bridge configuration.
///
/// Constructed once per process; every field is read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Home Assistant base URL, trailing slashes stripped.
    pub base_url: String,
    /// Debug mode: development logging plus fallback-token substitution.
    pub debug: bool,
    /// Fallback long-lived access token, substituted only in debug mode.
    pub long_lived_token: String,
    /// Whether to verify the backend's TLS certificate.
    pub verify_tls: bool,
    /// Overlay-network auth key; a non-empty value routes backend traffic
    /// over the tunnel instead of the public internet. The key itself
    /// provisions the external tunnel daemon.
    pub tunnel_auth_key: Option<String>,
    /// SOCKS5 listener of the external tunnel daemon, if overridden.
    pub tunnel_socks5_proxy: Option<String>,
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests inject variables without mutating
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let base_url = lookup(ENV_BASE_URL)
            .map(|raw| raw.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;

        // Fail at startup on an unparseable URL rather than on every request.
        Url::parse(&base_url)?;

        let debug = lookup(ENV_DEBUG).as_deref() == Some("true");
        let verify_tls = lookup(ENV_NOT_VERIFY_SSL).as_deref() != Some("true");
        let long_lived_token = lookup(ENV_LONG_LIVED_TOKEN).unwrap_or_default();
        let tunnel_auth_key = lookup(ENV_TUNNEL_AUTH_KEY).filter(|key| !key.is_empty());
        let tunnel_socks5_proxy =
            lookup(ENV_TUNNEL_SOCKS5_PROXY).filter(|addr| !addr.is_empty());

        Ok(Self {
            base_url,
            debug,
            long_lived_token,
            verify_tls,
            tunnel_auth_key,
            tunnel_socks5_proxy,
        })
    }

    /// Whether backend traffic should go over the overlay network.
    pub fn tunnel_enabled(&self) -> bool {
        self.tunnel_auth_key.is_some()
    }
}
