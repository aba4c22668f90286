//! HTTP transport selection for the Alexa HA bridge.
//!
//! Produces the one `reqwest::Client` the dispatcher uses for every backend
//! call: either a direct client (optionally skipping TLS verification) or a
//! client bound to a private overlay-network session. The variant is chosen
//! once from configuration and the resulting client is shared read-only
//! across concurrent invocations.

mod error;

pub use error::{TransportError, TransportResult};

use bridge_config::Config;
use reqwest::{Client, Proxy};
use std::time::Duration;
use tracing::info;

/// Request timeout applied uniformly to every transport variant.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Handle to an established overlay-network session.
///
/// Joining the private network (key exchange, node registration, routing) is
/// the job of an external userspace tunnel daemon provisioned with the
/// configured auth key. This handle reaches the overlay through the daemon's
/// local SOCKS5 listener, so requests made with the client it yields never
/// touch the public internet.
#[derive(Debug, Clone)]
pub struct TunnelSession {
    proxy_url: String,
}

impl TunnelSession {
    /// Default SOCKS5 listener of a userspace tunnel daemon.
    pub const DEFAULT_PROXY_URL: &'static str = "socks5h://127.0.0.1:1055";

    /// Session reachable at the daemon's default SOCKS5 listener.
    pub fn new() -> Self {
        Self::with_proxy(Self::DEFAULT_PROXY_URL)
    }

    /// Session reachable at a specific SOCKS5 listener.
    pub fn with_proxy(proxy_url: impl Into<String>) -> Self {
        Self {
            proxy_url: proxy_url.into(),
        }
    }

    /// The SOCKS5 listener this session routes through.
    pub fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    fn http_client(&self, timeout: Duration) -> TransportResult<Client> {
        let proxy = Proxy::all(&self.proxy_url)
            .map_err(|e| TransportError::Proxy(format!("{}: {}", self.proxy_url, e)))?;
        // The timeout is ours to enforce, not the overlay's.
        let client = Client::builder().timeout(timeout).proxy(proxy).build()?;
        Ok(client)
    }
}

impl Default for TunnelSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport variant for backend calls, selected once from configuration.
#[derive(Debug, Clone)]
pub enum Transport {
    /// Direct client over the public network.
    Direct {
        /// Verify the backend's TLS certificate. `false` only for trusted
        /// local or self-signed deployments.
        verify_tls: bool,
    },
    /// Client bound to a private overlay-network session.
    Tunnel(TunnelSession),
}

impl Transport {
    /// Select the transport variant the configuration asks for.
    pub fn from_config(config: &Config) -> Self {
        if config.tunnel_enabled() {
            let session = match &config.tunnel_socks5_proxy {
                Some(addr) => TunnelSession::with_proxy(addr.clone()),
                None => TunnelSession::new(),
            };
            info!(proxy = %session.proxy_url(), "Routing backend calls over the overlay network");
            Transport::Tunnel(session)
        } else {
            Transport::Direct {
                verify_tls: config.verify_tls,
            }
        }
    }

    /// Build the HTTP client for this transport.
    ///
    /// The fixed request timeout applies to both variants.
    pub fn client(&self) -> TransportResult<Client> {
        self.client_with_timeout(REQUEST_TIMEOUT)
    }

    /// Build the HTTP client with a specific request timeout.
    pub fn client_with_timeout(&self, timeout: Duration) -> TransportResult<Client> {
        match self {
            Transport::Direct { verify_tls } => {
                let mut builder = Client::builder().timeout(timeout);
                if !verify_tls {
                    builder = builder.danger_accept_invalid_certs(true);
                }
                Ok(builder.build()?)
            }
            Transport::Tunnel(session) => session.http_client(timeout),
        }
    }
}
