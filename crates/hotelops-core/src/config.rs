// ── Runtime client configuration ──
//
// Describes how to reach the back-office API. Carries the token and
// connection tuning but never touches disk; the CLI builds one from its
// profile and hands it in.

use std::num::NonZeroU32;
use std::time::Duration;

use hotelops_api::{EmptyResultMarkers, TlsMode, TransportConfig};
use secrecy::SecretString;
use url::Url;

use crate::cache::DEFAULT_MAX_AGE;

/// Configuration for one back-office API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://backoffice.example.com/api/`.
    pub api_url: Url,
    /// Bearer token sent with every request.
    pub token: SecretString,
    pub tls: TlsMode,
    /// Request timeout.
    pub timeout: Duration,
    /// Page size for every list; `None` keeps each resource's default.
    pub per_page: Option<NonZeroU32>,
    /// Server messages meaning "no matching records". `None` uses the
    /// built-in set; an empty list disables matching.
    pub empty_markers: Option<Vec<String>>,
    /// How long the shared hotel list stays cached.
    pub reference_max_age: Duration,
}

impl ClientConfig {
    pub fn new(api_url: Url, token: SecretString) -> Self {
        Self {
            api_url,
            token,
            tls: TlsMode::default(),
            timeout: Duration::from_secs(30),
            per_page: None,
            empty_markers: None,
            reference_max_age: DEFAULT_MAX_AGE,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        }
    }

    pub(crate) fn markers(&self) -> EmptyResultMarkers {
        self.empty_markers
            .as_ref()
            .map_or_else(EmptyResultMarkers::default, |m| EmptyResultMarkers::new(m.clone()))
    }
}
