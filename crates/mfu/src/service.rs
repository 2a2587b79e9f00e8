//! In-page upload service answering the form's policy queries.
//!
//! Stands in for the server-backed upload service: it reads its limits
//! from the embedded `policy.json` and replies to each query after a
//! short timer, the way a provider backed by a network request would.

use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::spawn;
use gloo_timers::future::TimeoutFuture;
use mfu_form::policy::{MimeTypesReply, SizeLimitReply};
use mfu_form::{PolicyProvider, PolicySnapshot};
use serde::Deserialize;

/// Service configuration embedded at build time.
const SERVICE_JSON: &str = include_str!("../policy.json");

/// Upload service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Delay before each policy reply, in milliseconds.
    pub reply_delay_ms: u32,
    /// Limits reported to the form.
    #[serde(flatten)]
    pub policy: PolicySnapshot,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 150,
            policy: PolicySnapshot::default(),
        }
    }
}

/// Parse a service configuration document.
///
/// # Errors
///
/// Returns the `serde_json` error if `json` is not a valid
/// configuration document.
pub fn parse_config(json: &str) -> Result<ServiceConfig, serde_json::Error> {
    serde_json::from_str(json)
}

/// Load the embedded configuration, falling back to an unrestricted
/// policy if it does not parse.
#[must_use]
pub fn load_config() -> ServiceConfig {
    parse_config(SERVICE_JSON).unwrap_or_else(|e| {
        warn!("invalid embedded policy.json, using an unrestricted policy: {e}");
        ServiceConfig::default()
    })
}

/// Policy provider answering from a fixed [`ServiceConfig`].
#[derive(Debug, Clone)]
pub struct PolicyService {
    config: ServiceConfig,
}

impl PolicyService {
    /// Create a service answering with the limits in `config`.
    #[must_use]
    pub const fn new(config: ServiceConfig) -> Self {
        Self { config }
    }
}

impl PolicyProvider for PolicyService {
    fn max_file_size_limit(&self, reply: SizeLimitReply) {
        let limit = self.config.policy.max_file_size;
        let delay = self.config.reply_delay_ms;
        info!(?limit, "answering mfuGetMaxFileSizeLimit");
        spawn(async move {
            TimeoutFuture::new(delay).await;
            reply(limit);
        });
    }

    fn allowed_mime_types(&self, reply: MimeTypesReply) {
        let mime_types = self.config.policy.allowed_mime_types.clone();
        let delay = self.config.reply_delay_ms;
        info!(?mime_types, "answering mfuGetAllowedMimeTypes");
        spawn(async move {
            TimeoutFuture::new(delay).await;
            reply(mime_types);
        });
    }
}
