//! Client configuration.
//!
//! # Design
//! A `ClientConfig` is fixed when a `HelloBlockClient` is built and never
//! changes afterwards. Switching networks means building a new client (or
//! calling `HelloBlockClient::set_network`, which consumes the old one).
//!
//! `base_url` overrides the `https://{network}.helloblock.io` host entirely.
//! It exists for pointing the client at the mock server in tests; when it is
//! set the network no longer affects request URLs.

use serde::{Deserialize, Serialize};

use crate::network::Network;

/// Domain every HelloBlock network is served under.
pub const HELLOBLOCK_DOMAIN: &str = "helloblock.io";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub network: Network,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ClientConfig {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            base_url: None,
        }
    }

    pub fn set_network(&mut self, network: Network) {
        self.network = network;
    }

    /// Send every request to `base_url` instead of the network's host.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    /// Scheme and host that endpoint paths are appended to.
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}.{HELLOBLOCK_DOMAIN}", self.network),
        }
    }
}
