//! HelloBlock network selection.
//!
//! # Design
//! The network only decides the hostname prefix of every request URL
//! (`testnet.helloblock.io` vs `mainnet.helloblock.io`). It lives in a
//! `ClientConfig` owned by each client rather than in a global, so two
//! clients bound to different networks can run side by side.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The HelloBlock deployment a client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Testnet,
    Mainnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names neither `testnet` nor `mainnet`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network: {0}")]
pub struct UnknownNetwork(pub String);

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "testnet" => Ok(Network::Testnet),
            "mainnet" => Ok(Network::Mainnet),
            _ => Err(UnknownNetwork(s.to_string())),
        }
    }
}
