//! Blocking client for the HelloBlock blockchain-data API.
//!
//! # Overview
//! Three endpoints: address lookup, testnet faucet funding and raw
//! transaction propagation. Every response arrives in the same JSON envelope
//! (`status`, `message`, `details`, `data`); anything but `status: "success"`
//! becomes `ApiError::Remote`.
//!
//! # Design
//! - `HelloBlockClient` builds `HttpRequest`s and parses `HttpResponse`s as
//!   plain data (`build_*` / `parse_*`), so the core is testable without a
//!   network.
//! - A `Transport` does the round trip. `UreqTransport` is the blocking
//!   default; `get_address`, `faucet` and `propagate` compose all three steps.
//! - The network lives in the client's `ClientConfig` and is fixed at
//!   construction.
//!
//! ```no_run
//! use helloblock_core::{HelloBlockClient, Network};
//!
//! let client = HelloBlockClient::for_network(Network::Testnet);
//! let grant = client.faucet(1)?;
//! let address = client.get_address(&grant.address)?;
//! println!("{} holds {}", address.address, address.balance);
//! # Ok::<(), helloblock_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod network;
pub mod transport;
pub mod types;

pub use client::HelloBlockClient;
pub use config::ClientConfig;
pub use envelope::Envelope;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use network::{Network, UnknownNetwork};
pub use transport::{Transport, UreqTransport};
pub use types::{Address, FaucetGrant, Transaction, Unspent};
