//! Request builder, response parser and blocking operations for HelloBlock.
//!
//! # Design
//! Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Both are pure. `get_address`, `faucet` and `propagate` glue them together
//! through the client's `Transport`, one blocking round trip per call.
//!
//! The network is read from the client's own `ClientConfig`, which never
//! changes once the client exists.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::network::Network;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Address, AddressData, FaucetGrant, Transaction, TransactionData};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone)]
pub struct HelloBlockClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl HelloBlockClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    pub fn for_network(network: Network) -> Self {
        Self::new(ClientConfig::new(network))
    }
}

impl Default for HelloBlockClient<UreqTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T> HelloBlockClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn network(&self) -> Network {
        self.config.network
    }

    /// Rebind to another network, keeping the transport.
    pub fn set_network(self, network: Network) -> Self {
        let mut config = self.config;
        config.set_network(network);
        Self::with_transport(config, self.transport)
    }

    pub fn build_get_address(&self, address: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/v1/addresses/{address}", self.config.base_url()),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_faucet(&self, faucet_type: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/v1/faucet?type={faucet_type}", self.config.base_url()),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_propagate(&self, raw_tx_hex: &str) -> Result<HttpRequest, ApiError> {
        let body = serde_urlencoded::to_string(&[("rawTxHex", raw_tx_hex)])
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/v1/transactions", self.config.base_url()),
            headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
            body: Some(body),
        })
    }

    pub fn parse_get_address(&self, response: HttpResponse) -> Result<Address, ApiError> {
        let data: AddressData = parse_envelope(&response)?;
        Ok(data.address)
    }

    pub fn parse_faucet(&self, response: HttpResponse) -> Result<FaucetGrant, ApiError> {
        parse_envelope(&response)
    }

    pub fn parse_propagate(&self, response: HttpResponse) -> Result<Transaction, ApiError> {
        let data: TransactionData = parse_envelope(&response)?;
        Ok(data.transaction)
    }
}

impl<T: Transport> HelloBlockClient<T> {
    /// Look up balance and activity for `address`.
    pub fn get_address(&self, address: &str) -> Result<Address, ApiError> {
        let response = self.send(&self.build_get_address(address))?;
        self.parse_get_address(response)
    }

    /// Ask the faucet for a funded key. `faucet_type` is passed through as is.
    pub fn faucet(&self, faucet_type: i64) -> Result<FaucetGrant, ApiError> {
        let response = self.send(&self.build_faucet(faucet_type))?;
        let grant = self.parse_faucet(response)?;
        debug!(
            address = %grant.address,
            unspents = grant.unspents.len(),
            "helloblock_faucet_granted"
        );
        Ok(grant)
    }

    /// Broadcast a serialized transaction. The hex is not checked locally.
    pub fn propagate(&self, raw_tx_hex: &str) -> Result<Transaction, ApiError> {
        let response = self.send(&self.build_propagate(raw_tx_hex)?)?;
        self.parse_propagate(response)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(
            method = request.method.as_str(),
            url = %request.url,
            content_type = ?request.header("content-type"),
            network = %self.config.network,
            "helloblock_request"
        );
        self.transport.execute(request)
    }
}

/// Decode the envelope, check its status, then decode `data` into `D`.
fn parse_envelope<D: DeserializeOwned>(response: &HttpResponse) -> Result<D, ApiError> {
    let envelope = Envelope::parse(&response.body).inspect_err(|_| {
        warn!(
            status = response.status,
            content_type = ?response.header("content-type"),
            "helloblock_undecodable_response"
        );
    })?;
    if !envelope.is_success() {
        warn!(
            status = response.status,
            envelope_status = %envelope.status,
            message = envelope.message(),
            "helloblock_remote_error"
        );
    }
    envelope.into_data()
}
