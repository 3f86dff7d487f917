//! Domain DTOs for the HelloBlock API.
//!
//! # Design
//! Every type is a read-only snapshot decoded from one response. Field
//! names follow the service's camelCase JSON. `AddressData` and
//! `TransactionData` exist only because those endpoints nest their payload
//! one level deeper than the faucet does.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Balance and activity of a single address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub balance: u64,
    pub confirmed_balance: u64,
    pub txs_count: u64,
    pub confirmed_txs_count: u64,
    pub total_received_value: u64,
    pub confirmed_received_value: u64,
    pub address: String,
    pub hash160: String,
    #[serde(rename = "type")]
    pub address_type: String,
}

/// An unspent output referenced by the transaction that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unspent {
    pub tx_hash: String,
    pub index: u32,
    pub script_pub_key: String,
    pub value: u64,
    pub address: String,
}

/// A fresh key pair funded by the testnet faucet.
///
/// The private key fields are secret. `Debug` redacts them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetGrant {
    #[serde(rename = "privateKeyWIF")]
    pub private_key_wif: String,
    pub private_key_hex: String,
    pub address: String,
    pub hash160: String,
    pub faucet_type: i64,
    pub unspents: Vec<Unspent>,
}

impl FaucetGrant {
    /// Sum of all unspent values funding the address.
    pub fn total_value(&self) -> u64 {
        self.unspents.iter().map(|u| u.value).sum()
    }
}

impl fmt::Debug for FaucetGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaucetGrant")
            .field("private_key_wif", &"<redacted>")
            .field("private_key_hex", &"<redacted>")
            .field("address", &self.address)
            .field("hash160", &self.hash160)
            .field("faucet_type", &self.faucet_type)
            .field("unspents", &self.unspents)
            .finish()
    }
}

/// A transaction accepted by the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub tx_hash: String,
    pub raw_tx_hex: String,
}

/// `data` payload of `GET /v1/addresses/{address}`.
#[derive(Debug, Deserialize)]
pub(crate) struct AddressData {
    pub address: Address,
}

/// `data` payload of `POST /v1/transactions`.
#[derive(Debug, Deserialize)]
pub(crate) struct TransactionData {
    pub transaction: Transaction,
}
