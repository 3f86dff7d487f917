//! In-memory stand-in for the HelloBlock `/v1` API.
//!
//! Serves the three endpoints the client uses, wrapped in the same
//! `{status, message, details, data}` envelope as the real service. Faucet
//! grants are recorded so a later address lookup sees the credited balance.
//! Key material is random and not derived from any curve; only the encodings
//! (hex, base58check WIF and address) match what real clients expect.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Value of every unspent the faucet hands out.
pub const FAUCET_UNSPENT_VALUE: u64 = 10_000;
/// Highest faucet type accepted; type `n` funds `n + 1` unspents.
pub const MAX_FAUCET_TYPE: i64 = 3;

const TESTNET_P2PKH_VERSION: u8 = 0x6f;
const TESTNET_WIF_VERSION: u8 = 0xef;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub status: String,
    pub message: String,
    pub details: Vec<String>,
    pub data: serde_json::Value,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
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

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unspent {
    pub tx_hash: String,
    pub index: u32,
    pub script_pub_key: String,
    pub value: u64,
    pub address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
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

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub tx_hash: String,
    pub raw_tx_hex: String,
}

#[derive(Default)]
pub struct Ledger {
    addresses: HashMap<String, Address>,
    transactions: HashMap<String, Transaction>,
}

pub type Db = Arc<RwLock<Ledger>>;

type Reply = (StatusCode, Json<Envelope>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Ledger::default()));
    Router::new()
        .route("/v1/addresses/{address}", get(get_address))
        .route("/v1/faucet", get(faucet))
        .route("/v1/transactions", post(propagate))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_address(State(db): State<Db>, Path(address): Path<String>) -> Reply {
    let Some(hash160) = decode_address(&address) else {
        return fail(StatusCode::NOT_FOUND, "Invalid address", vec![address]);
    };
    let ledger = db.read().await;
    let snapshot = ledger.addresses.get(&address).cloned().unwrap_or_else(|| Address {
        balance: 0,
        confirmed_balance: 0,
        txs_count: 0,
        confirmed_txs_count: 0,
        total_received_value: 0,
        confirmed_received_value: 0,
        address: address.clone(),
        hash160,
        address_type: "p2pkh".to_string(),
    });
    success(serde_json::json!({ "address": snapshot }))
}

async fn faucet(State(db): State<Db>, Query(params): Query<HashMap<String, String>>) -> Reply {
    let Some(raw_type) = params.get("type") else {
        return fail(StatusCode::BAD_REQUEST, "Missing faucet type", Vec::new());
    };
    let faucet_type = match raw_type.parse::<i64>() {
        Ok(t) if (0..=MAX_FAUCET_TYPE).contains(&t) => t,
        _ => {
            return fail(
                StatusCode::BAD_REQUEST,
                "Invalid faucet type",
                vec![raw_type.clone()],
            )
        }
    };

    let grant = issue_grant(faucet_type);
    let total = grant.unspents.iter().map(|u| u.value).sum::<u64>();
    let count = grant.unspents.len() as u64;
    db.write().await.addresses.insert(
        grant.address.clone(),
        Address {
            balance: total,
            confirmed_balance: total,
            txs_count: count,
            confirmed_txs_count: count,
            total_received_value: total,
            confirmed_received_value: total,
            address: grant.address.clone(),
            hash160: grant.hash160.clone(),
            address_type: "p2pkh".to_string(),
        },
    );
    tracing::info!(address = %grant.address, faucet_type, value = total, "faucet grant issued");

    match serde_json::to_value(&grant) {
        Ok(data) => success(data),
        Err(e) => fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal error", vec![e.to_string()]),
    }
}

async fn propagate(State(db): State<Db>, Form(form): Form<HashMap<String, String>>) -> Reply {
    let Some(raw_tx_hex) = form.get("rawTxHex") else {
        return fail(StatusCode::BAD_REQUEST, "Missing rawTxHex", Vec::new());
    };
    let bytes = match hex::decode(raw_tx_hex) {
        Ok(bytes) if !bytes.is_empty() => bytes,
        Ok(_) => return fail(StatusCode::BAD_REQUEST, "Invalid rawTxHex", vec!["empty".to_string()]),
        Err(e) => return fail(StatusCode::BAD_REQUEST, "Invalid rawTxHex", vec![e.to_string()]),
    };

    let tx_hash = txid(&bytes);
    let transaction = db
        .write()
        .await
        .transactions
        .entry(tx_hash.clone())
        .or_insert_with(|| Transaction {
            tx_hash,
            raw_tx_hex: raw_tx_hex.to_lowercase(),
        })
        .clone();
    tracing::info!(tx_hash = %transaction.tx_hash, "transaction propagated");
    success(serde_json::json!({ "transaction": transaction }))
}

fn success(data: serde_json::Value) -> Reply {
    (
        StatusCode::OK,
        Json(Envelope {
            status: "success".to_string(),
            message: String::new(),
            details: Vec::new(),
            data,
        }),
    )
}

fn fail(code: StatusCode, message: &str, details: Vec<String>) -> Reply {
    (
        code,
        Json(Envelope {
            status: "fail".to_string(),
            message: message.to_string(),
            details,
            data: serde_json::Value::Null,
        }),
    )
}

fn issue_grant(faucet_type: i64) -> FaucetGrant {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(Uuid::new_v4().as_bytes());
    key.extend_from_slice(Uuid::new_v4().as_bytes());

    let hash160 = Sha256::digest(&key)[..20].to_vec();
    let address = base58check(TESTNET_P2PKH_VERSION, &hash160, &[]);
    let script_pub_key = format!("76a914{}88ac", hex::encode(&hash160));

    let unspents = (0..=faucet_type as u32)
        .map(|index| Unspent {
            tx_hash: txid(Uuid::new_v4().as_bytes()),
            index,
            script_pub_key: script_pub_key.clone(),
            value: FAUCET_UNSPENT_VALUE,
            address: address.clone(),
        })
        .collect();

    FaucetGrant {
        private_key_wif: base58check(TESTNET_WIF_VERSION, &key, &[0x01]),
        private_key_hex: hex::encode(&key),
        address,
        hash160: hex::encode(&hash160),
        faucet_type,
        unspents,
    }
}

fn sha256d(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(bytes)).into()
}

/// Transaction id as displayed by block explorers: double SHA-256, byte-reversed.
pub fn txid(raw: &[u8]) -> String {
    let mut hash = sha256d(raw);
    hash.reverse();
    hex::encode(hash)
}

fn base58check(version: u8, payload: &[u8], suffix: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(1 + payload.len() + suffix.len() + 4);
    bytes.push(version);
    bytes.extend_from_slice(payload);
    bytes.extend_from_slice(suffix);
    let checksum = sha256d(&bytes);
    bytes.extend_from_slice(&checksum[..4]);
    bs58::encode(bytes).into_string()
}

/// Hex hash160 of a well-formed address, `None` for anything else.
fn decode_address(address: &str) -> Option<String> {
    if !(26..=35).contains(&address.len()) {
        return None;
    }
    let bytes = bs58::decode(address).into_vec().ok()?;
    if bytes.len() != 25 {
        return None;
    }
    let (body, checksum) = bytes.split_at(21);
    if sha256d(body)[..4] != *checksum {
        return None;
    }
    Some(hex::encode(&body[1..]))
}
