//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes an input, the network the client is bound to,
//! the expected request, a simulated response, and either the expected
//! decoded result or the kind of error and the text it must render.

use helloblock_core::{
    Address, ApiError, ClientConfig, FaucetGrant, HelloBlockClient, HttpMethod, HttpRequest,
    HttpResponse, Network, Transaction,
};
use serde_json::Value;

fn client(case: &Value) -> HelloBlockClient {
    let network: Network = case["network"].as_str().unwrap().parse().unwrap();
    HelloBlockClient::new(ClientConfig::new(network))
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");
    assert_eq!(req.body.as_deref(), expected["body"].as_str(), "{name}: body");
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_error(name: &str, err: ApiError, expected: &Value) {
    match (expected["kind"].as_str().unwrap(), &err) {
        ("remote", ApiError::Remote { .. }) | ("decode", ApiError::Decode { .. }) => {}
        (kind, other) => panic!("{name}: expected {kind} error, got {other:?}"),
    }
    let text = err.to_string();
    for needle in expected["contains"].as_array().unwrap() {
        let needle = needle.as_str().unwrap();
        assert!(text.contains(needle), "{name}: {text:?} should contain {needle:?}");
    }
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

#[test]
fn address_test_vectors() {
    for case in cases(include_str!("../../test-vectors/address.json")) {
        let name = case["name"].as_str().unwrap();
        let c = client(&case);

        let req = c.build_get_address(case["input"].as_str().unwrap());
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_address(simulated_response(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Address = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Faucet
// ---------------------------------------------------------------------------

#[test]
fn faucet_test_vectors() {
    for case in cases(include_str!("../../test-vectors/faucet.json")) {
        let name = case["name"].as_str().unwrap();
        let c = client(&case);

        let req = c.build_faucet(case["input"].as_i64().unwrap());
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_faucet(simulated_response(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: FaucetGrant =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            let grant = result.unwrap();
            assert_eq!(grant.unspents.len(), expected.unspents.len(), "{name}: unspent count");
            assert_eq!(grant, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Propagate
// ---------------------------------------------------------------------------

#[test]
fn propagate_test_vectors() {
    for case in cases(include_str!("../../test-vectors/propagate.json")) {
        let name = case["name"].as_str().unwrap();
        let c = client(&case);

        let req = c.build_propagate(case["input"].as_str().unwrap()).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_propagate(simulated_response(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Transaction =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}
