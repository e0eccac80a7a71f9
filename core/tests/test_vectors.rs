//! Verify client operations against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector describes inputs, expected requests, simulated responses and
//! expected results. A scripted transport replays the responses and records
//! the requests. Bodies are compared as parsed JSON so field order does not
//! matter.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::Value;
use shippo_core::{
    Address, AddressInput, ApiError, ClientConfig, HttpMethod, HttpRequest, HttpResponse,
    ShippoClient, Transport,
};

const BASE_URL: &str = "https://api.test/v1";

#[derive(Default)]
struct ReplayTransport {
    responses: RefCell<VecDeque<HttpResponse>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ReplayTransport {
    fn push(&self, response: &Value) {
        self.responses.borrow_mut().push_back(HttpResponse {
            status: response["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: response["body"].as_str().unwrap().to_string(),
        });
    }
}

impl Transport for ReplayTransport {
    fn send(&self, request: &HttpRequest) -> shippo_core::Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());
        Ok(self
            .responses
            .borrow_mut()
            .pop_front()
            .expect("more requests than simulated responses"))
    }
}

fn client() -> ShippoClient<ReplayTransport> {
    ShippoClient::with_transport(
        ClientConfig::new("shippo_test_token").with_base_url(BASE_URL),
        ReplayTransport::default(),
    )
}

/// Vector URLs starting with `/` are relative to the base URL.
fn resolve(url: &str) -> String {
    if url.starts_with('/') {
        format!("{BASE_URL}{url}")
    } else {
        url.to_string()
    }
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_expected_error(name: &str, err: ApiError, expected: &Value) {
    let status = expected["status"].as_u64().unwrap() as u16;
    assert!(
        matches!(err, ApiError::HttpStatus { status: s } if s == status),
        "{name}: expected HTTP {status}, got {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_address_test_vectors() {
    let raw = include_str!("../../test-vectors/create_address.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: AddressInput = serde_json::from_value(case["input"].clone()).unwrap();

        let c = client();
        c.transport().push(&case["simulated_response"]);
        let result = c.create_address(&input);

        // Verify the request
        let requests = c.transport().requests.borrow();
        assert_eq!(requests.len(), 1, "{name}: request count");
        let req = &requests[0];
        let expected_req = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, resolve(expected_req["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.header("Authorization"), Some("ShippoToken shippo_test_token"), "{name}: auth");
        let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify the result
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error);
        } else {
            let address = result.unwrap();
            let expected: Address = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(address, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_addresses_test_vectors() {
    let raw = include_str!("../../test-vectors/list_addresses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let pages = case["pages"].as_array().unwrap();

        let c = client();
        for page in pages {
            c.transport().push(page);
        }
        let result = c.list_all_addresses();

        // One fetch per page, each to the URL the previous page announced.
        let urls: Vec<String> = c.transport().requests.borrow().iter().map(|r| r.url.clone()).collect();
        let expected_urls: Vec<String> = pages
            .iter()
            .map(|p| resolve(p["expected_url"].as_str().unwrap()))
            .collect();
        assert_eq!(urls, expected_urls, "{name}: fetched urls");
        assert!(
            c.transport().requests.borrow().iter().all(|r| r.method == HttpMethod::Get && r.body.is_none()),
            "{name}: list requests are bodyless GETs"
        );

        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error);
        } else {
            let ids: Vec<String> = result.unwrap().into_iter().map(|a| a.object_id).collect();
            let expected: Vec<String> = serde_json::from_value(case["expected_ids"].clone()).unwrap();
            assert_eq!(ids, expected, "{name}: item order");
        }
    }
}

// ---------------------------------------------------------------------------
// Retrieve
// ---------------------------------------------------------------------------

#[test]
fn retrieve_escapes_object_id() {
    let c = client();
    c.transport().push(&serde_json::json!({
        "status": 200,
        "body": "{\"object_id\":\"a/b?c\"}",
    }));

    let address = c.retrieve_address("a/b?c").unwrap();
    assert_eq!(address.object_id, "a/b?c");
    let requests = c.transport().requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, format!("{BASE_URL}/addresses/a%2Fb%3Fc"));
}

#[test]
fn retrieve_rejects_empty_object_id_without_request() {
    let c = client();
    let err = c.retrieve_parcel("").unwrap_err();
    assert!(matches!(err, ApiError::EmptyObjectId));
    assert!(c.transport().requests.borrow().is_empty());
}
