//! Tenderly client integration tests against a mock HTTP server.

use alloy::primitives::{Address, B256, Bytes, U256, address};
use safe_simulator::{
    constants::THRESHOLD_STORAGE_SLOT,
    error::SimulatorError,
    payload::{BlockGasLimit, build_simulation_payload},
    tenderly::TenderlyClient,
    types::{ExecTransactionEncoder, SafeTransactionData, SimulationParams},
};
use serde_json::json;
use std::collections::BTreeSet;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

const SAFE: Address = address!("a08E15EEEAE9C486b190DC78C91E63C705867665");
const OWNER: Address = address!("9C9574c538D982B44555Aa7382FFb8c911c1bE1b");

struct FixedGas(u64);

#[async_trait::async_trait]
impl BlockGasLimit for FixedGas {
    async fn latest_gas_limit(&self) -> Result<u64, SimulatorError> {
        Ok(self.0)
    }
}

fn params(threshold: u32, safe_nonce: u64, tx_nonce: u64) -> SimulationParams {
    SimulationParams {
        safe: SAFE,
        chain_id: 11155111,
        threshold,
        safe_nonce,
        execution_owner: OWNER,
        tx_nonce,
        signers: BTreeSet::new(),
        gas_limit: None,
    }
}

fn encoder(tx_nonce: u64) -> ExecTransactionEncoder {
    let tx = SafeTransactionData::transfer(
        OWNER,
        U256::from(1_000_000_000_000_000u64),
        Bytes::new(),
        tx_nonce,
    );
    ExecTransactionEncoder::new(SAFE, "1.3.0".into(), tx, OWNER)
}

#[tokio::test]
async fn submits_payload_with_access_key() {
    let server = MockServer::start().await;

    let payload = build_simulation_payload(&params(2, 3, 3), &FixedGas(30_000_000), &encoder(3))
        .await
        .unwrap();

    // An under-signed transaction carries exactly the threshold override.
    let storage = payload.state_objects.as_ref().unwrap()[&SAFE].storage.as_ref().unwrap();
    assert_eq!(storage.len(), 1);
    assert_eq!(storage[&THRESHOLD_STORAGE_SLOT], B256::with_last_byte(1));

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("X-Access-Key", "secret-token"))
        .and(header("content-type", "application/json"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "simulation": { "id": "sim-1", "status": true },
            "transaction": { "status": true, "gas_used": 85_000 },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TenderlyClient::with_url(server.uri(), Some("secret-token".into()));
    let simulation = client.simulate(&payload).await.unwrap();

    let outcome = simulation.simulation.unwrap();
    assert_eq!(outcome.id.as_deref(), Some("sim-1"));
    assert_eq!(outcome.status, Some(true));
    assert_eq!(simulation.transaction.unwrap().gas_used, Some(85_000));
}

#[tokio::test]
async fn no_access_key_header_without_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = build_simulation_payload(&params(1, 5, 5), &FixedGas(30_000_000), &encoder(5))
        .await
        .unwrap();
    assert!(payload.state_objects.is_none());

    let client = TenderlyClient::with_url(server.uri(), None);
    client.simulate(&payload).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("X-Access-Key").is_none());
}

#[tokio::test]
async fn surfaces_service_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "error": { "message": "bad request" } })),
        )
        .mount(&server)
        .await;

    let payload = build_simulation_payload(&params(1, 5, 5), &FixedGas(30_000_000), &encoder(5))
        .await
        .unwrap();

    let client = TenderlyClient::with_url(server.uri(), None);
    let err = client.simulate(&payload).await.unwrap_err();
    assert_eq!(err.to_string(), "400 - Bad Request: bad request");
}

#[tokio::test]
async fn falls_back_to_raw_body_when_error_is_not_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let payload = build_simulation_payload(&params(1, 5, 5), &FixedGas(30_000_000), &encoder(5))
        .await
        .unwrap();

    let client = TenderlyClient::with_url(server.uri(), None);
    let err = client.simulate(&payload).await.unwrap_err();
    assert_eq!(err.to_string(), "500 - Internal Server Error: upstream exploded");
}
