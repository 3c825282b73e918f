use drivefit::config::ClientConfig;
use drivefit::{
  ConstraintInput, HttpScoringClient, PresetRegistry, RequestBuilder, ScoringService,
  TransportError,
};
use mockito::{Matcher, Server};
use serde_json::json;

fn client_for(server: &Server) -> HttpScoringClient {
  HttpScoringClient::try_new(ClientConfig::with_overrides(Some(server.url()), Some(5))).unwrap()
}

fn toronto() -> ConstraintInput {
  ConstraintInput {
    budget: "25000".to_string(),
    location: "Toronto".to_string(),
    annual_distance: "20000".to_string(),
    passengers: "5".to_string(),
    fuel_type: None,
  }
}

#[tokio::test]
async fn test_winter_request_body_sent_verbatim() {
  let mut server = Server::new_async().await;
  let mock = server
    .mock("POST", "/recommend")
    .match_header("content-type", "application/json")
    .match_body(Matcher::Json(json!({
      "budget": 25000.0,
      "location": "Toronto",
      "annual_distance": 20000.0,
      "passengers": 5,
      "fuel_type": null,
      "weights": {
        "winter_driving": 0.35,
        "fuel_efficiency": 0.15,
        "price_fit": 0.15,
        "ownership_cost": 0.10,
        "acceleration": 0.05,
        "reliability": 0.10,
        "safety": 0.10
      }
    })))
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"{"results": [], "using_mock_data": true}"#)
    .create_async()
    .await;

  let registry = PresetRegistry::builtin().unwrap();
  let query = RequestBuilder::new(&registry).build_for_preset(&toronto(), "winter").unwrap();
  let response = client_for(&server).recommend(&query).await.unwrap();

  mock.assert_async().await;
  assert!(response.results.is_empty());
  assert!(response.using_mock_data);
}

#[tokio::test]
async fn test_fuel_type_filter_serialized_lowercase() {
  let mut server = Server::new_async().await;
  let mock = server
    .mock("POST", "/recommend")
    .match_body(Matcher::PartialJson(json!({ "fuel_type": "ev" })))
    .with_status(200)
    .with_body("{}")
    .create_async()
    .await;

  let registry = PresetRegistry::builtin().unwrap();
  let input = ConstraintInput { fuel_type: Some("Electric".to_string()), ..toronto() };
  let query = RequestBuilder::new(&registry).build_for_preset(&input, "").unwrap();
  client_for(&server).recommend(&query).await.unwrap();

  mock.assert_async().await;
}

#[tokio::test]
async fn test_ranked_results_decoded_in_order() {
  let mut server = Server::new_async().await;
  let _mock = server
    .mock("POST", "/recommend")
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(
      json!({
        "weights_used": { "winter_driving": 0.35 },
        "using_mock_data": false,
        "catalog_last_updated": "2024-05-01T10:00:00Z",
        "results": [
          { "make": "Subaru", "model": "WRX", "year": 2018, "total_score": 0.61,
            "price": 24000, "winter_points": 0.35 },
          { "make": "Honda", "model": "Civic", "year": 2018, "total_score": 0.64 }
        ]
      })
      .to_string(),
    )
    .create_async()
    .await;

  let registry = PresetRegistry::builtin().unwrap();
  let query = RequestBuilder::new(&registry).build_for_preset(&toronto(), "winter").unwrap();
  let response = client_for(&server).recommend(&query).await.unwrap();

  let makes: Vec<&str> = response.results.iter().map(|c| c.make.as_str()).collect();
  assert_eq!(makes, vec!["Subaru", "Honda"]);
  assert_eq!(response.catalog_last_updated.as_deref(), Some("2024-05-01T10:00:00Z"));
  assert_eq!(response.results[1].price, None);
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() {
  let mut server = Server::new_async().await;
  let _mock = server
    .mock("POST", "/recommend")
    .with_status(422)
    .with_body(r#"{"detail": "budget must be > 0"}"#)
    .create_async()
    .await;

  let registry = PresetRegistry::builtin().unwrap();
  let query = RequestBuilder::new(&registry).build_for_preset(&toronto(), "").unwrap();
  let err = client_for(&server).recommend(&query).await.unwrap_err();

  match err {
    TransportError::Status { status, body } => {
      assert_eq!(status, 422);
      assert!(body.contains("budget"));
    }
    other => panic!("Expected Status error, got: {other:?}"),
  }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
  let mut server = Server::new_async().await;
  let _mock = server
    .mock("POST", "/recommend")
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body("invalid json")
    .create_async()
    .await;

  let registry = PresetRegistry::builtin().unwrap();
  let query = RequestBuilder::new(&registry).build_for_preset(&toronto(), "").unwrap();
  let err = client_for(&server).recommend(&query).await.unwrap_err();

  assert!(matches!(err, TransportError::Decode { .. }));
}

#[tokio::test]
async fn test_unreachable_service_is_request_error() {
  let config = ClientConfig::with_overrides(Some("http://127.0.0.1:1".to_string()), Some(2));
  let client = HttpScoringClient::try_new(config).unwrap();

  let registry = PresetRegistry::builtin().unwrap();
  let query = RequestBuilder::new(&registry).build_for_preset(&toronto(), "").unwrap();
  let err = client.recommend(&query).await.unwrap_err();

  assert!(matches!(err, TransportError::Request { .. } | TransportError::Timeout { .. }));
}

#[tokio::test]
async fn test_health_check() {
  let mut server = Server::new_async().await;
  let _mock = server
    .mock("GET", "/")
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"{"status": "ok", "message": "Car recommender backend running"}"#)
    .create_async()
    .await;

  let health = client_for(&server).health_check().await.unwrap();
  assert_eq!(health.status, "ok");
  assert_eq!(health.message.as_deref(), Some("Car recommender backend running"));
}
