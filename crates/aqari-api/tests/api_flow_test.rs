//! Integration tests for the HTTP surface, driven with an in-memory store
//! and stub inference backends.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use aqari_api::AppState;
use aqari_core::defaults::DEGRADED_EXPLANATION;
use aqari_core::{
    CreatePropertyRequest, DesignAnalysis, Error, GenerationBackend, ListingStatus, Property,
    PropertyRepository, PropertyType, Result,
};
use aqari_inference::{RequirementParser, RoomAnalyzer, VisionBackend};

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// In-memory property store, newest first like the real repository.
#[derive(Default)]
struct InMemoryStore {
    items: Mutex<Vec<Property>>,
}

impl InMemoryStore {
    fn with_listings(listings: Vec<Property>) -> Self {
        Self {
            items: Mutex::new(listings),
        }
    }
}

#[async_trait]
impl PropertyRepository for InMemoryStore {
    async fn insert(&self, req: CreatePropertyRequest) -> Result<Property> {
        let property = Property {
            id: Uuid::now_v7(),
            address: req.address,
            description: req.description,
            price: req.price,
            property_type: req.property_type,
            status: req.status,
            bedrooms: req.bedrooms,
            bathrooms: req.bathrooms,
            virtual_tour_url: req.virtual_tour_url,
            images: req.images,
            location: req.location,
            room_analysis: None,
            created_at: Utc::now(),
        };
        self.items.lock().unwrap().insert(0, property.clone());
        Ok(property)
    }

    async fn fetch(&self, id: Uuid) -> Result<Property> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(Error::PropertyNotFound(id))
    }

    async fn list(&self) -> Result<Vec<Property>> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn attach_analysis(&self, id: Uuid, analysis: &DesignAnalysis) -> Result<()> {
        let mut items = self.items.lock().unwrap();
        let property = items
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(Error::PropertyNotFound(id))?;
        property.room_analysis = Some(analysis.clone());
        Ok(())
    }
}

/// Stub generation backend: fixed response, or failure when `response` is
/// None.
struct StubBackend {
    response: Option<String>,
}

#[async_trait]
impl GenerationBackend for StubBackend {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.reply()
    }
    async fn generate_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
        self.reply()
    }
    async fn generate_json(&self, _prompt: &str) -> Result<String> {
        self.reply()
    }
    async fn generate_json_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
        self.reply()
    }
    fn model_name(&self) -> &str {
        "stub-gen"
    }
}

impl StubBackend {
    fn reply(&self) -> Result<String> {
        self.response
            .clone()
            .ok_or_else(|| Error::Inference("stub backend unreachable".to_string()))
    }
}

/// Stub vision backend with a fixed response.
struct StubVision {
    response: String,
}

#[async_trait]
impl VisionBackend for StubVision {
    async fn analyze_image(
        &self,
        _image_data: &[u8],
        _mime_type: &str,
        _prompt: &str,
    ) -> Result<String> {
        Ok(self.response.clone())
    }
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
    fn model_name(&self) -> &str {
        "stub-vision"
    }
}

fn listing(address: &str, price: f64, ptype: PropertyType, bedrooms: i32) -> Property {
    Property {
        id: Uuid::now_v7(),
        address: address.to_string(),
        description: String::new(),
        price,
        property_type: ptype,
        status: ListingStatus::ForSale,
        bedrooms,
        bathrooms: 2.0,
        virtual_tour_url: None,
        images: vec![],
        location: None,
        room_analysis: None,
        created_at: Utc::now(),
    }
}

/// The two-listing snapshot from the reference scenarios.
fn scenario_listings() -> Vec<Property> {
    vec![
        listing(
            "The Ritz-Carlton Residences, Amman, Jordan",
            1_500_000.0,
            PropertyType::Apartment,
            4,
        ),
        listing("Luxury Villa, Abdoun, Amman", 850_000.0, PropertyType::House, 5),
    ]
}

async fn spawn_test_server(
    listings: Vec<Property>,
    gen_response: Option<&str>,
    vision_response: Option<&str>,
) -> String {
    let parser = RequirementParser::new(Arc::new(StubBackend {
        response: gen_response.map(String::from),
    }));

    let analyzer = vision_response.map(|response| {
        Arc::new(RoomAnalyzer::new(Arc::new(StubVision {
            response: response.to_string(),
        })))
    });

    let state = AppState {
        store: Arc::new(InMemoryStore::with_listings(listings)),
        users: None,
        parser: Arc::new(parser),
        analyzer,
        rate_limiter: None,
    };

    let router = aqari_api::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Give server a moment to start
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    format!("http://{}", addr)
}

// =============================================================================
// SEARCH FLOW
// =============================================================================

#[tokio::test]
async fn test_recommend_canonical_scenario() {
    let filter_json = r#"{
        "area": "Abdoun",
        "minPrice": null,
        "maxPrice": null,
        "minBedrooms": 3,
        "propertyType": "house",
        "status": null,
        "explanation": "Since you have a family of 4, I searched for houses with at least 3 bedrooms in Abdoun."
    }"#;
    let base = spawn_test_server(scenario_listings(), Some(filter_json), None).await;

    let response = reqwest::Client::new()
        .post(format!("{}/ai/recommend", base))
        .json(&serde_json::json!({"requirements": "family of 4 villa in Abdoun"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();

    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["type"], "house");
    assert_eq!(matches[0]["price"], 850_000.0);
    assert!(body["alternatives"].as_array().unwrap().is_empty());
    assert!(body["explanation"].as_str().unwrap().contains("family of 4"));
}

#[tokio::test]
async fn test_recommend_falls_back_to_alternatives() {
    let filter_json = r#"{"minBedrooms": 10, "explanation": "Searched for 10 bedrooms."}"#;
    let mut listings = scenario_listings();
    listings.push(listing("Dabouq Modern Loft, Amman", 250_000.0, PropertyType::Apartment, 3));
    listings.push(listing("Family Apartment, 7th Circle", 800.0, PropertyType::Apartment, 3));
    let expected_ids: Vec<String> = listings.iter().take(3).map(|p| p.id.to_string()).collect();

    let base = spawn_test_server(listings, Some(filter_json), None).await;

    let body: serde_json::Value = reqwest::Client::new()
        .post(format!("{}/ai/recommend", base))
        .json(&serde_json::json!({"requirements": "ten bedrooms please"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(body["matches"].as_array().unwrap().is_empty());
    let alternatives = body["alternatives"].as_array().unwrap();
    assert_eq!(alternatives.len(), 3);
    for (alt, expected) in alternatives.iter().zip(expected_ids.iter()) {
        assert_eq!(alt["id"].as_str().unwrap(), expected);
    }
}

#[tokio::test]
async fn test_recommend_degrades_when_backend_unreachable() {
    let base = spawn_test_server(scenario_listings(), None, None).await;

    let response = reqwest::Client::new()
        .post(format!("{}/ai/recommend", base))
        .json(&serde_json::json!({"requirements": "anything at all"}))
        .send()
        .await
        .unwrap();

    // Parser failure is absorbed: unfiltered results, default explanation.
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["matches"].as_array().unwrap().len(), 2);
    assert_eq!(body["explanation"], DEGRADED_EXPLANATION);
}

#[tokio::test]
async fn test_recommend_rejects_empty_requirements() {
    let base = spawn_test_server(scenario_listings(), None, None).await;

    let response = reqwest::Client::new()
        .post(format!("{}/ai/recommend", base))
        .json(&serde_json::json!({"requirements": "   "}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

// =============================================================================
// PROPERTIES
// =============================================================================

#[tokio::test]
async fn test_list_properties_wire_shape() {
    let base = spawn_test_server(scenario_listings(), None, None).await;

    let body: serde_json::Value = reqwest::get(format!("{}/properties", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let listings = body.as_array().unwrap();
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0]["type"], "apartment");
    assert_eq!(listings[0]["status"], "for-sale");
    assert!(listings[0].get("createdAt").is_some());
}

#[tokio::test]
async fn test_create_and_fetch_property() {
    let base = spawn_test_server(vec![], None, None).await;
    let client = reqwest::Client::new();

    let created: serde_json::Value = client
        .post(format!("{}/properties", base))
        .json(&serde_json::json!({
            "address": "Test Street, Amman",
            "description": "A test listing",
            "price": 125000,
            "type": "condo",
            "bedrooms": 2,
            "bathrooms": 1.5
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(created["type"], "condo");
    // Status defaults to for-sale when omitted.
    assert_eq!(created["status"], "for-sale");

    let id = created["id"].as_str().unwrap();
    let fetched: serde_json::Value = client
        .get(format!("{}/properties/{}", base, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["address"], "Test Street, Amman");
}

#[tokio::test]
async fn test_get_unknown_property_is_404() {
    let base = spawn_test_server(vec![], None, None).await;

    let response = reqwest::get(format!("{}/properties/{}", base, Uuid::new_v4()))
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

// =============================================================================
// ANALYSIS
// =============================================================================

const DESIGN_JSON: &str = r#"{
    "style": "Modern",
    "furnitureSuggestions": [
        { "item": "sofa", "confidence": 0.9, "position": { "x": 0.0, "y": 0.0, "z": 1.0 } }
    ],
    "roomDimensions": { "width": 4.0, "length": 5.0, "height": 2.7 }
}"#;

#[tokio::test]
async fn test_design_analysis_requires_configured_model() {
    let base = spawn_test_server(vec![], None, None).await;

    let response = reqwest::Client::new()
        .post(format!("{}/ai/design", base))
        .json(&serde_json::json!({"imageData": "aGVsbG8="}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 503);
}

#[tokio::test]
async fn test_design_analysis_happy_path() {
    let base = spawn_test_server(vec![], None, Some(DESIGN_JSON)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/ai/design", base))
        .json(&serde_json::json!({"imageData": "aGVsbG8=", "mimeType": "image/png"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["style"], "Modern");
    assert_eq!(body["roomDimensions"]["width"], 4.0);
}

#[tokio::test]
async fn test_design_analysis_hard_fails_on_bad_model_output() {
    // No degraded analysis is invented: non-conforming output is a
    // retryable upstream failure.
    let base = spawn_test_server(vec![], None, Some("the room is nice")).await;

    let response = reqwest::Client::new()
        .post(format!("{}/ai/design", base))
        .json(&serde_json::json!({"imageData": "aGVsbG8="}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["retryable"], true);
}

#[tokio::test]
async fn test_design_analysis_rejects_invalid_base64() {
    let base = spawn_test_server(vec![], None, Some(DESIGN_JSON)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/ai/design", base))
        .json(&serde_json::json!({"imageData": "not base64!!!"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_property_analysis_persists_on_listing() {
    let listings = scenario_listings();
    let target = listings[1].id;
    let base = spawn_test_server(listings, None, Some(DESIGN_JSON)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/properties/{}/analyze", base, target))
        .json(&serde_json::json!({"imageData": "aGVsbG8="}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let fetched: serde_json::Value = client
        .get(format!("{}/properties/{}", base, target))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["roomAnalysis"]["style"], "Modern");
}

// =============================================================================
// AUTH / HEALTH
// =============================================================================

#[tokio::test]
async fn test_auth_unavailable_without_account_store() {
    let base = spawn_test_server(vec![], None, None).await;

    let response = reqwest::Client::new()
        .post(format!("{}/auth/login", base))
        .json(&serde_json::json!({"email": "a@b.c", "password": "pw"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 503);
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_test_server(vec![], None, None).await;

    let body: serde_json::Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "healthy");
}
