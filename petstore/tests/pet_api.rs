//! End-to-end tests for the pet operation group against a mock server.

use petstore::apis::PetApi;
use petstore::client::ApiClientBuilder;
use petstore::error::{ApiError, ClientError};
use petstore::models::{Category, Pet, PetStatus, Tag};
use wiremock::matchers::{
    body_json, body_string, body_string_contains, header, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn pets_for(server: &MockServer) -> PetApi {
    ApiClientBuilder::new()
        .base_url(server.uri())
        .build()
        .unwrap()
        .service()
}

fn stored_pet() -> Pet {
    Pet {
        id: Some(7),
        category: Some(Category {
            id: Some(1),
            name: Some("dogs".to_string()),
        }),
        name: "Rex".to_string(),
        photo_urls: vec!["http://example.com/rex.png".to_string()],
        tags: Some(vec![Tag {
            id: Some(2),
            name: Some("friendly".to_string()),
        }]),
        status: Some(PetStatus::Available),
    }
}

#[tokio::test]
async fn add_pet_posts_json_and_returns_stored_pet() {
    let mock_server = MockServer::start().await;

    let new_pet = Pet::new("Rex", vec!["http://example.com/rex.png".to_string()]);
    Mock::given(method("POST"))
        .and(path("/pet"))
        .and(header("content-type", "application/json"))
        .and(body_json(&new_pet))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_pet()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pets = pets_for(&mock_server).await;
    let created = pets.add_pet(&new_pet).await.unwrap();
    assert_eq!(created.id, Some(7));
    assert_eq!(created.status, Some(PetStatus::Available));
}

#[tokio::test]
async fn update_pet_uses_put() {
    let mock_server = MockServer::start().await;

    let pet = stored_pet();
    Mock::given(method("PUT"))
        .and(path("/pet"))
        .and(body_json(&pet))
        .respond_with(ResponseTemplate::new(200).set_body_json(&pet))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pets = pets_for(&mock_server).await;
    let updated = pets.update_pet(&pet).await.unwrap();
    assert_eq!(updated.name, "Rex");
}

#[tokio::test]
async fn find_pets_by_status_sends_csv_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pet/findByStatus"))
        .and(query_param("status", "available,pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![stored_pet()]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pets = pets_for(&mock_server).await;
    let found = pets
        .find_pets_by_status(&[PetStatus::Available, PetStatus::Pending])
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Rex");
}

#[tokio::test]
async fn find_pets_by_tags_sends_csv_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pet/findByTags"))
        .and(query_param("tags", "friendly,small"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<Pet>::new()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pets = pets_for(&mock_server).await;
    let found = pets.find_pets_by_tags(&["friendly", "small"]).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn get_pet_by_id_substitutes_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pet/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored_pet()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pets = pets_for(&mock_server).await;
    let pet = pets.get_pet_by_id(7).await.unwrap();
    assert_eq!(pet.id, Some(7));
    assert_eq!(
        pet.category.and_then(|c| c.name),
        Some("dogs".to_string())
    );
}

#[tokio::test]
async fn get_pet_by_id_maps_missing_pet_to_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pet/9999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Pet not found"))
        .mount(&mock_server)
        .await;

    let pets = pets_for(&mock_server).await;
    let result = pets.get_pet_by_id(9999).await;
    match result {
        Err(ApiError::Client(ClientError::HttpStatus { status, message })) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Pet not found");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn update_pet_with_form_posts_urlencoded_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pet/7"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("name=Buddy&status=sold"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pets = pets_for(&mock_server).await;
    pets.update_pet_with_form(7, Some("Buddy"), Some("sold"))
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_pet_sends_optional_api_key_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/pet/7"))
        .and(header("api_key", "special-key"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pets = pets_for(&mock_server).await;
    pets.delete_pet(7, Some("special-key")).await.unwrap();
}

#[tokio::test]
async fn upload_file_sends_multipart_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pet/7/uploadImage"))
        .and(body_string_contains("additionalMetadata"))
        .and(body_string_contains("front view"))
        .and(body_string_contains("rex.png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "type": "ok",
            "message": "uploaded rex.png"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pets = pets_for(&mock_server).await;
    let receipt = pets
        .upload_file(7, Some("front view"), "rex.png", b"fake image bytes".to_vec())
        .await
        .unwrap();
    assert_eq!(receipt.code, Some(200));
    assert_eq!(receipt.kind, Some("ok".to_string()));
    assert_eq!(receipt.message, Some("uploaded rex.png".to_string()));
}
