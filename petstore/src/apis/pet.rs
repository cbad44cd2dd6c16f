//! Operations on pets in the store.

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::apis::{CollectionFormat, Service};
use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::models::{ApiResponse, Pet, PetStatus};
use crate::response::{EmptyFormat, JsonFormat};

/// Typed client for the `pet` operation group.
///
/// Write operations require the `petstore_auth` OAuth scheme to be
/// registered on the client; reads are open.
#[derive(Debug, Clone)]
pub struct PetApi {
    client: ApiClient,
}

impl Service for PetApi {
    fn from_client(client: ApiClient) -> Self {
        Self { client }
    }
}

impl PetApi {
    /// Adds a new pet to the store.
    ///
    /// ## Errors
    ///
    /// Returns an error when the request fails or the pet is rejected
    /// by the server.
    pub async fn add_pet(&self, pet: &Pet) -> Result<Pet, ApiError> {
        self.client
            .request(Endpoint::<JsonFormat<Pet>>::new("add_pet", Method::POST, "pet"))
            .json(pet)?
            .send()
            .await
    }

    /// Updates an existing pet by full replacement.
    ///
    /// ## Errors
    ///
    /// Returns an error when the request fails or no pet with the given
    /// id exists.
    pub async fn update_pet(&self, pet: &Pet) -> Result<Pet, ApiError> {
        self.client
            .request(Endpoint::<JsonFormat<Pet>>::new("update_pet", Method::PUT, "pet"))
            .json(pet)?
            .send()
            .await
    }

    /// Finds pets by status.
    ///
    /// Multiple statuses are sent as one comma-separated query value.
    ///
    /// ## Errors
    ///
    /// Returns an error when the request fails.
    pub async fn find_pets_by_status(&self, statuses: &[PetStatus]) -> Result<Vec<Pet>, ApiError> {
        self.client
            .request(Endpoint::<JsonFormat<Vec<Pet>>>::new(
                "find_pets_by_status",
                Method::GET,
                "pet/findByStatus",
            ))
            .query_values("status", statuses.iter(), CollectionFormat::Csv)
            .send()
            .await
    }

    /// Finds pets by tags.
    ///
    /// Deprecated upstream in favor of [`find_pets_by_status`](Self::find_pets_by_status),
    /// but still served by the API.
    ///
    /// ## Errors
    ///
    /// Returns an error when the request fails.
    pub async fn find_pets_by_tags(&self, tags: &[&str]) -> Result<Vec<Pet>, ApiError> {
        self.client
            .request(Endpoint::<JsonFormat<Vec<Pet>>>::new(
                "find_pets_by_tags",
                Method::GET,
                "pet/findByTags",
            ))
            .query_values("tags", tags.iter(), CollectionFormat::Csv)
            .send()
            .await
    }

    /// Fetches a single pet by id.
    ///
    /// ## Errors
    ///
    /// Returns an error when the request fails or no pet with the given
    /// id exists.
    pub async fn get_pet_by_id(&self, pet_id: i64) -> Result<Pet, ApiError> {
        self.client
            .request(Endpoint::<JsonFormat<Pet>>::new(
                "get_pet_by_id",
                Method::GET,
                "pet/{petId}",
            ))
            .path_param("petId", pet_id)
            .send()
            .await
    }

    /// Updates a pet's name and/or status with form data.
    ///
    /// ## Errors
    ///
    /// Returns an error when the request fails.
    pub async fn update_pet_with_form(
        &self,
        pet_id: i64,
        name: Option<&str>,
        status: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut fields: Vec<(&str, &str)> = Vec::new();
        if let Some(name) = name {
            fields.push(("name", name));
        }
        if let Some(status) = status {
            fields.push(("status", status));
        }
        self.client
            .request(Endpoint::<EmptyFormat>::new(
                "update_pet_with_form",
                Method::POST,
                "pet/{petId}",
            ))
            .path_param("petId", pet_id)
            .form(&fields)
            .send()
            .await
    }

    /// Deletes a pet.
    ///
    /// The optional `api_key` travels as a header on this one operation,
    /// matching the upstream contract.
    ///
    /// ## Errors
    ///
    /// Returns an error when the request fails or no pet with the given
    /// id exists.
    pub async fn delete_pet(&self, pet_id: i64, api_key: Option<&str>) -> Result<(), ApiError> {
        let mut call = self
            .client
            .request(Endpoint::<EmptyFormat>::new(
                "delete_pet",
                Method::DELETE,
                "pet/{petId}",
            ))
            .path_param("petId", pet_id);
        if let Some(api_key) = api_key {
            call = call.header("api_key", api_key);
        }
        call.send().await
    }

    /// Uploads an image for a pet.
    ///
    /// ## Errors
    ///
    /// Returns an error when the request fails.
    pub async fn upload_file(
        &self,
        pet_id: i64,
        additional_metadata: Option<&str>,
        file_name: impl Into<String>,
        data: Vec<u8>,
    ) -> Result<ApiResponse, ApiError> {
        let mut form = Form::new().part("file", Part::bytes(data).file_name(file_name.into()));
        if let Some(additional_metadata) = additional_metadata {
            form = form.text("additionalMetadata", additional_metadata.to_string());
        }
        self.client
            .request(Endpoint::<JsonFormat<ApiResponse>>::new(
                "upload_file",
                Method::POST,
                "pet/{petId}/uploadImage",
            ))
            .path_param("petId", pet_id)
            .multipart(form)
            .send()
            .await
    }
}
