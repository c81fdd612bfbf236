use crate::models::{AdopterProfile, PetProfile};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the shelter registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// HTTP client for the shelter registry
///
/// The registry (the profile-management CRUD app, out of scope here) owns
/// adopter and pet records; this client reads them. List responses use an
/// `{"items": [...], "total": n}` envelope.
pub struct RegistryClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl RegistryClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value, RegistryError> {
        let response = self
            .client
            .get(url)
            .header("X-Registry-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Err(RegistryError::NotFound(url.to_string()))
        } else if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            Err(RegistryError::Unauthorized)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Registry call {} failed: {} - {}", url, status, body);
            Err(RegistryError::ApiError(format!("Registry returned {}", status)))
        }
    }

    fn items(&self, json: &Value) -> Result<Vec<Value>, RegistryError> {
        json.get("items")
            .and_then(|d| d.as_array())
            .cloned()
            .ok_or_else(|| RegistryError::InvalidResponse("Missing items array".into()))
    }

    /// Fetch a single adopter profile by id
    pub async fn get_adopter(&self, adopter_id: &str) -> Result<AdopterProfile, RegistryError> {
        let url = format!(
            "{}/adopters/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(adopter_id)
        );

        tracing::debug!("Fetching adopter profile: {}", adopter_id);

        let json = self.get_json(&url).await?;
        serde_json::from_value(json)
            .map_err(|e| RegistryError::InvalidResponse(format!("Failed to parse adopter: {}", e)))
    }

    /// Fetch a single pet profile by id
    pub async fn get_pet(&self, pet_id: &str) -> Result<PetProfile, RegistryError> {
        let url = format!(
            "{}/pets/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(pet_id)
        );

        tracing::debug!("Fetching pet profile: {}", pet_id);

        let json = self.get_json(&url).await?;
        serde_json::from_value(json)
            .map_err(|e| RegistryError::InvalidResponse(format!("Failed to parse pet: {}", e)))
    }

    /// List pets currently available for adoption
    ///
    /// Records that fail to parse are skipped rather than failing the whole
    /// listing; malformed rows in the registry should not take ranking down.
    pub async fn list_adoptable_pets(&self) -> Result<Vec<PetProfile>, RegistryError> {
        let url = format!(
            "{}/pets?adoptable=true",
            self.base_url.trim_end_matches('/')
        );

        let json = self.get_json(&url).await?;
        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let pets: Vec<PetProfile> = self
            .items(&json)?
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect();

        tracing::debug!("Listed {} adoptable pets (total: {})", pets.len(), total);

        Ok(pets)
    }

    /// List adopter profiles for admin triage
    pub async fn list_adopters(&self) -> Result<Vec<AdopterProfile>, RegistryError> {
        let url = format!("{}/adopters", self.base_url.trim_end_matches('/'));

        let json = self.get_json(&url).await?;

        let adopters: Vec<AdopterProfile> = self
            .items(&json)?
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect();

        tracing::debug!("Listed {} adopters", adopters.len());

        Ok(adopters)
    }
}
