use crate::models::domain::{AdoptionRequest, RankedAdopter, RankedPet};
use serde::{Deserialize, Serialize};

/// Response for the pet ranking endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankPetsResponse {
    pub results: Vec<RankedPet>,
    pub total_candidates: usize,
}

/// Response for the adopter triage endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankAdoptersResponse {
    pub results: Vec<RankedAdopter>,
    pub total_candidates: usize,
}

/// Response for request submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub request: AdoptionRequest,
}

/// Response for the pending request queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRequestsResponse {
    pub requests: Vec<AdoptionRequest>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
