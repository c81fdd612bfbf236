use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to score one adopter/pet pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompatibilityCheckRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "adopter_id", rename = "adopterId")]
    pub adopter_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "pet_id", rename = "petId")]
    pub pet_id: String,
}

/// Request to rank the adoptable pet listing for an adopter
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankPetsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "adopter_id", rename = "adopterId")]
    pub adopter_id: String,
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(alias = "min_score", rename = "minScore", default)]
    pub min_score: Option<f64>,
    #[serde(default = "default_limit")]
    pub limit: u16,
}

/// Request to rank adopters against one pet (admin triage)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankAdoptersRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "pet_id", rename = "petId")]
    pub pet_id: String,
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(alias = "min_score", rename = "minScore", default)]
    pub min_score: Option<f64>,
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    20
}

/// Request to submit an adoption request for a specific pet
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "adopter_id", rename = "adopterId")]
    pub adopter_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "pet_id", rename = "petId")]
    pub pet_id: String,
}

/// Admin request to transition an adoption request's status
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransitionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "request_id", rename = "requestId")]
    pub request_id: String,
    #[validate(length(min = 1))]
    pub status: String,
}
