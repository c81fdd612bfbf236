// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AdopterProfile, AdoptionRequest, CompatibilityResult, FactorScore, PetProfile, RankedAdopter,
    RankedPet, RequestStatus, ScoringWeights,
};
pub use requests::{
    CompatibilityCheckRequest, RankAdoptersRequest, RankPetsRequest, SubmitRequest,
    TransitionRequest,
};
pub use responses::{
    ErrorResponse, HealthResponse, PendingRequestsResponse, RankAdoptersResponse, RankPetsResponse,
    SubmitResponse,
};
