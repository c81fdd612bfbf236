//! PawMatch Algo - compatibility scoring service for the PawMatch adoption platform
//!
//! This library implements the compatibility engine used to rank pet
//! listings for adopters and to prioritize adoption requests for admin
//! review: normalization of raw profile records, a weighted six-factor
//! scorer with explainable breakdowns, ranking with deterministic
//! tie-breaks, and the adoption-request state machine.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize_adopter, normalize_pet, score, submit_request, transition, Factor, InvalidTransitionError, Ranker, ValidationError};
pub use crate::models::{AdopterProfile, AdoptionRequest, CompatibilityResult, PetProfile, RankedPet, RequestStatus, ScoringWeights};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let ranker = Ranker::with_default_weights();
        let ranking = ranker.rank_pets_for_adopter(
            &AdopterProfile {
                adopter_id: "a1".to_string(),
                name: "Test".to_string(),
                housing_type: "house".to_string(),
                has_yard: true,
                activity_level: "medium".to_string(),
                experience_level: "some".to_string(),
                preferred_species: vec![],
                preferred_size: None,
                has_other_pets: false,
                has_children: false,
                created_at: None,
            },
            &[],
        );
        assert!(ranking.unwrap().is_empty());
    }
}
