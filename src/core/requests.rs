use crate::core::normalize::{normalize_adopter, normalize_pet, ValidationError};
use crate::core::scoring::score;
use crate::models::{AdopterProfile, AdoptionRequest, PetProfile, RequestStatus, ScoringWeights};
use thiserror::Error;

/// Error returned for an illegal request-status change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot transition request from {from:?} to {to:?}")]
pub struct InvalidTransitionError {
    pub from: RequestStatus,
    pub to: RequestStatus,
}

/// Build a new adoption request for an adopter/pet pair
///
/// The compatibility result is computed here, at submission time, and
/// attached to the request so the admin queue can sort pending requests by
/// fit without rescoring. Persisting the request is the caller's job.
pub fn submit_request(
    adopter: &AdopterProfile,
    pet: &PetProfile,
    weights: &ScoringWeights,
) -> Result<AdoptionRequest, ValidationError> {
    let normalized_adopter = normalize_adopter(adopter)?;
    let normalized_pet = normalize_pet(pet)?;
    let compatibility = score(&normalized_adopter, &normalized_pet, weights);

    Ok(AdoptionRequest {
        request_id: uuid::Uuid::new_v4().to_string(),
        adopter_id: normalized_adopter.adopter_id,
        pet_id: normalized_pet.pet_id,
        status: RequestStatus::Pending,
        compatibility,
        created_at: chrono::Utc::now(),
        decided_at: None,
    })
}

/// Apply a status transition, enforcing the request state machine
///
/// Pending requests may move to approved, rejected or withdrawn; those
/// three states are terminal. Every other change fails, including
/// pending to pending.
pub fn transition(
    request: &mut AdoptionRequest,
    new_status: RequestStatus,
) -> Result<(), InvalidTransitionError> {
    match (request.status, new_status) {
        (RequestStatus::Pending, RequestStatus::Approved)
        | (RequestStatus::Pending, RequestStatus::Rejected)
        | (RequestStatus::Pending, RequestStatus::Withdrawn) => {
            request.status = new_status;
            request.decided_at = Some(chrono::Utc::now());
            Ok(())
        }
        (from, to) => Err(InvalidTransitionError { from, to }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_adopter() -> AdopterProfile {
        AdopterProfile {
            adopter_id: "adopter_1".to_string(),
            name: "Jordan".to_string(),
            housing_type: "house".to_string(),
            has_yard: true,
            activity_level: "medium".to_string(),
            experience_level: "expert".to_string(),
            preferred_species: vec!["dog".to_string()],
            preferred_size: None,
            has_other_pets: false,
            has_children: false,
            created_at: None,
        }
    }

    fn create_pet() -> PetProfile {
        PetProfile {
            pet_id: "pet_1".to_string(),
            name: "Biscuit".to_string(),
            species: "dog".to_string(),
            breed: "beagle".to_string(),
            age_months: 18,
            size: "medium".to_string(),
            activity_level: "medium".to_string(),
            good_with_children: true,
            good_with_other_pets: true,
            special_needs: false,
            is_adoptable: true,
            created_at: None,
        }
    }

    #[test]
    fn test_submit_attaches_pending_compatibility() {
        let weights = ScoringWeights::default();
        let request = submit_request(&create_adopter(), &create_pet(), &weights).unwrap();

        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.adopter_id, "adopter_1");
        assert_eq!(request.pet_id, "pet_1");
        assert_eq!(request.compatibility.factor_breakdown.len(), 6);
        assert!(request.decided_at.is_none());
        assert!(!request.request_id.is_empty());
    }

    #[test]
    fn test_submit_score_matches_scorer() {
        let weights = ScoringWeights::default();
        let adopter = create_adopter();
        let pet = create_pet();

        let request = submit_request(&adopter, &pet, &weights).unwrap();
        let direct = score(
            &normalize_adopter(&adopter).unwrap(),
            &normalize_pet(&pet).unwrap(),
            &weights,
        );

        assert_eq!(request.compatibility.score, direct.score);
    }

    #[test]
    fn test_submit_rejects_malformed_profile() {
        let weights = ScoringWeights::default();
        let mut adopter = create_adopter();
        adopter.experience_level = "wizard".to_string();

        assert!(submit_request(&adopter, &create_pet(), &weights).is_err());
    }

    #[test]
    fn test_pending_transitions_succeed() {
        let weights = ScoringWeights::default();

        for target in [
            RequestStatus::Approved,
            RequestStatus::Rejected,
            RequestStatus::Withdrawn,
        ] {
            let mut request = submit_request(&create_adopter(), &create_pet(), &weights).unwrap();
            transition(&mut request, target).unwrap();
            assert_eq!(request.status, target);
            assert!(request.decided_at.is_some());
        }
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let weights = ScoringWeights::default();
        let mut request = submit_request(&create_adopter(), &create_pet(), &weights).unwrap();
        transition(&mut request, RequestStatus::Approved).unwrap();

        let err = transition(&mut request, RequestStatus::Rejected).unwrap_err();
        assert_eq!(
            err,
            InvalidTransitionError {
                from: RequestStatus::Approved,
                to: RequestStatus::Rejected,
            }
        );
        assert_eq!(request.status, RequestStatus::Approved, "request unchanged on failure");
    }

    #[test]
    fn test_pending_to_pending_rejected() {
        let weights = ScoringWeights::default();
        let mut request = submit_request(&create_adopter(), &create_pet(), &weights).unwrap();

        assert!(transition(&mut request, RequestStatus::Pending).is_err());
    }
}
