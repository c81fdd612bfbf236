// Core algorithm exports
pub mod normalize;
pub mod ranking;
pub mod requests;
pub mod scoring;

pub use normalize::{normalize_adopter, normalize_pet, NormalizedAdopter, NormalizedPet, ValidationError};
pub use ranking::{AdopterRanking, PetRanking, Ranker};
pub use requests::{submit_request, transition, InvalidTransitionError};
pub use scoring::{score, Factor};
