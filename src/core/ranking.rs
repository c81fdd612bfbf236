use crate::core::normalize::{normalize_adopter, normalize_pet, ValidationError};
use crate::core::scoring::score;
use crate::models::{AdopterProfile, PetProfile, RankedAdopter, RankedPet, ScoringWeights};
use std::cmp::Ordering;

/// Ranking orchestrator for pet listings and admin triage
///
/// Wraps the pure scorer with collection-level sorting and threshold
/// filtering. Scoring is O(n) over the input and performs no I/O.
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: ScoringWeights,
}

impl Ranker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Rank a pet collection for one adopter, best fit first
    ///
    /// Non-adoptable pets are skipped. Ties break by ascending pet age and
    /// then pet id, so the ordering is stable across recomputations.
    pub fn rank_pets_for_adopter(
        &self,
        adopter: &AdopterProfile,
        pets: &[PetProfile],
    ) -> Result<PetRanking, ValidationError> {
        let normalized_adopter = normalize_adopter(adopter)?;

        let mut entries = Vec::with_capacity(pets.len());
        for pet in pets {
            if !pet.is_adoptable {
                continue;
            }
            let normalized_pet = normalize_pet(pet)?;
            let result = score(&normalized_adopter, &normalized_pet, &self.weights);
            entries.push(RankedPet {
                pet: pet.clone(),
                result,
            });
        }

        entries.sort_by(|a, b| {
            b.result
                .score
                .partial_cmp(&a.result.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.pet.age_months.cmp(&b.pet.age_months))
                .then_with(|| a.pet.pet_id.cmp(&b.pet.pet_id))
        });

        Ok(PetRanking { entries })
    }

    /// Rank adopter profiles against one pet for admin triage
    ///
    /// Same ordering rules as the pet ranking, with ties broken by
    /// ascending adopter id.
    pub fn rank_adopters_for_pet(
        &self,
        pet: &PetProfile,
        adopters: &[AdopterProfile],
    ) -> Result<AdopterRanking, ValidationError> {
        let normalized_pet = normalize_pet(pet)?;

        let mut entries = Vec::with_capacity(adopters.len());
        for adopter in adopters {
            let normalized_adopter = normalize_adopter(adopter)?;
            let result = score(&normalized_adopter, &normalized_pet, &self.weights);
            entries.push(RankedAdopter {
                adopter: adopter.clone(),
                result,
            });
        }

        entries.sort_by(|a, b| {
            b.result
                .score
                .partial_cmp(&a.result.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.adopter.adopter_id.cmp(&b.adopter.adopter_id))
        });

        Ok(AdopterRanking { entries })
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Sorted pet ranking for one adopter
///
/// Entries are scored once; `above` re-filters by threshold lazily, so
/// callers can retry with different cutoffs without rescoring.
#[derive(Debug, Clone)]
pub struct PetRanking {
    entries: Vec<RankedPet>,
}

impl PetRanking {
    pub fn entries(&self) -> &[RankedPet] {
        &self.entries
    }

    /// Entries at or above the threshold, best first
    pub fn above(&self, min_score: f64) -> impl Iterator<Item = &RankedPet> + '_ {
        // Entries are sorted descending, so the cutoff is a prefix
        self.entries
            .iter()
            .take_while(move |entry| entry.result.score >= min_score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<RankedPet> {
        self.entries
    }
}

/// Sorted adopter ranking for one pet
#[derive(Debug, Clone)]
pub struct AdopterRanking {
    entries: Vec<RankedAdopter>,
}

impl AdopterRanking {
    pub fn entries(&self) -> &[RankedAdopter] {
        &self.entries
    }

    pub fn above(&self, min_score: f64) -> impl Iterator<Item = &RankedAdopter> + '_ {
        self.entries
            .iter()
            .take_while(move |entry| entry.result.score >= min_score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<RankedAdopter> {
        self.entries
    }
}
