use crate::core::normalize::{ActivityLevel, ExperienceLevel, HousingType, NormalizedAdopter, NormalizedPet, Size};
use crate::models::{CompatibilityResult, FactorScore, ScoringWeights};

/// The independent sub-criteria that make up a compatibility score
///
/// Each factor evaluates to a raw value in [0, 1] and contributes
/// value * weight to the overall score. Keeping the table enumerated here
/// lets weights be tuned in configuration without touching scoring logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    SpeciesFit,
    SizeFit,
    ActivityMatch,
    HousingFit,
    ExperienceFit,
    HouseholdSafety,
}

impl Factor {
    pub const ALL: [Factor; 6] = [
        Factor::SpeciesFit,
        Factor::SizeFit,
        Factor::ActivityMatch,
        Factor::HousingFit,
        Factor::ExperienceFit,
        Factor::HouseholdSafety,
    ];

    /// Stable name used in factor breakdowns
    pub fn name(self) -> &'static str {
        match self {
            Factor::SpeciesFit => "species_fit",
            Factor::SizeFit => "size_fit",
            Factor::ActivityMatch => "activity_match",
            Factor::HousingFit => "housing_fit",
            Factor::ExperienceFit => "experience_fit",
            Factor::HouseholdSafety => "household_safety",
        }
    }

    pub fn weight(self, weights: &ScoringWeights) -> f64 {
        match self {
            Factor::SpeciesFit => weights.species,
            Factor::SizeFit => weights.size,
            Factor::ActivityMatch => weights.activity,
            Factor::HousingFit => weights.housing,
            Factor::ExperienceFit => weights.experience,
            Factor::HouseholdSafety => weights.household,
        }
    }

    /// Evaluate this factor for an adopter/pet pair
    pub fn evaluate(self, adopter: &NormalizedAdopter, pet: &NormalizedPet) -> f64 {
        match self {
            Factor::SpeciesFit => species_fit(adopter, pet),
            Factor::SizeFit => size_fit(adopter, pet),
            Factor::ActivityMatch => activity_match(adopter, pet),
            Factor::HousingFit => housing_fit(adopter, pet),
            Factor::ExperienceFit => experience_fit(adopter, pet),
            Factor::HouseholdSafety => household_safety(adopter, pet),
        }
    }
}

/// Full match if the adopter has no species constraint or the pet's
/// species is among the preferred ones
#[inline]
fn species_fit(adopter: &NormalizedAdopter, pet: &NormalizedPet) -> f64 {
    if adopter.preferred_species.is_empty() || adopter.preferred_species.contains(&pet.species) {
        1.0
    } else {
        0.0
    }
}

/// Exact size preference scores 1.0, an adjacent tier 0.3
#[inline]
fn size_fit(adopter: &NormalizedAdopter, pet: &NormalizedPet) -> f64 {
    match adopter.preferred_size {
        None => 1.0,
        Some(preferred) => match (preferred.tier() - pet.size.tier()).abs() {
            0 => 1.0,
            1 => 0.3,
            _ => 0.0,
        },
    }
}

/// Linear penalty on the ordinal gap between adopter lifestyle and pet
/// temperament
#[inline]
fn activity_match(adopter: &NormalizedAdopter, pet: &NormalizedPet) -> f64 {
    (1.0 - (adopter.activity.ordinal() - pet.activity.ordinal()).abs()).max(0.0)
}

/// Large or high-activity pets need a yard home (a farm, or a house with a
/// yard). Undemanding pets fit anywhere. An apartment mitigates to 0.4 when
/// the pet is at least small or low-activity.
#[inline]
fn housing_fit(adopter: &NormalizedAdopter, pet: &NormalizedPet) -> f64 {
    let yard_home = adopter.housing == HousingType::Farm
        || (adopter.housing == HousingType::House && adopter.has_yard);
    let demanding = pet.size == Size::Large || pet.activity == ActivityLevel::High;

    if !demanding || yard_home {
        1.0
    } else if adopter.housing == HousingType::Apartment
        && (pet.size == Size::Small || pet.activity == ActivityLevel::Low)
    {
        0.4
    } else {
        0.1
    }
}

/// Special-needs pets need an adopter with at least some experience;
/// a mismatch halves the factor
#[inline]
fn experience_fit(adopter: &NormalizedAdopter, pet: &NormalizedPet) -> f64 {
    if pet.special_needs && adopter.experience == ExperienceLevel::None {
        0.5
    } else {
        1.0
    }
}

/// Minimum of the children and other-pets sub-checks; each is zeroed on a
/// mismatch and 1.0 otherwise
#[inline]
fn household_safety(adopter: &NormalizedAdopter, pet: &NormalizedPet) -> f64 {
    let children: f64 = if adopter.has_children && !pet.good_with_children {
        0.0
    } else {
        1.0
    };
    let other_pets = if adopter.has_other_pets && !pet.good_with_other_pets {
        0.0
    } else {
        1.0
    };

    children.min(other_pets)
}

/// Score an adopter/pet pair
///
/// Weighted sum over the six factors, clamped to [0, 1], with a per-factor
/// breakdown for the admin view. Pure and deterministic: rescoring the same
/// pair always yields the same score. A zeroed safety factor lowers the
/// score but does not zero it; the model is additive, and hard cutoffs are
/// left to callers via ranking thresholds.
pub fn score(
    adopter: &NormalizedAdopter,
    pet: &NormalizedPet,
    weights: &ScoringWeights,
) -> CompatibilityResult {
    let mut factor_breakdown = Vec::with_capacity(Factor::ALL.len());
    let mut total = 0.0;

    for factor in Factor::ALL {
        let value = factor.evaluate(adopter, pet);
        let weight = factor.weight(weights);
        let contribution = value * weight;
        total += contribution;

        factor_breakdown.push(FactorScore {
            factor: factor.name().to_string(),
            value,
            weight,
            contribution,
        });
    }

    CompatibilityResult {
        adopter_id: adopter.adopter_id.clone(),
        pet_id: pet.pet_id.clone(),
        score: total.clamp(0.0, 1.0),
        factor_breakdown,
        computed_at: chrono::Utc::now(),
    }
}
