use serde::{Deserialize, Serialize};

/// Adopter profile with household and preference data
///
/// Categorical fields arrive as strings from the shelter registry; the
/// normalizer in `core::normalize` is where they become closed enums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdopterProfile {
    #[serde(alias = "adopter_id", rename = "adopterId")]
    pub adopter_id: String,
    pub name: String,
    #[serde(alias = "housing_type", rename = "housingType")]
    pub housing_type: String,
    #[serde(alias = "has_yard", rename = "hasYard", default)]
    pub has_yard: bool,
    #[serde(alias = "activity_level", rename = "activityLevel")]
    pub activity_level: String,
    #[serde(alias = "experience_level", rename = "experienceLevel")]
    pub experience_level: String,
    #[serde(alias = "preferred_species", rename = "preferredSpecies", default)]
    pub preferred_species: Vec<String>,
    #[serde(alias = "preferred_size", rename = "preferredSize", default)]
    pub preferred_size: Option<String>,
    #[serde(alias = "has_other_pets", rename = "hasOtherPets", default)]
    pub has_other_pets: bool,
    #[serde(alias = "has_children", rename = "hasChildren", default)]
    pub has_children: bool,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Pet profile as listed in the shelter registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetProfile {
    #[serde(alias = "pet_id", rename = "petId")]
    pub pet_id: String,
    pub name: String,
    pub species: String,
    /// Informational only, never scored
    #[serde(default)]
    pub breed: String,
    #[serde(alias = "age_months", rename = "ageMonths")]
    pub age_months: u32,
    pub size: String,
    #[serde(alias = "activity_level", rename = "activityLevel")]
    pub activity_level: String,
    #[serde(alias = "good_with_children", rename = "goodWithChildren", default)]
    pub good_with_children: bool,
    #[serde(alias = "good_with_other_pets", rename = "goodWithOtherPets", default)]
    pub good_with_other_pets: bool,
    #[serde(alias = "special_needs", rename = "specialNeeds", default)]
    pub special_needs: bool,
    /// Adopted or delisted pets linger in registry responses; ranking
    /// skips them.
    #[serde(alias = "is_adoptable", rename = "isAdoptable", default = "default_true")]
    pub is_adoptable: bool,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_true() -> bool {
    true
}

/// One factor's contribution to an overall compatibility score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: String,
    /// Raw factor value in [0, 1]
    pub value: f64,
    pub weight: f64,
    /// value * weight, as summed into the overall score
    pub contribution: f64,
}

/// Result of scoring one adopter/pet pair
///
/// Derived data: recomputed on demand, only persisted as a snapshot attached
/// to an adoption request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityResult {
    #[serde(alias = "adopter_id", rename = "adopterId")]
    pub adopter_id: String,
    #[serde(alias = "pet_id", rename = "petId")]
    pub pet_id: String,
    pub score: f64,
    #[serde(alias = "factor_breakdown", rename = "factorBreakdown")]
    pub factor_breakdown: Vec<FactorScore>,
    #[serde(alias = "computed_at", rename = "computedAt")]
    pub computed_at: chrono::DateTime<chrono::Utc>,
}

/// Adoption request lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Withdrawn,
}

impl RequestStatus {
    /// Approved, rejected and withdrawn requests accept no further
    /// transitions.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Withdrawn => "withdrawn",
        }
    }
}

/// An adopter's request for a specific pet
///
/// The compatibility result is computed once at submission time and rides
/// along immutably so the admin queue can sort by fit without rescoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionRequest {
    #[serde(alias = "request_id", rename = "requestId")]
    pub request_id: String,
    #[serde(alias = "adopter_id", rename = "adopterId")]
    pub adopter_id: String,
    #[serde(alias = "pet_id", rename = "petId")]
    pub pet_id: String,
    pub status: RequestStatus,
    pub compatibility: CompatibilityResult,
    #[serde(alias = "created_at", rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(alias = "decided_at", rename = "decidedAt", default)]
    pub decided_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Ranked pet listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPet {
    pub pet: PetProfile,
    pub result: CompatibilityResult,
}

/// Ranked adopter entry for admin triage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedAdopter {
    pub adopter: AdopterProfile,
    pub result: CompatibilityResult,
}

/// Scoring weights for the six compatibility factors
///
/// Weights sum to 1.0 so the overall score stays in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub species: f64,
    pub size: f64,
    pub activity: f64,
    pub housing: f64,
    pub experience: f64,
    pub household: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            species: 0.25,
            size: 0.10,
            activity: 0.20,
            housing: 0.15,
            experience: 0.15,
            household: 0.15,
        }
    }
}
