use crate::models::{AdopterProfile, PetProfile};
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when a raw profile record cannot be normalized
///
/// The form layer upstream is responsible for rejecting malformed input;
/// a value reaching here unrecognized is surfaced, never defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("unrecognized value '{value}' for field {field}")]
    UnknownValue { field: &'static str, value: String },
}

/// Pet species known to the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Dog,
    Cat,
    Rabbit,
    Bird,
}

impl FromStr for Species {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dog" => Ok(Species::Dog),
            "cat" => Ok(Species::Cat),
            "rabbit" => Ok(Species::Rabbit),
            "bird" => Ok(Species::Bird),
            _ => Err(()),
        }
    }
}

/// Pet size tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    /// Tier index used for adjacency checks in size_fit
    #[inline]
    pub fn tier(self) -> i8 {
        match self {
            Size::Small => 0,
            Size::Medium => 1,
            Size::Large => 2,
        }
    }
}

impl FromStr for Size {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(Size::Small),
            "medium" => Ok(Size::Medium),
            "large" => Ok(Size::Large),
            _ => Err(()),
        }
    }
}

/// Activity level of an adopter's lifestyle or a pet's temperament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
}

impl ActivityLevel {
    /// Fixed ordinal used by activity_match: low 0.0, medium 0.5, high 1.0
    #[inline]
    pub fn ordinal(self) -> f64 {
        match self {
            ActivityLevel::Low => 0.0,
            ActivityLevel::Medium => 0.5,
            ActivityLevel::High => 1.0,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(ActivityLevel::Low),
            "medium" => Ok(ActivityLevel::Medium),
            "high" => Ok(ActivityLevel::High),
            _ => Err(()),
        }
    }
}

/// Adopter experience with pets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    None,
    Some,
    Expert,
}

impl ExperienceLevel {
    #[inline]
    pub fn ordinal(self) -> f64 {
        match self {
            ExperienceLevel::None => 0.0,
            ExperienceLevel::Some => 0.5,
            ExperienceLevel::Expert => 1.0,
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(ExperienceLevel::None),
            "some" => Ok(ExperienceLevel::Some),
            "expert" => Ok(ExperienceLevel::Expert),
            _ => Err(()),
        }
    }
}

/// Adopter housing situation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HousingType {
    Apartment,
    House,
    Farm,
}

impl FromStr for HousingType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "apartment" => Ok(HousingType::Apartment),
            "house" => Ok(HousingType::House),
            "farm" => Ok(HousingType::Farm),
            _ => Err(()),
        }
    }
}

/// Adopter record with categorical fields resolved to closed enums
#[derive(Debug, Clone)]
pub struct NormalizedAdopter {
    pub adopter_id: String,
    pub housing: HousingType,
    pub has_yard: bool,
    pub activity: ActivityLevel,
    pub experience: ExperienceLevel,
    /// Empty set means no species constraint
    pub preferred_species: HashSet<Species>,
    pub preferred_size: Option<Size>,
    pub has_other_pets: bool,
    pub has_children: bool,
}

/// Pet record with categorical fields resolved to closed enums
#[derive(Debug, Clone)]
pub struct NormalizedPet {
    pub pet_id: String,
    pub species: Species,
    pub age_months: u32,
    pub size: Size,
    pub activity: ActivityLevel,
    pub good_with_children: bool,
    pub good_with_other_pets: bool,
    pub special_needs: bool,
}

fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed)
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, ValidationError> {
    let raw = require(field, value)?;
    raw.parse().map_err(|_| ValidationError::UnknownValue {
        field,
        value: raw.to_string(),
    })
}

/// Convert a raw adopter record into comparable feature values
///
/// Deterministic and side-effect free. Fails on any missing or
/// unrecognized categorical field.
pub fn normalize_adopter(profile: &AdopterProfile) -> Result<NormalizedAdopter, ValidationError> {
    let adopter_id = require("adopterId", &profile.adopter_id)?.to_string();
    let housing = parse_field("housingType", &profile.housing_type)?;
    let activity = parse_field("activityLevel", &profile.activity_level)?;
    let experience = parse_field("experienceLevel", &profile.experience_level)?;

    let mut preferred_species = HashSet::with_capacity(profile.preferred_species.len());
    for raw in &profile.preferred_species {
        preferred_species.insert(parse_field::<Species>("preferredSpecies", raw)?);
    }

    let preferred_size = match profile.preferred_size.as_deref() {
        None => None,
        // An explicitly blank preference reads as "no preference"
        Some(raw) if raw.trim().is_empty() => None,
        Some(raw) => Some(parse_field("preferredSize", raw)?),
    };

    Ok(NormalizedAdopter {
        adopter_id,
        housing,
        has_yard: profile.has_yard,
        activity,
        experience,
        preferred_species,
        preferred_size,
        has_other_pets: profile.has_other_pets,
        has_children: profile.has_children,
    })
}

/// Convert a raw pet record into comparable feature values
pub fn normalize_pet(profile: &PetProfile) -> Result<NormalizedPet, ValidationError> {
    let pet_id = require("petId", &profile.pet_id)?.to_string();
    let species = parse_field("species", &profile.species)?;
    let size = parse_field("size", &profile.size)?;
    let activity = parse_field("activityLevel", &profile.activity_level)?;

    Ok(NormalizedPet {
        pet_id,
        species,
        age_months: profile.age_months,
        size,
        activity,
        good_with_children: profile.good_with_children,
        good_with_other_pets: profile.good_with_other_pets,
        special_needs: profile.special_needs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adopter() -> AdopterProfile {
        AdopterProfile {
            adopter_id: "adopter_1".to_string(),
            name: "Jordan".to_string(),
            housing_type: "house".to_string(),
            has_yard: true,
            activity_level: "medium".to_string(),
            experience_level: "some".to_string(),
            preferred_species: vec!["dog".to_string(), "cat".to_string()],
            preferred_size: Some("medium".to_string()),
            has_other_pets: false,
            has_children: true,
            created_at: None,
        }
    }

    fn pet() -> PetProfile {
        PetProfile {
            pet_id: "pet_1".to_string(),
            name: "Biscuit".to_string(),
            species: "dog".to_string(),
            breed: "beagle".to_string(),
            age_months: 18,
            size: "small".to_string(),
            activity_level: "high".to_string(),
            good_with_children: true,
            good_with_other_pets: true,
            special_needs: false,
            is_adoptable: true,
            created_at: None,
        }
    }

    #[test]
    fn test_normalize_adopter() {
        let normalized = normalize_adopter(&adopter()).unwrap();

        assert_eq!(normalized.housing, HousingType::House);
        assert_eq!(normalized.activity, ActivityLevel::Medium);
        assert_eq!(normalized.experience, ExperienceLevel::Some);
        assert_eq!(normalized.preferred_size, Some(Size::Medium));
        assert!(normalized.preferred_species.contains(&Species::Dog));
        assert!(normalized.preferred_species.contains(&Species::Cat));
    }

    #[test]
    fn test_normalize_pet() {
        let normalized = normalize_pet(&pet()).unwrap();

        assert_eq!(normalized.species, Species::Dog);
        assert_eq!(normalized.size, Size::Small);
        assert_eq!(normalized.activity, ActivityLevel::High);
        assert_eq!(normalized.age_months, 18);
    }

    #[test]
    fn test_categorical_parsing_is_case_insensitive() {
        let mut profile = pet();
        profile.species = "Dog".to_string();
        profile.size = "SMALL".to_string();

        let normalized = normalize_pet(&profile).unwrap();
        assert_eq!(normalized.species, Species::Dog);
        assert_eq!(normalized.size, Size::Small);
    }

    #[test]
    fn test_unknown_value_rejected() {
        let mut profile = pet();
        profile.species = "dragon".to_string();

        let err = normalize_pet(&profile).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownValue {
                field: "species",
                value: "dragon".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut profile = adopter();
        profile.housing_type = "  ".to_string();

        let err = normalize_adopter(&profile).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("housingType"));
    }

    #[test]
    fn test_unknown_preferred_species_rejected() {
        let mut profile = adopter();
        profile.preferred_species = vec!["dog".to_string(), "ferret".to_string()];

        assert!(normalize_adopter(&profile).is_err());
    }

    #[test]
    fn test_blank_size_preference_is_no_preference() {
        let mut profile = adopter();
        profile.preferred_size = Some("".to_string());

        let normalized = normalize_adopter(&profile).unwrap();
        assert_eq!(normalized.preferred_size, None);
    }

    #[test]
    fn test_activity_ordinals() {
        assert_eq!(ActivityLevel::Low.ordinal(), 0.0);
        assert_eq!(ActivityLevel::Medium.ordinal(), 0.5);
        assert_eq!(ActivityLevel::High.ordinal(), 1.0);
    }

    #[test]
    fn test_size_tiers_are_adjacent() {
        assert_eq!((Size::Small.tier() - Size::Medium.tier()).abs(), 1);
        assert_eq!((Size::Small.tier() - Size::Large.tier()).abs(), 2);
    }
}
