// Integration tests for PawMatch Algo

use pawmatch_algo::core::Ranker;
use pawmatch_algo::core::{submit_request, transition};
use pawmatch_algo::models::{AdopterProfile, PetProfile, RequestStatus, ScoringWeights};
use pawmatch_algo::services::RegistryClient;

fn create_adopter(id: &str, housing: &str, activity: &str, species: &[&str]) -> AdopterProfile {
    AdopterProfile {
        adopter_id: id.to_string(),
        name: format!("Adopter {}", id),
        housing_type: housing.to_string(),
        has_yard: housing != "apartment",
        activity_level: activity.to_string(),
        experience_level: "some".to_string(),
        preferred_species: species.iter().map(|s| s.to_string()).collect(),
        preferred_size: None,
        has_other_pets: false,
        has_children: false,
        created_at: None,
    }
}

fn create_pet(id: &str, species: &str, size: &str, activity: &str, age_months: u32) -> PetProfile {
    PetProfile {
        pet_id: id.to_string(),
        name: format!("Pet {}", id),
        species: species.to_string(),
        breed: String::new(),
        age_months,
        size: size.to_string(),
        activity_level: activity.to_string(),
        good_with_children: true,
        good_with_other_pets: true,
        special_needs: false,
        is_adoptable: true,
        created_at: None,
    }
}

#[test]
fn test_end_to_end_pet_ranking() {
    let ranker = Ranker::with_default_weights();
    let adopter = create_adopter("a1", "house", "medium", &["dog"]);

    let pets = vec![
        create_pet("p1", "dog", "medium", "medium", 24), // strong fit
        create_pet("p2", "dog", "small", "low", 12),     // decent fit
        create_pet("p3", "cat", "small", "low", 12),     // wrong species
        create_pet("p4", "dog", "large", "high", 36),    // activity gap
        create_pet("p5", "bird", "small", "high", 6),    // wrong species + gap
    ];

    let ranking = ranker.rank_pets_for_adopter(&adopter, &pets).unwrap();
    let entries = ranking.entries();

    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0].pet.pet_id, "p1");
    for pair in entries.windows(2) {
        assert!(pair[0].result.score >= pair[1].result.score);
    }

    // Thresholding drops the mismatches without rescoring
    let good: Vec<&str> = ranking.above(0.8).map(|e| e.pet.pet_id.as_str()).collect();
    assert!(good.contains(&"p1"));
    assert!(!good.contains(&"p3"));
}

#[test]
fn test_admin_triage_prefers_matching_household() {
    let ranker = Ranker::with_default_weights();
    let pet = create_pet("p1", "dog", "large", "high", 24);

    let adopters = vec![
        create_adopter("a1", "apartment", "low", &["dog"]),
        create_adopter("a2", "farm", "high", &["dog"]),
        create_adopter("a3", "house", "medium", &["cat"]),
    ];

    let ranking = ranker.rank_adopters_for_pet(&pet, &adopters).unwrap();
    let entries = ranking.entries();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].adopter.adopter_id, "a2", "yard home + high activity wins");
    assert!(entries[0].result.score > entries[2].result.score);
}

#[test]
fn test_request_lifecycle() {
    let weights = ScoringWeights::default();
    let adopter = create_adopter("a1", "house", "medium", &["dog"]);
    let pet = create_pet("p1", "dog", "medium", "medium", 24);

    let mut request = submit_request(&adopter, &pet, &weights).unwrap();
    assert_eq!(request.status, RequestStatus::Pending);

    // The attached snapshot is what the admin queue sorts by
    assert!(request.compatibility.score > 0.9);
    assert_eq!(request.compatibility.adopter_id, "a1");
    assert_eq!(request.compatibility.pet_id, "p1");

    transition(&mut request, RequestStatus::Withdrawn).unwrap();
    assert!(request.decided_at.is_some());

    // Terminal: no take-backs
    assert!(transition(&mut request, RequestStatus::Pending).is_err());
    assert!(transition(&mut request, RequestStatus::Approved).is_err());
}

#[test]
fn test_two_pending_requests_rank_by_snapshot_score() {
    let weights = ScoringWeights::default();
    let pet = create_pet("p1", "dog", "large", "high", 24);

    let strong = submit_request(
        &create_adopter("a_strong", "farm", "high", &["dog"]),
        &pet,
        &weights,
    )
    .unwrap();
    let weak = submit_request(
        &create_adopter("a_weak", "apartment", "low", &[]),
        &pet,
        &weights,
    )
    .unwrap();

    assert!(strong.compatibility.score > weak.compatibility.score);
}

#[tokio::test]
async fn test_registry_round_trip_feeds_ranker() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/adopters/a1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "adopterId": "a1",
                "name": "Jordan",
                "housingType": "house",
                "hasYard": true,
                "activityLevel": "medium",
                "experienceLevel": "some",
                "preferredSpecies": ["dog"]
            }"#,
        )
        .create_async()
        .await;

    server
        .mock("GET", "/pets?adoptable=true")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "total": 2,
                "items": [
                    {
                        "petId": "p1",
                        "name": "Biscuit",
                        "species": "dog",
                        "ageMonths": 24,
                        "size": "medium",
                        "activityLevel": "medium"
                    },
                    {
                        "petId": "p2",
                        "name": "Clementine",
                        "species": "cat",
                        "ageMonths": 12,
                        "size": "small",
                        "activityLevel": "low"
                    }
                ]
            }"#,
        )
        .create_async()
        .await;

    let client = RegistryClient::new(server.url(), "test_key".to_string());
    let adopter = client.get_adopter("a1").await.unwrap();
    let pets = client.list_adoptable_pets().await.unwrap();

    let ranker = Ranker::with_default_weights();
    let ranking = ranker.rank_pets_for_adopter(&adopter, &pets).unwrap();

    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking.entries()[0].pet.pet_id, "p1");
}
