use crate::core::{normalize_adopter, normalize_pet, score, submit_request, transition, Ranker, ValidationError};
use crate::models::{
    CompatibilityCheckRequest, ErrorResponse, HealthResponse, PendingRequestsResponse,
    RankAdoptersRequest, RankPetsRequest, RankedAdopter, RankedPet, RankAdoptersResponse,
    RankPetsResponse, RequestStatus, ScoringWeights, SubmitRequest, SubmitResponse,
    TransitionRequest,
};
use crate::services::{CacheKey, CacheManager, RegistryClient, RegistryError, RequestStore, RequestStoreError};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RegistryClient>,
    pub cache: Arc<CacheManager>,
    pub store: Arc<RequestStore>,
    pub ranker: Ranker,
    pub weights: ScoringWeights,
    pub default_min_score: f64,
    pub max_limit: u16,
}

/// Configure all matching-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/compatibility/check", web::post().to(check_compatibility))
        .route("/pets/rank", web::post().to(rank_pets))
        .route("/adopters/rank", web::post().to(rank_adopters))
        .route("/requests", web::post().to(submit_adoption_request))
        .route("/requests/pending", web::get().to(pending_requests))
        .route("/requests/status", web::post().to(transition_request))
        .route("/requests/stats", web::get().to(request_stats));
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn profile_rejected(err: ValidationError) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ErrorResponse {
        error: "Malformed profile".to_string(),
        message: err.to_string(),
        status_code: 422,
    })
}

fn registry_failed(context: &str, err: RegistryError) -> HttpResponse {
    match err {
        RegistryError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse {
            error: format!("{} not found", context),
            message: err.to_string(),
            status_code: 404,
        }),
        _ => {
            tracing::error!("Registry failure fetching {}: {}", context, err);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Failed to fetch {}", context),
                message: err.to_string(),
                status_code: 500,
            })
        }
    }
}

fn store_failed(context: &str, err: RequestStoreError) -> HttpResponse {
    match err {
        RequestStoreError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse {
            error: format!("{} not found", context),
            message: err.to_string(),
            status_code: 404,
        }),
        RequestStoreError::Conflict(_) => HttpResponse::Conflict().json(ErrorResponse {
            error: "Request already decided".to_string(),
            message: err.to_string(),
            status_code: 409,
        }),
        _ => {
            tracing::error!("Request store failure ({}): {}", context, err);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Failed to {}", context),
                message: err.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Compatibility check endpoint
///
/// POST /api/v1/compatibility/check
///
/// Request body:
/// ```json
/// {
///   "adopterId": "string",
///   "petId": "string"
/// }
/// ```
async fn check_compatibility(
    state: web::Data<AppState>,
    req: web::Json<CompatibilityCheckRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    tracing::info!("Compatibility check: {} x {}", req.adopter_id, req.pet_id);

    let adopter = match state.registry.get_adopter(&req.adopter_id).await {
        Ok(adopter) => adopter,
        Err(e) => return registry_failed("adopter", e),
    };

    let pet = match state.registry.get_pet(&req.pet_id).await {
        Ok(pet) => pet,
        Err(e) => return registry_failed("pet", e),
    };

    let normalized_adopter = match normalize_adopter(&adopter) {
        Ok(normalized) => normalized,
        Err(e) => return profile_rejected(e),
    };
    let normalized_pet = match normalize_pet(&pet) {
        Ok(normalized) => normalized,
        Err(e) => return profile_rejected(e),
    };

    let result = score(&normalized_adopter, &normalized_pet, &state.weights);

    HttpResponse::Ok().json(result)
}

/// Pet ranking endpoint
///
/// POST /api/v1/pets/rank
///
/// Request body:
/// ```json
/// {
///   "adopterId": "string",
///   "minScore": 0.5,
///   "limit": 20
/// }
/// ```
async fn rank_pets(state: web::Data<AppState>, req: web::Json<RankPetsRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let min_score = req.min_score.unwrap_or(state.default_min_score);
    let limit = req.limit.min(state.max_limit) as usize;

    tracing::info!(
        "Ranking pets for adopter {} (min_score: {}, limit: {})",
        req.adopter_id,
        min_score,
        limit
    );

    // The cache holds the full sorted ranking; threshold and limit are
    // applied per call, so re-querying with another cutoff stays cheap.
    let cache_key = CacheKey::pet_ranking(&req.adopter_id);
    let mut entries: Option<Vec<RankedPet>> = state.cache.get(&cache_key).await.ok();
    let mut total_candidates = entries.as_ref().map(|e| e.len()).unwrap_or(0);

    if entries.is_none() {
        let adopter = match state.registry.get_adopter(&req.adopter_id).await {
            Ok(adopter) => adopter,
            Err(e) => return registry_failed("adopter", e),
        };

        let pets = match state.registry.list_adoptable_pets().await {
            Ok(pets) => pets,
            Err(e) => return registry_failed("pet listing", e),
        };
        total_candidates = pets.len();

        let ranking = match state.ranker.rank_pets_for_adopter(&adopter, &pets) {
            Ok(ranking) => ranking,
            Err(e) => return profile_rejected(e),
        };

        let ranked = ranking.into_entries();
        if let Err(e) = state.cache.set(&cache_key, &ranked).await {
            tracing::warn!("Failed to cache ranking for {}: {}", req.adopter_id, e);
        }
        entries = Some(ranked);
    }

    let results: Vec<RankedPet> = entries
        .unwrap_or_default()
        .into_iter()
        .filter(|entry| entry.result.score >= min_score)
        .take(limit)
        .collect();

    tracing::info!(
        "Returning {} ranked pets for adopter {} (from {} candidates)",
        results.len(),
        req.adopter_id,
        total_candidates
    );

    HttpResponse::Ok().json(RankPetsResponse {
        results,
        total_candidates,
    })
}

/// Adopter triage endpoint for admin review
///
/// POST /api/v1/adopters/rank
async fn rank_adopters(
    state: web::Data<AppState>,
    req: web::Json<RankAdoptersRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let min_score = req.min_score.unwrap_or(state.default_min_score);
    let limit = req.limit.min(state.max_limit) as usize;

    tracing::info!(
        "Ranking adopters for pet {} (min_score: {}, limit: {})",
        req.pet_id,
        min_score,
        limit
    );

    let pet = match state.registry.get_pet(&req.pet_id).await {
        Ok(pet) => pet,
        Err(e) => return registry_failed("pet", e),
    };

    let adopters = match state.registry.list_adopters().await {
        Ok(adopters) => adopters,
        Err(e) => return registry_failed("adopter listing", e),
    };
    let total_candidates = adopters.len();

    let ranking = match state.ranker.rank_adopters_for_pet(&pet, &adopters) {
        Ok(ranking) => ranking,
        Err(e) => return profile_rejected(e),
    };

    let results: Vec<RankedAdopter> = ranking.above(min_score).take(limit).cloned().collect();

    HttpResponse::Ok().json(RankAdoptersResponse {
        results,
        total_candidates,
    })
}

/// Adoption request submission endpoint
///
/// POST /api/v1/requests
///
/// Computes the compatibility result at submission time and persists it
/// with the pending request.
async fn submit_adoption_request(
    state: web::Data<AppState>,
    req: web::Json<SubmitRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    tracing::info!("Adoption request: {} -> {}", req.adopter_id, req.pet_id);

    let adopter = match state.registry.get_adopter(&req.adopter_id).await {
        Ok(adopter) => adopter,
        Err(e) => return registry_failed("adopter", e),
    };

    let pet = match state.registry.get_pet(&req.pet_id).await {
        Ok(pet) => pet,
        Err(e) => return registry_failed("pet", e),
    };

    if !pet.is_adoptable {
        return HttpResponse::Conflict().json(ErrorResponse {
            error: "Pet unavailable".to_string(),
            message: format!("Pet {} is no longer adoptable", req.pet_id),
            status_code: 409,
        });
    }

    let request = match submit_request(&adopter, &pet, &state.weights) {
        Ok(request) => request,
        Err(e) => return profile_rejected(e),
    };

    if let Err(e) = state.store.save(&request).await {
        return store_failed("save request", e);
    }

    // A new pending request can change what listings should show
    if let Err(e) = state.cache.delete(&CacheKey::pet_ranking(&req.adopter_id)).await {
        tracing::warn!("Failed to invalidate ranking cache: {}", e);
    }
    if let Err(e) = state.cache.delete(&CacheKey::adopter_ranking(&req.pet_id)).await {
        tracing::warn!("Failed to invalidate triage cache: {}", e);
    }

    tracing::info!(
        "Created request {} with score {:.3}",
        request.request_id,
        request.compatibility.score
    );

    HttpResponse::Ok().json(SubmitResponse { request })
}

/// Pending request queue for admin review, best fit first
///
/// GET /api/v1/requests/pending
async fn pending_requests(state: web::Data<AppState>) -> impl Responder {
    match state.store.list_pending().await {
        Ok(requests) => {
            let count = requests.len();
            HttpResponse::Ok().json(PendingRequestsResponse { requests, count })
        }
        Err(e) => store_failed("list pending requests", e),
    }
}

/// Status transition endpoint
///
/// POST /api/v1/requests/status
///
/// Request body:
/// ```json
/// {
///   "requestId": "string",
///   "status": "approved|rejected|withdrawn"
/// }
/// ```
async fn transition_request(
    state: web::Data<AppState>,
    req: web::Json<TransitionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let new_status = match req.status.to_lowercase().as_str() {
        "pending" => RequestStatus::Pending,
        "approved" => RequestStatus::Approved,
        "rejected" => RequestStatus::Rejected,
        "withdrawn" => RequestStatus::Withdrawn,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid status".to_string(),
                message: "Status must be one of: approved, rejected, withdrawn".to_string(),
                status_code: 400,
            });
        }
    };

    let mut request = match state.store.get_request(&req.request_id).await {
        Ok(request) => request,
        Err(e) => return store_failed("fetch request", e),
    };

    if let Err(e) = transition(&mut request, new_status) {
        tracing::info!("Rejected transition for {}: {}", req.request_id, e);
        return HttpResponse::Conflict().json(ErrorResponse {
            error: "Invalid transition".to_string(),
            message: e.to_string(),
            status_code: 409,
        });
    }

    if let Err(e) = state
        .store
        .update_status(&request.request_id, request.status, request.decided_at)
        .await
    {
        return store_failed("update status", e);
    }

    HttpResponse::Ok().json(request)
}

/// Request counts by status
///
/// GET /api/v1/requests/stats
async fn request_stats(state: web::Data<AppState>) -> impl Responder {
    match state.store.stats().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => store_failed("fetch stats", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
