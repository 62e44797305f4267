use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::truncate_chars,
    models::dto::response::{ApiTestResponse, HealthResponse},
    services::language_model::GenerationError,
};

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let report = state.diagnostics_service.health().await;

    HttpResponse::Ok().json(HealthResponse {
        status: report.status(),
        model: report.model,
        api_configured: report.api_configured,
        model_working: report.model_working,
    })
}

#[get("/test-api")]
pub async fn test_api(state: web::Data<AppState>) -> HttpResponse {
    let diagnostics = &state.diagnostics_service;

    match diagnostics.test_api().await {
        Ok(response) => HttpResponse::Ok().json(ApiTestResponse::Passed {
            success: true,
            response,
            model: diagnostics.model_identifier().to_string(),
        }),
        Err(GenerationError::RateLimited(_)) => {
            HttpResponse::TooManyRequests().json(ApiTestResponse::Failed {
                success: false,
                error: "Quota exceeded - daily limit reached".to_string(),
            })
        }
        Err(GenerationError::Other(msg)) => {
            HttpResponse::InternalServerError().json(ApiTestResponse::Failed {
                success: false,
                error: truncate_chars(&msg, 100).to_string(),
            })
        }
    }
}
