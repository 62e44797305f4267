use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AnswerError, AppError},
    middleware::get_request_id,
    models::dto::{
        request::{parse_body, BodyError, SummarizeRequest},
        response::SummaryResponse,
    },
};

#[post("/summarize")]
pub async fn summarize(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Result<web::Json<serde_json::Value>, actix_web::Error>,
) -> Result<HttpResponse, AnswerError> {
    let request: SummarizeRequest = body
        .map_err(|_| BodyError::MissingText)
        .and_then(|json| parse_body(json.into_inner()))
        .map_err(|e| e.into_app_error("Error: No text provided for analysis."))?;
    request.validate().map_err(AppError::from)?;

    log::info!(
        "[{}] summarize request",
        get_request_id(&req).unwrap_or_default()
    );

    let summary = state.summary_service.summarize(&request.text).await?;
    Ok(HttpResponse::Ok().json(SummaryResponse {
        answer: summary.answer,
        model: summary.model,
        text_length: summary.text_length,
    }))
}
