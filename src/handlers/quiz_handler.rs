use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{
        request::{parse_body, BodyError, GenerateQuizRequest},
        response::QuizResponse,
    },
    services::quiz_service::QuizOutcome,
};

#[post("/generate-quiz")]
pub async fn generate_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Result<web::Json<serde_json::Value>, actix_web::Error>,
) -> Result<HttpResponse, AppError> {
    let request: GenerateQuizRequest = body
        .map_err(|_| BodyError::MissingText)
        .and_then(|json| parse_body(json.into_inner()))
        .map_err(|e| e.into_app_error("No text provided for quiz generation."))?;
    request.validate()?;

    log::info!(
        "[{}] quiz request: {} {} questions",
        get_request_id(&req).unwrap_or_default(),
        request.num_questions,
        request.difficulty
    );

    let outcome = state
        .quiz_service
        .generate_quiz(&request.text, request.num_questions, &request.difficulty)
        .await?;

    let response = match outcome {
        QuizOutcome::Structured(quiz) => QuizResponse::structured(quiz),
        QuizOutcome::Unstructured(raw) => QuizResponse::unstructured(raw),
    };
    Ok(HttpResponse::Ok().json(response))
}
