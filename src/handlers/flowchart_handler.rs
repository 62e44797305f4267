use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{
        request::{parse_body, BodyError, GenerateFlowchartRequest},
        response::FlowchartResponse,
    },
};

#[post("/generate-flowchart")]
pub async fn generate_flowchart(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Result<web::Json<serde_json::Value>, actix_web::Error>,
) -> Result<HttpResponse, AppError> {
    let request: GenerateFlowchartRequest = body
        .map_err(|_| BodyError::MissingText)
        .and_then(|json| parse_body(json.into_inner()))
        .map_err(|e| e.into_app_error("No text provided for flowchart generation."))?;
    request.validate()?;

    log::info!(
        "[{}] flowchart request, style {}",
        get_request_id(&req).unwrap_or_default(),
        request.chart_style
    );

    let artifact = state
        .flowchart_service
        .generate_flowchart(&request.text, &request.chart_style)
        .await?;

    Ok(HttpResponse::Ok().json(FlowchartResponse::new(artifact, request.chart_style)))
}
