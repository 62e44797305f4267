pub mod diagnostics_handler;
pub mod flowchart_handler;
pub mod page_handler;
pub mod quiz_handler;
pub mod summary_handler;

use actix_web::{web, HttpResponse, ResponseError};

use crate::errors::AppError;

pub use diagnostics_handler::{health_check, test_api};
pub use flowchart_handler::generate_flowchart;
pub use page_handler::{flowchart_page, index_page, quiz_page, summarize_page};
pub use quiz_handler::generate_quiz;
pub use summary_handler::summarize;

/// Registers every route. `GET /summarize` serves the page and
/// `POST /summarize` the API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index_page)
        .service(summarize_page)
        .service(quiz_page)
        .service(flowchart_page)
        .service(summarize)
        .service(generate_quiz)
        .service(generate_flowchart)
        .service(health_check)
        .service(test_api);
}

pub async fn not_found() -> HttpResponse {
    AppError::NotFound("Route not found".to_string()).error_response()
}
