use actix_web::{get, http::header::ContentType, HttpResponse};

const INDEX_PAGE: &str = include_str!("../../templates/index.html");
const SUMMARIZE_PAGE: &str = include_str!("../../templates/summarize.html");
const QUIZ_PAGE: &str = include_str!("../../templates/quiz.html");
const FLOWCHART_PAGE: &str = include_str!("../../templates/flowchart.html");

fn page(html: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html)
}

#[get("/")]
pub async fn index_page() -> HttpResponse {
    page(INDEX_PAGE)
}

#[get("/summarize")]
pub async fn summarize_page() -> HttpResponse {
    page(SUMMARIZE_PAGE)
}

#[get("/quiz")]
pub async fn quiz_page() -> HttpResponse {
    page(QUIZ_PAGE)
}

#[get("/flowchart")]
pub async fn flowchart_page() -> HttpResponse {
    page(FLOWCHART_PAGE)
}
