use serde::Serialize;

use crate::models::domain::{FlowchartArtifact, QuizDocument};

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub answer: String,
    pub model: String,
    pub text_length: usize,
}

pub const QUIZ_FALLBACK_NOTE: &str =
    "Quiz generated but not in perfect JSON format. Please try again.";

/// Quiz replies either carry the parsed document or, when the model never
/// produced valid JSON, the raw reply with a note.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QuizResponse {
    Structured {
        success: bool,
        quiz: QuizDocument,
        num_questions: usize,
    },
    Unstructured {
        success: bool,
        quiz_text: String,
        note: String,
    },
}

impl QuizResponse {
    pub fn structured(quiz: QuizDocument) -> Self {
        let num_questions = quiz.question_count();
        QuizResponse::Structured {
            success: true,
            quiz,
            num_questions,
        }
    }

    pub fn unstructured(raw_text: String) -> Self {
        QuizResponse::Unstructured {
            success: true,
            quiz_text: raw_text,
            note: QUIZ_FALLBACK_NOTE.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlowchartResponse {
    pub success: bool,
    pub dot_code: String,
    pub svg_data: String,
    pub png_base64: String,
    pub chart_style: String,
}

impl FlowchartResponse {
    pub fn new(artifact: FlowchartArtifact, chart_style: String) -> Self {
        Self {
            success: true,
            dot_code: artifact.source,
            svg_data: artifact.svg,
            png_base64: artifact.png_base64,
            chart_style,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub api_configured: bool,
    pub model_working: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiTestResponse {
    Passed {
        success: bool,
        response: String,
        model: String,
    },
    Failed {
        success: bool,
        error: String,
    },
}
