use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A generated multiple-choice quiz as returned to the quiz page. Fields the
/// model adds beyond the required ones are kept in `extra` and echoed back.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizDocument {
    pub questions: Vec<QuizQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: BTreeMap<String, String>, // labelled "A" to "D"
    pub correct: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuizDocument {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_question_without_explanation_deserializes() {
        let json = r#"{"question":"Q?","options":{"A":"1","B":"2","C":"3","D":"4"},"correct":"B"}"#;
        let question: QuizQuestion = serde_json::from_str(json).expect("question should parse");

        assert_eq!(question.correct, "B");
        assert!(question.explanation.is_none());
        assert_eq!(question.options.len(), 4);
    }

    #[test]
    fn test_unknown_fields_survive_a_round_trip() {
        let json = r#"{"title":"Cells","questions":[{"question":"Q?","options":{"A":"1","B":"2","C":"3","D":"4"},"correct":"A","hint":"Think small"}]}"#;
        let quiz: QuizDocument = serde_json::from_str(json).expect("quiz should parse");

        assert_eq!(quiz.extra["title"], "Cells");
        assert_eq!(quiz.questions[0].extra["hint"], "Think small");

        let value = serde_json::to_value(&quiz).expect("quiz should serialize");
        assert_eq!(value["title"], "Cells");
        assert_eq!(value["questions"][0]["hint"], "Think small");
        assert_eq!(value["questions"][0]["correct"], "A");
    }

    #[test]
    fn test_quiz_question_missing_options_is_rejected() {
        let json = r#"{"question":"Q?","correct":"B"}"#;
        assert!(serde_json::from_str::<QuizQuestion>(json).is_err());
    }

    #[test]
    fn test_explanation_is_omitted_when_absent() {
        let question = QuizQuestion {
            question: "Q?".to_string(),
            options: BTreeMap::from([("A".to_string(), "yes".to_string())]),
            correct: "A".to_string(),
            explanation: None,
            extra: Map::new(),
        };

        let value = serde_json::to_value(&question).expect("question should serialize");
        assert!(value.get("explanation").is_none());
    }
}
