pub mod flowchart;
pub mod generation;
pub mod quiz;
pub use flowchart::{FlowchartArtifact, ImageFormat};
pub use generation::{GenerationParams, GenerationRequest, ModelHandle};
pub use quiz::{QuizDocument, QuizQuestion};
