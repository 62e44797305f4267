pub mod diagnostics_service;
pub mod flowchart_service;
pub mod generation_client;
pub mod language_model;
pub mod model_selector;
pub mod quiz_service;
pub mod renderer;
pub mod retry;
pub mod sanitize;
pub mod summary_service;
