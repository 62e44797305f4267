use crate::errors::truncate_chars;

pub const PROBE_PROMPT: &str = "Hi";
pub const HEALTH_PROMPT: &str = "Test";
pub const TEST_API_PROMPT: &str = "Say 'OK'";

const CONCISE_SUMMARY: &str = "Provide a concise but complete summary with key points.";
const DETAILED_SUMMARY: &str =
    "Provide a detailed analysis with main concepts, key points, and supporting details.";
const COMPREHENSIVE_SUMMARY: &str =
    "Provide a comprehensive analysis including: Main Concepts, Key Details, and Takeaways.";

/// Picks how much structure to ask for based on the input length in characters.
pub fn summary_instruction(text_length: usize) -> &'static str {
    if text_length < 500 {
        CONCISE_SUMMARY
    } else if text_length < 2000 {
        DETAILED_SUMMARY
    } else {
        COMPREHENSIVE_SUMMARY
    }
}

pub fn summary_prompt(text: &str, text_length: usize) -> String {
    format!(
        "{instruction}\n\nText to analyze:\n{text}\n\nProvide your educational analysis:",
        instruction = summary_instruction(text_length),
    )
}

pub fn quiz_prompt(text: &str, num_questions: i64, difficulty: &str) -> String {
    format!(
        r#"Generate {num_questions} multiple choice questions ({difficulty} difficulty) from this text.

IMPORTANT: Format EXACTLY as JSON. Do not include any markdown formatting or code blocks.

{{
  "questions": [
    {{
      "question": "Clear question text here?",
      "options": {{
        "A": "First option",
        "B": "Second option",
        "C": "Third option",
        "D": "Fourth option"
      }},
      "correct": "A",
      "explanation": "Brief explanation why this is correct"
    }}
  ]
}}

Text to create quiz from:
{text}

Generate {num_questions} questions now in pure JSON format:"#
    )
}

pub fn flowchart_prompt(text: &str, chart_style: &str) -> String {
    format!(
        r##"Create a Graphviz DOT flowchart from this text. Follow these EXACT rules:

MANDATORY FORMAT:
digraph G {{
    rankdir={chart_style};
    node [fontname="Arial", fontsize=12];
    edge [fontname="Arial", fontsize=10];

    // Nodes
    start [label="Start", shape=ellipse, style=filled, fillcolor="#87CEEB"];
    node1 [label="Step description", shape=box, style=filled, fillcolor="#90EE90"];
    decision1 [label="Question?", shape=diamond, style=filled, fillcolor="#FFD700"];
    end [label="End", shape=ellipse, style=filled, fillcolor="#FFA07A"];

    // Edges
    start -> node1;
    node1 -> decision1;
    decision1 -> end [label="Yes"];
}}

CRITICAL RULES:
1. Use ONLY alphanumeric node IDs (start, step1, step2, end)
2. NO special characters in node IDs
3. Keep labels under 40 characters
4. Use double quotes for ALL labels
5. End every statement with semicolon
6. Use -> for directed edges
7. Maximum 15 nodes
8. Return ONLY the DOT code, NO explanations

Text describing the process:
{text}

Generate the Graphviz DOT code:"##
    )
}

const RENDER_ERROR_EXCERPT: usize = 100;
const INPUT_EXCERPT: usize = 500;

/// Follow-up prompt after a render failure. It shows the model the renderer
/// error next to a minimal template that is known to render.
pub fn flowchart_correction_prompt(render_error: &str, chart_style: &str, text: &str) -> String {
    format!(
        r##"The previous attempt had this error: {error}

Please create a SIMPLE, VALID Graphviz DOT flowchart. Use this EXACT format:

digraph G {{
    rankdir={chart_style};
    start [label="Start", shape=ellipse, style=filled, fillcolor="#87CEEB"];
    step1 [label="First step", shape=box, style=filled, fillcolor="#90EE90"];
    end [label="End", shape=ellipse, style=filled, fillcolor="#FFA07A"];
    start -> step1;
    step1 -> end;
}}

Create a flowchart from: {excerpt}

Return ONLY valid DOT code:"##,
        error = truncate_chars(render_error, RENDER_ERROR_EXCERPT),
        excerpt = truncate_chars(text, INPUT_EXCERPT),
    )
}
