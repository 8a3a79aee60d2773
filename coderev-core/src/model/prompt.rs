//! Prompt construction for the review request
//!
//! The system instruction pins the exact JSON shape the normalizer expects;
//! the user message carries the language tag and the submitted code verbatim.

/// Fixed system instruction describing the review schema
pub const SYSTEM_PROMPT: &str = r#"You are an advanced AI Code Reviewer.
Analyze the given code and return a thorough review.

Return a JSON object with the following shape:

{
 "errors": [],
 "improvements": [],
 "security_issues": [],
 "clean_code": [],
 "complexity": "",
 "refactor_code": "",
 "summary": ""
}

- "errors": list of bugs, logical errors, or runtime issues
- "improvements": list of suggestions for better structure, readability, and performance
- "security_issues": list of possible vulnerabilities or unsafe patterns
- "clean_code": list of suggestions based on clean code principles
- "complexity": brief time and space complexity analysis if the code is algorithmic
- "refactor_code": a fully corrected and refactored version of the input code in the original language (NO markdown, no commentary)
- "summary": short summary of the overall code quality

Respond with the JSON object only."#;

/// Build the user message for one submission
pub fn user_content(code: &str, language: &str) -> String {
    format!("Language: {}\n\nCode:\n{}", language, code)
}
