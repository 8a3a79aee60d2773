//! Language classification for submitted files
//!
//! Maps a file name to a canonical language tag for the review prompt.
//! Classification is a pure function over the file extension; anything
//! outside the known table is treated as plain text.

use std::path::Path;

/// Canonical language tags known to the reviewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    Python,
    Cpp,
    Java,
    CSharp,
    Php,
    Ruby,
    Go,
    Plaintext,
}

impl Language {
    /// Canonical tag sent to the model and stored with the review
    pub fn tag(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::CSharp => "csharp",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Go => "go",
            Language::Plaintext => "plaintext",
        }
    }

    /// Classify a file name by its extension, case-insensitively
    ///
    /// Missing, empty, or unrecognized names classify as [`Language::Plaintext`].
    pub fn from_file_name(name: &str) -> Language {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            // TypeScript reviews reuse the javascript tag; the model treats
            // them as one family
            Some("js" | "jsx" | "ts" | "tsx") => Language::JavaScript,
            Some("py") => Language::Python,
            Some("cpp" | "cc" | "cxx" | "hpp") => Language::Cpp,
            Some("java") => Language::Java,
            Some("cs") => Language::CSharp,
            Some("php") => Language::Php,
            Some("rb") => Language::Ruby,
            Some("go") => Language::Go,
            _ => Language::Plaintext,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Resolve the language tag for an upload
///
/// An explicit non-empty tag is passed through unchanged; otherwise the file
/// name is classified. Total over all inputs.
pub fn resolve_language(explicit: Option<&str>, file_name: &str) -> String {
    match explicit {
        Some(tag) if !tag.trim().is_empty() => tag.to_string(),
        _ => Language::from_file_name(file_name).tag().to_string(),
    }
}
