//! Language identification
//!
//! Maps code-block language identifiers (as written after a code fence or
//! stored on an imported block) to the grammars the tokenizer knows.

use std::fmt;

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageId {
    #[default]
    PlainText,
    Rust,
    JavaScript,
    Python,
    Go,
    C,
    Cpp,
    Java,
    Bash,
    Html,
    Css,
}

impl LanguageId {
    /// Every language with a grammar, in display order
    pub const HIGHLIGHTED: &'static [LanguageId] = &[
        LanguageId::JavaScript,
        LanguageId::Rust,
        LanguageId::Python,
        LanguageId::Go,
        LanguageId::C,
        LanguageId::Cpp,
        LanguageId::Java,
        LanguageId::Bash,
        LanguageId::Html,
        LanguageId::Css,
    ];

    /// Resolve a block's language identifier.
    ///
    /// Matching is case-insensitive and accepts the usual fence aliases.
    /// Anything unrecognized resolves to plain text.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "rust" | "rs" => LanguageId::Rust,
            "javascript" | "js" | "jsx" | "mjs" | "cjs" => LanguageId::JavaScript,
            "python" | "py" => LanguageId::Python,
            "go" | "golang" => LanguageId::Go,
            "c" | "h" => LanguageId::C,
            "cpp" | "c++" | "cc" | "hpp" => LanguageId::Cpp,
            "java" => LanguageId::Java,
            "bash" | "sh" | "shell" | "zsh" => LanguageId::Bash,
            "html" | "htm" | "markup" | "xml" => LanguageId::Html,
            "css" => LanguageId::Css,
            _ => LanguageId::PlainText,
        }
    }

    /// Resolve an optional identifier; `None` means no highlighting
    pub fn resolve(name: Option<&str>) -> Self {
        name.map(Self::from_name).unwrap_or_default()
    }

    /// Canonical identifier, as accepted by [`LanguageId::from_name`]
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "plain",
            LanguageId::Rust => "rust",
            LanguageId::JavaScript => "javascript",
            LanguageId::Python => "python",
            LanguageId::Go => "go",
            LanguageId::C => "c",
            LanguageId::Cpp => "cpp",
            LanguageId::Java => "java",
            LanguageId::Bash => "bash",
            LanguageId::Html => "html",
            LanguageId::Css => "css",
        }
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "Plain Text",
            LanguageId::Rust => "Rust",
            LanguageId::JavaScript => "JavaScript",
            LanguageId::Python => "Python",
            LanguageId::Go => "Go",
            LanguageId::C => "C",
            LanguageId::Cpp => "C++",
            LanguageId::Java => "Java",
            LanguageId::Bash => "Bash",
            LanguageId::Html => "HTML",
            LanguageId::Css => "CSS",
        }
    }

    /// Check if this language has syntax highlighting support
    pub fn has_highlighting(&self) -> bool {
        !matches!(self, LanguageId::PlainText)
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(LanguageId::from_name("rust"), LanguageId::Rust);
        assert_eq!(LanguageId::from_name("RS"), LanguageId::Rust);
        assert_eq!(LanguageId::from_name("js"), LanguageId::JavaScript);
        assert_eq!(LanguageId::from_name(" Python "), LanguageId::Python);
        assert_eq!(LanguageId::from_name("c++"), LanguageId::Cpp);
        assert_eq!(LanguageId::from_name("sh"), LanguageId::Bash);
        assert_eq!(LanguageId::from_name("markup"), LanguageId::Html);
        assert_eq!(LanguageId::from_name("XML"), LanguageId::Html);
        assert_eq!(LanguageId::from_name("css"), LanguageId::Css);
        assert_eq!(LanguageId::from_name("swift"), LanguageId::PlainText);
        assert_eq!(LanguageId::from_name(""), LanguageId::PlainText);
    }

    #[test]
    fn test_resolve_none_is_plain() {
        assert_eq!(LanguageId::resolve(None), LanguageId::PlainText);
        assert_eq!(LanguageId::resolve(Some("go")), LanguageId::Go);
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for &lang in LanguageId::HIGHLIGHTED {
            assert_eq!(LanguageId::from_name(lang.name()), lang);
            assert!(lang.has_highlighting());
        }
        assert!(!LanguageId::PlainText.has_highlighting());
    }
}
