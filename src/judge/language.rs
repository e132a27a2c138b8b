//! Languages accepted by the judge and their Judge0 language ids

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A submission language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Python,
    Java,
    Cpp,
    Csharp,
    Ruby,
    Go,
}

impl Language {
    /// All supported languages
    pub const ALL: [Language; 7] = [
        Self::Javascript,
        Self::Python,
        Self::Java,
        Self::Cpp,
        Self::Csharp,
        Self::Ruby,
        Self::Go,
    ];

    /// Judge0 language id
    pub fn judge_id(self) -> i32 {
        match self {
            Self::Javascript => 63, // Node.js
            Self::Python => 71,     // Python 3
            Self::Java => 62,
            Self::Cpp => 54,
            Self::Csharp => 51,
            Self::Ruby => 72,
            Self::Go => 60,
        }
    }

    /// Lowercase identifier used in requests and stored submissions
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Javascript => "javascript",
            Self::Python => "python",
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::Csharp => "csharp",
            Self::Ruby => "ruby",
            Self::Go => "go",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}

/// Returned when a language name is not one of [`Language::ALL`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language: {0}")]
pub struct UnsupportedLanguage(pub String);
