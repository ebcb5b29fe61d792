use std::fmt;

use serde::{Deserialize, Serialize};

/// Rejection of a dice expression; shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed dice expression")]
    Malformed,
}

/// Kind of reference content a lookup was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Spell,
    Monster,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContentKind::Spell => "spell",
            ContentKind::Monster => "monster",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("{kind} '{name}' not found")]
    NotFound { kind: ContentKind, name: String },
    /// The source answered, but not in a shape we can project.
    #[error("{kind} '{name}' has an unexpected format")]
    UnexpectedShape { kind: ContentKind, name: String },
}

impl LookupError {
    pub fn not_found(kind: ContentKind, name: impl Into<String>) -> Self {
        LookupError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn unexpected_shape(kind: ContentKind, name: impl Into<String>) -> Self {
        LookupError::UnexpectedShape {
            kind,
            name: name.into(),
        }
    }
}
