use std::fmt;

use rakast_errors::Diagnostic;
use text_size::TextRange;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal build failures. The factory is correct only if every shape the
/// grammar can produce has an explicit case, so an unrecognized shape aborts
/// the whole build instead of guessing.
#[derive(Debug)]
pub enum Error {
    /// A dispatch function exhausted its ordered shape tests. Carries the
    /// production name plus the sorted capture keys that had content and the
    /// keys that were present but empty.
    UnhandledMatch {
        production: &'static str,
        filled: Vec<String>,
        empty: Vec<String>,
        range: TextRange,
    },
}

impl Error {
    pub fn production(&self) -> &'static str {
        match self {
            Self::UnhandledMatch { production, .. } => production,
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            Self::UnhandledMatch { range, .. } => *range,
        }
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        let range = self.range();
        Diagnostic::error(self.to_string(), range)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnhandledMatch { production, filled, empty, .. } => {
                write!(
                    f,
                    "unhandled `{production}` match shape: with content [{}], present but empty [{}]",
                    filled.join(", "),
                    empty.join(", "),
                )
            }
        }
    }
}

impl std::error::Error for Error {}
