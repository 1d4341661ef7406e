//! Content rating of a post
//!
//! Gelbooru spells ratings out (`general`, `sensitive`, `questionable`, `explicit`), while
//! safebooru, rule34 and e621 send a single letter (`s`, `q`, `e`). Both collapse into the same
//! three levels here, with `general` and `sensitive` counted as [`Rating::Safe`].
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum Rating {
    /// `s`, `g`, `safe`, `general` or `sensitive`.
    Safe,
    /// `q` or `questionable`.
    Questionable,
    /// `e` or `explicit`.
    Explicit,
    /// Missing or unrecognized rating.
    #[default]
    Unknown,
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Questionable => write!(f, "Questionable"),
            Self::Explicit => write!(f, "Explicit"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Rating {
    /// Maps the raw `rating` value of a post.
    ///
    /// Gelbooru answers with full words (`general`, `sensitive`, ...) while e621 and older
    /// gelbooru forks answer with single letters.
    pub fn from_rating_str(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "g" | "safe" | "sensitive" | "general" => Self::Safe,
            "q" | "questionable" => Self::Questionable,
            "e" | "explicit" => Self::Explicit,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod test {
    use super::Rating;

    #[test]
    fn letters_and_words() {
        assert_eq!(Rating::from_rating_str("s"), Rating::Safe);
        assert_eq!(Rating::from_rating_str("general"), Rating::Safe);
        assert_eq!(Rating::from_rating_str("q"), Rating::Questionable);
        assert_eq!(Rating::from_rating_str("explicit"), Rating::Explicit);
        assert_eq!(Rating::from_rating_str("sensitive"), Rating::Safe);
        assert_eq!(Rating::from_rating_str(" Explicit"), Rating::Explicit);
        assert_eq!(Rating::from_rating_str(""), Rating::Unknown);
        assert_eq!(Rating::from_rating_str("x"), Rating::Unknown);
    }
}
