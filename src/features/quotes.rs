//! Quote catalogue
//!
//! The fixed, ordered set of quotes the rotator cycles through.

use std::fmt;

/// A single quote and its attribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

impl Quote {
    pub const fn new(text: &'static str, author: &'static str) -> Self {
        Self { text, author }
    }

    /// Quote body as shown on the card, wrapped in double quotes
    pub fn display_text(&self) -> String {
        format!("\"{}\"", self.text)
    }

    /// Attribution line as shown under the body
    pub fn display_author(&self) -> String {
        format!("— {}", self.author)
    }

    /// Long quotes take a moment to lay out, so the card shows its loading hint
    pub fn is_long(&self) -> bool {
        self.text.chars().count() > LONG_QUOTE_CHARS
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.display_text(), self.display_author())
    }
}

/// Quotes longer than this raise the loading indicator during a transition
const LONG_QUOTE_CHARS: usize = 100;

const CATALOGUE: [Quote; 6] = [
    Quote::new(
        "Commit to the Lord whatever you do, and he will establish your plans.",
        "Proverbs 16:3",
    ),
    Quote::new(
        "Trust in the Lord with all your heart and lean not on your own understanding; in all your ways submit to him, and he will make your paths straight.",
        "Proverbs 3:5–6",
    ),
    Quote::new(
        "Every next level will demand a different version of you.",
        "Leonardo DiCaprio",
    ),
    Quote::new(
        "Do you see someone skilled in their work? They will serve before kings; they will not serve before officials of low rank.",
        "Proverbs 22:29",
    ),
    Quote::new(
        "Whoever can be trusted with very little can also be trusted with much, and whoever is dishonest with very little will also be dishonest with much.",
        "Luke 16:10 (NIV)",
    ),
    Quote::new(
        "A good name is more desirable than great riches; to be esteemed is better than silver or gold.",
        "Proverbs 22:1 (NIV)",
    ),
];

/// The built-in catalogue, in display order
pub fn catalogue() -> Vec<Quote> {
    CATALOGUE.to_vec()
}
