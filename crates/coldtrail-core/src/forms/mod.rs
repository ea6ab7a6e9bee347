//! Accountability-form drafts and their PDF payloads.

mod form501a;
mod form519a;
mod form520b;

pub use form501a::*;
pub use form519a::*;
pub use form520b::*;

use serde::{Deserialize, Serialize};

/// Which date a 501A/520B form records. At most one is selected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateKind {
    ExpirationDate,
    RetestDate,
    UseByDate,
}

impl DateKind {
    /// Label as printed on the 501A form.
    pub fn label_501a(&self) -> &'static str {
        match self {
            DateKind::ExpirationDate => "Expiration Date",
            DateKind::RetestDate => "Retest Date",
            DateKind::UseByDate => "Use-By-Date",
        }
    }

    /// Label as printed on the 520B form. The two forms hyphenate the
    /// use-by option with different casing.
    pub fn label_520b(&self) -> &'static str {
        match self {
            DateKind::UseByDate => "Use-by-Date",
            other => other.label_501a(),
        }
    }

    /// Parse either form's label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Expiration Date" => Some(DateKind::ExpirationDate),
            "Retest Date" => Some(DateKind::RetestDate),
            "Use-By-Date" | "Use-by-Date" => Some(DateKind::UseByDate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_kind_labels() {
        assert_eq!(DateKind::ExpirationDate.label_501a(), "Expiration Date");
        assert_eq!(DateKind::UseByDate.label_501a(), "Use-By-Date");
        assert_eq!(DateKind::UseByDate.label_520b(), "Use-by-Date");
        assert_eq!(DateKind::RetestDate.label_520b(), "Retest Date");
    }

    #[test]
    fn test_date_kind_parse_accepts_both_casings() {
        assert_eq!(DateKind::parse("Use-By-Date"), Some(DateKind::UseByDate));
        assert_eq!(DateKind::parse("Use-by-Date"), Some(DateKind::UseByDate));
        assert_eq!(DateKind::parse("Retest Date"), Some(DateKind::RetestDate));
        assert_eq!(DateKind::parse("Shipping Date"), None);
    }
}
