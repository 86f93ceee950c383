//! User sex codes (ISO/IEC 5218)

use std::fmt;

/// Sex of a user, stored as its numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    #[default]
    NotKnown,
    Male,
    Female,
    NotApplicable,
    /// A stored code outside the known set
    Other(i16),
}

impl Gender {
    /// Codes accepted at registration
    pub const ACCEPTED_CODES: [&'static str; 4] = ["0", "1", "2", "9"];

    pub fn from_code(code: i16) -> Self {
        match code {
            0 => Self::NotKnown,
            1 => Self::Male,
            2 => Self::Female,
            9 => Self::NotApplicable,
            other => Self::Other(other),
        }
    }

    /// Parse a form value, accepting only the known codes
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "0" => Some(Self::NotKnown),
            "1" => Some(Self::Male),
            "2" => Some(Self::Female),
            "9" => Some(Self::NotApplicable),
            _ => None,
        }
    }

    pub fn code(&self) -> i16 {
        match self {
            Self::NotKnown => 0,
            Self::Male => 1,
            Self::Female => 2,
            Self::NotApplicable => 9,
            Self::Other(code) => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotKnown => "Not known",
            Self::Male => "Male",
            Self::Female => "Female",
            Self::NotApplicable => "Not applicable",
            Self::Other(_) => "unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Gender::from_code(0).label(), "Not known");
        assert_eq!(Gender::from_code(1).label(), "Male");
        assert_eq!(Gender::from_code(2).label(), "Female");
        assert_eq!(Gender::from_code(9).label(), "Not applicable");
        assert_eq!(Gender::from_code(5).label(), "unknown");
    }

    #[test]
    fn test_parse_accepts_known_codes_only() {
        for code in Gender::ACCEPTED_CODES {
            assert!(Gender::parse(code).is_some(), "{code} should parse");
        }
        assert_eq!(Gender::parse("3"), None);
        assert_eq!(Gender::parse("male"), None);
    }

    #[test]
    fn test_code_roundtrip() {
        assert_eq!(Gender::from_code(9).code(), 9);
        assert_eq!(Gender::from_code(7).code(), 7);
    }
}
