//! Reading time estimates
//!
//! A reader is assumed to get through 200 characters per minute. The
//! estimate is floored, so anything under 200 characters reads in
//! "0 Minutes".

use std::fmt;

/// Characters read per minute
pub const CHARS_PER_MINUTE: u64 = 200;

/// Count the Unicode code points in a body of text
pub fn count_chars(body: &str) -> u64 {
    body.chars().count() as u64
}

/// Whole minutes needed to read `word_counts` characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ReadingTime(u64);

impl ReadingTime {
    pub fn from_word_counts(word_counts: u64) -> Self {
        Self(word_counts / CHARS_PER_MINUTE)
    }

    /// Aggregate over several bodies' character counts
    pub fn from_totals<I>(word_counts: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        Self::from_word_counts(word_counts.into_iter().sum())
    }

    #[inline]
    pub fn minutes(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Minutes", self.0)
    }
}
