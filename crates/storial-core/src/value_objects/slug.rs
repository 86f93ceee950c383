//! URL slugs derived from titles

use std::fmt;

use serde::{Deserialize, Serialize};

use super::EntityId;

/// Human-readable URL identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Lowercase the title and replace every space with a hyphen
    ///
    /// Nothing else is normalised: punctuation and repeated spaces survive
    /// as-is, so two titles that differ only in case produce the same slug.
    pub fn from_title(title: &str) -> Self {
        Self(title.to_lowercase().replace(' ', "-"))
    }

    /// Slug of the title followed by `-{id}`
    pub fn with_id_suffix(title: &str, id: EntityId) -> Self {
        let base = Self::from_title(title);
        Self(format!("{}-{}", base.0, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
