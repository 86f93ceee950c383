//! User entity - represents a registered writer or reader

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{EntityId, Gender};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string, never the plain password
    pub password_hash: String,
    pub sex: Gender,
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional profile fields, all empty at registration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub bio: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(
        id: EntityId,
        name: String,
        username: String,
        email: String,
        password_hash: String,
        sex: Gender,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            username,
            email,
            password_hash,
            sex,
            profile: UserProfile::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Label of the user's sex code
    #[inline]
    pub fn gender_name(&self) -> &'static str {
        self.sex.label()
    }

    /// Public summary used when a user is joined onto stories and chapters
    pub fn author(&self) -> Author {
        Author {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// The owner of a story as seen through a join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: EntityId,
    pub name: String,
    pub username: String,
    pub email: String,
}
