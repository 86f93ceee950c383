//! User entity <-> model mapper

use storial_core::{EntityId, Gender, User, UserProfile};

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: EntityId::new(model.id),
            name: model.name,
            username: model.username,
            email: model.email,
            password_hash: model.password,
            sex: Gender::from_code(model.sex),
            profile: UserProfile {
                bio: model.bio,
                date_of_birth: model.date_of_birth,
                phone: model.phone_number,
                instagram: model.instagram,
                twitter: model.twitter,
                facebook: model.facebook,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
