//! Category entity <-> model mapper

use storial_core::{Category, EntityId};

use crate::models::CategoryModel;

impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Category::new(EntityId::new(model.id), model.name, model.slug)
    }
}
