//! Path parameter extractors
//!
//! Ids arrive as strings and are parsed on demand so that a malformed id
//! becomes a 400 instead of a route miss.

use serde::Deserialize;
use storial_core::EntityId;

use crate::response::ApiError;

fn parse_id(value: &str, name: &str) -> Result<EntityId, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Path parameters with a story id named `id`
#[derive(Debug, Deserialize)]
pub struct DeleteStoryPath {
    pub id: String,
}

impl DeleteStoryPath {
    pub fn id(&self) -> Result<EntityId, ApiError> {
        parse_id(&self.id, "id")
    }
}

/// Path parameters with chapter_id
#[derive(Debug, Deserialize)]
pub struct ChapterIdPath {
    pub chapter_id: String,
}

impl ChapterIdPath {
    pub fn chapter_id(&self) -> Result<EntityId, ApiError> {
        parse_id(&self.chapter_id, "chapter_id")
    }
}

/// Path parameters with story_id
#[derive(Debug, Deserialize)]
pub struct StoryIdPath {
    pub story_id: String,
}

impl StoryIdPath {
    pub fn story_id(&self) -> Result<EntityId, ApiError> {
        parse_id(&self.story_id, "story_id")
    }
}

/// Path parameters with story_id and chapter_id
#[derive(Debug, Deserialize)]
pub struct StoryChapterIdPath {
    pub story_id: String,
    pub chapter_id: String,
}

impl StoryChapterIdPath {
    pub fn story_id(&self) -> Result<EntityId, ApiError> {
        parse_id(&self.story_id, "story_id")
    }

    pub fn chapter_id(&self) -> Result<EntityId, ApiError> {
        parse_id(&self.chapter_id, "chapter_id")
    }
}
