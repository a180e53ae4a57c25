//! Character service - Handles character-related use cases.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Character, CharacterChanges, CharacterFilter, CharacterOrdering, NewCharacter};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Character service trait for dependency injection.
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// List characters matching any filter, in the requested order
    async fn list_characters(
        &self,
        filter: CharacterFilter,
        ordering: CharacterOrdering,
    ) -> AppResult<Vec<Character>>;

    /// Get character by ID
    async fn get_character(&self, id: i64) -> AppResult<Character>;

    /// Create a character
    async fn create_character(&self, data: NewCharacter) -> AppResult<Character>;

    /// Replace every field of a character
    async fn replace_character(&self, id: i64, data: NewCharacter) -> AppResult<Character>;

    /// Update only the given fields
    async fn update_character(&self, id: i64, changes: CharacterChanges) -> AppResult<Character>;

    /// Delete character together with its locations
    async fn delete_character(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of CharacterService using Unit of Work.
pub struct CharacterManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CharacterManager<U> {
    /// Create new character service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CharacterService for CharacterManager<U> {
    async fn list_characters(
        &self,
        filter: CharacterFilter,
        ordering: CharacterOrdering,
    ) -> AppResult<Vec<Character>> {
        self.uow.characters().list(filter, ordering).await
    }

    async fn get_character(&self, id: i64) -> AppResult<Character> {
        self.uow.characters().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_character(&self, data: NewCharacter) -> AppResult<Character> {
        let character = self.uow.characters().create(data).await?;
        tracing::debug!(id = character.id, "Character created");
        Ok(character)
    }

    async fn replace_character(&self, id: i64, data: NewCharacter) -> AppResult<Character> {
        let repo = self.uow.characters();
        repo.find_by_id(id).await?.ok_or_not_found()?;

        repo.save(Character {
            id,
            name: data.name,
            date_of_birth: data.date_of_birth,
            occupation: data.occupation,
            is_suspect: data.is_suspect,
        })
        .await
    }

    async fn update_character(&self, id: i64, changes: CharacterChanges) -> AppResult<Character> {
        let repo = self.uow.characters();
        let mut character = repo.find_by_id(id).await?.ok_or_not_found()?;
        character.apply(changes);
        repo.save(character).await
    }

    async fn delete_character(&self, id: i64) -> AppResult<()> {
        self.uow.characters().delete(id).await?;
        tracing::debug!(id, "Character deleted");
        Ok(())
    }
}
