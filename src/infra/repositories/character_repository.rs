//! Character repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbBackend,
    EntityTrait, NotSet, Order, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::entities::character::{self, ActiveModel, Entity as CharacterEntity};
use super::entities::location::{self, Entity as LocationEntity};
use crate::domain::{
    Character, CharacterFilter, CharacterOrderField, CharacterOrdering, NewCharacter,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Character repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Find character by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Character>>;

    /// Check whether a character exists
    async fn exists(&self, id: i64) -> AppResult<bool>;

    /// List characters matching any of the filters, in the given order
    async fn list(
        &self,
        filter: CharacterFilter,
        ordering: CharacterOrdering,
    ) -> AppResult<Vec<Character>>;

    /// Insert a new character
    async fn create(&self, data: NewCharacter) -> AppResult<Character>;

    /// Persist every field of an existing character
    async fn save(&self, character: Character) -> AppResult<Character>;

    /// Delete character and its locations
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of CharacterRepository
pub struct CharacterStore {
    db: DatabaseConnection,
}

impl CharacterStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Fold the needle the same way the backend's `LOWER` folds the column.
///
/// SQLite's `LOWER` only folds ASCII, so there non-ASCII letters match only
/// in the case they were written.
fn fold_case(needle: &str, backend: DbBackend) -> String {
    match backend {
        DbBackend::Sqlite => needle.to_ascii_lowercase(),
        _ => needle.to_lowercase(),
    }
}

/// Case-insensitive `LIKE %needle%` on a text column
fn icontains(
    column: character::Column,
    needle: &str,
    backend: DbBackend,
) -> sea_orm::sea_query::SimpleExpr {
    let escaped = fold_case(needle, backend)
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(format!("%{}%", escaped)).escape('\\'))
}

fn filter_condition(filter: &CharacterFilter, backend: DbBackend) -> Condition {
    let mut condition = Condition::any();
    if let Some(name) = &filter.name {
        condition = condition.add(icontains(character::Column::Name, name, backend));
    }
    if let Some(is_suspect) = filter.is_suspect {
        condition = condition.add(character::Column::IsSuspect.eq(is_suspect));
    }
    if let Some(occupation) = &filter.occupation {
        condition = condition.add(icontains(character::Column::Occupation, occupation, backend));
    }
    condition
}

#[async_trait]
impl CharacterRepository for CharacterStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Character>> {
        let result = CharacterEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Character::from))
    }

    async fn exists(&self, id: i64) -> AppResult<bool> {
        let count = CharacterEntity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn list(
        &self,
        filter: CharacterFilter,
        ordering: CharacterOrdering,
    ) -> AppResult<Vec<Character>> {
        let mut query = CharacterEntity::find();
        if !filter.is_empty() {
            query = query.filter(filter_condition(&filter, self.db.get_database_backend()));
        }

        let column = match ordering.field {
            CharacterOrderField::Name => character::Column::Name,
            CharacterOrderField::DateOfBirth => character::Column::DateOfBirth,
        };
        let order = if ordering.ascending { Order::Asc } else { Order::Desc };

        let models = query
            .order_by(column, order)
            .order_by_asc(character::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Character::from).collect())
    }

    async fn create(&self, data: NewCharacter) -> AppResult<Character> {
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(data.name),
            date_of_birth: Set(data.date_of_birth),
            occupation: Set(data.occupation),
            is_suspect: Set(data.is_suspect),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Character::from(model))
    }

    async fn save(&self, character: Character) -> AppResult<Character> {
        let active_model = ActiveModel {
            id: Set(character.id),
            name: Set(character.name),
            date_of_birth: Set(character.date_of_birth),
            occupation: Set(character.occupation),
            is_suspect: Set(character.is_suspect),
        };

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => AppError::NotFound,
            other => AppError::from(other),
        })?;
        Ok(Character::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        LocationEntity::delete_many()
            .filter(location::Column::CharacterId.eq(id))
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        let result = CharacterEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            // Dropping the transaction rolls it back
            return Err(AppError::NotFound);
        }

        txn.commit().await.map_err(AppError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_folds_ascii_only() {
        assert_eq!(fold_case("ÁLVARO Vargas", DbBackend::Sqlite), "Álvaro vargas");
        assert_eq!(fold_case("ÁLVARO Vargas", DbBackend::Postgres), "álvaro vargas");
    }
}
