//! Character database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Character;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "characters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub date_of_birth: Date,
    pub occupation: String,
    pub is_suspect: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::location::Entity")]
    Locations,
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Locations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Character {
    fn from(model: Model) -> Self {
        Character {
            id: model.id,
            name: model.name,
            date_of_birth: model.date_of_birth,
            occupation: model.occupation,
            is_suspect: model.is_suspect,
        }
    }
}
