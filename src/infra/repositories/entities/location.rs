//! Location database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Coordinate, Location};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub character_id: i64,
    pub timestamp: DateTimeUtc,
    /// Degrees; always a whole number of micro-degrees
    pub lat: f64,
    pub lon: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::character::Entity",
        from = "Column::CharacterId",
        to = "super::character::Column::Id",
        on_delete = "Cascade"
    )]
    Character,
}

impl Related<super::character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Character.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Location {
    fn from(model: Model) -> Self {
        Location {
            id: model.id,
            character_id: model.character_id,
            timestamp: model.timestamp,
            lat: Coordinate::from_degrees(model.lat),
            lon: Coordinate::from_degrees(model.lon),
        }
    }
}
