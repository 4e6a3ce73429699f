use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single edition of the paralympic games.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(default)]
    pub event_id: i32,
    /// `summer` or `winter`
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub event_type: String,
    pub year: i32,
    pub location: String,
    pub lat: Option<String>,
    pub lon: Option<String>,
    #[sea_orm(column_name = "NOC")]
    #[serde(rename = "NOC")]
    pub noc: String,
    pub start: String,
    pub end: String,
    pub disabilities_included: String,
    pub events: i32,
    pub sports: i32,
    pub countries: i32,
    pub male: i32,
    pub female: i32,
    pub participants: i32,
    pub highlights: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::region::Entity",
        from = "Column::Noc",
        to = "super::region::Column::Noc",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Region,
}

impl Related<super::region::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Region.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
