use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A row of the iris reference dataset. Only ever appended to and displayed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "iris")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(default)]
    pub rowid: i32,
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
    pub species: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
