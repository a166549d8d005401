use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::employee;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Employees }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Employees => Entity::has_many(employee::Entity).into(),
        }
    }
}

impl Related<employee::Entity> for Entity {
    fn to() -> RelationDef { Relation::Employees.def() }
}

impl ActiveModelBehavior for ActiveModel {}
