use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, team};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub position: String,
    pub team_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Team }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Team => Entity::belongs_to(team::Entity)
                .from(Column::TeamId)
                .to(team::Column::Id)
                .into(),
        }
    }
}

impl Related<team::Entity> for Entity {
    fn to() -> RelationDef { Relation::Team.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if name.chars().count() > 128 {
        return Err(errors::ModelError::Validation("name too long (<=128)".into()));
    }
    Ok(())
}

pub fn validate_position(position: &str) -> Result<(), errors::ModelError> {
    if position.trim().is_empty() {
        return Err(errors::ModelError::Validation("position required".into()));
    }
    if position.chars().count() > 64 {
        return Err(errors::ModelError::Validation("position too long (<=64)".into()));
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), errors::ModelError> {
    if age < 0 {
        return Err(errors::ModelError::Validation("age must be >= 0".into()));
    }
    Ok(())
}

/// Check every mutable field of an employee row.
pub fn validate(name: &str, age: i32, position: &str) -> Result<(), errors::ModelError> {
    validate_name(name)?;
    validate_age(age)?;
    validate_position(position)
}
