use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use models::{employee, team};

use crate::employee::Employee;
use crate::errors::ServiceError;
use crate::team::Team;

/// All teams ordered by id.
pub async fn find_teams<C: ConnectionTrait>(db: &C) -> Result<Vec<Team>, ServiceError> {
    team::Entity::find()
        .order_by_asc(team::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

/// Employees whose `team_id` equals `team_id`, ordered by id. An unknown team has no members.
pub async fn find_team_members<C: ConnectionTrait>(db: &C, team_id: i32) -> Result<Vec<Employee>, ServiceError> {
    employee::Entity::find()
        .filter(employee::Column::TeamId.eq(team_id))
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use sea_orm::{ActiveModelTrait, Set};

    async fn add_team(db: &sea_orm::DatabaseConnection, name: &str) -> Result<Team, anyhow::Error> {
        Ok(team::ActiveModel { name: Set(name.into()), ..Default::default() }.insert(db).await?)
    }

    async fn add_member(db: &sea_orm::DatabaseConnection, name: &str, team_id: Option<i32>) -> Result<Employee, anyhow::Error> {
        let am = employee::ActiveModel {
            name: Set(name.into()),
            age: Set(30),
            position: Set("Developer".into()),
            team_id: Set(team_id),
            ..Default::default()
        };
        Ok(am.insert(db).await?)
    }

    #[tokio::test]
    async fn teams_and_members_are_id_ordered() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let platform = add_team(&db, "Platform").await?;
        let sales = add_team(&db, "Sales").await?;

        let a = add_member(&db, "Yoon", Some(platform.id)).await?;
        add_member(&db, "Jang", Some(sales.id)).await?;
        let c = add_member(&db, "Han", Some(platform.id)).await?;
        add_member(&db, "Solo", None).await?;

        let teams = find_teams(&db).await?;
        assert_eq!(teams.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), vec!["Platform", "Sales"]);

        let members = find_team_members(&db, platform.id).await?;
        assert_eq!(members.iter().map(|e| e.id).collect::<Vec<_>>(), vec![a.id, c.id]);

        assert!(find_team_members(&db, 9_999).await?.is_empty());
        Ok(())
    }
}
