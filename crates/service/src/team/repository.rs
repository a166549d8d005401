use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::Team;
use crate::db::team_store;
use crate::employee::Employee;
use crate::errors::ServiceError;

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn find_teams(&self) -> Result<Vec<Team>, ServiceError>;
    async fn find_team_members(&self, team_id: i32) -> Result<Vec<Employee>, ServiceError>;
}

pub struct SeaOrmTeamRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmTeamRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl TeamRepository for SeaOrmTeamRepository {
    async fn find_teams(&self) -> Result<Vec<Team>, ServiceError> {
        team_store::find_teams(&self.db).await
    }

    async fn find_team_members(&self, team_id: i32) -> Result<Vec<Employee>, ServiceError> {
        team_store::find_team_members(&self.db, team_id).await
    }
}

pub mod mock {
    use super::*;

    #[derive(Default)]
    pub struct MockTeamRepository {
        pub teams: Vec<Team>,
        pub employees: Vec<Employee>,
    }

    #[async_trait]
    impl TeamRepository for MockTeamRepository {
        async fn find_teams(&self) -> Result<Vec<Team>, ServiceError> {
            let mut teams = self.teams.clone();
            teams.sort_by_key(|t| t.id);
            Ok(teams)
        }

        async fn find_team_members(&self, team_id: i32) -> Result<Vec<Employee>, ServiceError> {
            let mut members: Vec<_> = self.employees.iter().filter(|e| e.team_id == Some(team_id)).cloned().collect();
            members.sort_by_key(|e| e.id);
            Ok(members)
        }
    }
}
