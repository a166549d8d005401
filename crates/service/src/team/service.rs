use std::sync::Arc;

use tracing::{debug, instrument};

use super::repository::TeamRepository;
use super::Team;
use crate::employee::Employee;
use crate::errors::ServiceError;

/// Pass-through over `TeamRepository`.
pub struct TeamService<R: TeamRepository> {
    repo: Arc<R>,
}

impl<R: TeamRepository> TeamService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// # Examples
    /// ```
    /// use service::team::{TeamService, repository::mock::MockTeamRepository};
    /// use std::sync::Arc;
    /// let repo = MockTeamRepository { teams: vec![models::team::Model { id: 2, name: "Sales".into() }], employees: vec![] };
    /// let teams = tokio_test::block_on(TeamService::new(Arc::new(repo)).list_teams()).unwrap();
    /// assert_eq!(teams[0].name, "Sales");
    /// ```
    pub async fn list_teams(&self) -> Result<Vec<Team>, ServiceError> {
        self.repo.find_teams().await
    }

    #[instrument(skip(self))]
    pub async fn list_members(&self, team_id: i32) -> Result<Vec<Employee>, ServiceError> {
        let members = self.repo.find_team_members(team_id).await?;
        debug!(count = members.len(), "team_members");
        Ok(members)
    }
}
