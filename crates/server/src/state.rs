use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::employee::{repository::SeaOrmEmployeeRepository, EmployeeService, ListingConfig};
use service::team::{repository::SeaOrmTeamRepository, TeamService};

/// Shared handler state: one service per slice over the same pool.
#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<EmployeeService<SeaOrmEmployeeRepository>>,
    pub teams: Arc<TeamService<SeaOrmTeamRepository>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, listing: ListingConfig) -> Self {
        let employees = EmployeeService::new(Arc::new(SeaOrmEmployeeRepository::new(db.clone())), listing);
        let teams = TeamService::new(Arc::new(SeaOrmTeamRepository::new(db)));
        Self { employees: Arc::new(employees), teams: Arc::new(teams) }
    }
}
