//! Demo data for local runs: a handful of teams and 1,000 generated employees.
//!
//! Only applied when the employee table is empty, so restarting a seeded database is a no-op.

use sea_orm::{
    ActiveValue::NotSet, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use crate::{employee, errors::ModelError, team};

pub const SEED_EMPLOYEES: usize = 1_000;
const CHUNK: usize = 100;

const TEAM_NAMES: [&str; 5] = ["Platform", "Product", "Design", "Sales", "Operations"];
const SURNAMES: [&str; 10] = ["Kim", "Lee", "Park", "Choi", "Jung", "Kang", "Cho", "Yoon", "Jang", "Lim"];
const GIVEN_NAMES: [&str; 10] = [
    "Minsu", "Jieun", "Seoyeon", "Doyoon", "Hajun", "Subin", "Yejun", "Jiho", "Chaewon", "Hyunwoo",
];
const POSITIONS: [&str; 10] = [
    "Developer", "Designer", "Planner", "Manager", "Marketer", "Sales", "QA", "Data Analyst", "DevOps", "Intern",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub teams: usize,
    pub employees: usize,
}

/// Build `count` deterministic employee rows spread across `team_ids`.
pub fn demo_employees(count: usize, team_ids: &[i32]) -> Vec<employee::ActiveModel> {
    (0..count)
        .map(|i| {
            let name = format!(
                "{} {}",
                SURNAMES[i % SURNAMES.len()],
                GIVEN_NAMES[(i / SURNAMES.len()) % GIVEN_NAMES.len()]
            );
            let team_id = if team_ids.is_empty() { None } else { Some(team_ids[i % team_ids.len()]) };
            employee::ActiveModel {
                id: NotSet,
                name: Set(name),
                age: Set(22 + (i % 30) as i32),
                position: Set(POSITIONS[i % POSITIONS.len()].to_string()),
                team_id: Set(team_id),
            }
        })
        .collect()
}

/// Seed teams and employees in one transaction if no employee exists yet.
pub async fn seed_if_empty(db: &DatabaseConnection) -> Result<Option<SeedReport>, ModelError> {
    if employee::Entity::find().count(db).await? > 0 {
        return Ok(None);
    }

    let txn = db.begin().await?;
    let mut teams_inserted = 0;
    if team::Entity::find().count(&txn).await? == 0 {
        let rows = TEAM_NAMES.iter().map(|n| team::ActiveModel { id: NotSet, name: Set(n.to_string()) });
        team::Entity::insert_many(rows).exec(&txn).await?;
        teams_inserted = TEAM_NAMES.len();
    }
    let team_ids: Vec<i32> = team::Entity::find()
        .order_by_asc(team::Column::Id)
        .all(&txn)
        .await?
        .into_iter()
        .map(|t| t.id)
        .collect();

    // keep each INSERT under SQLite's bound-parameter limit
    let rows = demo_employees(SEED_EMPLOYEES, &team_ids);
    for chunk in rows.chunks(CHUNK) {
        employee::Entity::insert_many(chunk.to_vec()).exec(&txn).await?;
    }
    txn.commit().await?;

    let report = SeedReport { teams: teams_inserted, employees: rows.len() };
    info!(teams = report.teams, employees = report.employees, "demo_data_seeded");
    Ok(Some(report))
}
