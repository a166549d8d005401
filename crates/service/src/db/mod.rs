//! SeaORM statements shared by the repository implementations.

pub mod employee_store;
pub mod team_store;
