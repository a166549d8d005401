//! SeaORM entities for the employee/team schema plus connection and seeding helpers.

pub mod errors;
pub mod db;
pub mod team;
pub mod employee;
pub mod seed;

#[cfg(test)]
mod tests;
