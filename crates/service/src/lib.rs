//! Service layer for employee and team records.
//! - Keeps listing guards, validation and the batch transaction out of the HTTP layer.
//! - Reuses entities and validation from the `models` crate.
//! - Repositories are traits; SeaORM and in-memory implementations live side by side.

pub mod errors;
pub mod db;
pub mod employee;
pub mod team;
#[cfg(test)]
pub mod test_support;
