//! Read-only team slice.

pub mod repository;
pub mod service;

pub type Team = models::team::Model;

pub use service::TeamService;
