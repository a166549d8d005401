//! Employee slice: domain types, listing guards, repository and service.

pub mod domain;
pub mod query;
pub mod repository;
pub mod service;

pub use domain::{BatchRequest, BatchResult, Employee, EmployeeInput, EmployeeListing, FilterParam, ListRequest, PageEnvelope};
pub use query::{ColumnAllowList, EmployeeColumn, ListingConfig};
pub use service::EmployeeService;
