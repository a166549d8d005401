use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use super::domain::{
    BatchRequest, BatchResult, Employee, EmployeeInput, EmployeeListing, ListRequest, PageEnvelope,
};
use super::query::ListingConfig;
use super::repository::{EmployeeRepository, EmployeeStore, EmployeeTransaction};
use crate::errors::ServiceError;

/// Employee business rules: listing guards, single-row CRUD and the atomic batch.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: Arc<R>,
    listing: ListingConfig,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repo: Arc<R>, listing: ListingConfig) -> Self { Self { repo, listing } }

    pub fn listing(&self) -> &ListingConfig { &self.listing }

    /// Paged envelope when `page` is given, otherwise every employee.
    ///
    /// # Examples
    /// ```
    /// use service::employee::{EmployeeService, ListRequest, ListingConfig, EmployeeListing, FilterParam};
    /// use service::employee::repository::mock::MockEmployeeRepository;
    /// use std::sync::Arc;
    /// let svc = EmployeeService::new(Arc::new(MockEmployeeRepository::default()), ListingConfig::default());
    /// let req = ListRequest { page: Some(1), filters: vec![FilterParam::new("email", "x")], ..Default::default() };
    /// let listing = tokio_test::block_on(svc.list(req)).unwrap();
    /// assert!(matches!(listing, EmployeeListing::Page(p) if p.last_page == 0 && p.data.is_empty()));
    /// ```
    pub async fn list(&self, request: ListRequest) -> Result<EmployeeListing, ServiceError> {
        match request.page {
            Some(page) => Ok(EmployeeListing::Page(self.list_page(page, &request).await?)),
            None => Ok(EmployeeListing::All(self.list_all().await?)),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Employee>, ServiceError> {
        self.repo.find_all().await
    }

    /// Count and page fetch are separate round-trips; under concurrent writes they may
    /// observe different snapshots.
    #[instrument(skip(self, request), fields(size = ?request.size, sort = ?request.sort))]
    pub async fn list_page(&self, page: i64, request: &ListRequest) -> Result<PageEnvelope, ServiceError> {
        let (window, query) = self.listing.plan(page, request);
        if query.filters.len() < request.filters.len() {
            debug!(requested = request.filters.len(), kept = query.filters.len(), "filters_dropped");
        }
        let total = self.repo.count(&query.filters).await?;
        let data = self.repo.find_paginated(&query).await?;
        let last_page = window.last_page(total);
        debug!(total, last_page, rows = data.len(), "employee_page");
        Ok(PageEnvelope { last_page, data })
    }

    /// `Ok(None)` when no row has this id.
    pub async fn get(&self, id: i32) -> Result<Option<Employee>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    /// Insert a new row; any id in the payload is ignored.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: EmployeeInput) -> Result<Employee, ServiceError> {
        input.validate()?;
        let created = self.repo.insert(&EmployeeInput { id: None, ..input }).await?;
        info!(id = created.id, "employee_created");
        Ok(created)
    }

    /// Replace the row named by `id` (never the payload's id) and return it as re-read
    /// from the store. `Ok(None)` when the row does not exist.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: EmployeeInput) -> Result<Option<Employee>, ServiceError> {
        input.validate()?;
        if input.id.is_some_and(|body_id| body_id != id) {
            debug!(body_id = ?input.id, "payload id overridden by path id");
        }
        self.repo.update(&input.into_employee(id)).await?;
        self.repo.find_by_id(id).await
    }

    /// Idempotent: deleting an unknown id succeeds.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let affected = self.repo.delete(id).await?;
        debug!(affected, "employee_delete");
        Ok(())
    }

    /// Apply deletes, then updates, then creates in one transaction.
    ///
    /// Any failure rolls back the whole batch and the store error is returned unchanged.
    /// `updated_count` / `deleted_count` echo input lengths; `total` is counted after commit.
    #[instrument(skip(self, request))]
    pub async fn batch(&self, request: BatchRequest) -> Result<BatchResult, ServiceError> {
        let created = request.created.unwrap_or_default();
        let updated = request.updated.unwrap_or_default();
        let deleted_ids = request.deleted_ids.unwrap_or_default();

        for input in &created {
            input.validate()?;
        }
        for row in &updated {
            models::employee::validate(&row.name, row.age, &row.position)?;
        }

        let tx = self.repo.begin().await?;
        let inserted = match apply_batch(&tx, &created, &updated, &deleted_ids).await {
            Ok(rows) => {
                tx.commit().await?;
                rows
            }
            Err(e) => {
                warn!(error = %e, "batch_failed_rolling_back");
                if let Err(rb) = tx.rollback().await {
                    error!(error = %rb, "batch_rollback_failed");
                }
                return Err(e);
            }
        };

        let total = self.repo.count(&[]).await?;
        info!(created = inserted.len(), updated = updated.len(), deleted = deleted_ids.len(), total, "employee_batch_committed");
        Ok(BatchResult { created: inserted, updated_count: updated.len(), deleted_count: deleted_ids.len(), total })
    }
}

/// Fixed phase order: deletes free unique values updates may need; creates come last so
/// new rows are never targeted by this batch's updates.
async fn apply_batch<S: EmployeeStore>(
    store: &S,
    created: &[EmployeeInput],
    updated: &[Employee],
    deleted_ids: &[i32],
) -> Result<Vec<Employee>, ServiceError> {
    for id in deleted_ids {
        store.delete(*id).await?;
    }
    for row in updated {
        store.update(row).await?;
    }
    let mut inserted = Vec::with_capacity(created.len());
    for input in created {
        inserted.push(store.insert(input).await?);
    }
    Ok(inserted)
}
