use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};

use super::domain::{Employee, EmployeeInput};
use super::query::{ColumnFilter, PageQuery};
use crate::db::employee_store;
use crate::errors::ServiceError;

/// Parameterized employee persistence. Implemented by the pool and by open transactions.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn count(&self, filters: &[ColumnFilter]) -> Result<u64, ServiceError>;
    async fn find_paginated(&self, query: &PageQuery) -> Result<Vec<Employee>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Employee>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, ServiceError>;
    async fn insert(&self, input: &EmployeeInput) -> Result<Employee, ServiceError>;
    async fn update(&self, row: &Employee) -> Result<u64, ServiceError>;
    async fn delete(&self, id: i32) -> Result<u64, ServiceError>;
}

/// A store scope whose writes become visible only on `commit`.
/// Dropping it without committing discards every write.
#[async_trait]
pub trait EmployeeTransaction: EmployeeStore {
    async fn commit(self) -> Result<(), ServiceError>;
    async fn rollback(self) -> Result<(), ServiceError>;
}

/// Repository abstraction used by `EmployeeService`.
#[async_trait]
pub trait EmployeeRepository: EmployeeStore {
    type Tx: EmployeeTransaction;

    async fn begin(&self) -> Result<Self::Tx, ServiceError>;
}

/// SeaORM-backed store over a pool (`DatabaseConnection`) or a `DatabaseTransaction`.
pub struct SeaOrmEmployeeRepository<C = DatabaseConnection> {
    pub db: C,
}

pub type SeaOrmEmployeeTransaction = SeaOrmEmployeeRepository<DatabaseTransaction>;

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl<C> EmployeeStore for SeaOrmEmployeeRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn count(&self, filters: &[ColumnFilter]) -> Result<u64, ServiceError> {
        employee_store::count(&self.db, filters).await
    }

    async fn find_paginated(&self, query: &PageQuery) -> Result<Vec<Employee>, ServiceError> {
        employee_store::find_paginated(&self.db, query).await
    }

    async fn find_all(&self) -> Result<Vec<Employee>, ServiceError> {
        employee_store::find_all(&self.db).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, ServiceError> {
        employee_store::find_by_id(&self.db, id).await
    }

    async fn insert(&self, input: &EmployeeInput) -> Result<Employee, ServiceError> {
        employee_store::insert(&self.db, input).await
    }

    async fn update(&self, row: &Employee) -> Result<u64, ServiceError> {
        employee_store::update(&self.db, row).await
    }

    async fn delete(&self, id: i32) -> Result<u64, ServiceError> {
        employee_store::delete(&self.db, id).await
    }
}

#[async_trait]
impl EmployeeTransaction for SeaOrmEmployeeTransaction {
    async fn commit(self) -> Result<(), ServiceError> {
        self.db.commit().await.map_err(ServiceError::db)
    }

    async fn rollback(self) -> Result<(), ServiceError> {
        self.db.rollback().await.map_err(ServiceError::db)
    }
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    type Tx = SeaOrmEmployeeTransaction;

    async fn begin(&self) -> Result<Self::Tx, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        Ok(SeaOrmEmployeeRepository { db: txn })
    }
}

/// In-memory repository for tests and doc examples.
///
/// Records every store call in order, and can be told to fail the insert of a given name to
/// exercise rollback. Transactions work on a private copy that replaces the shared rows on
/// commit.
pub mod mock {
    use super::*;
    use std::cmp::Ordering;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use crate::employee::query::{EmployeeColumn, SortDirection};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum StoreCall {
        Count(Vec<ColumnFilter>),
        FindPaginated(PageQuery),
        FindAll,
        FindById(i32),
        Insert(String),
        Update(i32),
        Delete(i32),
        Begin,
        Commit,
        Rollback,
    }

    #[derive(Debug, Clone, Default)]
    struct Rows {
        by_id: BTreeMap<i32, Employee>,
        next_id: i32,
    }

    #[derive(Clone, Default)]
    struct Shared {
        calls: Arc<Mutex<Vec<StoreCall>>>,
        fail_insert: Arc<Mutex<Option<String>>>,
    }

    /// Store operations over one row set.
    pub struct MockStore {
        rows: Arc<Mutex<Rows>>,
        shared: Shared,
    }

    #[derive(Default)]
    pub struct MockEmployeeRepository {
        inner: MockStore,
    }

    pub struct MockEmployeeTransaction {
        inner: MockStore,
        target: Arc<Mutex<Rows>>,
    }

    impl Default for MockStore {
        fn default() -> Self {
            Self { rows: Arc::new(Mutex::new(Rows { by_id: BTreeMap::new(), next_id: 1 })), shared: Shared::default() }
        }
    }

    impl MockEmployeeRepository {
        /// Repository pre-filled with rows; ids continue after the largest given id.
        pub fn with_rows(rows: impl IntoIterator<Item = Employee>) -> Self {
            let repo = Self::default();
            {
                let mut state = repo.inner.rows.lock().unwrap();
                for row in rows {
                    state.next_id = state.next_id.max(row.id + 1);
                    state.by_id.insert(row.id, row);
                }
            }
            repo
        }

        /// Make every insert of an employee with this name fail.
        pub fn fail_insert_named(&self, name: &str) {
            *self.inner.shared.fail_insert.lock().unwrap() = Some(name.to_string());
        }

        pub fn calls(&self) -> Vec<StoreCall> {
            self.inner.shared.calls.lock().unwrap().clone()
        }

        pub fn clear_calls(&self) {
            self.inner.shared.calls.lock().unwrap().clear();
        }

        /// Committed rows ordered by id.
        pub fn rows(&self) -> Vec<Employee> {
            self.inner.rows.lock().unwrap().by_id.values().cloned().collect()
        }
    }

    impl MockStore {
        fn record(&self, call: StoreCall) {
            self.shared.calls.lock().unwrap().push(call);
        }

        fn matching(&self, filters: &[ColumnFilter]) -> Vec<Employee> {
            let rows = self.rows.lock().unwrap();
            rows.by_id.values().filter(|e| filters.iter().all(|f| matches(e, f))).cloned().collect()
        }
    }

    fn matches(e: &Employee, f: &ColumnFilter) -> bool {
        let as_int = || f.value.trim().parse::<i32>().ok();
        match f.column {
            EmployeeColumn::Id => as_int() == Some(e.id),
            EmployeeColumn::Age => as_int() == Some(e.age),
            EmployeeColumn::Name => e.name == f.value,
            EmployeeColumn::Position => e.position == f.value,
        }
    }

    fn compare(a: &Employee, b: &Employee, col: EmployeeColumn) -> Ordering {
        match col {
            EmployeeColumn::Id => a.id.cmp(&b.id),
            EmployeeColumn::Age => a.age.cmp(&b.age),
            EmployeeColumn::Name => a.name.cmp(&b.name),
            EmployeeColumn::Position => a.position.cmp(&b.position),
        }
    }

    #[async_trait]
    impl EmployeeStore for MockStore {
        async fn count(&self, filters: &[ColumnFilter]) -> Result<u64, ServiceError> {
            self.record(StoreCall::Count(filters.to_vec()));
            Ok(self.matching(filters).len() as u64)
        }

        async fn find_paginated(&self, query: &PageQuery) -> Result<Vec<Employee>, ServiceError> {
            self.record(StoreCall::FindPaginated(query.clone()));
            let mut rows = self.matching(&query.filters);
            rows.sort_by(|a, b| {
                let primary = match query.direction {
                    SortDirection::Asc => compare(a, b, query.sort),
                    SortDirection::Desc => compare(b, a, query.sort),
                };
                primary.then(a.id.cmp(&b.id))
            });
            Ok(rows.into_iter().skip(query.offset as usize).take(query.limit as usize).collect())
        }

        async fn find_all(&self) -> Result<Vec<Employee>, ServiceError> {
            self.record(StoreCall::FindAll);
            Ok(self.matching(&[]))
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, ServiceError> {
            self.record(StoreCall::FindById(id));
            Ok(self.rows.lock().unwrap().by_id.get(&id).cloned())
        }

        async fn insert(&self, input: &EmployeeInput) -> Result<Employee, ServiceError> {
            self.record(StoreCall::Insert(input.name.clone()));
            if self.shared.fail_insert.lock().unwrap().as_deref() == Some(input.name.as_str()) {
                return Err(ServiceError::Db(format!("insert rejected for {}", input.name)));
            }
            let mut rows = self.rows.lock().unwrap();
            let id = rows.next_id;
            rows.next_id += 1;
            let row = input.clone().into_employee(id);
            rows.by_id.insert(id, row.clone());
            Ok(row)
        }

        async fn update(&self, row: &Employee) -> Result<u64, ServiceError> {
            self.record(StoreCall::Update(row.id));
            let mut rows = self.rows.lock().unwrap();
            match rows.by_id.get_mut(&row.id) {
                Some(existing) => { *existing = row.clone(); Ok(1) }
                None => Ok(0),
            }
        }

        async fn delete(&self, id: i32) -> Result<u64, ServiceError> {
            self.record(StoreCall::Delete(id));
            Ok(self.rows.lock().unwrap().by_id.remove(&id).map_or(0, |_| 1))
        }
    }

    macro_rules! delegate_store {
        ($ty:ty) => {
            #[async_trait]
            impl EmployeeStore for $ty {
                async fn count(&self, filters: &[ColumnFilter]) -> Result<u64, ServiceError> { self.inner.count(filters).await }
                async fn find_paginated(&self, query: &PageQuery) -> Result<Vec<Employee>, ServiceError> { self.inner.find_paginated(query).await }
                async fn find_all(&self) -> Result<Vec<Employee>, ServiceError> { self.inner.find_all().await }
                async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, ServiceError> { self.inner.find_by_id(id).await }
                async fn insert(&self, input: &EmployeeInput) -> Result<Employee, ServiceError> { self.inner.insert(input).await }
                async fn update(&self, row: &Employee) -> Result<u64, ServiceError> { self.inner.update(row).await }
                async fn delete(&self, id: i32) -> Result<u64, ServiceError> { self.inner.delete(id).await }
            }
        };
    }

    delegate_store!(MockEmployeeRepository);
    delegate_store!(MockEmployeeTransaction);

    #[async_trait]
    impl EmployeeTransaction for MockEmployeeTransaction {
        async fn commit(self) -> Result<(), ServiceError> {
            self.inner.record(StoreCall::Commit);
            let staged = self.inner.rows.lock().unwrap().clone();
            *self.target.lock().unwrap() = staged;
            Ok(())
        }

        async fn rollback(self) -> Result<(), ServiceError> {
            self.inner.record(StoreCall::Rollback);
            Ok(())
        }
    }

    #[async_trait]
    impl EmployeeRepository for MockEmployeeRepository {
        type Tx = MockEmployeeTransaction;

        async fn begin(&self) -> Result<Self::Tx, ServiceError> {
            self.inner.record(StoreCall::Begin);
            let snapshot = self.inner.rows.lock().unwrap().clone();
            Ok(MockEmployeeTransaction {
                inner: MockStore { rows: Arc::new(Mutex::new(snapshot)), shared: self.inner.shared.clone() },
                target: Arc::clone(&self.inner.rows),
            })
        }
    }
}
