//! Listing guards: the column allow-list, sort normalization and page planning.
//!
//! Column names from callers end up in ORDER BY / WHERE clauses, so nothing reaches the
//! store unless it resolves to an `EmployeeColumn` that this allow-list admits.

use std::collections::BTreeSet;

use common::pagination::{Page, Pagination};
use tracing::debug;

use super::domain::{FilterParam, ListRequest};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmployeeColumn {
    Id,
    Name,
    Age,
    Position,
}

impl EmployeeColumn {
    pub const ALL: [EmployeeColumn; 4] = [Self::Id, Self::Name, Self::Age, Self::Position];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Age => "age",
            Self::Position => "position",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Id | Self::Age)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Exactly `desc`, in any case, is descending; everything else, including nothing and
    /// padded values such as `" desc"`, is ascending.
    pub fn parse(dir: Option<&str>) -> Self {
        match dir {
            Some(d) if d.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }
}

/// A filter that survived allow-list validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub column: EmployeeColumn,
    pub value: String,
}

/// Fully normalized request handed to `EmployeeStore::find_paginated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub filters: Vec<ColumnFilter>,
    pub sort: EmployeeColumn,
    pub direction: SortDirection,
    pub limit: u64,
    pub offset: u64,
}

/// Columns permitted in sort and filter clauses. Owned by the service, set once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAllowList {
    columns: BTreeSet<EmployeeColumn>,
}

impl Default for ColumnAllowList {
    fn default() -> Self { Self { columns: EmployeeColumn::ALL.into_iter().collect() } }
}

impl ColumnAllowList {
    /// Build from column names. Names the store cannot map are a configuration error.
    pub fn from_names<I, S>(names: I) -> Result<Self, ServiceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns = BTreeSet::new();
        for name in names {
            let name = name.as_ref();
            let col = EmployeeColumn::from_name(name)
                .ok_or_else(|| ServiceError::Validation(format!("unknown employee column `{name}`")))?;
            columns.insert(col);
        }
        Ok(Self { columns })
    }

    pub fn resolve(&self, name: &str) -> Option<EmployeeColumn> {
        EmployeeColumn::from_name(name).filter(|c| self.columns.contains(c))
    }

    /// Requested sort column if allow-listed, `id` otherwise.
    pub fn sort_column(&self, requested: Option<&str>) -> EmployeeColumn {
        requested.and_then(|name| self.resolve(name)).unwrap_or(EmployeeColumn::Id)
    }

    /// Drop (never reject) filters on columns outside the allow-list.
    pub fn retain_filters(&self, filters: &[FilterParam]) -> Vec<ColumnFilter> {
        filters
            .iter()
            .filter_map(|f| match self.resolve(&f.field) {
                Some(column) => Some(ColumnFilter { column, value: f.value.clone() }),
                None => {
                    debug!(field = %f.field, "dropping filter on non-allow-listed column");
                    None
                }
            })
            .collect()
    }
}

/// Listing rules injected into `EmployeeService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    pub columns: ColumnAllowList,
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { columns: ColumnAllowList::default(), default_page_size: 20, max_page_size: 1000 }
    }
}

impl TryFrom<&configs::EmployeesConfig> for ListingConfig {
    type Error = ServiceError;

    fn try_from(cfg: &configs::EmployeesConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            columns: ColumnAllowList::from_names(&cfg.allowed_columns)?,
            default_page_size: cfg.default_page_size.max(1),
            max_page_size: cfg.max_page_size.max(1),
        })
    }
}

impl ListingConfig {
    /// Normalize a paged request. `page < 1` is clamped to the first page.
    pub fn plan(&self, page: i64, request: &ListRequest) -> (Page, PageQuery) {
        let per_page = request.size.unwrap_or(self.default_page_size as i64);
        let window = Pagination { page, per_page }.normalize(self.max_page_size);
        let query = PageQuery {
            filters: self.columns.retain_filters(&request.filters),
            sort: self.columns.sort_column(request.sort.as_deref()),
            direction: SortDirection::parse(request.dir.as_deref()),
            limit: window.size,
            offset: window.offset(),
        };
        (window, query)
    }
}
