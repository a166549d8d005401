//! SeaORM queries behind `EmployeeStore`.
//!
//! Generic over `ConnectionTrait` so the same statements run on the pool and inside a batch
//! transaction. Column names never reach SQL as text: they are mapped to entity columns.

use sea_orm::{
    sea_query::{Expr, SimpleExpr}, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition,
    ConnectionTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use models::employee::{self, Entity as EmployeeEntity};

use crate::employee::domain::{Employee, EmployeeInput};
use crate::employee::query::{ColumnFilter, EmployeeColumn, PageQuery, SortDirection};
use crate::errors::ServiceError;

fn entity_column(col: EmployeeColumn) -> employee::Column {
    match col {
        EmployeeColumn::Id => employee::Column::Id,
        EmployeeColumn::Name => employee::Column::Name,
        EmployeeColumn::Age => employee::Column::Age,
        EmployeeColumn::Position => employee::Column::Position,
    }
}

/// Equality predicate for one filter. A non-integer value on an integer column can never
/// match, so it becomes an always-false predicate instead of a type error.
fn filter_expr(f: &ColumnFilter) -> SimpleExpr {
    let col = entity_column(f.column);
    if f.column.is_numeric() {
        match f.value.trim().parse::<i32>() {
            Ok(v) => col.eq(v),
            Err(_) => Expr::val(1).eq(0),
        }
    } else {
        col.eq(f.value.clone())
    }
}

fn filter_condition(filters: &[ColumnFilter]) -> Option<Condition> {
    if filters.is_empty() {
        return None;
    }
    Some(filters.iter().fold(Condition::all(), |cond, f| cond.add(filter_expr(f))))
}

/// Count rows matching the filters.
pub async fn count<C: ConnectionTrait>(db: &C, filters: &[ColumnFilter]) -> Result<u64, ServiceError> {
    let mut finder = EmployeeEntity::find();
    if let Some(cond) = filter_condition(filters) { finder = finder.filter(cond); }
    finder.count(db).await.map_err(ServiceError::db)
}

/// Fetch one sorted, filtered window. Ties on the sort column fall back to id order so
/// consecutive pages neither repeat nor skip rows.
pub async fn find_paginated<C: ConnectionTrait>(db: &C, q: &PageQuery) -> Result<Vec<Employee>, ServiceError> {
    let order = match q.direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };
    let mut finder = EmployeeEntity::find();
    if let Some(cond) = filter_condition(&q.filters) { finder = finder.filter(cond); }
    finder = finder.order_by(entity_column(q.sort), order);
    if q.sort != EmployeeColumn::Id {
        finder = finder.order_by_asc(employee::Column::Id);
    }
    finder
        .limit(q.limit)
        .offset(q.offset)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

/// All employees ordered by id.
pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Employee>, ServiceError> {
    EmployeeEntity::find()
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Employee>, ServiceError> {
    EmployeeEntity::find_by_id(id).one(db).await.map_err(ServiceError::db)
}

/// Insert and return the row with its database-assigned id.
pub async fn insert<C: ConnectionTrait>(db: &C, input: &EmployeeInput) -> Result<Employee, ServiceError> {
    let am = employee::ActiveModel {
        id: NotSet,
        name: Set(input.name.clone()),
        age: Set(input.age),
        position: Set(input.position.clone()),
        team_id: Set(input.team_id),
    };
    am.insert(db).await.map_err(ServiceError::db)
}

/// Replace all mutable fields of `row.id`; returns affected rows (0 when the id is unknown).
pub async fn update<C: ConnectionTrait>(db: &C, row: &Employee) -> Result<u64, ServiceError> {
    let am = employee::ActiveModel {
        id: NotSet,
        name: Set(row.name.clone()),
        age: Set(row.age),
        position: Set(row.position.clone()),
        team_id: Set(row.team_id),
    };
    let res = EmployeeEntity::update_many()
        .set(am)
        .filter(employee::Column::Id.eq(row.id))
        .exec(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(res.rows_affected)
}

/// Delete by id; returns affected rows.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, ServiceError> {
    let res = EmployeeEntity::delete_by_id(id).exec(db).await.map_err(ServiceError::db)?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn input(name: &str, age: i32, position: &str) -> EmployeeInput {
        EmployeeInput { id: None, name: name.into(), age, position: position.into(), team_id: None }
    }

    fn query(filters: Vec<ColumnFilter>, sort: EmployeeColumn, direction: SortDirection, limit: u64, offset: u64) -> PageQuery {
        PageQuery { filters, sort, direction, limit, offset }
    }

    #[tokio::test]
    async fn employee_store_crud() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let a = insert(&db, &input("Kim Minsu", 30, "Developer")).await?;
        assert!(a.id > 0);
        assert_eq!(find_by_id(&db, a.id).await?, Some(a.clone()));

        let changed = Employee { position: "Manager".into(), ..a.clone() };
        assert_eq!(update(&db, &changed).await?, 1);
        assert_eq!(find_by_id(&db, a.id).await?.map(|e| e.position), Some("Manager".into()));

        // unknown ids are not errors
        assert_eq!(update(&db, &Employee { id: 9_999, ..changed.clone() }).await?, 0);
        assert_eq!(delete(&db, 9_999).await?, 0);

        assert_eq!(delete(&db, a.id).await?, 1);
        assert!(find_by_id(&db, a.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn filtered_count_and_sorted_page() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        for (name, age, pos) in [("Cho", 41, "QA"), ("Ahn", 25, "QA"), ("Baek", 33, "Developer"), ("Dong", 25, "QA")] {
            insert(&db, &input(name, age, pos)).await?;
        }

        let qa = vec![ColumnFilter { column: EmployeeColumn::Position, value: "QA".into() }];
        assert_eq!(count(&db, &qa).await?, 3);
        assert_eq!(count(&db, &[]).await?, 4);

        let page = find_paginated(&db, &query(qa.clone(), EmployeeColumn::Name, SortDirection::Desc, 2, 0)).await?;
        let names: Vec<_> = page.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Dong", "Cho"]);

        let page = find_paginated(&db, &query(qa, EmployeeColumn::Name, SortDirection::Desc, 2, 2)).await?;
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Ahn");

        let by_age = vec![ColumnFilter { column: EmployeeColumn::Age, value: " 25 ".into() }];
        assert_eq!(count(&db, &by_age).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn non_numeric_value_on_numeric_column_matches_nothing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        insert(&db, &input("Eom", 29, "Planner")).await?;
        let bad = vec![ColumnFilter { column: EmployeeColumn::Age, value: "twenty".into() }];
        assert_eq!(count(&db, &bad).await?, 0);
        let rows = find_paginated(&db, &query(bad, EmployeeColumn::Id, SortDirection::Asc, 10, 0)).await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn find_all_is_id_ordered() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let first = insert(&db, &input("Zeta", 50, "Manager")).await?;
        let second = insert(&db, &input("Alpha", 20, "Intern")).await?;
        let all = find_all(&db).await?;
        assert_eq!(all.iter().map(|e| e.id).collect::<Vec<_>>(), vec![first.id, second.id]);
        Ok(())
    }
}
