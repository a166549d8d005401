use crate::db::connect_in_memory;
use crate::employee;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, PaginatorTrait, Set, TransactionTrait};
use anyhow::Result;

fn row(name: &str) -> employee::ActiveModel {
    employee::ActiveModel { id: NotSet, name: Set(name.into()), age: Set(30), position: Set("QA".into()), team_id: Set(None) }
}

/// Test basic transaction commit
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let db = connect_in_memory().await?;

    let txn = db.begin().await?;
    let created = row("Yoon Jiho").insert(&txn).await?;
    txn.commit().await?;

    let found = employee::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.map(|e| e.name), Some("Yoon Jiho".to_string()));
    Ok(())
}

/// Test transaction rollback undoes earlier statements in the same scope
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let db = connect_in_memory().await?;
    let keep = row("Jang Chaewon").insert(&db).await?;

    let txn = db.begin().await?;
    employee::Entity::delete_by_id(keep.id).exec(&txn).await?;
    row("Lim Hyunwoo").insert(&txn).await?;
    txn.rollback().await?;

    assert!(employee::Entity::find_by_id(keep.id).one(&db).await?.is_some());
    assert_eq!(employee::Entity::find().count(&db).await?, 1);
    Ok(())
}

/// Dropping a transaction without commit must not persist anything
#[tokio::test]
async fn test_transaction_dropped_without_commit() -> Result<()> {
    let db = connect_in_memory().await?;

    {
        let txn = db.begin().await?;
        row("Cho Seoyeon").insert(&txn).await?;
    }

    assert_eq!(employee::Entity::find().count(&db).await?, 0);
    Ok(())
}
