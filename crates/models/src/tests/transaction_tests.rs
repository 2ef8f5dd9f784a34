use anyhow::Result;
use sea_orm::{EntityTrait, PaginatorTrait, TransactionTrait};

use super::memory_db;
use crate::{contact, contact_person, person};

#[tokio::test]
async fn rollback_discards_every_row_of_the_unit() -> Result<()> {
    let db = memory_db().await?;

    let txn = db.begin().await?;
    let p = person::create(&txn, Some("Ada".into()), "Lovelace").await?;
    let c = contact::create(&txn, contact::NewContact { email: "ada@example.org".into(), ..Default::default() }).await?;
    contact_person::create(&txn, p.id, c.id).await?;
    txn.rollback().await?;

    assert_eq!(person::Entity::find().count(&db).await?, 0);
    assert_eq!(contact::Entity::find().count(&db).await?, 0);
    assert_eq!(contact_person::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn commit_keeps_linked_rows() -> Result<()> {
    let db = memory_db().await?;

    let txn = db.begin().await?;
    let p = person::create(&txn, None, "Hopper").await?;
    let c = contact::create(&txn, contact::NewContact { email: "hopper@example.org".into(), ..Default::default() }).await?;
    let cp = contact_person::create(&txn, p.id, c.id).await?;
    txn.commit().await?;

    assert!(contact_person::exists(&db, p.id, c.id).await?);
    let names = contact_person::full_names(&db, [cp.id]).await?;
    assert_eq!(names.get(&cp.id).map(String::as_str), Some("Hopper"));
    Ok(())
}
