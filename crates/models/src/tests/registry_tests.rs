use anyhow::Result;
use sea_orm::{EntityTrait, QueryFilter};

use super::memory_db;
use crate::registry::{self, Registry};
use crate::{address, contact, contact_person, employee, person};

#[tokio::test]
async fn soft_delete_hides_row_until_deep_delete() -> Result<()> {
    let db = memory_db().await?;
    let a = address::create(&db, address::NewAddress { address_line_1: "1 Main St".into(), ..Default::default() }).await?;

    assert!(registry::soft_delete::<address::Entity, _>(&db, a.id).await?);
    assert!(registry::find_active::<address::Entity, _>(&db, a.id).await?.is_none());
    // second soft delete finds nothing active
    assert!(!registry::soft_delete::<address::Entity, _>(&db, a.id).await?);

    let row = address::Entity::find_by_id(a.id).one(&db).await?.expect("row still present");
    assert!(!row.active);
    assert!(row.date_modified >= row.date_created);

    assert!(registry::deep_delete::<address::Entity, _>(&db, a.id).await?);
    assert!(address::Entity::find_by_id(a.id).one(&db).await?.is_none());
    assert!(!registry::deep_delete::<address::Entity, _>(&db, a.id).await?);
    Ok(())
}

#[tokio::test]
async fn search_is_case_insensitive_substring() -> Result<()> {
    let db = memory_db().await?;
    person::create(&db, Some("Ada".into()), "Lovelace").await?;
    person::create(&db, Some("Alan".into()), "Turing").await?;

    let hits = person::Entity::find().filter(person::Entity::search("LOVE")).all(&db).await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].last_name, "Lovelace");

    let hits = person::Entity::find().filter(person::Entity::search("a")).all(&db).await?;
    assert_eq!(hits.len(), 2);
    Ok(())
}

#[tokio::test]
async fn employees_are_searched_by_person_name() -> Result<()> {
    let db = memory_db().await?;
    let mut ids = Vec::new();
    for (first, last, email) in [("Grace", "Hopper", "g@x.org"), ("Linus", "Torvalds", "l@x.org")] {
        let p = person::create(&db, Some(first.into()), last).await?;
        let c = contact::create(&db, contact::NewContact { email: email.into(), ..Default::default() }).await?;
        let cp = contact_person::create(&db, p.id, c.id).await?;
        ids.push(employee::create(&db, cp.id, None, None).await?.id);
    }

    let hits = employee::Entity::find().filter(employee::Entity::search("hop")).all(&db).await?;
    assert_eq!(hits.iter().map(|e| e.id).collect::<Vec<_>>(), vec![ids[0]]);
    Ok(())
}

#[tokio::test]
async fn exists_active_ignores_deleted_rows() -> Result<()> {
    let db = memory_db().await?;
    let c = contact::create(&db, contact::NewContact { email: "ops@example.org".into(), ..Default::default() }).await?;
    let cond = contact::Entity::search("ops@");
    assert!(registry::exists_active::<contact::Entity, _>(&db, cond.clone()).await?);

    registry::soft_delete::<contact::Entity, _>(&db, c.id).await?;
    assert!(!registry::exists_active::<contact::Entity, _>(&db, cond).await?);
    assert!(!contact::exists(&db, "ops@example.org").await?);
    Ok(())
}
