use anyhow::Result;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use super::memory_db;
use crate::errors::ModelError;
use crate::{address, company, contact, contact_person, employee, person, resource_meta, typeapproval, unique_id, user};

#[tokio::test]
async fn address_create_stamps_audit_columns() -> Result<()> {
    let db = memory_db().await?;
    let a = address::create(
        &db,
        address::NewAddress { address_line_1: "12 Harbour Road".into(), country: Some("Ghana".into()), ..Default::default() },
    )
    .await?;
    assert!(a.active);
    assert_eq!(a.date_created, a.date_modified);
    assert!(address::exists(&db, "12 Harbour Road").await?);
    assert!(!address::exists(&db, "13 Harbour Road").await?);
    Ok(())
}

#[tokio::test]
async fn blank_required_field_is_a_validation_error() -> Result<()> {
    let db = memory_db().await?;
    let err = address::create(&db, address::NewAddress::default()).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(ref m) if m == "Address cannot be empty!"));

    let err = person::create(&db, Some("Ada".into()), "  ").await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));

    let err = contact::create(&db, contact::NewContact { email: "not-an-email".into(), ..Default::default() })
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn person_lookup_matches_both_name_parts() -> Result<()> {
    let db = memory_db().await?;
    person::create(&db, Some("Ada".into()), "Lovelace").await?;
    person::create(&db, None, "Babbage").await?;

    assert!(person::exists(&db, Some("Ada"), "Lovelace").await?);
    assert!(!person::exists(&db, None, "Lovelace").await?);
    assert!(person::exists(&db, None, "Babbage").await?);
    Ok(())
}

#[tokio::test]
async fn company_names_are_unique_even_after_soft_delete() -> Result<()> {
    let db = memory_db().await?;
    let c = company::create(&db, company::NewCompany { name: "MOVERS".into(), ..Default::default() }).await?;
    crate::registry::soft_delete::<company::Entity, _>(&db, c.id).await?;

    assert!(company::exists(&db, "MOVERS").await?);
    let dup = company::create(&db, company::NewCompany { name: "MOVERS".into(), ..Default::default() }).await;
    assert!(matches!(dup, Err(ModelError::Db(_))));
    Ok(())
}

#[tokio::test]
async fn employee_names_resolve_through_contact_person() -> Result<()> {
    let db = memory_db().await?;
    let p = person::create(&db, Some("Grace".into()), "Hopper").await?;
    let c = contact::create(&db, contact::NewContact { email: "grace@navy.mil".into(), ..Default::default() }).await?;
    let cp = contact_person::create(&db, p.id, c.id).await?;
    let e = employee::create(&db, cp.id, None, Some("Inspector".into())).await?;

    assert!(employee::exists(&db, cp.id).await?);
    let names = employee::full_names(&db, [e.id]).await?;
    assert_eq!(names.get(&e.id).map(String::as_str), Some("Grace Hopper"));
    assert!(employee::full_names(&db, []).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn resource_is_keyed_by_location_and_name() -> Result<()> {
    let db = memory_db().await?;
    let r = resource_meta::create(&db, "https://files.example.org/reports/q1.pdf").await?;
    assert_eq!(r.version, 1);
    assert_eq!(r.full_name(), "https://files.example.org/reports/q1.pdf");
    assert!(resource_meta::exists(&db, "https://files.example.org/reports/q1.pdf").await?);
    assert!(!resource_meta::exists(&db, "https://files.example.org/reports/q2.pdf").await?);
    Ok(())
}

#[tokio::test]
async fn typeapproval_natural_key_is_applicant_and_equipment() -> Result<()> {
    let db = memory_db().await?;
    let c = company::create(&db, company::NewCompany { name: "RadioCo".into(), ..Default::default() }).await?;
    unique_id::create(&db, "TA-0001", Some(c.name.clone())).await?;
    let am = typeapproval::ActiveModel {
        equipment_name: Set("Handset X".into()),
        status_approved: Set(false),
        ta_unique_id: Set(Some("TA-0001".into())),
        applicant_id: Set(Some(c.id)),
        ..Default::default()
    };
    let ta = am.insert(&db).await?;
    assert!(ta.active);

    assert!(typeapproval::exists(&db, Some(c.id), "Handset X").await?);
    assert!(!typeapproval::exists(&db, None, "Handset X").await?);
    assert!(unique_id::exists(&db, "TA-0001").await?);
    Ok(())
}

#[tokio::test]
async fn user_email_is_lowercased_and_hash_not_serialized() -> Result<()> {
    let db = memory_db().await?;
    let u = user::create(&db, "Bob", "Builder", "Bob@Example.com", "hash").await?;
    assert_eq!(u.email, "bob@example.com");
    let json = serde_json::to_value(&u)?;
    assert!(json.get("password_hash").is_none());

    let found = user::Entity::find_by_id(u.id).one(&db).await?;
    assert_eq!(found.map(|u| u.password_hash), Some("hash".to_string()));
    Ok(())
}
