//! Generic data access over every [`Registry`] entity: paginated active
//! listing, lookup by id, get-or-create by natural key and soft/deep delete.

use std::future::Future;

use models::errors::ModelError;
use models::registry::{self, Registry};
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};

/// Active rows, newest first, optionally narrowed by the entity's search
/// condition.
#[instrument(skip(db), fields(entity = E::NAME))]
pub async fn list_active<E, C>(db: &C, q: Option<&str>, req: PageRequest) -> Result<Page<E::Model>, ServiceError>
where
    E: Registry,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let mut select = E::find().filter(E::active_column().eq(true));
    if let Some(term) = q.map(str::trim).filter(|t| !t.is_empty()) {
        select = select.filter(E::search(term));
    }
    let paginator = select
        .order_by_desc(E::created_column())
        .order_by_desc(E::id_column())
        .paginate(db, req.per_page);
    let totals = paginator.num_items_and_pages().await?;
    let items = if req.page > totals.number_of_pages {
        Vec::new()
    } else {
        paginator.fetch_page(req.index()).await?
    };
    debug!(total = totals.number_of_items, returned = items.len(), "listed");
    Ok(Page {
        items,
        total: totals.number_of_items,
        pages: totals.number_of_pages,
        page: req.page,
        per_page: req.per_page,
    })
}

/// Active row by id or `NotFound`.
pub async fn get_active<E, C>(db: &C, id: i32) -> Result<E::Model, ServiceError>
where
    E: Registry,
    C: ConnectionTrait,
{
    registry::find_active::<E, C>(db, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("{} with id {} not found", E::NAME, id)))
}

/// Return the active row matching `cond`, or build one with `create`. The flag
/// is true when a row was created.
pub async fn find_or_create<E, C, F, Fut>(db: &C, cond: Condition, create: F) -> Result<(E::Model, bool), ServiceError>
where
    E: Registry,
    C: ConnectionTrait,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<E::Model, ModelError>>,
{
    let found = E::find()
        .filter(cond)
        .filter(E::active_column().eq(true))
        .one(db)
        .await?;
    match found {
        Some(m) => Ok((m, false)),
        None => {
            let m = create().await?;
            debug!(entity = E::NAME, id = E::model_id(&m), "created related row");
            Ok((m, true))
        }
    }
}

/// Soft delete by default; `deep` removes the row. `NotFound` when there is
/// nothing to delete.
#[instrument(skip(db), fields(entity = E::NAME))]
pub async fn delete<E, C>(db: &C, id: i32, deep: bool) -> Result<(), ServiceError>
where
    E: Registry,
    C: ConnectionTrait,
{
    let removed = if deep {
        registry::deep_delete::<E, C>(db, id).await?
    } else {
        registry::soft_delete::<E, C>(db, id).await?
    };
    if !removed {
        return Err(ServiceError::NotFound(format!("{} with id {} not found.", E::NAME, id)));
    }
    Ok(())
}

/// Resolve an optional foreign id to an active row, rejecting unknown ids.
pub async fn resolve<E, C>(db: &C, id: Option<i32>, field: &str) -> Result<Option<E::Model>, ServiceError>
where
    E: Registry,
    C: ConnectionTrait,
{
    let Some(id) = id else { return Ok(None) };
    match registry::find_active::<E, C>(db, id).await? {
        Some(m) => Ok(Some(m)),
        None => Err(ServiceError::Validation(format!("{} with id {} does not exist", field, id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::{address, company};

    async fn seed_addresses(db: &sea_orm::DatabaseConnection, lines: &[&str]) -> anyhow::Result<Vec<i32>> {
        let mut ids = Vec::new();
        for line in lines {
            let a = address::create(db, address::NewAddress { address_line_1: line.to_string(), ..Default::default() }).await?;
            ids.push(a.id);
        }
        Ok(ids)
    }

    #[tokio::test]
    async fn list_is_newest_first_and_paged() -> anyhow::Result<()> {
        let db = get_db().await?;
        let ids = seed_addresses(&db, &["1 Alpha Rd", "2 Beta Rd", "3 Gamma Rd"]).await?;

        let page = list_active::<address::Entity, _>(&db, None, PageRequest { page: 1, per_page: 2 }).await?;
        assert_eq!(page.total, 3);
        assert_eq!(page.pages, 2);
        assert_eq!(page.items.iter().map(|a| a.id).collect::<Vec<_>>(), vec![ids[2], ids[1]]);

        let page = list_active::<address::Entity, _>(&db, None, PageRequest { page: 2, per_page: 2 }).await?;
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, ids[0]);
        Ok(())
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() -> anyhow::Result<()> {
        let db = get_db().await?;
        seed_addresses(&db, &["1 Alpha Rd"]).await?;
        let req = PageRequest::parse(Some("99999999999999999999"), Some("99999999999999999999"), 30)?;
        let page = list_active::<address::Entity, _>(&db, None, req).await?;
        assert_eq!(page.total, 1);
        assert!(page.items.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn search_wildcards_match_literally() -> anyhow::Result<()> {
        let db = get_db().await?;
        let ids = seed_addresses(&db, &["100% Lane", "Plain Rd", "under_score Ave"]).await?;
        let req = || PageRequest { page: 1, per_page: 10 };

        let page = list_active::<address::Entity, _>(&db, Some("%"), req()).await?;
        assert_eq!(page.items.iter().map(|a| a.id).collect::<Vec<_>>(), vec![ids[0]]);
        let page = list_active::<address::Entity, _>(&db, Some("_"), req()).await?;
        assert_eq!(page.items.iter().map(|a| a.id).collect::<Vec<_>>(), vec![ids[2]]);
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_search_and_skips_inactive() -> anyhow::Result<()> {
        let db = get_db().await?;
        let ids = seed_addresses(&db, &["1 Alpha Rd", "2 Beta Rd", "3 alpha close"]).await?;
        delete::<address::Entity, _>(&db, ids[0], false).await?;

        let page = list_active::<address::Entity, _>(&db, Some("ALPHA"), PageRequest { page: 1, per_page: 10 }).await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, ids[2]);

        let page = list_active::<address::Entity, _>(&db, Some("  "), PageRequest { page: 1, per_page: 10 }).await?;
        assert_eq!(page.total, 2);
        Ok(())
    }

    #[tokio::test]
    async fn find_or_create_reuses_active_rows() -> anyhow::Result<()> {
        let db = get_db().await?;
        let new = || address::NewAddress { address_line_1: "9 Kampala Rd".into(), ..Default::default() };

        let cond = || Condition::all().add(address::Column::AddressLine1.eq("9 Kampala Rd"));
        let (first, created) = find_or_create::<address::Entity, _, _, _>(&db, cond(), || address::create(&db, new())).await?;
        assert!(created);
        let (again, created) = find_or_create::<address::Entity, _, _, _>(&db, cond(), || address::create(&db, new())).await?;
        assert!(!created);
        assert_eq!(first.id, again.id);
        Ok(())
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() -> anyhow::Result<()> {
        let db = get_db().await?;
        let c = company::create(&db, company::NewCompany { name: "Gone Ltd".into(), ..Default::default() }).await?;

        delete::<company::Entity, _>(&db, c.id, false).await?;
        assert!(matches!(get_active::<company::Entity, _>(&db, c.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete::<company::Entity, _>(&db, c.id, false).await, Err(ServiceError::NotFound(_))));

        delete::<company::Entity, _>(&db, c.id, true).await?;
        assert!(matches!(delete::<company::Entity, _>(&db, c.id, true).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn resolve_rejects_unknown_ids() -> anyhow::Result<()> {
        let db = get_db().await?;
        assert!(resolve::<company::Entity, _>(&db, None, "Company").await?.is_none());
        let err = resolve::<company::Entity, _>(&db, Some(42), "Company").await.unwrap_err();
        assert_eq!(err.to_string(), "Company with id 42 does not exist");
        Ok(())
    }
}
