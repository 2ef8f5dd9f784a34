//! The per-entity seam of the API. A [`RegistryResource`] names its entity,
//! its collection path, how rows are presented and how bodies create or
//! update rows; the generic operations below do everything else.

use async_trait::async_trait;
use models::errors::ModelError;
use models::registry::Registry;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};
use crate::repository;

pub type ModelOf<R> = <<R as RegistryResource>::Entity as EntityTrait>::Model;

#[async_trait]
pub trait RegistryResource: Send + Sync + 'static {
    type Entity: Registry<Model: Sync>;
    type View: Serialize + Send;
    type Create: DeserializeOwned + Send;
    type Update: DeserializeOwned + Send;

    /// Path segment under `/api/v1`.
    const COLLECTION: &'static str;
    /// Singular label used in messages.
    const LABEL: &'static str;

    fn created_message() -> String {
        format!("{} created successfully!", Self::LABEL)
    }

    fn conflict_message() -> String {
        format!("{} already exists!", Self::LABEL)
    }

    /// Render rows for the API, resolving references in bulk.
    async fn present(db: &DatabaseConnection, rows: Vec<ModelOf<Self>>) -> Result<Vec<Self::View>, ServiceError>;

    /// Persist a new row with its related rows. Returns the new id.
    async fn create(db: &DatabaseConnection, body: Self::Create) -> Result<i32, ServiceError>;

    /// Apply a partial update to an active row.
    async fn update(db: &DatabaseConnection, current: ModelOf<Self>, body: Self::Update) -> Result<ModelOf<Self>, ServiceError>;

    /// Single item response; the plain view unless overridden.
    async fn detail(db: &DatabaseConnection, model: ModelOf<Self>) -> Result<serde_json::Value, ServiceError> {
        let view = Self::present(db, vec![model])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found(Self::LABEL))?;
        serde_json::to_value(view).map_err(|e| ServiceError::Db(e.to_string()))
    }
}

/// Active rows of the collection. An empty page is reported as not found.
#[instrument(skip(db), fields(collection = R::COLLECTION))]
pub async fn list<R: RegistryResource>(
    db: &DatabaseConnection,
    q: Option<&str>,
    req: PageRequest,
) -> Result<Page<R::View>, ServiceError> {
    let page = repository::list_active::<R::Entity, _>(db, q, req).await?;
    if page.items.is_empty() {
        return Err(ServiceError::NotFound(format!("No {} found", R::COLLECTION)));
    }
    let Page { items, total, pages, page, per_page } = page;
    let items = R::present(db, items).await?;
    Ok(Page { items, total, pages, page, per_page })
}

pub async fn get<R: RegistryResource>(db: &DatabaseConnection, id: i32) -> Result<serde_json::Value, ServiceError> {
    let model = repository::get_active::<R::Entity, _>(db, id).await?;
    R::detail(db, model).await
}

/// Create and report the new id. Storage failures become a 400 naming the
/// entity, as clients expect.
#[instrument(skip(db, body), fields(collection = R::COLLECTION))]
pub async fn create<R: RegistryResource>(db: &DatabaseConnection, body: R::Create) -> Result<i32, ServiceError> {
    match R::create(db, body).await {
        Ok(id) => {
            info!(id, "{} created", R::LABEL);
            Ok(id)
        }
        Err(ServiceError::Db(e)) | Err(ServiceError::Model(ModelError::Db(e))) => {
            warn!(error = %e, "create failed");
            Err(ServiceError::Validation(format!("Failed to create new {} -> {}", R::LABEL.to_lowercase(), e)))
        }
        Err(e) => Err(e),
    }
}

#[instrument(skip(db, body), fields(collection = R::COLLECTION))]
pub async fn update<R: RegistryResource>(db: &DatabaseConnection, id: i32, body: R::Update) -> Result<R::View, ServiceError> {
    let current = repository::get_active::<R::Entity, _>(db, id).await?;
    let updated = R::update(db, current, body).await?;
    info!(id, "{} updated", R::LABEL);
    R::present(db, vec![updated])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found(R::LABEL))
}

/// Soft or deep delete, returning the confirmation message.
#[instrument(skip(db), fields(collection = R::COLLECTION))]
pub async fn delete<R: RegistryResource>(db: &DatabaseConnection, id: i32, deep: bool) -> Result<String, ServiceError> {
    repository::delete::<R::Entity, _>(db, id, deep).await?;
    info!(id, deep, "{} deleted", R::LABEL);
    Ok(format!("{} with id {} successfully deleted.", R::LABEL, id))
}
