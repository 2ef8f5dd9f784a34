//! Behaviour shared by every registry table.
//!
//! Each entity carries an integer `id`, an `active` soft-delete flag and the
//! `date_created` / `date_modified` stamps. [`Registry`] exposes those columns
//! to generic code together with the entity's text search condition, and the
//! free functions here implement lookups and deletes once for all of them.

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
};

use crate::errors::ModelError;

pub trait Registry: EntityTrait {
    /// Human readable entity name used in messages.
    const NAME: &'static str;

    fn id_column() -> Self::Column;
    fn active_column() -> Self::Column;
    fn created_column() -> Self::Column;
    fn modified_column() -> Self::Column;
    fn model_id(model: &Self::Model) -> i32;

    /// Case-insensitive substring match over the entity's search columns.
    fn search(term: &str) -> Condition;
}

pub fn now() -> sea_orm::prelude::DateTimeWithTimeZone {
    Utc::now().into()
}

/// `lower(col) LIKE '%term%'`, with `%` and `_` in `term` matched literally.
pub fn contains_ci<C: ColumnTrait>(col: C, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&term.trim().to_lowercase()));
    Expr::expr(Func::lower(Expr::col(col.as_column_ref()))).like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub async fn find_active<E, C>(db: &C, id: i32) -> Result<Option<E::Model>, ModelError>
where
    E: Registry,
    C: ConnectionTrait,
{
    let found = E::find()
        .filter(E::id_column().eq(id))
        .filter(E::active_column().eq(true))
        .one(db)
        .await?;
    Ok(found)
}

/// True when an active row matches `cond`.
pub async fn exists_active<E, C>(db: &C, cond: Condition) -> Result<bool, ModelError>
where
    E: Registry,
    C: ConnectionTrait,
{
    let found = E::find()
        .filter(cond)
        .filter(E::active_column().eq(true))
        .one(db)
        .await?;
    Ok(found.is_some())
}

/// Flip `active` off and stamp `date_modified`. Returns false when no active
/// row has this id.
pub async fn soft_delete<E, C>(db: &C, id: i32) -> Result<bool, ModelError>
where
    E: Registry,
    C: ConnectionTrait,
{
    let res = E::update_many()
        .col_expr(E::active_column(), Expr::value(false))
        .col_expr(E::modified_column(), Expr::value(now()))
        .filter(E::id_column().eq(id))
        .filter(E::active_column().eq(true))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

/// Physically remove the row, active or not.
pub async fn deep_delete<E, C>(db: &C, id: i32) -> Result<bool, ModelError>
where
    E: Registry,
    C: ConnectionTrait,
{
    let res = E::delete_many().filter(E::id_column().eq(id)).exec(db).await?;
    Ok(res.rows_affected > 0)
}

/// Implements [`Registry`] for the `Entity` of the module it is invoked in.
/// `search: [A, B]` matches any of the listed columns; `search: custom`
/// delegates to a local `search_condition` function.
macro_rules! registry_entity {
    (@common $name:literal) => {
        const NAME: &'static str = $name;
        fn id_column() -> Column { Column::Id }
        fn active_column() -> Column { Column::Active }
        fn created_column() -> Column { Column::DateCreated }
        fn modified_column() -> Column { Column::DateModified }
        fn model_id(model: &Model) -> i32 { model.id }
    };
    ($name:literal, search: custom) => {
        impl $crate::registry::Registry for Entity {
            $crate::registry::registry_entity!(@common $name);
            fn search(term: &str) -> sea_orm::Condition {
                search_condition(term)
            }
        }
    };
    ($name:literal, search: [$($col:ident),+ $(,)?]) => {
        impl $crate::registry::Registry for Entity {
            $crate::registry::registry_entity!(@common $name);
            fn search(term: &str) -> sea_orm::Condition {
                sea_orm::Condition::any()
                    $(.add($crate::registry::contains_ci(Column::$col, term)))+
            }
        }
    };
}

/// Stamps the audit columns whenever an `ActiveModel` is saved through the ORM.
macro_rules! audited {
    () => {
        #[async_trait::async_trait]
        impl ActiveModelBehavior for ActiveModel {
            async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
            where
                C: ConnectionTrait,
            {
                let now = $crate::registry::now();
                if insert {
                    if self.active.is_not_set() {
                        self.active = sea_orm::ActiveValue::Set(true);
                    }
                    if self.date_created.is_not_set() {
                        self.date_created = sea_orm::ActiveValue::Set(now);
                    }
                }
                self.date_modified = sea_orm::ActiveValue::Set(now);
                Ok(self)
            }
        }
    };
}

pub(crate) use {audited, registry_entity};
