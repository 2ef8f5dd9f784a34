//! Columns shared by every registry table: the soft-delete flag and the two
//! timestamps.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveIden)]
enum Audit {
    Active,
    DateCreated,
    DateModified,
}

pub(crate) fn active() -> ColumnDef {
    boolean(Audit::Active).default(true).to_owned()
}

pub(crate) fn date_created() -> ColumnDef {
    timestamp_with_time_zone(Audit::DateCreated)
}

pub(crate) fn date_modified() -> ColumnDef {
    timestamp_with_time_zone(Audit::DateModified)
}

/// Optional reference that is cleared when the target row is removed.
pub(crate) fn optional_ref<T, C, R, K>(name: &str, table: T, col: C, ref_table: R, ref_col: K) -> ForeignKeyCreateStatement
where
    T: IntoTableRef,
    C: IdenList,
    R: IntoTableRef,
    K: IdenList,
{
    ForeignKey::create()
        .name(name)
        .from(table, col)
        .to(ref_table, ref_col)
        .on_delete(ForeignKeyAction::SetNull)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}
