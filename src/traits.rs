use async_trait::async_trait;
use sea_orm::sea_query::Condition;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IdenStatic, IntoActiveModel, Order, PrimaryKeyTrait, QueryResult,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::pagination::PageSpec;
use crate::query::JoinedSelect;

/// Access to the identity a write payload may carry, for the id rules the
/// transport layer enforces before touching storage.
pub trait PayloadId {
    fn payload_id(&self) -> Option<i64>;
}

/// Folds a partial payload into an active model: fields present on the
/// payload are set, absent fields keep whatever the model already carries.
///
/// A null field in the payload means "no change"; there is no marker to
/// clear a column through a merge.
pub trait MergeIntoActiveModel<A> {
    fn merge_into_activemodel(self, existing: A) -> Result<A, DbErr>;
}

/// One table-backed resource: its entity, its write payloads, and the CRUD
/// operations the transport layer calls. The default bodies cover all four
/// resources; implementations only describe their tables and payloads.
///
/// Concurrent saves to the same identity are last-write-wins; nothing here
/// checks a version token.
#[async_trait]
pub trait CrudResource: Serialize + Sized + Send + Sync
where
    Self::Entity: EntityTrait<Column = Self::Column>,
    Self::ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send,
    <Self::Entity as EntityTrait>::Model: IntoActiveModel<Self::ActiveModel>,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType:
        From<i64> + Into<i64>,
{
    type Entity: EntityTrait;
    type Column: ColumnTrait;
    type ActiveModel: ActiveModelTrait;
    type CreateModel: Into<Self::ActiveModel> + PayloadId + DeserializeOwned + Send;
    type ReplaceModel: Into<Self::ActiveModel> + PayloadId + DeserializeOwned + Send;
    type PatchModel: MergeIntoActiveModel<Self::ActiveModel> + PayloadId + DeserializeOwned + Send;

    const ID_COLUMN: Self::Column;
    const RESOURCE_NAME_SINGULAR: &'static str;
    const RESOURCE_NAME_PLURAL: &'static str;

    /// The joined select every read goes through.
    fn select() -> JoinedSelect;

    /// Rebuild the record (and any joined references) from one aliased row.
    fn hydrate(row: &QueryResult) -> Result<Self, DbErr>;

    /// Columns the caller may sort on, by wire name.
    fn sortable_columns() -> Vec<(&'static str, Self::Column)> {
        vec![("id", Self::ID_COLUMN)]
    }

    /// Columns the caller may filter on, by wire name.
    fn filterable_columns() -> Vec<&'static str> {
        vec!["id"]
    }

    async fn get_one(db: &DatabaseConnection, id: i64) -> Result<Self, DbErr> {
        let row = Self::select().filter_id(id).one(db).await?.ok_or_else(|| {
            DbErr::RecordNotFound(format!("{} {id} not found", Self::RESOURCE_NAME_SINGULAR))
        })?;
        Self::hydrate(&row)
    }

    async fn get_all(
        db: &DatabaseConnection,
        condition: Condition,
        order: Option<(Self::Column, Order)>,
        page: Option<PageSpec>,
    ) -> Result<Vec<Self>, DbErr> {
        let mut select = Self::select().filter(condition);
        if let Some((column, direction)) = order {
            select = select.order_by(column.as_str(), direction);
        }
        if let Some(page) = page {
            select = select.page(page.offset, page.limit);
        }
        let rows = select.all(db).await?;
        rows.iter().map(Self::hydrate).collect()
    }

    /// Insert with an unassigned identity; storage assigns one. The record
    /// is re-read through the joined select so references come back
    /// hydrated.
    async fn create(db: &DatabaseConnection, payload: Self::CreateModel) -> Result<Self, DbErr> {
        let model: Self::ActiveModel = payload.into();
        let inserted = Self::Entity::insert(model).exec(db).await?;
        Self::get_one(db, inserted.last_insert_id.into()).await
    }

    /// Rewrite every column of an existing row.
    async fn replace(
        db: &DatabaseConnection,
        id: i64,
        payload: Self::ReplaceModel,
    ) -> Result<Self, DbErr> {
        if !Self::exists(db, id).await? {
            return Err(DbErr::RecordNotFound(format!(
                "{} {id} not found",
                Self::RESOURCE_NAME_SINGULAR
            )));
        }
        let model: Self::ActiveModel = payload.into();
        model.update(db).await?;
        Self::get_one(db, id).await
    }

    /// Merge the payload into the stored row, then save. Fields absent from
    /// the payload keep their stored values.
    async fn patch(
        db: &DatabaseConnection,
        id: i64,
        payload: Self::PatchModel,
    ) -> Result<Self, DbErr> {
        let model = Self::Entity::find_by_id(id).one(db).await?.ok_or_else(|| {
            DbErr::RecordNotFound(format!("{} {id} not found", Self::RESOURCE_NAME_SINGULAR))
        })?;
        let merged = payload.merge_into_activemodel(model.into_active_model())?;
        if merged.is_changed() {
            merged.update(db).await?;
        }
        Self::get_one(db, id).await
    }

    /// Removing an absent row is a successful no-op.
    async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), DbErr> {
        Self::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }

    /// Whether a row with this identity exists, checked by the transport
    /// layer before updates so a missing target reads as not-found rather
    /// than a failed write.
    async fn exists(db: &DatabaseConnection, id: i64) -> Result<bool, DbErr> {
        let matching = Self::select().filter_id(id).count(db).await?;
        Ok(matching > 0)
    }

    /// Total row count under the caller's filter, for pagination headers.
    /// Runs as its own round-trip: count and page may disagree under
    /// concurrent writes.
    async fn total_count(db: &DatabaseConnection, condition: Condition) -> Result<u64, DbErr> {
        Self::select().filter(condition).count(db).await
    }
}
