use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, DbErr, QueryResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Identity, identity_equality};
use crate::query::{ENTITY_ALIAS, FromAliasedRow, JoinedSelect, group_prefix};
use crate::traits::{CrudResource, MergeIntoActiveModel, PayloadId};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pays")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Country of origin, referenced by etudiant rows.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
pub struct Pays {
    pub id: Identity,
    pub name: Option<String>,
}

identity_equality!(Pays);

impl From<Model> for Pays {
    fn from(model: Model) -> Self {
        Self {
            id: Identity::assigned(model.id),
            name: model.name,
        }
    }
}

impl FromAliasedRow for Pays {
    const TABLE: &'static str = "pays";
    const COLUMNS: &'static [&'static str] = &["id", "name"];

    fn from_aliased_row(row: &QueryResult, alias: &str) -> Result<Self, DbErr> {
        let prefix = group_prefix(alias);
        Ok(Self {
            id: Identity::from(row.try_get::<Option<i64>>(&prefix, "id")?),
            name: row.try_get(&prefix, "name")?,
        })
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct PaysCreate {
    /// Only here to reject payloads that already carry an identity.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl PayloadId for PaysCreate {
    fn payload_id(&self) -> Option<i64> {
        self.id
    }
}

impl From<PaysCreate> for ActiveModel {
    fn from(create: PaysCreate) -> Self {
        Self {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(create.name),
        }
    }
}

/// Full-row replacement payload: every column is rewritten, absent fields
/// become NULL.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct PaysReplace {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl PayloadId for PaysReplace {
    fn payload_id(&self) -> Option<i64> {
        self.id
    }
}

impl From<PaysReplace> for ActiveModel {
    fn from(replace: PaysReplace) -> Self {
        Self {
            // the transport layer has already matched this id to the path
            id: replace.id.map_or(ActiveValue::NotSet, ActiveValue::Unchanged),
            name: ActiveValue::Set(replace.name),
        }
    }
}

/// Merge payload: absent fields keep their stored values.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct PaysPatch {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl PayloadId for PaysPatch {
    fn payload_id(&self) -> Option<i64> {
        self.id
    }
}

impl MergeIntoActiveModel<ActiveModel> for PaysPatch {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(name) = self.name {
            existing.name = ActiveValue::Set(Some(name));
        }
        Ok(existing)
    }
}

#[async_trait::async_trait]
impl CrudResource for Pays {
    type Entity = Entity;
    type Column = Column;
    type ActiveModel = ActiveModel;
    type CreateModel = PaysCreate;
    type ReplaceModel = PaysReplace;
    type PatchModel = PaysPatch;

    const ID_COLUMN: Column = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "pays";
    const RESOURCE_NAME_PLURAL: &'static str = "pays";

    fn select() -> JoinedSelect {
        JoinedSelect::new::<Self>()
    }

    fn hydrate(row: &QueryResult) -> Result<Self, DbErr> {
        Self::from_aliased_row(row, ENTITY_ALIAS)
    }

    fn sortable_columns() -> Vec<(&'static str, Column)> {
        vec![("id", Column::Id), ("name", Column::Name)]
    }

    fn filterable_columns() -> Vec<&'static str> {
        vec!["id", "name"]
    }
}
