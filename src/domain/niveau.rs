use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, DbErr, QueryResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Identity, identity_equality};
use crate::query::{ENTITY_ALIAS, FromAliasedRow, JoinedSelect, group_prefix};
use crate::traits::{CrudResource, MergeIntoActiveModel, PayloadId};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "niveau")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Academic level (licence, master, …).
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
pub struct Niveau {
    pub id: Identity,
    pub name: Option<String>,
}

identity_equality!(Niveau);

impl From<Model> for Niveau {
    fn from(model: Model) -> Self {
        Self {
            id: Identity::assigned(model.id),
            name: model.name,
        }
    }
}

impl FromAliasedRow for Niveau {
    const TABLE: &'static str = "niveau";
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
pub struct NiveauCreate {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl PayloadId for NiveauCreate {
    fn payload_id(&self) -> Option<i64> {
        self.id
    }
}

impl From<NiveauCreate> for ActiveModel {
    fn from(create: NiveauCreate) -> Self {
        Self {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(create.name),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct NiveauReplace {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl PayloadId for NiveauReplace {
    fn payload_id(&self) -> Option<i64> {
        self.id
    }
}

impl From<NiveauReplace> for ActiveModel {
    fn from(replace: NiveauReplace) -> Self {
        Self {
            id: replace.id.map_or(ActiveValue::NotSet, ActiveValue::Unchanged),
            name: ActiveValue::Set(replace.name),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct NiveauPatch {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl PayloadId for NiveauPatch {
    fn payload_id(&self) -> Option<i64> {
        self.id
    }
}

impl MergeIntoActiveModel<ActiveModel> for NiveauPatch {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(name) = self.name {
            existing.name = ActiveValue::Set(Some(name));
        }
        Ok(existing)
    }
}

#[async_trait::async_trait]
impl CrudResource for Niveau {
    type Entity = Entity;
    type Column = Column;
    type ActiveModel = ActiveModel;
    type CreateModel = NiveauCreate;
    type ReplaceModel = NiveauReplace;
    type PatchModel = NiveauPatch;

    const ID_COLUMN: Column = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "niveau";
    const RESOURCE_NAME_PLURAL: &'static str = "niveaus";

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
