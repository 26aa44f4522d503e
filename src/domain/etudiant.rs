use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, DbErr, QueryResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Filiere, Identity, Niveau, Pays, identity_equality};
use crate::query::{ENTITY_ALIAS, FromAliasedRow, JoinedSelect, group_prefix};
use crate::traits::{CrudResource, MergeIntoActiveModel, PayloadId};

/// Aliases of the three reference joins in the etudiant read query.
const LEVEL_ALIAS: &str = "level";
const TRACK_ALIAS: &str = "track";
const COUNTRY_ALIAS: &str = "country";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "etudiant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub registration_number: Option<i64>,
    pub enrollment_date: Option<Date>,
    pub country_id: Option<i64>,
    pub level_id: Option<i64>,
    pub track_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pays::Entity",
        from = "Column::CountryId",
        to = "super::pays::Column::Id"
    )]
    Pays,
    #[sea_orm(
        belongs_to = "super::niveau::Entity",
        from = "Column::LevelId",
        to = "super::niveau::Column::Id"
    )]
    Niveau,
    #[sea_orm(
        belongs_to = "super::filiere::Entity",
        from = "Column::TrackId",
        to = "super::filiere::Column::Id"
    )]
    Filiere,
}

impl ActiveModelBehavior for ActiveModel {}

/// A foreign student row together with its hydrated references.
///
/// The `*_id` fields are the stored foreign keys; `country`, `level` and
/// `track` carry the referenced records when the read query found them. A
/// foreign key can be present with its record absent (partial load); the
/// reverse never happens.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct Etudiant {
    pub id: Identity,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub registration_number: Option<i64>,
    pub enrollment_date: Option<NaiveDate>,
    pub country_id: Option<i64>,
    pub level_id: Option<i64>,
    pub track_id: Option<i64>,
    pub country: Option<Pays>,
    pub level: Option<Niveau>,
    pub track: Option<Filiere>,
}

identity_equality!(Etudiant);

impl Etudiant {
    /// Attach a country and keep the stored foreign key in step with it.
    pub fn set_country(&mut self, country: Option<Pays>) {
        self.country_id = country.as_ref().and_then(|pays| pays.id.value());
        self.country = country;
    }

    /// Attach a level, re-deriving `level_id`.
    pub fn set_level(&mut self, level: Option<Niveau>) {
        self.level_id = level.as_ref().and_then(|niveau| niveau.id.value());
        self.level = level;
    }

    /// Attach a track, re-deriving `track_id`.
    pub fn set_track(&mut self, track: Option<Filiere>) {
        self.track_id = track.as_ref().and_then(|filiere| filiere.id.value());
        self.track = track;
    }
}

impl From<Model> for Etudiant {
    fn from(model: Model) -> Self {
        Self {
            id: Identity::assigned(model.id),
            last_name: model.last_name,
            first_name: model.first_name,
            registration_number: model.registration_number,
            enrollment_date: model.enrollment_date,
            country_id: model.country_id,
            level_id: model.level_id,
            track_id: model.track_id,
            country: None,
            level: None,
            track: None,
        }
    }
}

impl FromAliasedRow for Etudiant {
    const TABLE: &'static str = "etudiant";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "last_name",
        "first_name",
        "registration_number",
        "enrollment_date",
        "country_id",
        "level_id",
        "track_id",
    ];

    fn from_aliased_row(row: &QueryResult, alias: &str) -> Result<Self, DbErr> {
        let prefix = group_prefix(alias);
        Ok(Self {
            id: Identity::from(row.try_get::<Option<i64>>(&prefix, "id")?),
            last_name: row.try_get(&prefix, "last_name")?,
            first_name: row.try_get(&prefix, "first_name")?,
            registration_number: row.try_get(&prefix, "registration_number")?,
            enrollment_date: row.try_get(&prefix, "enrollment_date")?,
            country_id: row.try_get(&prefix, "country_id")?,
            level_id: row.try_get(&prefix, "level_id")?,
            track_id: row.try_get(&prefix, "track_id")?,
            country: None,
            level: None,
            track: None,
        })
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct EtudiantCreate {
    /// Only here to reject payloads that already carry an identity.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub registration_number: Option<i64>,
    #[serde(default)]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(default)]
    pub country_id: Option<i64>,
    #[serde(default)]
    pub level_id: Option<i64>,
    #[serde(default)]
    pub track_id: Option<i64>,
}

impl PayloadId for EtudiantCreate {
    fn payload_id(&self) -> Option<i64> {
        self.id
    }
}

impl From<EtudiantCreate> for ActiveModel {
    fn from(create: EtudiantCreate) -> Self {
        Self {
            id: ActiveValue::NotSet,
            last_name: ActiveValue::Set(create.last_name),
            first_name: ActiveValue::Set(create.first_name),
            registration_number: ActiveValue::Set(create.registration_number),
            enrollment_date: ActiveValue::Set(create.enrollment_date),
            country_id: ActiveValue::Set(create.country_id),
            level_id: ActiveValue::Set(create.level_id),
            track_id: ActiveValue::Set(create.track_id),
        }
    }
}

/// Full-row replacement payload: every column is rewritten, absent fields
/// become NULL.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct EtudiantReplace {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub registration_number: Option<i64>,
    #[serde(default)]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(default)]
    pub country_id: Option<i64>,
    #[serde(default)]
    pub level_id: Option<i64>,
    #[serde(default)]
    pub track_id: Option<i64>,
}

impl PayloadId for EtudiantReplace {
    fn payload_id(&self) -> Option<i64> {
        self.id
    }
}

impl From<EtudiantReplace> for ActiveModel {
    fn from(replace: EtudiantReplace) -> Self {
        Self {
            id: replace.id.map_or(ActiveValue::NotSet, ActiveValue::Unchanged),
            last_name: ActiveValue::Set(replace.last_name),
            first_name: ActiveValue::Set(replace.first_name),
            registration_number: ActiveValue::Set(replace.registration_number),
            enrollment_date: ActiveValue::Set(replace.enrollment_date),
            country_id: ActiveValue::Set(replace.country_id),
            level_id: ActiveValue::Set(replace.level_id),
            track_id: ActiveValue::Set(replace.track_id),
        }
    }
}

/// Merge payload: only the fields present here overwrite stored values; a
/// missing or null field means "no change", so a merge can never clear a
/// column.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default)]
pub struct EtudiantPatch {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub registration_number: Option<i64>,
    #[serde(default)]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(default)]
    pub country_id: Option<i64>,
    #[serde(default)]
    pub level_id: Option<i64>,
    #[serde(default)]
    pub track_id: Option<i64>,
}

impl PayloadId for EtudiantPatch {
    fn payload_id(&self) -> Option<i64> {
        self.id
    }
}

impl MergeIntoActiveModel<ActiveModel> for EtudiantPatch {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(last_name) = self.last_name {
            existing.last_name = ActiveValue::Set(Some(last_name));
        }
        if let Some(first_name) = self.first_name {
            existing.first_name = ActiveValue::Set(Some(first_name));
        }
        if let Some(registration_number) = self.registration_number {
            existing.registration_number = ActiveValue::Set(Some(registration_number));
        }
        if let Some(enrollment_date) = self.enrollment_date {
            existing.enrollment_date = ActiveValue::Set(Some(enrollment_date));
        }
        if let Some(country_id) = self.country_id {
            existing.country_id = ActiveValue::Set(Some(country_id));
        }
        if let Some(level_id) = self.level_id {
            existing.level_id = ActiveValue::Set(Some(level_id));
        }
        if let Some(track_id) = self.track_id {
            existing.track_id = ActiveValue::Set(Some(track_id));
        }
        Ok(existing)
    }
}

#[async_trait::async_trait]
impl CrudResource for Etudiant {
    type Entity = Entity;
    type Column = Column;
    type ActiveModel = ActiveModel;
    type CreateModel = EtudiantCreate;
    type ReplaceModel = EtudiantReplace;
    type PatchModel = EtudiantPatch;

    const ID_COLUMN: Column = Column::Id;
    const RESOURCE_NAME_SINGULAR: &'static str = "etudiant";
    const RESOURCE_NAME_PLURAL: &'static str = "etudiants";

    fn select() -> JoinedSelect {
        JoinedSelect::new::<Self>()
            .join_reference::<Niveau>("level_id", LEVEL_ALIAS)
            .join_reference::<Filiere>("track_id", TRACK_ALIAS)
            .join_reference::<Pays>("country_id", COUNTRY_ALIAS)
    }

    fn hydrate(row: &QueryResult) -> Result<Self, DbErr> {
        let mut etudiant = Self::from_aliased_row(row, ENTITY_ALIAS)?;
        etudiant.level = Niveau::from_joined_row(row, LEVEL_ALIAS)?;
        etudiant.track = Filiere::from_joined_row(row, TRACK_ALIAS)?;
        etudiant.country = Pays::from_joined_row(row, COUNTRY_ALIAS)?;
        Ok(etudiant)
    }

    fn sortable_columns() -> Vec<(&'static str, Column)> {
        vec![
            ("id", Column::Id),
            ("last_name", Column::LastName),
            ("first_name", Column::FirstName),
            ("registration_number", Column::RegistrationNumber),
            ("enrollment_date", Column::EnrollmentDate),
        ]
    }

    fn filterable_columns() -> Vec<&'static str> {
        vec![
            "id",
            "last_name",
            "first_name",
            "registration_number",
            "country_id",
            "level_id",
            "track_id",
        ]
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::IntoActiveModel;

    use super::*;

    fn stored_row() -> Model {
        Model {
            id: 7,
            last_name: Some("Ngono".to_owned()),
            first_name: Some("Alice".to_owned()),
            registration_number: Some(1),
            enrollment_date: NaiveDate::from_ymd_opt(1970, 1, 1),
            country_id: Some(3),
            level_id: None,
            track_id: None,
        }
    }

    #[test]
    fn setting_a_reference_rederives_the_foreign_key() {
        let mut etudiant = Etudiant::default();
        etudiant.set_country(Some(Pays {
            id: Identity::assigned(5),
            name: Some("Cameroun".to_owned()),
        }));
        assert_eq!(etudiant.country_id, Some(5));

        etudiant.set_country(None);
        assert_eq!(etudiant.country_id, None);
        assert!(etudiant.country.is_none());
    }

    #[test]
    fn merge_sets_only_present_fields() {
        let patch = EtudiantPatch {
            last_name: Some("Biya".to_owned()),
            ..Default::default()
        };
        let merged = patch
            .merge_into_activemodel(stored_row().into_active_model())
            .unwrap();
        assert!(matches!(merged.last_name, ActiveValue::Set(Some(ref v)) if v == "Biya"));
        assert!(merged.first_name.is_unchanged());
        assert!(merged.registration_number.is_unchanged());
        assert!(merged.enrollment_date.is_unchanged());
        assert!(merged.country_id.is_unchanged());
    }

    #[test]
    fn empty_merge_changes_nothing() {
        let merged = EtudiantPatch::default()
            .merge_into_activemodel(stored_row().into_active_model())
            .unwrap();
        assert!(!sea_orm::ActiveModelTrait::is_changed(&merged));
    }
}
