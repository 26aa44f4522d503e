use sea_orm::{DbErr, QueryResult};

/// Column layout of a record read through the joined query, plus the recipe
/// to rebuild it from its aliased column group.
///
/// Every selected column is aliased `{alias}_{column}`, so the same table
/// can appear several times in one SELECT without name collisions.
pub trait FromAliasedRow: Sized {
    /// Table the record lives in.
    const TABLE: &'static str;

    /// Columns selected for the record, identity column first.
    const COLUMNS: &'static [&'static str];

    /// Rebuild the record from the column group under `alias`.
    fn from_aliased_row(row: &QueryResult, alias: &str) -> Result<Self, DbErr>;

    /// Rebuild the record only when the joined group carries one.
    ///
    /// A left outer join miss leaves the whole group NULL; the aliased
    /// identity column decides whether a record is present.
    fn from_joined_row(row: &QueryResult, alias: &str) -> Result<Option<Self>, DbErr> {
        let id: Option<i64> = row.try_get(&group_prefix(alias), "id")?;
        if id.is_some() {
            Ok(Some(Self::from_aliased_row(row, alias)?))
        } else {
            Ok(None)
        }
    }
}

/// Prefix under which a table's columns appear in the joined row.
#[must_use]
pub fn group_prefix(alias: &str) -> String {
    format!("{alias}_")
}
