//! The joined read path shared by every repository: a query builder that
//! left-outer-joins an entity table with its referenced tables, and the row
//! hydrator that rebuilds records from the aliased result columns.

mod row;
mod select;

pub use row::{FromAliasedRow, group_prefix};
pub use select::JoinedSelect;

/// Alias the entity table carries in every read query. Referenced tables get
/// their own aliases per join.
pub const ENTITY_ALIAS: &str = "e";
