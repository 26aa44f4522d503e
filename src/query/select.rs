use sea_orm::sea_query::{
    Alias, Condition, Expr, Func, JoinType, SelectStatement,
};
use sea_orm::{ConnectionTrait, DbErr, Order, QueryResult};

use super::{ENTITY_ALIAS, row::FromAliasedRow};

/// One reference join: `LEFT JOIN {table} AS {alias}
/// ON e.{fk_column} = {alias}.id`, with the referenced table's columns
/// pulled into the select list under its alias.
struct ReferenceJoin {
    table: &'static str,
    alias: &'static str,
    fk_column: &'static str,
    columns: &'static [&'static str],
}

/// Builder for the one read query every repository uses: the entity table
/// under alias `e`, left-outer-joined with each referenced table, every
/// selected column aliased `{alias}_{column}`.
///
/// Without a filter, all rows are candidates; without a page, the result is
/// unbounded; without an explicit order, no ORDER BY is emitted and rows
/// come back in storage order.
pub struct JoinedSelect {
    table: &'static str,
    columns: &'static [&'static str],
    joins: Vec<ReferenceJoin>,
    condition: Condition,
    order: Option<(String, Order)>,
    page: Option<(u64, u64)>,
}

impl JoinedSelect {
    #[must_use]
    pub fn new<R: FromAliasedRow>() -> Self {
        Self {
            table: R::TABLE,
            columns: R::COLUMNS,
            joins: Vec::new(),
            condition: Condition::all(),
            order: None,
            page: None,
        }
    }

    /// Left outer join `R` under `alias`, matching `e.{fk_column}` against
    /// the referenced identity column.
    #[must_use]
    pub fn join_reference<R: FromAliasedRow>(
        mut self,
        fk_column: &'static str,
        alias: &'static str,
    ) -> Self {
        self.joins.push(ReferenceJoin {
            table: R::TABLE,
            alias,
            fk_column,
            columns: R::COLUMNS,
        });
        self
    }

    /// Add a condition; columns must be qualified against the entity alias.
    #[must_use]
    pub fn filter(mut self, condition: Condition) -> Self {
        self.condition = self.condition.add(condition);
        self
    }

    /// Restrict to the row with this identity.
    #[must_use]
    pub fn filter_id(self, id: i64) -> Self {
        self.filter(
            Condition::all()
                .add(Expr::col((Alias::new(ENTITY_ALIAS), Alias::new("id"))).eq(id)),
        )
    }

    /// Order by a column of the entity table.
    #[must_use]
    pub fn order_by(mut self, column: &str, order: Order) -> Self {
        self.order = Some((column.to_owned(), order));
        self
    }

    /// Bound the result to `limit` rows starting at `offset`.
    #[must_use]
    pub fn page(mut self, offset: u64, limit: u64) -> Self {
        self.page = Some((offset, limit));
        self
    }

    /// Fetch every matching row.
    pub async fn all(self, db: &impl ConnectionTrait) -> Result<Vec<QueryResult>, DbErr> {
        let stmt = db.get_database_backend().build(&self.statement());
        db.query_all(stmt).await
    }

    /// Fetch at most one row; the caller decides what an absent row means.
    pub async fn one(mut self, db: &impl ConnectionTrait) -> Result<Option<QueryResult>, DbErr> {
        self.page = Some((0, 1));
        let stmt = db.get_database_backend().build(&self.statement());
        db.query_one(stmt).await
    }

    /// Row count over the same filtered set. Joins and paging are left out
    /// of the count query; conditions only ever reference the entity alias.
    pub async fn count(self, db: &impl ConnectionTrait) -> Result<u64, DbErr> {
        let mut stmt = SelectStatement::new();
        stmt.from_as(Alias::new(self.table), Alias::new(ENTITY_ALIAS))
            .expr_as(
                Func::count(Expr::col((Alias::new(ENTITY_ALIAS), Alias::new("id")))),
                Alias::new("num_rows"),
            )
            .cond_where(self.condition);
        let stmt = db.get_database_backend().build(&stmt);
        let row = db
            .query_one(stmt)
            .await?
            .ok_or_else(|| DbErr::Custom("count query returned no row".to_owned()))?;
        let count: i64 = row.try_get("", "num_rows")?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    fn statement(&self) -> SelectStatement {
        let mut stmt = SelectStatement::new();
        stmt.from_as(Alias::new(self.table), Alias::new(ENTITY_ALIAS));
        push_column_group(&mut stmt, ENTITY_ALIAS, self.columns);
        for join in &self.joins {
            push_column_group(&mut stmt, join.alias, join.columns);
            stmt.join_as(
                JoinType::LeftJoin,
                Alias::new(join.table),
                Alias::new(join.alias),
                Expr::col((Alias::new(ENTITY_ALIAS), Alias::new(join.fk_column)))
                    .equals((Alias::new(join.alias), Alias::new("id"))),
            );
        }
        stmt.cond_where(self.condition.clone());
        if let Some((column, order)) = &self.order {
            stmt.order_by(
                (Alias::new(ENTITY_ALIAS), Alias::new(column.as_str())),
                order.clone(),
            );
        }
        if let Some((offset, limit)) = self.page {
            stmt.offset(offset).limit(limit);
        }
        stmt
    }
}

fn push_column_group(stmt: &mut SelectStatement, alias: &str, columns: &[&str]) {
    for column in columns {
        stmt.expr_as(
            Expr::col((Alias::new(alias), Alias::new(*column))),
            Alias::new(format!("{alias}_{column}")),
        );
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::sea_query::SqliteQueryBuilder;

    use super::*;
    use crate::domain::{Etudiant, Pays};
    use crate::traits::CrudResource;

    #[test]
    fn plain_select_aliases_every_column() {
        let sql = JoinedSelect::new::<Pays>().statement().to_string(SqliteQueryBuilder);
        assert!(sql.contains(r#""e"."id" AS "e_id""#));
        assert!(sql.contains(r#""e"."name" AS "e_name""#));
        assert!(sql.contains(r#"FROM "pays" AS "e""#));
        assert!(!sql.contains("ORDER BY"));
        assert!(!sql.contains("LIMIT"));
    }

    #[test]
    fn reference_joins_use_their_own_alias() {
        let sql = Etudiant::select().statement().to_string(SqliteQueryBuilder);
        assert!(sql.contains(r#"LEFT JOIN "pays" AS "country" ON "e"."country_id" = "country"."id""#));
        assert!(sql.contains(r#"LEFT JOIN "niveau" AS "level" ON "e"."level_id" = "level"."id""#));
        assert!(sql.contains(r#"LEFT JOIN "filiere" AS "track" ON "e"."track_id" = "track"."id""#));
        assert!(sql.contains(r#""country"."name" AS "country_name""#));
    }

    #[test]
    fn filter_order_and_page_compose() {
        let sql = Etudiant::select()
            .filter_id(42)
            .order_by("last_name", Order::Desc)
            .page(10, 5)
            .statement()
            .to_string(SqliteQueryBuilder);
        assert!(sql.contains(r#""e"."id" = 42"#));
        assert!(sql.contains(r#"ORDER BY "e"."last_name" DESC"#));
        assert!(sql.contains("LIMIT 5"));
        assert!(sql.contains("OFFSET 10"));
    }
}
