use sea_orm::{ColumnTrait, Order};

use crate::models::ListParams;

/// Resolve the caller's sort request against the allowed columns.
///
/// Accepts either the JSON pair form `sort=["column","DESC"]` or the plain
/// form `sort_by=column&order=DESC` (`sort=column&order=DESC` also works).
/// Returns `None` when no sort was asked for or the column is not
/// sortable; unsorted reads keep their storage order.
pub fn parse_sort<C>(params: &ListParams, sortable: &[(&'static str, C)]) -> Option<(C, Order)>
where
    C: ColumnTrait,
{
    let (column, direction) = requested_sort(params)?;
    let column = sortable
        .iter()
        .find(|(name, _)| *name == column)
        .map(|&(_, column)| column)?;
    Some((column, parse_direction(&direction)))
}

fn requested_sort(params: &ListParams) -> Option<(String, String)> {
    if let Some(sort_by) = &params.sort_by {
        return Some((sort_by.clone(), params.order.clone().unwrap_or_default()));
    }
    let sort = params.sort.as_deref()?;
    if sort.starts_with('[') {
        parse_json_sort(sort)
    } else {
        Some((sort.to_owned(), params.order.clone().unwrap_or_default()))
    }
}

fn parse_json_sort(json: &str) -> Option<(String, String)> {
    let pair: Vec<String> = serde_json::from_str(json).ok()?;
    let column = pair.first()?.clone();
    let direction = pair.get(1).cloned().unwrap_or_default();
    Some((column, direction))
}

fn parse_direction(direction: &str) -> Order {
    if direction.eq_ignore_ascii_case("desc") {
        Order::Desc
    } else {
        Order::Asc
    }
}
