use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters accepted by collection reads.
///
/// Filtering: `filter` is a JSON object of column/value pairs, for example
/// `{"country_id": 3}` or `{"id": [1, 2]}`.
///
/// Pagination: either `range=[start,end]` (inclusive indices) or
/// `page`/`per_page` (1-based). Without either, the whole collection is
/// returned.
///
/// Sorting: `sort=["column","DESC"]` or `sort_by=column&order=DESC`.
/// Without sort parameters, rows come back in storage order.
#[derive(Deserialize, IntoParams, Default, Debug)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// JSON object of column filters.
    pub filter: Option<String>,
    /// Inclusive index range, e.g. `[0,9]`.
    pub range: Option<String>,
    /// 1-based page number, paired with `per_page`.
    pub page: Option<u64>,
    /// Page size, paired with `page`.
    pub per_page: Option<u64>,
    /// JSON pair `["column","ASC"|"DESC"]`, or a bare column name.
    pub sort: Option<String>,
    /// Column to sort on, paired with `order`.
    pub sort_by: Option<String>,
    /// `ASC` or `DESC`.
    pub order: Option<String>,
}
