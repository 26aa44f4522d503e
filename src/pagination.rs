use axum::http::HeaderValue;
use axum::http::header::HeaderMap;

use crate::models::ListParams;

/// An offset/limit window over a collection read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub offset: u64,
    pub limit: u64,
}

/// Extract the requested window, if any.
///
/// `page`/`per_page` (1-based) win over `range=[start,end]` (inclusive
/// indices). With neither, the read is unbounded. A malformed `range` is
/// ignored rather than rejected.
#[must_use]
pub fn parse_page(params: &ListParams) -> Option<PageSpec> {
    if let (Some(page), Some(per_page)) = (params.page, params.per_page) {
        return Some(PageSpec {
            offset: page.saturating_sub(1).saturating_mul(per_page),
            limit: per_page,
        });
    }
    let range = params.range.as_deref()?;
    let [start, end]: [u64; 2] = serde_json::from_str(range).ok()?;
    Some(PageSpec {
        offset: start,
        limit: end.saturating_sub(start) + 1,
    })
}

/// Collection response headers: `Content-Range` describing the served
/// window, `X-Total-Count` carrying the filtered total.
#[must_use]
pub fn pagination_headers(page: Option<PageSpec>, total: u64, resource: &str) -> HeaderMap {
    let (first, last) = match page {
        Some(page) => (
            page.offset,
            page.offset
                .saturating_add(page.limit)
                .min(total)
                .saturating_sub(1),
        ),
        None => (0, total.saturating_sub(1)),
    };
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!("{resource} {first}-{last}/{total}")) {
        headers.insert("Content-Range", value);
    }
    if let Ok(value) = HeaderValue::from_str(&total.to_string()) {
        headers.insert("X-Total-Count", value);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_and_per_page_are_one_based() {
        let params = ListParams {
            page: Some(3),
            per_page: Some(10),
            ..Default::default()
        };
        assert_eq!(parse_page(&params), Some(PageSpec { offset: 20, limit: 10 }));
    }

    #[test]
    fn range_is_inclusive() {
        let params = ListParams {
            range: Some("[10,19]".to_owned()),
            ..Default::default()
        };
        assert_eq!(parse_page(&params), Some(PageSpec { offset: 10, limit: 10 }));
    }

    #[test]
    fn page_parameters_win_over_range() {
        let params = ListParams {
            page: Some(1),
            per_page: Some(5),
            range: Some("[0,9]".to_owned()),
            ..Default::default()
        };
        assert_eq!(parse_page(&params), Some(PageSpec { offset: 0, limit: 5 }));
    }

    #[test]
    fn no_parameters_means_unbounded() {
        assert_eq!(parse_page(&ListParams::default()), None);
        let params = ListParams {
            range: Some("nonsense".to_owned()),
            ..Default::default()
        };
        assert_eq!(parse_page(&params), None);
    }

    #[test]
    fn headers_describe_the_served_window() {
        let headers = pagination_headers(Some(PageSpec { offset: 0, limit: 10 }), 42, "etudiants");
        assert_eq!(headers.get("Content-Range").unwrap(), "etudiants 0-9/42");
        assert_eq!(headers.get("X-Total-Count").unwrap(), "42");
    }

    #[test]
    fn window_is_clamped_to_the_total() {
        let headers = pagination_headers(Some(PageSpec { offset: 0, limit: 10 }), 4, "pays");
        assert_eq!(headers.get("Content-Range").unwrap(), "pays 0-3/4");
    }

    #[test]
    fn unbounded_window_spans_everything() {
        let headers = pagination_headers(None, 3, "niveaus");
        assert_eq!(headers.get("Content-Range").unwrap(), "niveaus 0-2/3");
    }
}
