use serde::Deserialize;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Query string for the product list endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: Option<bool>,
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub fn from_query(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Self {
            page,
            limit,
            offset: (page - 1) * limit,
        }
    }

    pub fn pages(&self, total: i64) -> i64 {
        if total == 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub column: &'static str,
    pub descending: bool,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            column: "created_at",
            descending: false,
        }
    }
}

/// Parse `sortBy=field:dir`. Fields are whitelisted and mapped to column
/// names; anything else falls back to the default ordering. The column is
/// interpolated into SQL, so the whitelist is load-bearing.
pub fn parse_sort(sort_by: Option<&str>) -> Sort {
    const SORTABLE: &[(&str, &str)] = &[
        ("name", "name"),
        ("quantity", "quantity"),
        ("price", "price"),
        ("createdAt", "created_at"),
        ("updatedAt", "updated_at"),
    ];

    let Some(sort_by) = sort_by else {
        return Sort::default();
    };
    let (field, order) = match sort_by.split_once(':') {
        Some((f, o)) => (f, o),
        None => (sort_by, "asc"),
    };
    match SORTABLE.iter().find(|(name, _)| *name == field) {
        Some((_, column)) => Sort {
            column,
            descending: order == "desc",
        },
        None => Sort::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let pg = Pagination::from_query(None, None);
        assert_eq!(pg, Pagination { page: 1, limit: 10, offset: 0 });
    }

    #[test]
    fn pagination_clamps_page_and_limit() {
        let pg = Pagination::from_query(Some(0), Some(1000));
        assert_eq!(pg.page, 1);
        assert_eq!(pg.limit, 100);
        let pg = Pagination::from_query(Some(-5), Some(0));
        assert_eq!(pg.page, 1);
        assert_eq!(pg.limit, 1);
    }

    #[test]
    fn pagination_offset() {
        let pg = Pagination::from_query(Some(3), Some(20));
        assert_eq!(pg.offset, 40);
    }

    #[test]
    fn pages_rounds_up() {
        let pg = Pagination::from_query(Some(1), Some(10));
        assert_eq!(pg.pages(0), 0);
        assert_eq!(pg.pages(10), 1);
        assert_eq!(pg.pages(11), 2);
    }

    #[test]
    fn sort_parses_field_and_direction() {
        assert_eq!(
            parse_sort(Some("price:desc")),
            Sort { column: "price", descending: true }
        );
        assert_eq!(
            parse_sort(Some("name")),
            Sort { column: "name", descending: false }
        );
    }

    #[test]
    fn sort_maps_camel_case_fields() {
        assert_eq!(parse_sort(Some("createdAt:desc")).column, "created_at");
        assert_eq!(parse_sort(Some("updatedAt")).column, "updated_at");
    }

    #[test]
    fn sort_rejects_unknown_fields() {
        // Unknown or malicious fields never reach the SQL.
        assert_eq!(parse_sort(Some("password_hash:desc")), Sort::default());
        assert_eq!(parse_sort(Some("id; DROP TABLE products")), Sort::default());
        assert_eq!(parse_sort(None), Sort::default());
    }
}
