use serde::{Deserialize, Serialize};

/// Query parameters shared by paginated list endpoints. `page` is 1-based on
/// the wire.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    #[serde(default)]
    pub sort: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    20
}

impl PageParams {
    pub fn limit(&self) -> i64 {
        self.size.max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, params: &PageParams, total_items: i64) -> Self {
        let size = params.limit();
        Self {
            items,
            page: params.page.max(1),
            size,
            total_items,
            total_pages: total_pages(total_items, size),
        }
    }
}

pub fn total_pages(total_items: i64, size: i64) -> i64 {
    if total_items <= 0 {
        0
    } else {
        (total_items + size - 1) / size
    }
}

/// A sort column vetted against a whitelist, safe to splice into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: &'static str,
    pub descending: bool,
}

impl SortSpec {
    pub fn direction_sql(&self) -> &'static str {
        if self.descending {
            "DESC"
        } else {
            "ASC"
        }
    }
}

/// Parse `field,direction`. Unknown fields fall back to `default`; direction
/// defaults to descending.
pub fn parse_sort(
    raw: Option<&str>,
    allowed: &[(&'static str, &'static str)],
    default: SortSpec,
) -> SortSpec {
    let Some(raw) = raw else {
        return default;
    };
    let mut parts = raw.splitn(2, ',');
    let field = parts.next().unwrap_or_default().trim();
    let descending = !parts
        .next()
        .map(|d| d.trim().eq_ignore_ascii_case("asc"))
        .unwrap_or(false);

    match allowed.iter().find(|(wire, _)| *wire == field) {
        Some((_, column)) => SortSpec { column, descending },
        None => default,
    }
}
