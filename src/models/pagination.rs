//! Pagination, sorting and filter parameters shared across all list endpoints.
//!
//! Query strings arrive untyped and are validated into [`ListParams`];
//! anything malformed is rejected with a 400 instead of being coerced.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::AppError;

/// Raw list query parameters exactly as they appear in the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub verified: Option<String>,
    pub active: Option<String>,
}

/// Page window after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct Pagination {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i64,
    #[validate(range(min = 1, message = "limit must be at least 1"))]
    pub limit: i64,
}

impl Pagination {
    /// Maximum items per page.
    pub const MAX_LIMIT: i64 = 100;

    /// Default items per page.
    pub const DEFAULT_LIMIT: i64 = 10;

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "asc" => Ok(SortOrder::Asc),
            "-1" | "desc" => Ok(SortOrder::Desc),
            other => Err(AppError::Validation(format!(
                "sortOrder must be 1 or -1, got '{other}'"
            ))),
        }
    }
}

/// A sortable field: public name in the query string and its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortField {
    pub param: &'static str,
    pub column: &'static str,
}

/// Optional boolean filter accepted by a resource (`verified`, `active`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagFilter {
    pub param: &'static str,
    pub column: &'static str,
}

/// What a resource accepts on its list endpoint.
#[derive(Debug, Clone, Copy)]
pub struct ListSchema {
    /// Whitelist; the first entry is the default sort.
    pub sort_fields: &'static [SortField],
    pub flag: Option<FlagFilter>,
}

/// Validated list parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub pagination: Pagination,
    pub sort: SortField,
    pub order: SortOrder,
    /// Column and value of the resource's boolean filter, if supplied.
    pub flag: Option<(&'static str, bool)>,
}

impl ListQuery {
    /// Validate the raw parameters against a resource's schema.
    ///
    /// Parameters the resource does not accept are ignored.
    pub fn parse(&self, schema: &ListSchema) -> Result<ListParams, AppError> {
        let pagination = Pagination {
            page: parse_int("page", self.page.as_deref())?.unwrap_or(1),
            limit: parse_int("limit", self.limit.as_deref())?
                .unwrap_or(Pagination::DEFAULT_LIMIT),
        };
        pagination
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let pagination = Pagination {
            limit: pagination.limit.min(Pagination::MAX_LIMIT),
            ..pagination
        };

        let default_sort = schema
            .sort_fields
            .first()
            .copied()
            .ok_or_else(|| AppError::Internal("list schema has no sort fields".to_string()))?;
        let sort = match self.sort_by.as_deref().map(str::trim) {
            None | Some("") => default_sort,
            Some(name) => schema
                .sort_fields
                .iter()
                .find(|f| f.param == name)
                .copied()
                .ok_or_else(|| {
                    let allowed: Vec<&str> = schema.sort_fields.iter().map(|f| f.param).collect();
                    AppError::Validation(format!(
                        "sortBy '{name}' is not one of: {}",
                        allowed.join(", ")
                    ))
                })?,
        };

        let order = match self.sort_order.as_deref().map(str::trim) {
            None | Some("") => SortOrder::Desc,
            Some(raw) => SortOrder::parse(raw)?,
        };

        let flag = match schema.flag {
            Some(flag) => {
                let raw = match flag.param {
                    "verified" => self.verified.as_deref(),
                    "active" => self.active.as_deref(),
                    _ => None,
                };
                parse_bool(flag.param, raw)?.map(|value| (flag.column, value))
            }
            None => None,
        };

        Ok(ListParams {
            pagination,
            sort,
            order,
            flag,
        })
    }
}

fn parse_int(name: &str, raw: Option<&str>) -> Result<Option<i64>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<i64>().map(Some).map_err(|_| {
            AppError::Validation(format!("{name} must be an integer, got '{value}'"))
        }),
    }
}

fn parse_bool(name: &str, raw: Option<&str>) -> Result<Option<bool>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(AppError::Validation(format!(
            "{name} must be 'true' or 'false', got '{other}'"
        ))),
    }
}

/// Page metadata returned alongside every list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

impl PageInfo {
    /// `total_pages` is `ceil(total / limit)`, so an empty result has zero pages.
    pub fn new(total_items: i64, pagination: &Pagination) -> Self {
        let per_page = pagination.limit;
        Self {
            current_page: pagination.page,
            total_pages: (total_items + per_page - 1) / per_page,
            total_items,
            items_per_page: per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SORTS: &[SortField] = &[
        SortField {
            param: "createdAt",
            column: "created_at",
        },
        SortField {
            param: "name",
            column: "name",
        },
    ];

    const ENGINEERS: ListSchema = ListSchema {
        sort_fields: SORTS,
        flag: Some(FlagFilter {
            param: "verified",
            column: "is_verified",
        }),
    };

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let mut q = ListQuery::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "page" => q.page = v,
                "limit" => q.limit = v,
                "sortBy" => q.sort_by = v,
                "sortOrder" => q.sort_order = v,
                "verified" => q.verified = v,
                "active" => q.active = v,
                _ => unreachable!(),
            }
        }
        q
    }

    #[test]
    fn defaults() {
        let p = ListQuery::default().parse(&ENGINEERS).unwrap();
        assert_eq!(p.pagination, Pagination { page: 1, limit: 10 });
        assert_eq!(p.pagination.offset(), 0);
        assert_eq!(p.sort.column, "created_at");
        assert_eq!(p.order, SortOrder::Desc);
        assert_eq!(p.flag, None);
    }

    #[test]
    fn clamps_limit() {
        let p = query(&[("limit", "500")]).parse(&ENGINEERS).unwrap();
        assert_eq!(p.pagination.limit, 100);
    }

    #[test]
    fn offset_calculation() {
        let p = query(&[("page", "3"), ("limit", "10")]).parse(&ENGINEERS).unwrap();
        assert_eq!(p.pagination.offset(), 20);
    }

    #[test]
    fn rejects_non_positive_and_malformed_numbers() {
        for pairs in [
            [("page", "0")],
            [("page", "-2")],
            [("limit", "0")],
            [("page", "two")],
            [("limit", "1.5")],
        ] {
            let err = query(&pairs).parse(&ENGINEERS).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{pairs:?}");
        }
    }

    #[test]
    fn sort_order_values() {
        let asc = query(&[("sortOrder", "1")]).parse(&ENGINEERS).unwrap();
        assert_eq!(asc.order, SortOrder::Asc);
        let desc = query(&[("sortOrder", "desc")]).parse(&ENGINEERS).unwrap();
        assert_eq!(desc.order, SortOrder::Desc);
        assert!(query(&[("sortOrder", "0")]).parse(&ENGINEERS).is_err());
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let p = query(&[
            ("page", ""),
            ("limit", ""),
            ("sortBy", ""),
            ("sortOrder", ""),
            ("verified", ""),
        ])
        .parse(&ENGINEERS)
        .unwrap();
        assert_eq!(p, ListQuery::default().parse(&ENGINEERS).unwrap());
    }

    #[test]
    fn sort_by_whitelist() {
        let p = query(&[("sortBy", "name")]).parse(&ENGINEERS).unwrap();
        assert_eq!(p.sort.column, "name");

        let err = query(&[("sortBy", "notes")]).parse(&ENGINEERS).unwrap_err();
        assert!(err.to_string().contains("createdAt, name"));
    }

    #[test]
    fn verified_flag_is_tri_state() {
        assert_eq!(query(&[]).parse(&ENGINEERS).unwrap().flag, None);
        assert_eq!(
            query(&[("verified", "true")]).parse(&ENGINEERS).unwrap().flag,
            Some(("is_verified", true))
        );
        assert_eq!(
            query(&[("verified", "false")]).parse(&ENGINEERS).unwrap().flag,
            Some(("is_verified", false))
        );
        assert!(query(&[("verified", "yes")]).parse(&ENGINEERS).is_err());
    }

    #[test]
    fn unaccepted_flags_are_ignored() {
        let p = query(&[("active", "garbage")]).parse(&ENGINEERS).unwrap();
        assert_eq!(p.flag, None);
    }

    #[test]
    fn page_info_total_pages() {
        let info = PageInfo::new(25, &Pagination { page: 1, limit: 10 });
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.total_items, 25);
        assert_eq!(info.current_page, 1);
    }

    #[test]
    fn page_info_second_page_of_fifteen() {
        let pagination = Pagination { page: 2, limit: 10 };
        let info = PageInfo::new(15, &pagination);
        assert_eq!(info.total_pages, 2);
        assert_eq!(pagination.offset(), 10);
    }

    #[test]
    fn page_info_empty_has_zero_pages() {
        let info = PageInfo::new(0, &Pagination::default());
        assert_eq!(info.total_pages, 0);
        assert_eq!(info.items_per_page, 10);
    }

    #[test]
    fn page_info_serializes_camel_case() {
        let json = serde_json::to_value(PageInfo::new(1, &Pagination::default())).unwrap();
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["itemsPerPage"], 10);
        assert_eq!(json["totalPages"], 1);
    }
}
