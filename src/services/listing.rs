//! Generic filter, sort and paginate over one collection.
//!
//! Each listable resource declares its projection, the one reference it
//! resolves through a `LEFT JOIN`, its sort whitelist and its optional boolean
//! filter. Sensitive columns are simply absent from the projection.

use serde::ser::{Serialize, SerializeMap, Serializer};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::errors::AppError;
use crate::models::ad::Ad;
use crate::models::engineer::{Engineer, EngineerRow};
use crate::models::filter::{Collection, Filter};
use crate::models::pagination::{FlagFilter, ListParams, ListSchema, PageInfo, SortField};
use crate::models::product::{PendingProduct, PendingProductRow};
use crate::models::shop::{Shop, ShopRow};
use crate::services::counts::pending_products_filter;
use crate::services::metrics::count_by_filter;

/// A resource served by a paginated admin list.
pub trait Listing: Serialize + Sized {
    /// Row as selected from the database.
    type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin + Into<Self>;

    /// Key the items are returned under (`products`, `engineers`, ...).
    const KEY: &'static str;
    const COLLECTION: Collection;
    const SCHEMA: ListSchema;
    /// Table alias used in `SELECT`, with trailing dot.
    const ALIAS: &'static str;
    /// `SELECT ... FROM ... [LEFT JOIN ...]` without `WHERE`.
    const SELECT: &'static str;

    /// Conditions every listing of this resource carries.
    fn base_filter() -> Filter {
        Filter::new()
    }
}

/// One page of a resource plus its page metadata.
#[derive(Debug, Clone)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T: Listing> Serialize for PagedResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(T::KEY, &self.items)?;
        map.serialize_entry("pagination", &self.pagination)?;
        map.end()
    }
}

/// The full filter for a request: the resource's base conditions plus the
/// caller's boolean flag.
pub fn request_filter<T: Listing>(params: &ListParams) -> Filter {
    let filter = T::base_filter();
    match params.flag {
        Some((column, value)) => filter.flag(column, value),
        None => filter,
    }
}

/// Fetch one page and the total count concurrently.
pub async fn list<T: Listing>(
    pool: &PgPool,
    params: &ListParams,
) -> Result<PagedResult<T>, AppError> {
    let filter = request_filter::<T>(params);

    let (total, rows) = tokio::try_join!(
        count_by_filter(pool, T::COLLECTION, &filter),
        fetch_page::<T>(pool, &filter, params),
    )?;

    Ok(PagedResult {
        items: rows.into_iter().map(Into::into).collect(),
        pagination: PageInfo::new(total, &params.pagination),
    })
}

async fn fetch_page<T: Listing>(
    pool: &PgPool,
    filter: &Filter,
    params: &ListParams,
) -> Result<Vec<T::Row>, AppError> {
    let mut qb = page_query::<T>(filter, params);
    let rows = qb.build_query_as::<T::Row>().fetch_all(pool).await?;
    Ok(rows)
}

/// Build the page query. The id tie-break keeps ordering stable across calls.
pub fn page_query<'a, T: Listing>(
    filter: &Filter,
    params: &ListParams,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(T::SELECT);
    filter.push_where(&mut qb, T::ALIAS);

    let dir = params.order.sql();
    qb.push(format_args!(
        " ORDER BY {alias}{col} {dir}, {alias}id {dir} LIMIT ",
        alias = T::ALIAS,
        col = params.sort.column,
    ));
    qb.push_bind(params.pagination.limit);
    qb.push(" OFFSET ");
    qb.push_bind(params.pagination.offset());
    qb
}

const CREATED_AT: SortField = SortField {
    param: "createdAt",
    column: "created_at",
};
const UPDATED_AT: SortField = SortField {
    param: "updatedAt",
    column: "updated_at",
};
const NAME: SortField = SortField {
    param: "name",
    column: "name",
};
const IS_VERIFIED: SortField = SortField {
    param: "isVerified",
    column: "is_verified",
};
const IS_ACTIVE: SortField = SortField {
    param: "isActive",
    column: "is_active",
};

const VERIFIED_FLAG: FlagFilter = FlagFilter {
    param: "verified",
    column: "is_verified",
};

impl Listing for PendingProduct {
    type Row = PendingProductRow;

    const KEY: &'static str = "products";
    const COLLECTION: Collection = Collection::Products;
    const SCHEMA: ListSchema = ListSchema {
        sort_fields: &[
            CREATED_AT,
            UPDATED_AT,
            NAME,
            SortField {
                param: "type",
                column: "product_type",
            },
            SortField {
                param: "governorate",
                column: "governorate",
            },
            SortField {
                param: "price",
                column: "price",
            },
        ],
        flag: None,
    };
    const ALIAS: &'static str = "p.";
    const SELECT: &'static str = "SELECT p.id, p.name, p.description, p.product_type, \
         p.governorate, p.price, p.status, p.created_at, p.updated_at, \
         u.name AS submitter_name, u.phone AS submitter_phone, u.email AS submitter_email \
         FROM products p LEFT JOIN users u ON u.id = p.user_id";

    fn base_filter() -> Filter {
        pending_products_filter()
    }
}

impl Listing for Engineer {
    type Row = EngineerRow;

    const KEY: &'static str = "engineers";
    const COLLECTION: Collection = Collection::Engineers;
    const SCHEMA: ListSchema = ListSchema {
        sort_fields: &[
            CREATED_AT,
            UPDATED_AT,
            NAME,
            IS_VERIFIED,
            IS_ACTIVE,
            SortField {
                param: "specialization",
                column: "specialization",
            },
        ],
        flag: Some(VERIFIED_FLAG),
    };
    const ALIAS: &'static str = "e.";
    const SELECT: &'static str = "SELECT e.id, e.name, e.phone, e.specialization, e.governorate, \
         e.is_verified, e.is_active, e.created_at, e.updated_at, u.name AS added_by_name \
         FROM engineers e LEFT JOIN users u ON u.id = e.added_by";
}

impl Listing for Shop {
    type Row = ShopRow;

    const KEY: &'static str = "shops";
    const COLLECTION: Collection = Collection::Shops;
    const SCHEMA: ListSchema = ListSchema {
        sort_fields: &[CREATED_AT, UPDATED_AT, NAME, IS_VERIFIED, IS_ACTIVE],
        flag: Some(VERIFIED_FLAG),
    };
    const ALIAS: &'static str = "s.";
    const SELECT: &'static str = "SELECT s.id, s.name, s.description, s.phone, s.governorate, \
         s.is_verified, s.is_active, s.created_at, s.updated_at, u.name AS added_by_name \
         FROM shops s LEFT JOIN users u ON u.id = s.added_by";
}

impl Listing for Ad {
    type Row = Ad;

    const KEY: &'static str = "ads";
    const COLLECTION: Collection = Collection::Ads;
    const SCHEMA: ListSchema = ListSchema {
        sort_fields: &[
            CREATED_AT,
            UPDATED_AT,
            SortField {
                param: "title",
                column: "title",
            },
            SortField {
                param: "active",
                column: "active",
            },
        ],
        flag: Some(FlagFilter {
            param: "active",
            column: "active",
        }),
    };
    const ALIAS: &'static str = "a.";
    const SELECT: &'static str = "SELECT a.id, a.title, a.description, a.image_url, a.link, \
         a.active, a.created_at, a.updated_at FROM ads a";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pagination::ListQuery;

    fn params<T: Listing>(pairs: &[(&str, &str)]) -> ListParams {
        let object = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        let query: ListQuery = serde_json::from_value(serde_json::Value::Object(object)).unwrap();
        query.parse(&T::SCHEMA).unwrap()
    }

    #[test]
    fn pending_products_always_filter_on_status() {
        let p = params::<PendingProduct>(&[("verified", "true")]);
        let qb = page_query::<PendingProduct>(&request_filter::<PendingProduct>(&p), &p);
        assert_eq!(
            qb.sql(),
            format!(
                "{} WHERE p.status = $1 ORDER BY p.created_at DESC, p.id DESC LIMIT $2 OFFSET $3",
                PendingProduct::SELECT
            )
        );
    }

    #[test]
    fn engineers_without_verified_have_no_where() {
        let p = params::<Engineer>(&[("sortBy", "name"), ("sortOrder", "1")]);
        let filter = request_filter::<Engineer>(&p);
        assert!(filter.is_empty());
        let qb = page_query::<Engineer>(&filter, &p);
        assert!(qb
            .sql()
            .ends_with("FROM engineers e LEFT JOIN users u ON u.id = e.added_by ORDER BY e.name ASC, e.id ASC LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn engineers_verified_filter() {
        let p = params::<Engineer>(&[("verified", "true")]);
        let qb = page_query::<Engineer>(&request_filter::<Engineer>(&p), &p);
        assert!(qb.sql().contains(" WHERE e.is_verified = $1 ORDER BY"));
    }

    #[test]
    fn ads_active_filter() {
        let p = params::<Ad>(&[("active", "false")]);
        assert_eq!(request_filter::<Ad>(&p), Filter::new().flag("active", false));
    }

    #[test]
    fn projections_exclude_sensitive_columns() {
        assert!(!Engineer::SELECT.contains("notes"));
        assert!(!Shop::SELECT.contains("verification_documents"));
    }

    #[test]
    fn sort_whitelists_reject_unknown_fields() {
        for schema in [
            PendingProduct::SCHEMA,
            Engineer::SCHEMA,
            Shop::SCHEMA,
            Ad::SCHEMA,
        ] {
            let query = ListQuery {
                sort_by: Some("password".to_string()),
                ..ListQuery::default()
            };
            assert!(query.parse(&schema).is_err());
            assert_eq!(schema.sort_fields[0].param, "createdAt");
        }
    }

    #[test]
    fn paged_result_uses_resource_key() {
        let result: PagedResult<Ad> = PagedResult {
            items: vec![],
            pagination: PageInfo::new(0, &Default::default()),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["ads"].as_array().unwrap().is_empty());
        assert_eq!(json["pagination"]["totalPages"], 0);
        assert_eq!(json["pagination"]["currentPage"], 1);
    }
}
