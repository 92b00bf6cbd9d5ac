//! Read-only aggregation over the marketplace collections.
//!
//! Exact counts, grouped product breakdowns and the rate arithmetic used by
//! the dashboard. Nothing is cached: each call reads the current table state.

use chrono::{DateTime, Duration, Local, LocalResult, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::errors::AppError;
use crate::models::filter::{Collection, Filter, TimestampField};

/// Product counts for one category (product `type`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub count: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub approval_rate: f64,
}

/// Product counts for one governorate.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct RegionalBreakdown {
    pub governorate: String,
    pub products: i64,
    pub pending: i64,
}

/// Intermediate row for category conditional aggregation.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub category: String,
    pub count: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

/// Exact number of rows in `collection` matching `filter`.
pub async fn count_by_filter(
    pool: &PgPool,
    collection: Collection,
    filter: &Filter,
) -> Result<i64, AppError> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ");
    qb.push(collection.table());
    filter.push_where(&mut qb, "");
    let count = qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    Ok(count)
}

/// Rows matching `filter` whose `field` falls on or after `since`.
pub async fn daily_count(
    pool: &PgPool,
    collection: Collection,
    filter: Filter,
    field: TimestampField,
    since: DateTime<Utc>,
) -> Result<i64, AppError> {
    count_by_filter(pool, collection, &filter.since(field, since)).await
}

/// Products grouped by type, largest category first.
pub async fn category_breakdown(pool: &PgPool) -> Result<Vec<CategoryBreakdown>, AppError> {
    let rows = sqlx::query_as::<_, CategoryRow>(
        r#"
        SELECT
            product_type AS category,
            COUNT(*) AS count,
            COALESCE(SUM(CASE WHEN status = 'pending'  THEN 1 ELSE 0 END), 0) AS pending,
            COALESCE(SUM(CASE WHEN status = 'approved' THEN 1 ELSE 0 END), 0) AS approved,
            COALESCE(SUM(CASE WHEN status = 'rejected' THEN 1 ELSE 0 END), 0) AS rejected
        FROM products
        GROUP BY product_type
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(breakdown_from_rows(rows))
}

/// Attach approval rates and order by count descending, then name.
pub fn breakdown_from_rows(rows: Vec<CategoryRow>) -> Vec<CategoryBreakdown> {
    let mut out: Vec<CategoryBreakdown> = rows
        .into_iter()
        .map(|row| CategoryBreakdown {
            approval_rate: rate(row.approved, row.count.max(1)),
            category: row.category,
            count: row.count,
            pending: row.pending,
            approved: row.approved,
            rejected: row.rejected,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    out
}

/// Products grouped by governorate, at most `limit` rows, busiest first.
pub async fn regional_breakdown(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<RegionalBreakdown>, AppError> {
    let rows = sqlx::query_as::<_, RegionalBreakdown>(
        r#"
        SELECT
            governorate,
            COUNT(*) AS products,
            COALESCE(SUM(CASE WHEN status = 'pending' THEN 1 ELSE 0 END), 0) AS pending
        FROM products
        GROUP BY governorate
        ORDER BY products DESC, governorate ASC
        LIMIT $1
        "#,
    )
    .bind(limit.max(0))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// `part / total * 100` rounded to one decimal; zero when `total` is zero.
pub fn rate(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    round1(part as f64 / total as f64 * 100.0)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Start of the current calendar day in server-local time.
pub fn start_of_local_day() -> DateTime<Utc> {
    start_of_day(&Local::now())
}

/// Midnight of `now`'s calendar day in its own time zone, as UTC.
///
/// A repeated midnight resolves to the earlier instant. A skipped midnight
/// (DST gap) resolves to the first valid local time after it.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let tz = now.timezone();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => t.with_timezone(&Utc),
        LocalResult::None => tz
            .from_local_datetime(&(midnight + Duration::hours(1)))
            .earliest()
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|| now.with_timezone(&Utc)),
    }
}
