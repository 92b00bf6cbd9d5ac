//! Composite admin dashboard assembled from the metric aggregator.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::config::synthetic::{
    SyntheticApiPerformance, SyntheticGrowth, SyntheticMetrics, SyntheticSystemHealth,
};
use crate::errors::AppError;
use crate::models::filter::{Collection, Filter, TimestampField};
use crate::models::product::ProductStatus;
use crate::services::counts::{self, DashboardCards};
use crate::services::metrics::{
    self, count_by_filter, daily_count, CategoryBreakdown, RegionalBreakdown,
};

/// Full payload of `GET /dashboard-stats`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub dashboard_cards: DashboardCards,
    pub overview: Overview,
    pub activity: Activity,
    pub performance: Performance,
    pub regional: Vec<RegionalBreakdown>,
    pub system_health: Option<SyntheticSystemHealth>,
    pub last_updated: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
}

/// Collection totals and overall moderation rates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_products: i64,
    pub pending_products: i64,
    pub approved_products: i64,
    pub rejected_products: i64,
    pub approval_rate: f64,
    pub rejection_rate: f64,
    pub total_shops: i64,
    pub active_shops: i64,
    pub total_engineers: i64,
    pub active_engineers: i64,
    pub total_ads: i64,
    pub active_ads: i64,
    pub total_users: i64,
}

/// Counts since local midnight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayActivity {
    pub new_products: i64,
    pub approved_today: i64,
    pub rejected_today: i64,
    pub new_users: i64,
    pub new_shops: i64,
    pub new_engineers: i64,
    pub new_ads: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub today: TodayActivity,
    pub since: DateTime<Utc>,
    pub growth: Option<SyntheticGrowth>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub categories: Vec<CategoryBreakdown>,
    pub approximate_quality_score: Option<f64>,
    pub api: Option<SyntheticApiPerformance>,
}

/// Product status totals before rates are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductTotals {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

/// Remaining collection totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionTotals {
    pub shops: i64,
    pub active_shops: i64,
    pub engineers: i64,
    pub active_engineers: i64,
    pub ads: i64,
    pub active_ads: i64,
    pub users: i64,
}

impl Overview {
    pub fn from_totals(products: ProductTotals, rest: CollectionTotals) -> Self {
        Self {
            total_products: products.total,
            pending_products: products.pending,
            approved_products: products.approved,
            rejected_products: products.rejected,
            approval_rate: metrics::rate(products.approved, products.total),
            rejection_rate: metrics::rate(products.rejected, products.total),
            total_shops: rest.shops,
            active_shops: rest.active_shops,
            total_engineers: rest.engineers,
            active_engineers: rest.active_engineers,
            total_ads: rest.ads,
            active_ads: rest.active_ads,
            total_users: rest.users,
        }
    }
}

/// Fetch every dashboard section concurrently and assemble the payload.
///
/// `synthetic` supplies the placeholder sections; `None` leaves them `null`.
pub async fn get_stats(
    pool: &PgPool,
    synthetic: Option<&SyntheticMetrics>,
    regional_limit: i64,
) -> Result<DashboardStats, AppError> {
    let since = metrics::start_of_local_day();

    let (headline, products, totals, today, categories, regional) = tokio::try_join!(
        counts::fetch_counts(pool),
        fetch_product_totals(pool),
        fetch_collection_totals(pool),
        fetch_today(pool, since),
        metrics::category_breakdown(pool),
        metrics::regional_breakdown(pool, regional_limit),
    )?;
    let last_updated = Utc::now();

    Ok(DashboardStats {
        dashboard_cards: headline.decorate(),
        overview: Overview::from_totals(products, totals),
        activity: Activity {
            today,
            since,
            growth: synthetic.map(|s| s.growth.clone()),
        },
        performance: Performance {
            categories,
            approximate_quality_score: synthetic.map(|s| s.approximate_quality_score),
            api: synthetic.map(|s| s.api_performance.clone()),
        },
        regional,
        system_health: synthetic.map(|s| s.system_health.clone()),
        last_updated,
        generated_at: Utc::now(),
    })
}

async fn fetch_product_totals(pool: &PgPool) -> Result<ProductTotals, AppError> {
    let all = Filter::new();
    let pending = Filter::new().status(ProductStatus::Pending);
    let approved = Filter::new().status(ProductStatus::Approved);
    let rejected = Filter::new().status(ProductStatus::Rejected);

    let (total, pending, approved, rejected) = tokio::try_join!(
        count_by_filter(pool, Collection::Products, &all),
        count_by_filter(pool, Collection::Products, &pending),
        count_by_filter(pool, Collection::Products, &approved),
        count_by_filter(pool, Collection::Products, &rejected),
    )?;

    Ok(ProductTotals {
        total,
        pending,
        approved,
        rejected,
    })
}

async fn fetch_collection_totals(pool: &PgPool) -> Result<CollectionTotals, AppError> {
    let all = Filter::new();
    let verified_active = counts::verified_active_filter();
    let active_ads = counts::active_ads_filter();

    let (shops, active_shops, engineers, active_engineers, ads, active_ads, users) = tokio::try_join!(
        count_by_filter(pool, Collection::Shops, &all),
        count_by_filter(pool, Collection::Shops, &verified_active),
        count_by_filter(pool, Collection::Engineers, &all),
        count_by_filter(pool, Collection::Engineers, &verified_active),
        count_by_filter(pool, Collection::Ads, &all),
        count_by_filter(pool, Collection::Ads, &active_ads),
        count_by_filter(pool, Collection::Users, &all),
    )?;

    Ok(CollectionTotals {
        shops,
        active_shops,
        engineers,
        active_engineers,
        ads,
        active_ads,
        users,
    })
}

/// Approvals and rejections are dated by `updated_at`, everything else by
/// `created_at`.
async fn fetch_today(pool: &PgPool, since: DateTime<Utc>) -> Result<TodayActivity, AppError> {
    use TimestampField::{CreatedAt, UpdatedAt};

    let (new_products, approved_today, rejected_today, new_users, new_shops, new_engineers, new_ads) = tokio::try_join!(
        daily_count(pool, Collection::Products, Filter::new(), CreatedAt, since),
        daily_count(
            pool,
            Collection::Products,
            Filter::new().status(ProductStatus::Approved),
            UpdatedAt,
            since
        ),
        daily_count(
            pool,
            Collection::Products,
            Filter::new().status(ProductStatus::Rejected),
            UpdatedAt,
            since
        ),
        daily_count(pool, Collection::Users, Filter::new(), CreatedAt, since),
        daily_count(pool, Collection::Shops, Filter::new(), CreatedAt, since),
        daily_count(pool, Collection::Engineers, Filter::new(), CreatedAt, since),
        daily_count(pool, Collection::Ads, Filter::new(), CreatedAt, since),
    )?;

    Ok(TodayActivity {
        new_products,
        approved_today,
        rejected_today,
        new_users,
        new_shops,
        new_engineers,
        new_ads,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest() -> CollectionTotals {
        CollectionTotals {
            shops: 3,
            active_shops: 2,
            engineers: 5,
            active_engineers: 4,
            ads: 2,
            active_ads: 1,
            users: 10,
        }
    }

    #[test]
    fn overview_with_no_products_has_zero_rates() {
        let overview = Overview::from_totals(
            ProductTotals {
                total: 0,
                pending: 0,
                approved: 0,
                rejected: 0,
            },
            rest(),
        );
        assert_eq!(overview.approval_rate, 0.0);
        assert_eq!(overview.rejection_rate, 0.0);
        assert_eq!(overview.total_users, 10);
    }

    #[test]
    fn overview_rates_round_to_one_decimal() {
        let overview = Overview::from_totals(
            ProductTotals {
                total: 3,
                pending: 1,
                approved: 1,
                rejected: 1,
            },
            rest(),
        );
        assert_eq!(overview.approval_rate, 33.3);
        assert_eq!(overview.rejection_rate, 33.3);
    }

    fn stats(synthetic: Option<&SyntheticMetrics>) -> DashboardStats {
        let headline = counts::HeadlineCounts {
            pending_products: 1,
            engineers: 4,
            shops: 2,
            ads: 1,
        };
        DashboardStats {
            dashboard_cards: headline.decorate(),
            overview: Overview::from_totals(
                ProductTotals {
                    total: 2,
                    pending: 1,
                    approved: 1,
                    rejected: 0,
                },
                rest(),
            ),
            activity: Activity {
                today: TodayActivity {
                    new_products: 0,
                    approved_today: 0,
                    rejected_today: 0,
                    new_users: 0,
                    new_shops: 0,
                    new_engineers: 0,
                    new_ads: 0,
                },
                since: Utc::now(),
                growth: synthetic.map(|s| s.growth.clone()),
            },
            performance: Performance {
                categories: vec![],
                approximate_quality_score: synthetic.map(|s| s.approximate_quality_score),
                api: synthetic.map(|s| s.api_performance.clone()),
            },
            regional: vec![],
            system_health: synthetic.map(|s| s.system_health.clone()),
            last_updated: Utc::now(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn payload_has_documented_sections() {
        let json = serde_json::to_value(stats(Some(&SyntheticMetrics::PLACEHOLDER))).unwrap();
        for key in [
            "dashboardCards",
            "overview",
            "activity",
            "performance",
            "regional",
            "systemHealth",
            "lastUpdated",
            "generatedAt",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["performance"]["approximateQualityScore"], 7.8);
        assert_eq!(json["overview"]["approvalRate"], 50.0);
    }

    #[test]
    fn disabled_synthetic_metrics_keep_shape() {
        let json = serde_json::to_value(stats(None)).unwrap();
        assert!(json["systemHealth"].is_null());
        assert!(json["activity"]["growth"].is_null());
        assert!(json["performance"]["approximateQualityScore"].is_null());
        assert!(json["performance"]["api"].is_null());
    }
}
