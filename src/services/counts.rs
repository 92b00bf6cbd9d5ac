//! The four headline counts, bare and decorated as dashboard cards.

use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::filter::{Collection, Filter};
use crate::models::product::ProductStatus;
use crate::services::metrics::count_by_filter;

/// Raw headline counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineCounts {
    pub pending_products: i64,
    pub engineers: i64,
    pub shops: i64,
    pub ads: i64,
}

/// A count decorated with display metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountCard {
    pub title: &'static str,
    pub count: i64,
    pub subtitle: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCards {
    pub pending_products: CountCard,
    pub engineers: CountCard,
    pub shops: CountCard,
    pub ads: CountCard,
}

pub fn pending_products_filter() -> Filter {
    Filter::new().status(ProductStatus::Pending)
}

pub fn verified_active_filter() -> Filter {
    Filter::new().flag("is_verified", true).flag("is_active", true)
}

pub fn active_ads_filter() -> Filter {
    Filter::new().flag("active", true)
}

/// Fetch the four headline counts concurrently.
pub async fn fetch_counts(pool: &PgPool) -> Result<HeadlineCounts, AppError> {
    let pending = pending_products_filter();
    let verified = verified_active_filter();
    let active_ads = active_ads_filter();

    let (pending_products, engineers, shops, ads) = tokio::try_join!(
        count_by_filter(pool, Collection::Products, &pending),
        count_by_filter(pool, Collection::Engineers, &verified),
        count_by_filter(pool, Collection::Shops, &verified),
        count_by_filter(pool, Collection::Ads, &active_ads),
    )?;

    Ok(HeadlineCounts {
        pending_products,
        engineers,
        shops,
        ads,
    })
}

impl HeadlineCounts {
    pub fn decorate(&self) -> DashboardCards {
        DashboardCards {
            pending_products: CountCard {
                title: "Pending Products",
                count: self.pending_products,
                subtitle: "Awaiting review",
                icon: "clock",
                color: "orange",
            },
            engineers: CountCard {
                title: "Verified Engineers",
                count: self.engineers,
                subtitle: "Active and verified",
                icon: "wrench",
                color: "blue",
            },
            shops: CountCard {
                title: "Verified Shops",
                count: self.shops,
                subtitle: "Active and verified",
                icon: "store",
                color: "green",
            },
            ads: CountCard {
                title: "Active Ads",
                count: self.ads,
                subtitle: "Currently displayed",
                icon: "megaphone",
                color: "purple",
            },
        }
    }
}
