//! Placeholder figures for dashboard sections the store has no data for.
//!
//! Nothing here is measured. System health, API performance, growth and the
//! quality score are fixed constants surfaced under their own keys so clients
//! and tests can tell them apart from computed values. Setting
//! `SYNTHETIC_METRICS=false` replaces them with `null`.

use serde::Serialize;

/// Fixed growth percentages shown in the activity section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticGrowth {
    pub products_percent: f64,
    pub users_percent: f64,
    pub shops_percent: f64,
    pub engineers_percent: f64,
}

/// Fixed API performance figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticApiPerformance {
    pub average_response_time_ms: u32,
    pub requests_per_minute: u32,
    pub error_rate_percent: f64,
}

/// Fixed system health block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticSystemHealth {
    pub status: &'static str,
    pub uptime_percent: f64,
    pub database_status: &'static str,
    pub storage_used_percent: f64,
}

/// The single declared source of every non-computed dashboard figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticMetrics {
    pub growth: SyntheticGrowth,
    pub api_performance: SyntheticApiPerformance,
    pub system_health: SyntheticSystemHealth,
    pub approximate_quality_score: f64,
}

impl SyntheticMetrics {
    pub const PLACEHOLDER: SyntheticMetrics = SyntheticMetrics {
        growth: SyntheticGrowth {
            products_percent: 12.5,
            users_percent: 8.3,
            shops_percent: 5.2,
            engineers_percent: 3.1,
        },
        api_performance: SyntheticApiPerformance {
            average_response_time_ms: 120,
            requests_per_minute: 450,
            error_rate_percent: 0.2,
        },
        system_health: SyntheticSystemHealth {
            status: "healthy",
            uptime_percent: 99.9,
            database_status: "connected",
            storage_used_percent: 45.0,
        },
        approximate_quality_score: 7.8,
    };

    /// Placeholders to inject at startup, or `None` when disabled.
    pub fn from_flag(enabled: bool) -> Option<Self> {
        enabled.then_some(Self::PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_flag_yields_none() {
        assert!(SyntheticMetrics::from_flag(false).is_none());
        assert_eq!(
            SyntheticMetrics::from_flag(true),
            Some(SyntheticMetrics::PLACEHOLDER)
        );
    }

    #[test]
    fn quality_score_is_declared_constant() {
        assert_eq!(SyntheticMetrics::PLACEHOLDER.approximate_quality_score, 7.8);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(SyntheticMetrics::PLACEHOLDER).unwrap();
        assert_eq!(json["approximateQualityScore"], 7.8);
        assert_eq!(json["systemHealth"]["status"], "healthy");
        assert_eq!(json["apiPerformance"]["averageResponseTimeMs"], 120);
    }
}
