//! Report aggregate models.
//!
//! These are the response-facing shapes produced by post-processing raw
//! grouped aggregates from the persistence layer. All ratio fields follow
//! the zero-division policy in `services::metrics`: a ratio with a zero
//! denominator is `0`, never NaN or infinity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Time-series bucket granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Day,
    Week,
    Month,
}

impl GroupBy {
    /// Parses the `group_by` query parameter. Unknown values are rejected
    /// (not defaulted) so callers get an explicit 400.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// Ungrouped totals over a row set.
///
/// `avg_cost_per_lead` is the explicit `spent / leads` ratio (zero-guarded),
/// not the row-average of the stored per-row column.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewSummary {
    pub leads: i64,
    pub spent: f64,
    pub facebook_results: i64,
    pub zoho_results: i64,
    pub avg_cost_per_lead: f64,
    pub campaigns: i64,
    pub report_days: i64,
}

/// Day-over-day percentage changes shown on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DayComparison {
    pub leads_change: f64,
    pub spend_change: f64,
}

/// Full dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub overview: OverviewSummary,
    pub today: OverviewSummary,
    pub yesterday: OverviewSummary,
    pub day_over_day: DayComparison,
    pub top_campaigns: Vec<CampaignPerformance>,
    pub brands: Vec<BrandPerformance>,
}

/// One time-series bucket (day, ISO week, or month).
#[derive(Debug, Clone, Serialize)]
pub struct TimeSeriesPoint {
    pub bucket: String,
    pub leads: i64,
    pub spent: f64,
    pub facebook_results: i64,
    pub zoho_results: i64,
    pub avg_cost_per_lead: f64,
}

/// Per-campaign aggregate with derived daily averages and efficiency.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignPerformance {
    /// 1-based position in the descending-leads ordering of the returned
    /// (already limited) result.
    pub rank: u32,
    pub campaign_id: Uuid,
    pub campaign_name: String,
    pub brand: String,
    pub campaign_type: String,
    pub leads: i64,
    pub spent: f64,
    pub facebook_results: i64,
    pub zoho_results: i64,
    pub report_days: i64,
    pub avg_daily_leads: f64,
    pub avg_daily_spend: f64,
    pub avg_cost_per_lead: f64,
    /// `leads / spent * 100`, 0 when nothing was spent.
    pub efficiency: f64,
}

/// Per-brand aggregate with source split and market shares.
///
/// Market shares are computed in a second in-memory pass over the returned
/// brand rows (each brand's share of the sum across all returned brands),
/// see `services::analysis::apply_market_share`.
#[derive(Debug, Clone, Serialize)]
pub struct BrandPerformance {
    pub brand: String,
    pub brand_name: String,
    pub campaigns: i64,
    pub leads: i64,
    pub spent: f64,
    pub facebook_results: i64,
    pub zoho_results: i64,
    pub avg_cost_per_lead: f64,
    pub facebook_percentage: f64,
    pub zoho_percentage: f64,
    pub market_share_by_leads: f64,
    pub market_share_by_spend: f64,
}

/// One ISO-week bucket used for trend computation.
///
/// The `(iso_year, iso_week)` composite key avoids collisions across year
/// boundaries.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyTrendBucket {
    pub iso_year: i32,
    pub iso_week: i32,
    pub leads: i64,
    pub spent: f64,
    pub cost_per_lead: f64,
}

/// Period-over-period trend percentages comparing the mean of the most
/// recent weekly buckets against the mean of the earliest ones.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TrendSummary {
    pub leads_trend: f64,
    pub spend_trend: f64,
    pub cpl_trend: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_parse() {
        assert_eq!(GroupBy::parse("day"), Some(GroupBy::Day));
        assert_eq!(GroupBy::parse("week"), Some(GroupBy::Week));
        assert_eq!(GroupBy::parse("month"), Some(GroupBy::Month));
        assert_eq!(GroupBy::parse("hour"), None);
        assert_eq!(GroupBy::parse(""), None);
    }

    #[test]
    fn test_group_by_default_is_day() {
        assert_eq!(GroupBy::default(), GroupBy::Day);
    }

    #[test]
    fn test_overview_summary_serialization() {
        let summary = OverviewSummary {
            leads: 30,
            spent: 250.0,
            facebook_results: 20,
            zoho_results: 10,
            avg_cost_per_lead: 8.3,
            campaigns: 2,
            report_days: 3,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"leads\":30"));
        assert!(json.contains("\"avg_cost_per_lead\":8.3"));
        assert!(json.contains("\"report_days\":3"));
    }

    #[test]
    fn test_trend_summary_default_is_zero() {
        let trends = TrendSummary::default();
        assert_eq!(trends.leads_trend, 0.0);
        assert_eq!(trends.spend_trend, 0.0);
        assert_eq!(trends.cpl_trend, 0.0);
    }
}
