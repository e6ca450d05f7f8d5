//! Raw aggregate row shapes returned by the reports repository.
//!
//! These are grouping keys plus aggregate columns only; derived metrics
//! (ratios, shares, ranks) are computed downstream in the domain layer.
//! All sums arrive COALESCEd to zero, never null.

use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

/// Ungrouped totals over a (possibly date-bounded) row set.
#[derive(Debug, Clone, FromRow)]
pub struct RangeTotalsRow {
    pub leads: i64,
    pub spent: f64,
    pub facebook_results: i64,
    pub zoho_results: i64,
    pub campaigns: i64,
    pub report_days: i64,
}

/// One time-series bucket. `bucket` is a sortable label: `YYYY-MM-DD` for
/// days, `IYYY-Wnn` for ISO weeks, `YYYY-MM` for months.
#[derive(Debug, Clone, FromRow)]
pub struct TimeBucketRow {
    pub bucket: String,
    pub leads: i64,
    pub spent: f64,
    pub facebook_results: i64,
    pub zoho_results: i64,
}

/// Per-campaign totals, ordered by summed leads descending.
#[derive(Debug, Clone, FromRow)]
pub struct CampaignTotalsRow {
    pub campaign_id: Uuid,
    pub campaign_name: String,
    pub brand: String,
    pub campaign_type: String,
    pub leads: i64,
    pub spent: f64,
    pub facebook_results: i64,
    pub zoho_results: i64,
    pub report_days: i64,
}

/// Per-brand totals with the SQL-level source split percentages.
#[derive(Debug, Clone, FromRow)]
pub struct BrandTotalsRow {
    pub brand: String,
    pub brand_name: String,
    pub campaigns: i64,
    pub leads: i64,
    pub spent: f64,
    pub facebook_results: i64,
    pub zoho_results: i64,
    /// Row-average of the stored per-row cost_per_lead column.
    pub avg_cost_per_lead: f64,
    pub facebook_percentage: f64,
    pub zoho_percentage: f64,
}

/// One ISO `(year, week)` bucket for trend analysis.
#[derive(Debug, Clone, FromRow)]
pub struct WeeklyBucketRow {
    pub iso_year: i32,
    pub iso_week: i32,
    pub leads: i64,
    pub spent: f64,
}

/// One underlying report row joined with its campaign, for detailed export.
#[derive(Debug, Clone, FromRow)]
pub struct DetailedReportRow {
    pub report_date: NaiveDate,
    pub campaign_name: String,
    pub brand: String,
    pub campaign_type: String,
    pub leads: i64,
    pub spent: f64,
    pub facebook_result: i64,
    pub zoho_result: i64,
    pub cost_per_lead: f64,
}
