//! Maps raw aggregate rows onto response-facing domain models.
//!
//! Derived ratios are computed here from unrounded sums and rounded to one
//! decimal at this boundary only. Sums and counts pass through untouched.

use domain::models::{
    BrandPerformance, CampaignPerformance, DayComparison, OverviewSummary, TimeSeriesPoint,
    WeeklyTrendBucket,
};
use domain::services::analysis::{annotate_ranks, apply_market_share};
use domain::services::metrics::{percent_change, ratio_or_zero, round1};
use persistence::entities::{
    BrandTotalsRow, CampaignTotalsRow, RangeTotalsRow, TimeBucketRow, WeeklyBucketRow,
};

pub fn overview(row: &RangeTotalsRow) -> OverviewSummary {
    OverviewSummary {
        leads: row.leads,
        spent: round1(row.spent),
        facebook_results: row.facebook_results,
        zoho_results: row.zoho_results,
        avg_cost_per_lead: round1(ratio_or_zero(row.spent, row.leads as f64)),
        campaigns: row.campaigns,
        report_days: row.report_days,
    }
}

pub fn day_comparison(yesterday: &RangeTotalsRow, today: &RangeTotalsRow) -> DayComparison {
    DayComparison {
        leads_change: round1(percent_change(yesterday.leads as f64, today.leads as f64)),
        spend_change: round1(percent_change(yesterday.spent, today.spent)),
    }
}

pub fn time_series_point(row: TimeBucketRow) -> TimeSeriesPoint {
    let avg_cost_per_lead = round1(ratio_or_zero(row.spent, row.leads as f64));
    TimeSeriesPoint {
        bucket: row.bucket,
        leads: row.leads,
        spent: round1(row.spent),
        facebook_results: row.facebook_results,
        zoho_results: row.zoho_results,
        avg_cost_per_lead,
    }
}

/// Maps campaign rows (already ordered by leads descending and limited)
/// and annotates 1-based ranks.
pub fn campaign_performance(rows: Vec<CampaignTotalsRow>) -> Vec<CampaignPerformance> {
    let mut campaigns: Vec<CampaignPerformance> = rows
        .into_iter()
        .map(|row| CampaignPerformance {
            rank: 0,
            campaign_id: row.campaign_id,
            campaign_name: row.campaign_name,
            brand: row.brand,
            campaign_type: row.campaign_type,
            leads: row.leads,
            spent: round1(row.spent),
            facebook_results: row.facebook_results,
            zoho_results: row.zoho_results,
            report_days: row.report_days,
            avg_daily_leads: round1(ratio_or_zero(row.leads as f64, row.report_days as f64)),
            avg_daily_spend: round1(ratio_or_zero(row.spent, row.report_days as f64)),
            avg_cost_per_lead: round1(ratio_or_zero(row.spent, row.leads as f64)),
            efficiency: round1(ratio_or_zero(row.leads as f64, row.spent) * 100.0),
        })
        .collect();
    annotate_ranks(&mut campaigns);
    campaigns
}

/// Maps brand rows, fills in market shares over the returned set, then
/// rounds the display fields.
pub fn brand_performance(rows: Vec<BrandTotalsRow>) -> Vec<BrandPerformance> {
    let mut brands: Vec<BrandPerformance> = rows
        .into_iter()
        .map(|row| BrandPerformance {
            brand: row.brand,
            brand_name: row.brand_name,
            campaigns: row.campaigns,
            leads: row.leads,
            spent: row.spent,
            facebook_results: row.facebook_results,
            zoho_results: row.zoho_results,
            avg_cost_per_lead: row.avg_cost_per_lead,
            facebook_percentage: row.facebook_percentage,
            zoho_percentage: row.zoho_percentage,
            market_share_by_leads: 0.0,
            market_share_by_spend: 0.0,
        })
        .collect();

    // Shares are computed over unrounded spend totals.
    apply_market_share(&mut brands);

    for brand in brands.iter_mut() {
        brand.spent = round1(brand.spent);
        brand.avg_cost_per_lead = round1(brand.avg_cost_per_lead);
        brand.facebook_percentage = round1(brand.facebook_percentage);
        brand.zoho_percentage = round1(brand.zoho_percentage);
        brand.market_share_by_leads = round1(brand.market_share_by_leads);
        brand.market_share_by_spend = round1(brand.market_share_by_spend);
    }
    brands
}

/// Trend buckets stay unrounded: they feed the trend means, and rounding
/// before averaging would compound error.
pub fn weekly_bucket(row: WeeklyBucketRow) -> WeeklyTrendBucket {
    let cost_per_lead = ratio_or_zero(row.spent, row.leads as f64);
    WeeklyTrendBucket {
        iso_year: row.iso_year,
        iso_week: row.iso_week,
        leads: row.leads,
        spent: row.spent,
        cost_per_lead,
    }
}

/// Display copy of a trend bucket with rounded figures.
pub fn rounded_bucket(bucket: &WeeklyTrendBucket) -> WeeklyTrendBucket {
    WeeklyTrendBucket {
        iso_year: bucket.iso_year,
        iso_week: bucket.iso_week,
        leads: bucket.leads,
        spent: round1(bucket.spent),
        cost_per_lead: round1(bucket.cost_per_lead),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn totals(leads: i64, spent: f64) -> RangeTotalsRow {
        RangeTotalsRow {
            leads,
            spent,
            facebook_results: 0,
            zoho_results: 0,
            campaigns: 1,
            report_days: 1,
        }
    }

    #[test]
    fn test_overview_cost_per_lead_zero_leads() {
        let summary = overview(&totals(0, 500.0));
        assert_eq!(summary.avg_cost_per_lead, 0.0);
    }

    #[test]
    fn test_overview_cost_per_lead_rounded() {
        let summary = overview(&totals(3, 100.0));
        assert_eq!(summary.avg_cost_per_lead, 33.3);
    }

    #[test]
    fn test_day_comparison_zero_yesterday_is_zero() {
        let comparison = day_comparison(&totals(0, 0.0), &totals(50, 500.0));
        assert_eq!(comparison.leads_change, 0.0);
        assert_eq!(comparison.spend_change, 0.0);
    }

    #[test]
    fn test_day_comparison_change() {
        let comparison = day_comparison(&totals(100, 1000.0), &totals(150, 800.0));
        assert_eq!(comparison.leads_change, 50.0);
        assert_eq!(comparison.spend_change, -20.0);
    }

    #[test]
    fn test_campaign_derived_fields() {
        let rows = vec![CampaignTotalsRow {
            campaign_id: Uuid::new_v4(),
            campaign_name: "spring-sale".to_string(),
            brand: "acme".to_string(),
            campaign_type: "search".to_string(),
            leads: 40,
            spent: 500.0,
            facebook_results: 25,
            zoho_results: 15,
            report_days: 10,
        }];

        let campaigns = campaign_performance(rows);
        let c = &campaigns[0];
        assert_eq!(c.rank, 1);
        assert_eq!(c.avg_daily_leads, 4.0);
        assert_eq!(c.avg_daily_spend, 50.0);
        assert_eq!(c.avg_cost_per_lead, 12.5);
        assert_eq!(c.efficiency, 8.0); // 40 / 500 * 100
    }

    #[test]
    fn test_campaign_zero_spend_efficiency() {
        let rows = vec![CampaignTotalsRow {
            campaign_id: Uuid::new_v4(),
            campaign_name: "organic".to_string(),
            brand: "acme".to_string(),
            campaign_type: "social".to_string(),
            leads: 10,
            spent: 0.0,
            facebook_results: 10,
            zoho_results: 0,
            report_days: 5,
        }];

        let campaigns = campaign_performance(rows);
        assert_eq!(campaigns[0].efficiency, 0.0);
        assert_eq!(campaigns[0].avg_cost_per_lead, 0.0);
    }

    #[test]
    fn test_brand_market_shares_filled_and_rounded() {
        let row = |brand: &str, leads: i64, spent: f64| BrandTotalsRow {
            brand: brand.to_string(),
            brand_name: brand.to_uppercase(),
            campaigns: 1,
            leads,
            spent,
            facebook_results: 0,
            zoho_results: 0,
            avg_cost_per_lead: 0.0,
            facebook_percentage: 0.0,
            zoho_percentage: 0.0,
        };

        let brands = brand_performance(vec![row("acme", 75, 300.0), row("globex", 25, 100.0)]);
        assert_eq!(brands[0].market_share_by_leads, 75.0);
        assert_eq!(brands[1].market_share_by_leads, 25.0);
        assert_eq!(brands[0].market_share_by_spend, 75.0);

        let sum: f64 = brands.iter().map(|b| b.market_share_by_leads).sum();
        assert!((sum - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_weekly_bucket_cost_per_lead_unrounded() {
        let bucket = weekly_bucket(WeeklyBucketRow {
            iso_year: 2025,
            iso_week: 3,
            leads: 3,
            spent: 100.0,
        });
        // Full precision preserved for the trend means.
        assert!((bucket.cost_per_lead - 100.0 / 3.0).abs() < 1e-12);

        let display = rounded_bucket(&bucket);
        assert_eq!(display.cost_per_lead, 33.3);
    }
}
