//! Post-processing over raw grouped aggregates: trend windows, market
//! shares, and rank annotation.

use crate::models::report::{BrandPerformance, CampaignPerformance, TrendSummary, WeeklyTrendBucket};
use crate::services::metrics::{percent_change, ratio_or_zero};

/// How many weekly buckets are averaged on each end of the trend window.
const TREND_WINDOW_BUCKETS: usize = 3;

/// Computes period-over-period trends from ordered weekly buckets.
///
/// Compares the mean of the last `TREND_WINDOW_BUCKETS` buckets against the
/// mean of the first `TREND_WINDOW_BUCKETS`. Short series cap the window at
/// half the bucket count so the two slices never coincide; a 2-bucket
/// series degenerates to a direct first-vs-last comparison. Fewer than two
/// buckets is insufficient data and yields all-zero trends, not an error.
pub fn compute_trends(buckets: &[WeeklyTrendBucket]) -> TrendSummary {
    if buckets.len() < 2 {
        return TrendSummary::default();
    }

    let window = TREND_WINDOW_BUCKETS.min(buckets.len() / 2).max(1);
    let earlier = &buckets[..window];
    let recent = &buckets[buckets.len() - window..];

    let mean = |slice: &[WeeklyTrendBucket], f: fn(&WeeklyTrendBucket) -> f64| -> f64 {
        slice.iter().map(f).sum::<f64>() / slice.len() as f64
    };

    TrendSummary {
        leads_trend: percent_change(
            mean(earlier, |b| b.leads as f64),
            mean(recent, |b| b.leads as f64),
        ),
        spend_trend: percent_change(mean(earlier, |b| b.spent), mean(recent, |b| b.spent)),
        cpl_trend: percent_change(
            mean(earlier, |b| b.cost_per_lead),
            mean(recent, |b| b.cost_per_lead),
        ),
    }
}

/// Fills in `market_share_by_leads` / `market_share_by_spend` as each
/// brand's share of the totals across the returned rows.
///
/// This is deliberately a second in-memory pass over the rows the grouping
/// query returned (not a separate global-total query); keeping it behind
/// this function makes a future move to a SQL window-function pass a local
/// change.
pub fn apply_market_share(brands: &mut [BrandPerformance]) {
    let total_leads: i64 = brands.iter().map(|b| b.leads).sum();
    let total_spend: f64 = brands.iter().map(|b| b.spent).sum();

    for brand in brands.iter_mut() {
        brand.market_share_by_leads =
            ratio_or_zero(brand.leads as f64, total_leads as f64) * 100.0;
        brand.market_share_by_spend = ratio_or_zero(brand.spent, total_spend) * 100.0;
    }
}

/// Annotates rows with their 1-based position in the already-ordered,
/// already-limited result.
pub fn annotate_ranks(campaigns: &mut [CampaignPerformance]) {
    for (index, campaign) in campaigns.iter_mut().enumerate() {
        campaign.rank = index as u32 + 1;
    }
}
