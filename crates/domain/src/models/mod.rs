//! Domain models.

pub mod insight;
pub mod principal;
pub mod report;

pub use insight::{Insight, InsightCategory, InsightType};
pub use principal::{AccessScope, Principal};
pub use report::{
    BrandPerformance, CampaignPerformance, DashboardData, DayComparison, GroupBy,
    OverviewSummary, TimeSeriesPoint, TrendSummary, WeeklyTrendBucket,
};
