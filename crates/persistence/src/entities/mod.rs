//! Database row mappings.

pub mod report;

pub use report::{
    BrandTotalsRow, CampaignTotalsRow, DetailedReportRow, RangeTotalsRow, TimeBucketRow,
    WeeklyBucketRow,
};
