//! Aggregation queries over daily campaign report rows.
//!
//! Every query applies the same access predicate: a `NULL` scope uuid means
//! unrestricted, otherwise rows are limited to `created_by = scope`. Optional
//! date bounds use the same null-means-unbounded shape so one statement
//! serves both the all-time and the windowed variants.

use chrono::NaiveDate;
use domain::models::{AccessScope, GroupBy};
use sqlx::PgPool;
use tracing::instrument;

use crate::entities::{
    BrandTotalsRow, CampaignTotalsRow, DetailedReportRow, RangeTotalsRow, TimeBucketRow,
    WeeklyBucketRow,
};

/// How many campaigns the dashboard snapshot carries.
const DASHBOARD_TOP_CAMPAIGNS: i64 = 5;
/// How many brands the dashboard snapshot carries.
const DASHBOARD_TOP_BRANDS: i64 = 10;

/// All aggregates the dashboard overview needs, fetched in one fan-out.
#[derive(Debug)]
pub struct DashboardSnapshot {
    pub overall: RangeTotalsRow,
    pub today: RangeTotalsRow,
    pub yesterday: RangeTotalsRow,
    pub top_campaigns: Vec<CampaignTotalsRow>,
    pub brands: Vec<BrandTotalsRow>,
}

/// Repository for aggregated report queries.
#[derive(Debug, Clone)]
pub struct ReportsRepository {
    pool: PgPool,
}

impl ReportsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ungrouped totals over an optionally date-bounded row set.
    #[instrument(skip(self))]
    pub async fn totals(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        scope: &AccessScope,
    ) -> Result<RangeTotalsRow, sqlx::Error> {
        sqlx::query_as::<_, RangeTotalsRow>(
            r#"
            SELECT
                COALESCE(SUM(r.leads), 0)::bigint AS leads,
                COALESCE(SUM(r.spent), 0)::float8 AS spent,
                COALESCE(SUM(r.facebook_result), 0)::bigint AS facebook_results,
                COALESCE(SUM(r.zoho_result), 0)::bigint AS zoho_results,
                COUNT(DISTINCT r.campaign_id)::bigint AS campaigns,
                COUNT(DISTINCT r.report_date)::bigint AS report_days
            FROM reports r
            WHERE ($1::date IS NULL OR r.report_date >= $1)
              AND ($2::date IS NULL OR r.report_date <= $2)
              AND ($3::uuid IS NULL OR r.created_by = $3)
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(scope.restrict_to)
        .fetch_one(&self.pool)
        .await
    }

    /// Totals grouped into day, ISO-week or month buckets, oldest first.
    ///
    /// The bucket label expression is selected from a fixed set here; user
    /// input never reaches the statement text.
    #[instrument(skip(self))]
    pub async fn time_series(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        group_by: GroupBy,
        scope: &AccessScope,
    ) -> Result<Vec<TimeBucketRow>, sqlx::Error> {
        let bucket_expr = match group_by {
            GroupBy::Day => "to_char(r.report_date, 'YYYY-MM-DD')",
            GroupBy::Week => r#"to_char(r.report_date, 'IYYY-"W"IW')"#,
            GroupBy::Month => "to_char(r.report_date, 'YYYY-MM')",
        };
        let sql = format!(
            r#"
            SELECT
                {bucket_expr} AS bucket,
                COALESCE(SUM(r.leads), 0)::bigint AS leads,
                COALESCE(SUM(r.spent), 0)::float8 AS spent,
                COALESCE(SUM(r.facebook_result), 0)::bigint AS facebook_results,
                COALESCE(SUM(r.zoho_result), 0)::bigint AS zoho_results
            FROM reports r
            WHERE r.report_date >= $1
              AND r.report_date <= $2
              AND ($3::uuid IS NULL OR r.created_by = $3)
            GROUP BY 1
            ORDER BY 1 ASC
            "#
        );
        sqlx::query_as::<_, TimeBucketRow>(&sql)
            .bind(from)
            .bind(to)
            .bind(scope.restrict_to)
            .fetch_all(&self.pool)
            .await
    }

    /// Per-campaign totals ordered by summed leads descending.
    ///
    /// `limit = None` returns every campaign in scope (used by exports).
    #[instrument(skip(self))]
    pub async fn campaign_totals(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        scope: &AccessScope,
        limit: Option<i64>,
    ) -> Result<Vec<CampaignTotalsRow>, sqlx::Error> {
        sqlx::query_as::<_, CampaignTotalsRow>(
            r#"
            SELECT
                c.id AS campaign_id,
                c.name AS campaign_name,
                c.brand AS brand,
                c.campaign_type AS campaign_type,
                COALESCE(SUM(r.leads), 0)::bigint AS leads,
                COALESCE(SUM(r.spent), 0)::float8 AS spent,
                COALESCE(SUM(r.facebook_result), 0)::bigint AS facebook_results,
                COALESCE(SUM(r.zoho_result), 0)::bigint AS zoho_results,
                COUNT(DISTINCT r.report_date)::bigint AS report_days
            FROM reports r
            JOIN campaigns c ON c.id = r.campaign_id
            WHERE ($1::date IS NULL OR r.report_date >= $1)
              AND ($2::date IS NULL OR r.report_date <= $2)
              AND ($3::uuid IS NULL OR r.created_by = $3)
            GROUP BY c.id, c.name, c.brand, c.campaign_type
            ORDER BY SUM(r.leads) DESC, c.name ASC
            LIMIT $4
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(scope.restrict_to)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Per-brand totals with the lead-source split computed in SQL.
    ///
    /// Market shares are intentionally not computed here: they depend on the
    /// totals of the returned set and are filled in by the domain layer.
    #[instrument(skip(self))]
    pub async fn brand_totals(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        scope: &AccessScope,
        limit: Option<i64>,
    ) -> Result<Vec<BrandTotalsRow>, sqlx::Error> {
        sqlx::query_as::<_, BrandTotalsRow>(
            r#"
            SELECT
                c.brand AS brand,
                MIN(c.brand_name) AS brand_name,
                COUNT(DISTINCT c.id)::bigint AS campaigns,
                COALESCE(SUM(r.leads), 0)::bigint AS leads,
                COALESCE(SUM(r.spent), 0)::float8 AS spent,
                COALESCE(SUM(r.facebook_result), 0)::bigint AS facebook_results,
                COALESCE(SUM(r.zoho_result), 0)::bigint AS zoho_results,
                COALESCE(AVG(r.cost_per_lead), 0)::float8 AS avg_cost_per_lead,
                (CASE WHEN COALESCE(SUM(r.leads), 0) > 0
                      THEN SUM(r.facebook_result)::float8 / SUM(r.leads)::float8 * 100
                      ELSE 0 END)::float8 AS facebook_percentage,
                (CASE WHEN COALESCE(SUM(r.leads), 0) > 0
                      THEN SUM(r.zoho_result)::float8 / SUM(r.leads)::float8 * 100
                      ELSE 0 END)::float8 AS zoho_percentage
            FROM reports r
            JOIN campaigns c ON c.id = r.campaign_id
            WHERE ($1::date IS NULL OR r.report_date >= $1)
              AND ($2::date IS NULL OR r.report_date <= $2)
              AND ($3::uuid IS NULL OR r.created_by = $3)
            GROUP BY c.brand
            ORDER BY SUM(r.leads) DESC, c.brand ASC
            LIMIT $4
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(scope.restrict_to)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    /// Totals per ISO `(year, week)` bucket, oldest first.
    #[instrument(skip(self))]
    pub async fn weekly_buckets(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        scope: &AccessScope,
    ) -> Result<Vec<WeeklyBucketRow>, sqlx::Error> {
        sqlx::query_as::<_, WeeklyBucketRow>(
            r#"
            SELECT
                EXTRACT(ISOYEAR FROM r.report_date)::int4 AS iso_year,
                EXTRACT(WEEK FROM r.report_date)::int4 AS iso_week,
                COALESCE(SUM(r.leads), 0)::bigint AS leads,
                COALESCE(SUM(r.spent), 0)::float8 AS spent
            FROM reports r
            WHERE r.report_date >= $1
              AND r.report_date <= $2
              AND ($3::uuid IS NULL OR r.created_by = $3)
            GROUP BY 1, 2
            ORDER BY 1 ASC, 2 ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(scope.restrict_to)
        .fetch_all(&self.pool)
        .await
    }

    /// Underlying report rows joined with their campaign, for detailed export.
    #[instrument(skip(self))]
    pub async fn detailed_rows(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        scope: &AccessScope,
    ) -> Result<Vec<DetailedReportRow>, sqlx::Error> {
        sqlx::query_as::<_, DetailedReportRow>(
            r#"
            SELECT
                r.report_date,
                c.name AS campaign_name,
                c.brand AS brand,
                c.campaign_type AS campaign_type,
                r.leads,
                r.spent::float8 AS spent,
                r.facebook_result,
                r.zoho_result,
                r.cost_per_lead::float8 AS cost_per_lead
            FROM reports r
            JOIN campaigns c ON c.id = r.campaign_id
            WHERE r.report_date >= $1
              AND r.report_date <= $2
              AND ($3::uuid IS NULL OR r.created_by = $3)
            ORDER BY r.report_date ASC, c.name ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(scope.restrict_to)
        .fetch_all(&self.pool)
        .await
    }

    /// Fetches everything the dashboard overview needs concurrently.
    #[instrument(skip(self))]
    pub async fn dashboard_snapshot(
        &self,
        today: NaiveDate,
        yesterday: NaiveDate,
        scope: &AccessScope,
    ) -> Result<DashboardSnapshot, sqlx::Error> {
        let (overall, today_totals, yesterday_totals, top_campaigns, brands) = tokio::try_join!(
            self.totals(None, None, scope),
            self.totals(Some(today), Some(today), scope),
            self.totals(Some(yesterday), Some(yesterday), scope),
            self.campaign_totals(None, None, scope, Some(DASHBOARD_TOP_CAMPAIGNS)),
            self.brand_totals(None, None, scope, Some(DASHBOARD_TOP_BRANDS)),
        )?;

        Ok(DashboardSnapshot {
            overall,
            today: today_totals,
            yesterday: yesterday_totals,
            top_campaigns,
            brands,
        })
    }
}
