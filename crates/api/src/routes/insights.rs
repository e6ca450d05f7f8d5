//! Trend insight route.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Local};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthPrincipal;
use crate::response::ApiResponse;
use crate::services::assemble;
use domain::models::{AccessScope, Insight, TrendSummary, WeeklyTrendBucket};
use domain::services::analysis::compute_trends;
use domain::services::insights::generate_insights;
use domain::services::metrics::{ratio_or_zero, round1};
use persistence::repositories::ReportsRepository;
use shared::params::clamp_days;

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TrendInsightData {
    pub period_days: i64,
    pub weekly_buckets: Vec<WeeklyTrendBucket>,
    pub trends: TrendSummary,
    pub insights: Vec<Insight>,
}

/// GET /api/v1/insights/trends
///
/// Weekly buckets over a trailing window, period-over-period trends, and
/// the threshold-based insight list.
pub async fn get_trend_insights(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(query): Query<TrendQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let days = clamp_days(query.days);
    // Trailing window ends on the local calendar day, matching the
    // dashboard's reporting days.
    let to = Local::now().date_naive();
    let from = to - Duration::days(days - 1);

    let scope = AccessScope::for_principal(&principal);
    let repo = ReportsRepository::new(state.pool.clone());

    let (weekly_rows, brand_rows) = tokio::try_join!(
        repo.weekly_buckets(from, to, &scope),
        repo.brand_totals(Some(from), Some(to), &scope, None),
    )
    .map_err(|e| ApiError::storage("trend_insights", e, state.config.is_development()))?;

    // Trends are computed on unrounded buckets; the response carries
    // rounded copies.
    let buckets: Vec<WeeklyTrendBucket> =
        weekly_rows.into_iter().map(assemble::weekly_bucket).collect();
    let trends = compute_trends(&buckets);

    // Leading brand's share of leads across the window, unrounded so the
    // threshold comparison stays exact.
    let total_leads: i64 = brand_rows.iter().map(|r| r.leads).sum();
    let top_brand_lead_share = brand_rows
        .iter()
        .map(|r| r.leads)
        .max()
        .filter(|_| total_leads > 0)
        .map(|top| ratio_or_zero(top as f64, total_leads as f64) * 100.0);

    let insights = generate_insights(&trends, top_brand_lead_share);

    info!(
        user_id = %principal.user_id,
        days,
        buckets = buckets.len(),
        insights = insights.len(),
        "Generated trend insights"
    );

    let data = TrendInsightData {
        period_days: days,
        weekly_buckets: buckets.iter().map(assemble::rounded_bucket).collect(),
        trends: TrendSummary {
            leads_trend: round1(trends.leads_trend),
            spend_trend: round1(trends.spend_trend),
            cpl_trend: round1(trends.cpl_trend),
        },
        insights,
    };

    let meta = json!({
        "date_from": from.to_string(),
        "date_to": to.to_string(),
        "days": days,
    });

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok_with_meta(
            "Trend insights generated",
            data,
            meta,
        )),
    ))
}
