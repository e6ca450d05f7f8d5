//! Chart data routes: time series, campaign performance, brand analysis.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthPrincipal;
use crate::response::ApiResponse;
use crate::services::assemble;
use domain::models::{AccessScope, GroupBy, TimeSeriesPoint};
use persistence::repositories::ReportsRepository;
use shared::params::{clamp_limit, parse_date_range};

#[derive(Debug, Deserialize)]
pub struct TimeSeriesQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub group_by: Option<String>,
}

/// GET /api/v1/charts/time-series
pub async fn get_time_series(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(query): Query<TimeSeriesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (from, to) = parse_date_range(query.date_from.as_deref(), query.date_to.as_deref())?;
    let group_by = match query.group_by.as_deref() {
        None => GroupBy::default(),
        Some(value) => GroupBy::parse(value).ok_or_else(|| {
            ApiError::Validation(format!(
                "Invalid group_by value '{value}' (expected day, week, or month)"
            ))
        })?,
    };

    let scope = AccessScope::for_principal(&principal);
    let repo = ReportsRepository::new(state.pool.clone());

    let rows = repo
        .time_series(from, to, group_by, &scope)
        .await
        .map_err(|e| ApiError::storage("time_series", e, state.config.is_development()))?;

    let points: Vec<TimeSeriesPoint> = rows.into_iter().map(assemble::time_series_point).collect();

    info!(
        user_id = %principal.user_id,
        group_by = group_by.as_str(),
        points = points.len(),
        "Fetched time series"
    );

    let meta = json!({
        "date_from": from.to_string(),
        "date_to": to.to_string(),
        "group_by": group_by.as_str(),
        "points": points.len(),
    });

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok_with_meta(
            "Time series retrieved",
            points,
            meta,
        )),
    ))
}

#[derive(Debug, Deserialize)]
pub struct CampaignPerformanceQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub limit: Option<i64>,
}

/// GET /api/v1/charts/campaign-performance
pub async fn get_campaign_performance(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(query): Query<CampaignPerformanceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (from, to) = parse_date_range(query.date_from.as_deref(), query.date_to.as_deref())?;
    let limit = clamp_limit(query.limit);

    let scope = AccessScope::for_principal(&principal);
    let repo = ReportsRepository::new(state.pool.clone());

    let rows = repo
        .campaign_totals(Some(from), Some(to), &scope, Some(limit))
        .await
        .map_err(|e| ApiError::storage("campaign_totals", e, state.config.is_development()))?;

    let campaigns = assemble::campaign_performance(rows);

    info!(
        user_id = %principal.user_id,
        limit,
        returned = campaigns.len(),
        "Fetched campaign performance"
    );

    let meta = json!({
        "date_from": from.to_string(),
        "date_to": to.to_string(),
        "limit": limit,
        "returned": campaigns.len(),
    });

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok_with_meta(
            "Campaign performance retrieved",
            campaigns,
            meta,
        )),
    ))
}

#[derive(Debug, Deserialize)]
pub struct BrandAnalysisQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// GET /api/v1/charts/brand-analysis
pub async fn get_brand_analysis(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(query): Query<BrandAnalysisQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (from, to) = parse_date_range(query.date_from.as_deref(), query.date_to.as_deref())?;

    let scope = AccessScope::for_principal(&principal);
    let repo = ReportsRepository::new(state.pool.clone());

    let rows = repo
        .brand_totals(Some(from), Some(to), &scope, None)
        .await
        .map_err(|e| ApiError::storage("brand_totals", e, state.config.is_development()))?;

    let brands = assemble::brand_performance(rows);

    info!(
        user_id = %principal.user_id,
        brands = brands.len(),
        "Fetched brand analysis"
    );

    let meta = json!({
        "date_from": from.to_string(),
        "date_to": to.to_string(),
        "brands": brands.len(),
    });

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok_with_meta(
            "Brand analysis retrieved",
            brands,
            meta,
        )),
    ))
}
