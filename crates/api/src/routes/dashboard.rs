//! Dashboard overview route.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{Duration, Local, NaiveDate};
use serde_json::json;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthPrincipal;
use crate::response::ApiResponse;
use crate::services::assemble;
use domain::models::{AccessScope, DashboardData};
use persistence::repositories::ReportsRepository;

/// GET /api/v1/dashboard
///
/// All-time overview, today/yesterday snapshots with day-over-day changes,
/// top 5 campaigns, and top 10 brands.
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<impl IntoResponse, ApiError> {
    let scope = AccessScope::for_principal(&principal);
    let repo = ReportsRepository::new(state.pool.clone());

    let (today, yesterday) = reporting_days();

    let snapshot = repo
        .dashboard_snapshot(today, yesterday, &scope)
        .await
        .map_err(|e| ApiError::storage("dashboard_snapshot", e, state.config.is_development()))?;

    let data = DashboardData {
        overview: assemble::overview(&snapshot.overall),
        today: assemble::overview(&snapshot.today),
        yesterday: assemble::overview(&snapshot.yesterday),
        day_over_day: assemble::day_comparison(&snapshot.yesterday, &snapshot.today),
        top_campaigns: assemble::campaign_performance(snapshot.top_campaigns),
        brands: assemble::brand_performance(snapshot.brands),
    };

    info!(
        user_id = %principal.user_id,
        scope = scope.label(),
        leads = data.overview.leads,
        campaigns = data.overview.campaigns,
        "Fetched dashboard overview"
    );

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok_with_meta(
            "Dashboard data retrieved",
            data,
            json!({ "scope": scope.label() }),
        )),
    ))
}

/// Today and yesterday in the server's local calendar. Report rows are
/// keyed by the calendar day they describe, so the single-day aggregates
/// must follow the local date, not UTC.
fn reporting_days() -> (NaiveDate, NaiveDate) {
    let today = Local::now().date_naive();
    (today, today - Duration::days(1))
}
