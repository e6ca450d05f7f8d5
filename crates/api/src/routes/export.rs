//! Analytics export route.
//!
//! JSON exports reuse the standard envelope; CSV exports stream a
//! text/csv attachment. An empty result set yields a 404-style envelope
//! in both formats rather than an empty body.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
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
use crate::services::export::{
    brands_csv, campaigns_csv, detailed_csv, export_filename, summary_csv, DetailedRow,
    ExportFormat, ExportType,
};
use domain::models::AccessScope;
use persistence::repositories::ReportsRepository;
use shared::params::parse_date_range;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub format: Option<String>,
    #[serde(rename = "type")]
    pub export_type: Option<String>,
}

/// GET /api/v1/export
pub async fn export_analytics(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let (from, to) = parse_date_range(query.date_from.as_deref(), query.date_to.as_deref())?;

    let format = match query.format.as_deref() {
        None => ExportFormat::default(),
        Some(value) => ExportFormat::parse(value).ok_or_else(|| {
            ApiError::Validation(format!(
                "Invalid format value '{value}' (expected json or csv)"
            ))
        })?,
    };
    let export_type = match query.export_type.as_deref() {
        None => ExportType::default(),
        Some(value) => ExportType::parse(value).ok_or_else(|| {
            ApiError::Validation(format!(
                "Invalid type value '{value}' (expected summary, detailed, campaigns, or brands)"
            ))
        })?,
    };

    let scope = AccessScope::for_principal(&principal);
    let repo = ReportsRepository::new(state.pool.clone());
    let dev = state.config.is_development();

    // (csv body, json rows, row count)
    let (csv, rows, row_count) = match export_type {
        ExportType::Summary => {
            let totals = repo
                .totals(Some(from), Some(to), &scope)
                .await
                .map_err(|e| ApiError::storage("export_summary", e, dev))?;
            if totals.report_days == 0 {
                return Err(no_data(export_type));
            }
            let summary = assemble::overview(&totals);
            (summary_csv(&summary), json!([summary]), 1)
        }
        ExportType::Detailed => {
            let detailed = repo
                .detailed_rows(from, to, &scope)
                .await
                .map_err(|e| ApiError::storage("export_detailed", e, dev))?;
            if detailed.is_empty() {
                return Err(no_data(export_type));
            }
            let rows: Vec<DetailedRow> = detailed.into_iter().map(DetailedRow::from).collect();
            let count = rows.len();
            (detailed_csv(&rows), json!(rows), count)
        }
        ExportType::Campaigns => {
            let totals = repo
                .campaign_totals(Some(from), Some(to), &scope, None)
                .await
                .map_err(|e| ApiError::storage("export_campaigns", e, dev))?;
            if totals.is_empty() {
                return Err(no_data(export_type));
            }
            let campaigns = assemble::campaign_performance(totals);
            let count = campaigns.len();
            (campaigns_csv(&campaigns), json!(campaigns), count)
        }
        ExportType::Brands => {
            let totals = repo
                .brand_totals(Some(from), Some(to), &scope, None)
                .await
                .map_err(|e| ApiError::storage("export_brands", e, dev))?;
            if totals.is_empty() {
                return Err(no_data(export_type));
            }
            let brands = assemble::brand_performance(totals);
            let count = brands.len();
            (brands_csv(&brands), json!(brands), count)
        }
    };

    info!(
        user_id = %principal.user_id,
        export_type = export_type.as_str(),
        format = format.extension(),
        rows = row_count,
        "Exported analytics"
    );

    match format {
        ExportFormat::Json => {
            let meta = json!({
                "export_type": export_type.as_str(),
                "format": "json",
                "date_from": from.to_string(),
                "date_to": to.to_string(),
                "rows": row_count,
            });
            Ok((
                StatusCode::OK,
                Json(ApiResponse::ok_with_meta("Export generated", rows, meta)),
            )
                .into_response())
        }
        ExportFormat::Csv => {
            let filename = export_filename(export_type, from, to, format);
            Ok((
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                csv,
            )
                .into_response())
        }
    }
}

fn no_data(export_type: ExportType) -> ApiError {
    ApiError::NoData(format!(
        "No {} data available for the requested date range",
        export_type.as_str()
    ))
}
