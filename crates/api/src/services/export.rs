//! Export serialization: CSV rendering, filenames, and format/type parsing.
//!
//! CSV quoting follows RFC 4180: a field is quoted when it contains a
//! comma, a double quote, or a newline, and embedded quotes are doubled.
//! Rows are joined with `\n`.

use chrono::NaiveDate;
use domain::models::{BrandPerformance, CampaignPerformance, OverviewSummary};
use persistence::entities::DetailedReportRow;
use serde::Serialize;

use domain::services::metrics::round1;

/// Export output format. Unknown values are rejected, not defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Which data set is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportType {
    #[default]
    Summary,
    Detailed,
    Campaigns,
    Brands,
}

impl ExportType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "summary" => Some(Self::Summary),
            "detailed" => Some(Self::Detailed),
            "campaigns" => Some(Self::Campaigns),
            "brands" => Some(Self::Brands),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Detailed => "detailed",
            Self::Campaigns => "campaigns",
            Self::Brands => "brands",
        }
    }
}

/// One underlying report row shaped for export output.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedRow {
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

impl From<DetailedReportRow> for DetailedRow {
    fn from(row: DetailedReportRow) -> Self {
        Self {
            report_date: row.report_date,
            campaign_name: row.campaign_name,
            brand: row.brand,
            campaign_type: row.campaign_type,
            leads: row.leads,
            spent: round1(row.spent),
            facebook_result: row.facebook_result,
            zoho_result: row.zoho_result,
            cost_per_lead: round1(row.cost_per_lead),
        }
    }
}

/// `analytics_{type}_{from}_to_{to}.{ext}`
pub fn export_filename(
    export_type: ExportType,
    from: NaiveDate,
    to: NaiveDate,
    format: ExportFormat,
) -> String {
    format!(
        "analytics_{}_{}_to_{}.{}",
        export_type.as_str(),
        from,
        to,
        format.extension()
    )
}

/// Quotes a field when it contains a comma, quote, or newline.
pub fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn summary_csv(summary: &OverviewSummary) -> String {
    let header = "leads,spent,facebook_results,zoho_results,avg_cost_per_lead,campaigns,report_days";
    let row = format!(
        "{},{},{},{},{},{},{}",
        summary.leads,
        summary.spent,
        summary.facebook_results,
        summary.zoho_results,
        summary.avg_cost_per_lead,
        summary.campaigns,
        summary.report_days,
    );
    format!("{header}\n{row}")
}

pub fn detailed_csv(rows: &[DetailedRow]) -> String {
    let mut lines = vec![
        "report_date,campaign_name,brand,campaign_type,leads,spent,facebook_result,zoho_result,cost_per_lead"
            .to_string(),
    ];
    for row in rows {
        lines.push(format!(
            "{},{},{},{},{},{},{},{},{}",
            row.report_date,
            escape_csv_field(&row.campaign_name),
            escape_csv_field(&row.brand),
            escape_csv_field(&row.campaign_type),
            row.leads,
            row.spent,
            row.facebook_result,
            row.zoho_result,
            row.cost_per_lead,
        ));
    }
    lines.join("\n")
}

pub fn campaigns_csv(campaigns: &[CampaignPerformance]) -> String {
    let mut lines = vec![
        "rank,campaign_name,brand,campaign_type,leads,spent,facebook_results,zoho_results,report_days,avg_daily_leads,avg_daily_spend,avg_cost_per_lead,efficiency"
            .to_string(),
    ];
    for c in campaigns {
        lines.push(format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{}",
            c.rank,
            escape_csv_field(&c.campaign_name),
            escape_csv_field(&c.brand),
            escape_csv_field(&c.campaign_type),
            c.leads,
            c.spent,
            c.facebook_results,
            c.zoho_results,
            c.report_days,
            c.avg_daily_leads,
            c.avg_daily_spend,
            c.avg_cost_per_lead,
            c.efficiency,
        ));
    }
    lines.join("\n")
}

pub fn brands_csv(brands: &[BrandPerformance]) -> String {
    let mut lines = vec![
        "brand,brand_name,campaigns,leads,spent,facebook_results,zoho_results,avg_cost_per_lead,facebook_percentage,zoho_percentage,market_share_by_leads,market_share_by_spend"
            .to_string(),
    ];
    for b in brands {
        lines.push(format!(
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            escape_csv_field(&b.brand),
            escape_csv_field(&b.brand_name),
            b.campaigns,
            b.leads,
            b.spent,
            b.facebook_results,
            b.zoho_results,
            b.avg_cost_per_lead,
            b.facebook_percentage,
            b.zoho_percentage,
            b.market_share_by_leads,
            b.market_share_by_spend,
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(ExportFormat::parse("json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::parse("csv"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::parse("xlsx"), None);
        assert_eq!(ExportFormat::default(), ExportFormat::Json);
    }

    #[test]
    fn test_type_parse() {
        assert_eq!(ExportType::parse("summary"), Some(ExportType::Summary));
        assert_eq!(ExportType::parse("detailed"), Some(ExportType::Detailed));
        assert_eq!(ExportType::parse("campaigns"), Some(ExportType::Campaigns));
        assert_eq!(ExportType::parse("brands"), Some(ExportType::Brands));
        assert_eq!(ExportType::parse("everything"), None);
        assert_eq!(ExportType::default(), ExportType::Summary);
    }

    #[test]
    fn test_export_filename() {
        let name = export_filename(
            ExportType::Campaigns,
            date(2025, 1, 1),
            date(2025, 1, 31),
            ExportFormat::Csv,
        );
        assert_eq!(name, "analytics_campaigns_2025-01-01_to_2025-01-31.csv");
    }

    #[test]
    fn test_escape_plain_field_untouched() {
        assert_eq!(escape_csv_field("spring-sale"), "spring-sale");
        assert_eq!(escape_csv_field(""), "");
    }

    #[test]
    fn test_escape_comma_field_quoted() {
        assert_eq!(escape_csv_field("Sale, Spring"), "\"Sale, Spring\"");
    }

    #[test]
    fn test_escape_embedded_quotes_doubled() {
        assert_eq!(
            escape_csv_field("the \"big\" push"),
            "\"the \"\"big\"\" push\""
        );
    }

    #[test]
    fn test_escape_newline_field_quoted() {
        assert_eq!(escape_csv_field("a\nb"), "\"a\nb\"");
    }

    #[test]
    fn test_summary_csv_shape() {
        let summary = OverviewSummary {
            leads: 30,
            spent: 250.5,
            facebook_results: 20,
            zoho_results: 10,
            avg_cost_per_lead: 8.4,
            campaigns: 2,
            report_days: 3,
        };
        let csv = summary_csv(&summary);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("leads,spent,"));
        assert_eq!(lines[1], "30,250.5,20,10,8.4,2,3");
    }

    #[test]
    fn test_detailed_csv_quotes_campaign_names() {
        let rows = vec![DetailedRow {
            report_date: date(2025, 3, 14),
            campaign_name: "Spring, Sale".to_string(),
            brand: "acme".to_string(),
            campaign_type: "search".to_string(),
            leads: 5,
            spent: 42.5,
            facebook_result: 3,
            zoho_result: 2,
            cost_per_lead: 8.5,
        }];
        let csv = detailed_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("2025-03-14,\"Spring, Sale\",acme,"));
    }

    #[test]
    fn test_campaigns_csv_header_and_row_count() {
        let campaigns: Vec<CampaignPerformance> = (1..=3)
            .map(|i| CampaignPerformance {
                rank: i,
                campaign_id: Uuid::new_v4(),
                campaign_name: format!("campaign-{i}"),
                brand: "acme".to_string(),
                campaign_type: "search".to_string(),
                leads: 10,
                spent: 100.0,
                facebook_results: 6,
                zoho_results: 4,
                report_days: 5,
                avg_daily_leads: 2.0,
                avg_daily_spend: 20.0,
                avg_cost_per_lead: 10.0,
                efficiency: 10.0,
            })
            .collect();

        let csv = campaigns_csv(&campaigns);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("rank,campaign_name,"));
        assert!(lines[1].starts_with("1,campaign-1,"));
    }

    #[test]
    fn test_brands_csv_empty_is_header_only() {
        let csv = brands_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_detailed_row_rounds_money_fields() {
        let row = DetailedRow::from(DetailedReportRow {
            report_date: date(2025, 1, 1),
            campaign_name: "c".to_string(),
            brand: "b".to_string(),
            campaign_type: "t".to_string(),
            leads: 3,
            spent: 99.999,
            facebook_result: 2,
            zoho_result: 1,
            cost_per_lead: 33.333,
        });
        assert_eq!(row.spent, 100.0);
        assert_eq!(row.cost_per_lead, 33.3);
    }
}
