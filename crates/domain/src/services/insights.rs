//! Insight generation from computed trend percentages.
//!
//! A single pass over fixed thresholds. Conditions are independent, so
//! several insights can fire for one request, and an empty list is a valid
//! outcome.

use crate::models::insight::{Insight, InsightCategory, InsightType};
use crate::models::report::TrendSummary;

/// Leads trend above this emits "Strong Lead Growth"; below the negation,
/// "Declining Lead Generation".
const LEADS_TREND_THRESHOLD: f64 = 10.0;
/// Cost-per-lead trend below the negation emits "Improved Cost Efficiency";
/// above it, "Rising Costs".
const CPL_TREND_THRESHOLD: f64 = 15.0;
/// A top brand holding more than this share of leads emits a
/// diversification notice.
const BRAND_CONCENTRATION_THRESHOLD: f64 = 60.0;

/// Evaluates the insight rules for one request.
///
/// `top_brand_lead_share` is the leading brand's percentage share of leads
/// across the analyzed window, when any brand data exists.
pub fn generate_insights(
    trends: &TrendSummary,
    top_brand_lead_share: Option<f64>,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if trends.leads_trend > LEADS_TREND_THRESHOLD {
        insights.push(Insight {
            insight_type: InsightType::Positive,
            category: InsightCategory::Performance,
            title: "Strong Lead Growth".to_string(),
            description: format!(
                "Lead generation is up {:.1}% compared to the start of the period.",
                trends.leads_trend
            ),
            recommendation: "Consider scaling budget on the campaigns driving this growth."
                .to_string(),
        });
    }

    if trends.leads_trend < -LEADS_TREND_THRESHOLD {
        insights.push(Insight {
            insight_type: InsightType::Warning,
            category: InsightCategory::Performance,
            title: "Declining Lead Generation".to_string(),
            description: format!(
                "Lead generation is down {:.1}% compared to the start of the period.",
                trends.leads_trend.abs()
            ),
            recommendation: "Review targeting and creatives on underperforming campaigns."
                .to_string(),
        });
    }

    if trends.cpl_trend < -CPL_TREND_THRESHOLD {
        insights.push(Insight {
            insight_type: InsightType::Positive,
            category: InsightCategory::Efficiency,
            title: "Improved Cost Efficiency".to_string(),
            description: format!(
                "Cost per lead has dropped {:.1}% over the period.",
                trends.cpl_trend.abs()
            ),
            recommendation: "Current spend allocation is working; maintain it.".to_string(),
        });
    }

    if trends.cpl_trend > CPL_TREND_THRESHOLD {
        insights.push(Insight {
            insight_type: InsightType::Warning,
            category: InsightCategory::Efficiency,
            title: "Rising Costs".to_string(),
            description: format!(
                "Cost per lead has risen {:.1}% over the period.",
                trends.cpl_trend
            ),
            recommendation: "Audit bids and pause the least efficient placements.".to_string(),
        });
    }

    if let Some(share) = top_brand_lead_share {
        if share > BRAND_CONCENTRATION_THRESHOLD {
            insights.push(Insight {
                insight_type: InsightType::Info,
                category: InsightCategory::Diversification,
                title: "High Brand Concentration".to_string(),
                description: format!(
                    "One brand accounts for {:.1}% of leads in this period.",
                    share
                ),
                recommendation: "Consider diversifying spend across more brands.".to_string(),
            });
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trends(leads: f64, spend: f64, cpl: f64) -> TrendSummary {
        TrendSummary {
            leads_trend: leads,
            spend_trend: spend,
            cpl_trend: cpl,
        }
    }

    #[test]
    fn test_strong_lead_growth() {
        let insights = generate_insights(&trends(15.0, 0.0, 0.0), None);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Strong Lead Growth");
        assert_eq!(insights[0].insight_type, InsightType::Positive);
        assert_eq!(insights[0].category, InsightCategory::Performance);
    }

    #[test]
    fn test_below_threshold_emits_nothing() {
        let insights = generate_insights(&trends(5.0, 0.0, 0.0), None);
        assert!(insights.is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        // Exactly at the threshold does not fire.
        assert!(generate_insights(&trends(10.0, 0.0, 0.0), None).is_empty());
        assert!(generate_insights(&trends(-10.0, 0.0, 0.0), None).is_empty());
        assert!(generate_insights(&trends(0.0, 0.0, 15.0), None).is_empty());
        assert!(generate_insights(&trends(0.0, 0.0, -15.0), None).is_empty());
    }

    #[test]
    fn test_declining_leads() {
        let insights = generate_insights(&trends(-12.5, 0.0, 0.0), None);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Declining Lead Generation");
        assert_eq!(insights[0].insight_type, InsightType::Warning);
    }

    #[test]
    fn test_cpl_both_directions() {
        let improved = generate_insights(&trends(0.0, 0.0, -20.0), None);
        assert_eq!(improved.len(), 1);
        assert_eq!(improved[0].title, "Improved Cost Efficiency");

        let rising = generate_insights(&trends(0.0, 0.0, 20.0), None);
        assert_eq!(rising.len(), 1);
        assert_eq!(rising[0].title, "Rising Costs");
        assert_eq!(rising[0].category, InsightCategory::Efficiency);
    }

    #[test]
    fn test_brand_concentration() {
        let insights = generate_insights(&TrendSummary::default(), Some(75.0));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "High Brand Concentration");
        assert_eq!(insights[0].insight_type, InsightType::Info);

        assert!(generate_insights(&TrendSummary::default(), Some(60.0)).is_empty());
        assert!(generate_insights(&TrendSummary::default(), None).is_empty());
    }

    #[test]
    fn test_multiple_conditions_fire_together() {
        let insights = generate_insights(&trends(25.0, 0.0, 30.0), Some(80.0));
        let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Strong Lead Growth", "Rising Costs", "High Brand Concentration"]
        );
    }

    #[test]
    fn test_growth_and_decline_mutually_exclusive() {
        let insights = generate_insights(&trends(15.0, 0.0, 0.0), None);
        assert!(insights.iter().all(|i| i.title != "Declining Lead Generation"));
    }
}
