//! Insight records generated from trend analysis.

use serde::Serialize;

/// Severity of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Positive,
    Warning,
    Info,
}

/// Which aspect of campaign performance the insight concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Performance,
    Efficiency,
    Diversification,
}

/// A human-readable recommendation derived from trend thresholds.
/// Ephemeral: generated per request, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub category: InsightCategory,
    pub title: String,
    pub description: String,
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_serialization_uses_type_key() {
        let insight = Insight {
            insight_type: InsightType::Positive,
            category: InsightCategory::Performance,
            title: "Strong Lead Growth".to_string(),
            description: "Leads are up.".to_string(),
            recommendation: "Keep going.".to_string(),
        };
        let json = serde_json::to_string(&insight).unwrap();
        assert!(json.contains("\"type\":\"positive\""));
        assert!(json.contains("\"category\":\"performance\""));
        assert!(!json.contains("insight_type"));
    }
}
