//! Investigation report assembly

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::cost::RankedOption;
use super::timeline::{Accountability, TimelineEvent};

pub const DOCUMENT_TYPE: &str = "Supply Chain Investigation Report";
pub const DEFAULT_PREPARER: &str = "AI_Investigation_Agent";
pub const NO_OPTIONS_RECOMMENDATION: &str =
    "No resolution options were evaluated; escalate to QA for a manual decision.";
const PLACEHOLDER_NAME: &str = "TBD";

/// Investigator conclusions carried into the report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Findings {
    pub summary: Option<String>,
    pub root_causes: Vec<JsonValue>,
    pub accountability: Accountability,
    pub recommendations: Vec<String>,
    pub corrective_actions: Vec<String>,
    pub preventive_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub document_id: String,
    pub document_type: String,
    pub shipment_id: String,
    pub report_date: DateTime<Utc>,
    pub prepared_by: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignoffEntry {
    pub name: String,
    pub date: Option<DateTime<Utc>>,
}

impl SignoffEntry {
    fn pending() -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signoff {
    pub prepared_by: SignoffEntry,
    pub reviewed_by: SignoffEntry,
    pub approved_by: SignoffEntry,
}

/// Finished report; the toolset never persists it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub header: ReportHeader,
    pub timeline: Vec<TimelineEvent>,
    pub cost_comparison: Vec<RankedOption>,
    pub recommendation: String,
    pub findings: Findings,
    pub approval_required: bool,
    pub signoff: Signoff,
}

/// Assemble a report; `timeline` and `cost_ranking` are kept as given
pub fn compose_report(
    id: &str,
    timeline: Vec<TimelineEvent>,
    cost_ranking: Vec<RankedOption>,
    findings: Findings,
    prepared_by: &str,
    prepared_at: DateTime<Utc>,
) -> Report {
    let recommendation = match cost_ranking.first() {
        Some(best) => format!(
            "Proceed with {} (expected cost {:.2} USD)",
            best.name, best.expected_cost
        ),
        None => NO_OPTIONS_RECOMMENDATION.to_string(),
    };

    Report {
        header: ReportHeader {
            document_id: format!("CAPA-{}-{}", id, prepared_at.format("%Y%m%d")),
            document_type: DOCUMENT_TYPE.to_string(),
            shipment_id: id.to_string(),
            report_date: prepared_at,
            prepared_by: prepared_by.to_string(),
            status: "Draft".to_string(),
        },
        timeline,
        cost_comparison: cost_ranking,
        recommendation,
        findings,
        approval_required: true,
        signoff: Signoff {
            prepared_by: SignoffEntry {
                name: prepared_by.to_string(),
                date: Some(prepared_at),
            },
            reviewed_by: SignoffEntry::pending(),
            approved_by: SignoffEntry::pending(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_tools::record::Record;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap()
    }

    fn ranked(name: &str, expected: f64) -> RankedOption {
        RankedOption {
            name: name.to_string(),
            cost: expected,
            probability: 1.0,
            expected_cost: expected,
            description: None,
        }
    }

    #[test]
    fn test_header_and_signoff() {
        let report = compose_report("SHP-1", vec![], vec![], Findings::default(), DEFAULT_PREPARER, at());
        assert_eq!(report.header.document_id, "CAPA-SHP-1-20240305");
        assert_eq!(report.header.document_type, DOCUMENT_TYPE);
        assert_eq!(report.header.status, "Draft");
        assert!(report.approval_required);
        assert_eq!(report.signoff.prepared_by.date, Some(at()));
        assert_eq!(report.signoff.reviewed_by.name, "TBD");
        assert!(report.signoff.approved_by.date.is_none());
        assert_eq!(report.recommendation, NO_OPTIONS_RECOMMENDATION);
    }

    #[test]
    fn test_timeline_kept_exactly() {
        // deliberately out of order
        let timeline = vec![
            TimelineEvent::from_record("b", Record::from_pairs([("timestamp", "2024-03-02")])),
            TimelineEvent::from_record("a", Record::from_pairs([("timestamp", "2024-03-01")])),
        ];
        let report = compose_report(
            "SHP-1",
            timeline.clone(),
            vec![ranked("conditional_release", 588.24), ranked("reject_reship", 5200.0)],
            Findings::default(),
            DEFAULT_PREPARER,
            at(),
        );
        assert_eq!(report.timeline, timeline);
        assert_eq!(
            report.recommendation,
            "Proceed with conditional_release (expected cost 588.24 USD)"
        );
        assert_eq!(report.cost_comparison.len(), 2);
    }

    #[test]
    fn test_findings_default_from_partial_json() {
        let findings: Findings =
            serde_json::from_str(r#"{"summary":"Excursion during transit","root_causes":["reefer failure"]}"#)
                .unwrap();
        assert_eq!(findings.summary.as_deref(), Some("Excursion during transit"));
        assert_eq!(findings.root_causes.len(), 1);
        assert!(findings.corrective_actions.is_empty());
    }
}
