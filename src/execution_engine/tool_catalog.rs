//! Tool catalog: metadata definitions for all available tools
//!
//! Contains the `default_tools()` function that returns the complete tool inventory.

use super::tool_registry::{ArgumentType, ToolArgument, ToolExamples, ToolMetadata};

/// Build default tool inventory
pub fn default_tools() -> Vec<ToolMetadata> {
    vec![
        // === DISCOVERY ===
        ToolMetadata::new(
            "list_sources",
            "Discover all CSV data sources with their columns and a sample record. \
             Call this first to learn what data is available.",
        )
        .with_examples(ToolExamples::single(
            "list_sources()",
            r#"{"data_directory": "mock_data", "total_sources": 5, "sources": [{"name": "sensor_alerts", "category": "iot", ...}]}"#,
        )),
        // === QUERY ===
        ToolMetadata::new(
            "query",
            "Query one CSV data source with optional column filters. \
             Scalar filters match the cell text case-insensitively, lists match any member, \
             {\"contains\": text} matches a substring, {\"number\": n} compares numerically.",
        )
        .with_arguments(vec![
            ToolArgument::new(
                "table",
                ArgumentType::String,
                true,
                "Source name (e.g., 'sensor_alerts', 'logistics_shipments')",
            ),
            ToolArgument::new(
                "filters",
                ArgumentType::Object,
                false,
                "Column/value pairs; every pair must match",
            ),
            ToolArgument::new(
                "limit",
                ArgumentType::Integer,
                false,
                "Maximum number of rows to return",
            ),
        ])
        .with_examples(ToolExamples::new(
            [
                "query(table=\"sensor_alerts\", filters={\"shipment_id\": \"SHP-001-1\"})",
                "query(table=\"wms_quarantine_log\", filters={\"status\": [\"Quarantined\", \"On Hold\"]}, limit=5)",
            ],
            r#"{"source_file": "mock_data/iot/sensor_alerts.csv", "total_records": 2, "columns": [...], "results": [...]}"#,
        )),
        // === INVESTIGATION ===
        ToolMetadata::new(
            "build_timeline",
            "Join every data source on an identifier and return the matching rows \
             as a chronological timeline with responsible parties.",
        )
        .with_arguments(vec![
            ToolArgument::new(
                "shipment_id",
                ArgumentType::String,
                true,
                "Identifier to investigate (e.g., 'SHP-001-1')",
            ),
            ToolArgument::new(
                "id_column",
                ArgumentType::String,
                false,
                "Column holding the identifier",
            )
            .with_default(crate::data_tools::DEFAULT_ID_COLUMN),
        ])
        .with_examples(ToolExamples::single(
            "build_timeline(shipment_id=\"SHP-001-1\")",
            r#"{"id": "SHP-001-1", "total_events": 4, "timeline": [...], "accountability": {"QA_Team": {"contribution_pct": 50.0, "event_count": 2}}}"#,
        )),
        ToolMetadata::new(
            "compare_costs",
            "Rank resolution options by expected cost (lowest first).",
        )
        .with_arguments(vec![ToolArgument::new(
            "options",
            ArgumentType::Array,
            true,
            "Options as [{\"name\", \"cost\", \"probability\"}]; probability in (0, 1]",
        )])
        .with_examples(ToolExamples::single(
            "compare_costs(options=[{\"name\": \"conditional_release\", \"cost\": 500, \"probability\": 0.85}, {\"name\": \"reject_reship\", \"cost\": 5200, \"probability\": 1.0}])",
            r#"{"policy": {"policy": "retry_adjusted"}, "ranking": [{"name": "conditional_release", "expected_cost": 588.24, ...}, ...]}"#,
        )),
        ToolMetadata::new(
            "cost_analysis",
            "Compare conditional release against reject-and-reship for a shipment, \
             priced from historical quarantine losses.",
        )
        .with_arguments(vec![ToolArgument::new(
            "shipment_id",
            ArgumentType::String,
            true,
            "Shipment identifier to analyze",
        )])
        .with_examples(ToolExamples::single(
            "cost_analysis(shipment_id=\"SHP-001-1\")",
            r#"{"shipment_id": "SHP-001-1", "historical_waste_avg_usd": 4000.0, "ranking": [...]}"#,
        )),
        // === REPORTING ===
        ToolMetadata::new(
            "compose_report",
            "Assemble the investigation report from a timeline and a cost ranking. \
             The timeline is kept exactly as given.",
        )
        .with_arguments(vec![
            ToolArgument::new(
                "shipment_id",
                ArgumentType::String,
                true,
                "Identifier the report is about",
            ),
            ToolArgument::new(
                "timeline",
                ArgumentType::ArrayOrObject,
                true,
                "Timeline events, or the whole build_timeline output",
            ),
            ToolArgument::new(
                "cost_ranking",
                ArgumentType::ArrayOrObject,
                true,
                "Ranked options, or the whole compare_costs/cost_analysis output",
            ),
            ToolArgument::new(
                "findings",
                ArgumentType::Object,
                false,
                "Summary, root_causes, recommendations, corrective_actions, preventive_actions",
            ),
        ])
        .with_examples(ToolExamples::single(
            "compose_report(shipment_id=\"SHP-001-1\", timeline=[...], cost_ranking=[...])",
            r#"{"header": {"document_id": "CAPA-SHP-001-1-20240305", "status": "Draft", ...}, "recommendation": "Proceed with conditional_release (expected cost 588.24 USD)", ...}"#,
        )),
    ]
}
