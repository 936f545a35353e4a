//! Data tool tests over a small cold-chain fixture
//!
//! Covers:
//! - A. Source discovery across category directories
//! - B. Filtered queries and unknown columns
//! - C. Cross-source timeline ordering and owners
//! - D. Cost analysis with and without waste history
//! - E. Report assembly from live tool output

use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use pharma_investigator::data_tools::{
    build_timeline, compare, compose_report, compute_accountability, cost_analysis, DataError,
    DataStore, ErrorKind, ExpectedCostPolicy, FilterValue, Filters, Findings, ResolutionOption,
    DEFAULT_ID_COLUMN,
};

// Test utilities

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn cold_chain_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "iot/sensor_alerts.csv",
        "alert_id,shipment_id,timestamp,temp_c,severity\n\
         A1,SHP-001,2024-03-01 08:15:00,9.4,high\n\
         A2,SHP-001,2024-03-01 06:00:00,8.2,medium\n\
         A3,SHP-002,2024-03-02 10:00:00,8.9,high\n",
    );
    write(
        root,
        "logistics/logistics_shipments.csv",
        "shipment_id,supplier_id,product,dispatch_date,value_usd\n\
         SHP-001,CARR-7,Insulin,2024-02-29 18:00:00,48000\n\
         SHP-002,CARR-3,Vaccine,2024-03-01 09:00:00,120000\n",
    );
    write(
        root,
        "quality/wms_quarantine_log.csv",
        "quarantine_id,shipment_id,status,logged_ts\n\
         Q1,SHP-001,Quarantined,2024-03-01 09:30:00\n",
    );
    write(
        root,
        "finance/finance_waste_log.csv",
        "event_id,event_type,total_loss_usd,recorded_date\n\
         W1,Quarantine,3000,2024-01-10\n\
         W2,Quarantine,5000,2024-01-20\n\
         W3,Expiry,9999,2024-01-25\n",
    );
    dir
}

// A. Discovery

#[test]
fn test_list_sources_finds_every_category() {
    let dir = cold_chain_fixture();
    let store = DataStore::new(dir.path());

    let sources = store.list_sources().unwrap();
    let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "finance_waste_log",
            "sensor_alerts",
            "logistics_shipments",
            "wms_quarantine_log"
        ]
    );
    assert!(sources.iter().all(|s| s.error.is_none()));
}

#[test]
fn test_empty_directory_has_no_sources() {
    let dir = TempDir::new().unwrap();
    let store = DataStore::new(dir.path());
    assert!(store.list_sources().unwrap().is_empty());

    let err = build_timeline(&store, "SHP-001", DEFAULT_ID_COLUMN).unwrap_err();
    assert!(matches!(err, DataError::EmptyStore(_)));
}

// B. Queries

#[test]
fn test_query_filters_and_limit() {
    let dir = cold_chain_fixture();
    let store = DataStore::new(dir.path());

    let result = store
        .query_source("sensor_alerts", &Filters::equals("shipment_id", "shp-001"), None)
        .unwrap();
    assert_eq!(result.total_records, 2);
    assert_eq!(result.results[0].get("alert_id"), Some("A1"));

    let limited = store
        .query_source("sensor_alerts", &Filters::new(), Some(1))
        .unwrap();
    assert_eq!(limited.results.len(), 1);
}

#[test]
fn test_query_number_filter() {
    let dir = cold_chain_fixture();
    let store = DataStore::new(dir.path());

    let textual = store
        .query_source(
            "logistics_shipments",
            &Filters::equals("value_usd", "48000.0"),
            None,
        )
        .unwrap();
    assert_eq!(textual.total_records, 0);

    let numeric = store
        .query_source(
            "logistics_shipments",
            &Filters::new().with("value_usd", FilterValue::Number(48000.0)),
            None,
        )
        .unwrap();
    assert_eq!(numeric.total_records, 1);
    assert_eq!(numeric.results[0].get("shipment_id"), Some("SHP-001"));
}

#[test]
fn test_query_leading_zero_lot_ids_stay_distinct() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "quality/lot_registry.csv",
        "lot_id,product
007,Insulin
7,Vaccine
7e0,Serum
",
    );
    let store = DataStore::new(dir.path());

    let result = store
        .query_source("lot_registry", &Filters::equals("lot_id", "007"), None)
        .unwrap();
    let products: Vec<&str> = result.results.iter().filter_map(|r| r.get("product")).collect();
    assert_eq!(products, vec!["Insulin"]);
}

#[test]
fn test_query_unknown_column_lists_available() {
    let dir = cold_chain_fixture();
    let store = DataStore::new(dir.path());

    let err = store
        .query_source("sensor_alerts", &Filters::equals("carrier", "X"), None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    match err {
        DataError::UnknownColumn { available, .. } => {
            assert!(available.contains(&"severity".to_string()));
        }
        other => panic!("expected UnknownColumn, got {:?}", other),
    }
}

#[test]
fn test_query_missing_source_is_not_found() {
    let dir = cold_chain_fixture();
    let store = DataStore::new(dir.path());

    let err = store
        .query_source("customs_declarations", &Filters::new(), None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// C. Timeline

#[test]
fn test_timeline_orders_events_across_sources() {
    let dir = cold_chain_fixture();
    let store = DataStore::new(dir.path());

    let events = build_timeline(&store, "SHP-001", DEFAULT_ID_COLUMN).unwrap();
    let order: Vec<(&str, Option<&str>)> = events
        .iter()
        .map(|e| (e.source.as_str(), e.timestamp.as_deref()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("logistics_shipments", Some("2024-02-29 18:00:00")),
            ("sensor_alerts", Some("2024-03-01 06:00:00")),
            ("sensor_alerts", Some("2024-03-01 08:15:00")),
            ("wms_quarantine_log", Some("2024-03-01 09:30:00")),
        ]
    );

    for pair in events.windows(2) {
        assert!(pair[0].resolved_at <= pair[1].resolved_at);
    }
}

#[test]
fn test_timeline_owners_and_accountability() {
    let dir = cold_chain_fixture();
    let store = DataStore::new(dir.path());

    let events = build_timeline(&store, "SHP-001", DEFAULT_ID_COLUMN).unwrap();
    assert_eq!(events[0].owner, "Carrier_CARR-7");
    assert_eq!(events[1].owner, "Unknown");
    assert_eq!(events[3].owner, "QA_Team");

    let accountability = compute_accountability(&events);
    assert_eq!(accountability["Unknown"].event_count, 2);
    assert_eq!(accountability["Unknown"].contribution_pct, 50.0);
    assert_eq!(accountability["QA_Team"].contribution_pct, 25.0);
    assert_eq!(accountability["Carrier_CARR-7"].contribution_pct, 25.0);
}

#[test]
fn test_timeline_unknown_id_is_empty() {
    let dir = cold_chain_fixture();
    let store = DataStore::new(dir.path());

    let events = build_timeline(&store, "SHP-404", DEFAULT_ID_COLUMN).unwrap();
    assert!(events.is_empty());
    assert!(compute_accountability(&events).is_empty());
}

#[test]
fn test_timeline_custom_id_column() {
    let dir = cold_chain_fixture();
    let store = DataStore::new(dir.path());

    let events = build_timeline(&store, "CARR-3", "supplier_id").unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].data.get("shipment_id"), Some("SHP-002"));
}

// D. Costs

#[test]
fn test_cost_analysis_uses_waste_history() {
    let dir = cold_chain_fixture();
    let store = DataStore::new(dir.path());

    let analysis = cost_analysis(&store, "SHP-001", ExpectedCostPolicy::default()).unwrap();
    assert_eq!(analysis.waste_samples, 2);
    assert_eq!(analysis.historical_waste_avg_usd, 4000.0);
    assert_eq!(analysis.shipment_details.get("product"), Some("Insulin"));

    let names: Vec<&str> = analysis.ranking.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["conditional_release", "reject_reship"]);
    assert_eq!(analysis.ranking[0].expected_cost, 588.24);
    assert_eq!(analysis.ranking[1].expected_cost, 5200.0);
}

#[test]
fn test_cost_analysis_without_waste_log() {
    let dir = cold_chain_fixture();
    fs::remove_file(dir.path().join("finance/finance_waste_log.csv")).unwrap();
    let store = DataStore::new(dir.path());

    let analysis = cost_analysis(&store, "SHP-002", ExpectedCostPolicy::default()).unwrap();
    assert_eq!(analysis.waste_samples, 0);
    assert_eq!(analysis.historical_waste_avg_usd, 0.0);
    assert_eq!(analysis.ranking[1].cost, 1200.0);
}

#[test]
fn test_cost_analysis_unknown_shipment() {
    let dir = cold_chain_fixture();
    let store = DataStore::new(dir.path());

    let err = cost_analysis(&store, "SHP-404", ExpectedCostPolicy::default()).unwrap_err();
    assert!(matches!(err, DataError::RecordNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_compare_ranking_is_sorted_and_stable() {
    let options = vec![
        ResolutionOption::new("air_freight", 1000.0, 0.5),
        ResolutionOption::new("ground_a", 900.0, 0.9),
        ResolutionOption::new("ground_b", 900.0, 0.9),
        ResolutionOption::new("hold", 1500.0, 1.0),
    ];
    let ranking = compare(&options, ExpectedCostPolicy::RetryAdjusted).unwrap();

    let names: Vec<&str> = ranking.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["ground_a", "ground_b", "hold", "air_freight"]);
    for pair in ranking.windows(2) {
        assert!(pair[0].expected_cost <= pair[1].expected_cost);
    }
}

// E. Report

#[test]
fn test_report_from_live_data() {
    let dir = cold_chain_fixture();
    let store = DataStore::new(dir.path());
    let at = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();

    let events = build_timeline(&store, "SHP-001", DEFAULT_ID_COLUMN).unwrap();
    let analysis = cost_analysis(&store, "SHP-001", ExpectedCostPolicy::default()).unwrap();
    let findings = Findings {
        summary: Some("Reefer unit failure during transit".to_string()),
        ..Findings::default()
    };

    let report = compose_report(
        "SHP-001",
        events.clone(),
        analysis.ranking.clone(),
        findings,
        "qa.lead",
        at,
    );

    assert_eq!(report.header.document_id, "CAPA-SHP-001-20240305");
    assert_eq!(report.header.prepared_by, "qa.lead");
    assert_eq!(report.timeline, events);
    assert_eq!(report.cost_comparison, analysis.ranking);
    assert_eq!(
        report.recommendation,
        "Proceed with conditional_release (expected cost 588.24 USD)"
    );
    assert!(report.approval_required);
    assert_eq!(report.signoff.reviewed_by.name, "TBD");
    assert!(report.signoff.approved_by.date.is_none());
}
