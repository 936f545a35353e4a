//! Expected-cost ranking of resolution options

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::errors::{DataError, Result};
use super::query::Filters;
use super::record::Record;
use super::source_reader::DataStore;

/// QA review fee for releasing a held shipment under conditions
pub const QA_REVIEW_COST_USD: f64 = 500.0;
/// Probability a conditional release passes review
pub const CONDITIONAL_RELEASE_PROBABILITY: f64 = 0.85;
/// Logistics cost of dispatching a replacement
pub const RESHIP_LOGISTICS_COST_USD: f64 = 1200.0;
/// How many historical quarantine losses feed the waste average
pub const WASTE_HISTORY_LIMIT: usize = 10;

/// A candidate way to resolve an incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionOption {
    pub name: String,
    pub cost: f64,
    pub probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResolutionOption {
    pub fn new(name: impl Into<String>, cost: f64, probability: f64) -> Self {
        Self {
            name: name.into(),
            cost,
            probability,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(DataError::InvalidOption(format!(
                "'{}': cost must be a finite non-negative number, got {}",
                self.name, self.cost
            )));
        }
        if !(self.probability > 0.0 && self.probability <= 1.0) {
            return Err(DataError::InvalidOption(format!(
                "'{}': probability must be in (0, 1], got {}",
                self.name, self.probability
            )));
        }
        Ok(())
    }
}

/// How success probability turns nominal cost into expected cost
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ExpectedCostPolicy {
    /// Expected spend when failed attempts are retried: cost / p
    #[default]
    RetryAdjusted,
    /// Nominal cost plus the failure penalty weighted by (1 - p)
    FailurePenalty { penalty: f64 },
}

impl ExpectedCostPolicy {
    pub fn expected_cost(&self, option: &ResolutionOption) -> f64 {
        match *self {
            ExpectedCostPolicy::RetryAdjusted => option.cost / option.probability,
            ExpectedCostPolicy::FailurePenalty { penalty } => {
                option.cost + (1.0 - option.probability) * penalty
            }
        }
    }
}

/// Option annotated with its expected cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOption {
    pub name: String,
    pub cost: f64,
    pub probability: f64,
    /// Rounded to cents for display; ranking uses the exact value
    pub expected_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rank options by ascending expected cost, ties in input order
pub fn compare(options: &[ResolutionOption], policy: ExpectedCostPolicy) -> Result<Vec<RankedOption>> {
    if options.is_empty() {
        return Err(DataError::InvalidOption(
            "at least one option is required".to_string(),
        ));
    }

    let mut scored = Vec::with_capacity(options.len());
    for option in options {
        option.validate()?;
        let expected = policy.expected_cost(option);
        if !expected.is_finite() {
            return Err(DataError::InvalidOption(format!(
                "'{}': expected cost is not finite",
                option.name
            )));
        }
        scored.push((expected, option));
    }
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));

    Ok(scored
        .into_iter()
        .map(|(expected, option)| RankedOption {
            name: option.name.clone(),
            cost: option.cost,
            probability: option.probability,
            expected_cost: round_cents(expected),
            description: option.description.clone(),
        })
        .collect())
}

/// Scenario comparison for one shipment
#[derive(Debug, Clone, Serialize)]
pub struct CostAnalysis {
    pub shipment_id: String,
    pub shipment_details: Record,
    pub historical_waste_avg_usd: f64,
    pub waste_samples: usize,
    pub ranking: Vec<RankedOption>,
}

/// Compare conditional release against reject-and-reship for a shipment
///
/// The reship scenario is priced from the average loss of recent quarantine
/// events in the finance waste log; without that log the average is zero.
pub fn cost_analysis(
    store: &DataStore,
    shipment_id: &str,
    policy: ExpectedCostPolicy,
) -> Result<CostAnalysis> {
    let shipment = store
        .query_source(
            "logistics_shipments",
            &Filters::equals("shipment_id", shipment_id),
            Some(1),
        )?
        .results
        .into_iter()
        .next()
        .ok_or_else(|| DataError::RecordNotFound {
            table: "logistics_shipments".to_string(),
            column: "shipment_id".to_string(),
            value: shipment_id.to_string(),
        })?;

    let (avg_waste, samples) = historical_waste(store);

    let options = [
        ResolutionOption::new(
            "conditional_release",
            QA_REVIEW_COST_USD,
            CONDITIONAL_RELEASE_PROBABILITY,
        )
        .with_description("Release shipment pending QA approval"),
        ResolutionOption::new("reject_reship", avg_waste + RESHIP_LOGISTICS_COST_USD, 1.0)
            .with_description("Reject shipment and dispatch replacement"),
    ];

    Ok(CostAnalysis {
        shipment_id: shipment_id.to_string(),
        shipment_details: shipment,
        historical_waste_avg_usd: round_cents(avg_waste),
        waste_samples: samples,
        ranking: compare(&options, policy)?,
    })
}

fn historical_waste(store: &DataStore) -> (f64, usize) {
    let filters = Filters::equals("event_type", "Quarantine");
    match store.query_source("finance_waste_log", &filters, Some(WASTE_HISTORY_LIMIT)) {
        Ok(result) if !result.results.is_empty() => {
            let n = result.results.len();
            let total: f64 = result
                .results
                .iter()
                .map(|r| r.number("total_loss_usd").unwrap_or(0.0))
                .sum();
            (total / n as f64, n)
        }
        Ok(_) => (0.0, 0),
        Err(e) => {
            warn!("No waste history available, assuming zero: {}", e);
            (0.0, 0)
        }
    }
}
