//! CLI argument parsing

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pharmaceutical cold-chain incident investigation toolkit
#[derive(Debug, Parser)]
#[clap(
    author,
    name = "pharma-investigator",
    version = env!("CARGO_PKG_VERSION"),
    about = "Query cold-chain CSV data, rebuild shipment timelines, rank resolution costs"
)]
pub struct Cli {
    /// Directory holding the CSV sources
    #[clap(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (defaults to ./investigator.toml when present)
    #[clap(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[clap(long, global = true)]
    pub log_json: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every CSV source with its columns and a sample record
    Sources,

    /// Return the rows of one source matching all filters
    Query {
        /// Source name (file stem, e.g. sensor_alerts)
        table: String,

        /// Equality filter, repeatable
        #[clap(long = "filter", value_name = "COLUMN=VALUE")]
        filters: Vec<String>,

        /// Filters as a JSON object
        #[clap(long, value_name = "JSON", conflicts_with = "filters")]
        filters_json: Option<String>,

        /// Maximum number of rows
        #[clap(long)]
        limit: Option<usize>,
    },

    /// Merge every source mentioning an id into one ordered timeline
    Timeline {
        shipment_id: String,

        /// Column holding the id
        #[clap(long)]
        id_column: Option<String>,
    },

    /// Rank resolution options by expected cost
    Costs {
        /// Option as NAME:COST:PROBABILITY, repeatable
        #[clap(long = "option", value_name = "NAME:COST:PROBABILITY")]
        options: Vec<String>,

        /// Options as a JSON array of {name, cost, probability}
        #[clap(long, value_name = "JSON", conflicts_with = "options")]
        options_json: Option<String>,
    },

    /// Price the standard resolution paths for one shipment
    CostAnalysis { shipment_id: String },

    /// Build the timeline and cost ranking for a shipment and compose a report
    Report {
        shipment_id: String,

        /// JSON file with investigator findings
        #[clap(long, value_name = "FILE")]
        findings: Option<PathBuf>,
    },

    /// Invoke any tool by name with JSON arguments
    Call {
        tool: String,

        /// Arguments object
        #[clap(value_name = "JSON")]
        arguments: Option<String>,
    },

    /// Print the function-calling tool definitions
    Tools,

    /// Print the agent profile (name, description, system prompt, tools)
    Prompt,

    /// Run the HTTP API
    Serve {
        #[clap(long)]
        host: Option<String>,

        #[clap(long)]
        port: Option<u16>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_filters() {
        let cli = Cli::parse_from([
            "pharma-investigator",
            "--data-dir",
            "/tmp/data",
            "query",
            "sensor_alerts",
            "--filter",
            "shipment_id=SHP-001",
            "--filter",
            "severity=high",
            "--limit",
            "5",
        ]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/data")));
        match cli.command {
            Command::Query { table, filters, limit, .. } => {
                assert_eq!(table, "sensor_alerts");
                assert_eq!(filters.len(), 2);
                assert_eq!(limit, Some(5));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pharma-investigator", "timeline", "SHP-001", "--log-json"]);
        assert!(cli.log_json);
        assert!(matches!(cli.command, Command::Timeline { .. }));
    }

    #[test]
    fn test_conflicting_filter_forms_rejected() {
        let result = Cli::try_parse_from([
            "pharma-investigator",
            "query",
            "t",
            "--filter",
            "a=b",
            "--filters-json",
            "{}",
        ]);
        assert!(result.is_err());
    }
}
