//! CLI subcommand dispatch
//!
//! Every data command goes through [`Workbench::call_tool`], so the CLI sees
//! exactly what a hosted agent sees. Results are printed to stdout as pretty
//! JSON; diagnostics go to stderr.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Map, Value as JsonValue};
use tracing::{info, warn};

use crate::agent::InvestigationAgent;
use crate::api::{ApiServer, ApiState};
use crate::cli::data_root::{resolve_data_root, verify_data_root};
use crate::cli::{Cli, Command, Error, Result, EXIT_DATA_ERROR, EXIT_FAILURE, EXIT_SUCCESS};
use crate::config::InvestigatorConfig;
use crate::execution_engine::{ToolResult, Workbench};
use crate::llm::create_adapter;

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Run a parsed command line and return the process exit code
pub fn run_cli(cli: Cli) -> ExitCode {
    let config = match InvestigatorConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    let data_root = match resolve_data_root(cli.data_dir.as_deref(), &config) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_DATA_ERROR;
        }
    };

    match run_command(cli.command, &data_root, &config) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                Error::DataRoot(_) => EXIT_DATA_ERROR,
                _ => EXIT_FAILURE,
            }
        }
    }
}

fn run_command(command: Command, data_root: &Path, config: &InvestigatorConfig) -> Result<()> {
    if command_needs_data(&command) {
        verify_data_root(data_root)?;
    }

    let workbench = workbench_for(data_root, config);

    match command {
        Command::Serve { host, port } => serve(workbench, config, host, port),
        Command::Prompt => {
            let agent = InvestigationAgent::new(data_root).with_workbench(workbench);
            print_json(&serde_json::to_value(agent.profile())?)
        }
        other => {
            let output = evaluate(&workbench, other)?;
            print_json(&output)
        }
    }
}

/// Commands that read the CSV tree before producing output
fn command_needs_data(command: &Command) -> bool {
    matches!(
        command,
        Command::Sources
            | Command::Query { .. }
            | Command::Timeline { .. }
            | Command::CostAnalysis { .. }
            | Command::Report { .. }
    )
}

fn workbench_for(data_root: &Path, config: &InvestigatorConfig) -> Workbench {
    Workbench::new(data_root).with_policy(config.costs.policy())
}

/// Compute the JSON output of a data or tool command
///
/// `Serve` and `Prompt` are handled by the caller.
pub fn evaluate(workbench: &Workbench, command: Command) -> Result<JsonValue> {
    match command {
        Command::Sources => call(workbench, "list_sources", json!({})),
        Command::Query {
            table,
            filters,
            filters_json,
            limit,
        } => {
            let args = query_arguments(&table, &filters, filters_json.as_deref(), limit)?;
            call(workbench, "query", args)
        }
        Command::Timeline {
            shipment_id,
            id_column,
        } => {
            let mut args = json!({ "shipment_id": shipment_id });
            if let Some(column) = id_column {
                args["id_column"] = JsonValue::String(column);
            }
            call(workbench, "build_timeline", args)
        }
        Command::Costs {
            options,
            options_json,
        } => {
            let options = match options_json {
                Some(raw) => parse_json_arg("--options-json", &raw)?,
                None => JsonValue::Array(
                    options
                        .iter()
                        .map(|spec| parse_option_spec(spec))
                        .collect::<Result<Vec<_>>>()?,
                ),
            };
            call(workbench, "compare_costs", json!({ "options": options }))
        }
        Command::CostAnalysis { shipment_id } => {
            call(workbench, "cost_analysis", json!({ "shipment_id": shipment_id }))
        }
        Command::Report {
            shipment_id,
            findings,
        } => build_report(workbench, &shipment_id, findings.as_deref()),
        Command::Call { tool, arguments } => {
            let args = match arguments {
                Some(raw) => parse_json_arg("arguments", &raw)?,
                None => json!({}),
            };
            call(workbench, &tool, args)
        }
        Command::Tools => Ok(json!({ "tools": workbench.list_tools() })),
        Command::Prompt | Command::Serve { .. } => Err(Error::InvalidArgs(
            "command does not produce tool output".to_string(),
        )),
    }
}

/// Timeline, then cost ranking, then the composed report
///
/// A shipment missing from the logistics source still gets a report with an
/// empty cost section. Any other cost failure aborts the report.
fn build_report(workbench: &Workbench, shipment_id: &str, findings: Option<&Path>) -> Result<JsonValue> {
    let timeline = call(workbench, "build_timeline", json!({ "shipment_id": shipment_id }))?;

    let analysis = workbench.call_tool("cost_analysis", Some(&json!({ "shipment_id": shipment_id })));
    let cost_ranking = if !analysis.is_error {
        analysis.content
    } else if analysis.content["kind"] == "not_found" {
        warn!(
            "No cost ranking for {}: {}",
            shipment_id,
            analysis.error_message().unwrap_or("not found")
        );
        json!({ "ranking": [] })
    } else {
        return Err(tool_error(&analysis));
    };

    let mut args = json!({
        "shipment_id": shipment_id,
        "timeline": timeline,
        "cost_ranking": cost_ranking,
    });
    if let Some(path) = findings {
        let content = std::fs::read_to_string(path)?;
        args["findings"] = serde_json::from_str(&content)?;
    }

    call(workbench, "compose_report", args)
}

fn call(workbench: &Workbench, tool: &str, args: JsonValue) -> Result<JsonValue> {
    let result: ToolResult = workbench.call_tool(tool, Some(&args));
    if result.is_error {
        return Err(tool_error(&result));
    }
    Ok(result.content)
}

fn tool_error(result: &ToolResult) -> Error {
    Error::Tool {
        tool: result.name.clone(),
        message: result.error_message().unwrap_or("unknown error").to_string(),
    }
}

/// Build `query` arguments from repeated `COLUMN=VALUE` flags or a JSON object
pub fn query_arguments(
    table: &str,
    filters: &[String],
    filters_json: Option<&str>,
    limit: Option<usize>,
) -> Result<JsonValue> {
    let filters = match filters_json {
        Some(raw) => parse_json_arg("--filters-json", raw)?,
        None => {
            let mut map = Map::new();
            for spec in filters {
                let (column, value) = spec.split_once('=').ok_or_else(|| {
                    Error::InvalidArgs(format!("filter '{}' must be COLUMN=VALUE", spec))
                })?;
                let column = column.trim();
                if column.is_empty() {
                    return Err(Error::InvalidArgs(format!("filter '{}' has no column", spec)));
                }
                map.insert(column.to_string(), JsonValue::String(value.trim().to_string()));
            }
            JsonValue::Object(map)
        }
    };

    let mut args = json!({ "table": table, "filters": filters });
    if let Some(limit) = limit {
        args["limit"] = json!(limit);
    }
    Ok(args)
}

/// Parse `NAME:COST:PROBABILITY` into a resolution option object
pub fn parse_option_spec(spec: &str) -> Result<JsonValue> {
    let parts: Vec<&str> = spec.rsplitn(3, ':').collect();
    let [probability, cost, name] = parts.as_slice() else {
        return Err(Error::InvalidArgs(format!(
            "option '{}' must be NAME:COST:PROBABILITY",
            spec
        )));
    };

    let cost: f64 = cost
        .trim()
        .parse()
        .map_err(|_| Error::InvalidArgs(format!("option '{}': cost is not a number", spec)))?;
    let probability: f64 = probability
        .trim()
        .parse()
        .map_err(|_| Error::InvalidArgs(format!("option '{}': probability is not a number", spec)))?;

    Ok(json!({ "name": name.trim(), "cost": cost, "probability": probability }))
}

fn parse_json_arg(flag: &str, raw: &str) -> Result<JsonValue> {
    serde_json::from_str(raw).map_err(|e| Error::InvalidArgs(format!("{}: invalid JSON: {}", flag, e)))
}

fn print_json(value: &JsonValue) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn serve(
    workbench: Workbench,
    config: &InvestigatorConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    if let Err(e) = verify_data_root(workbench.data_dir()) {
        warn!("{}; tool calls will fail until it exists", e);
    }

    let adapter = create_adapter(&config.llm).map_err(|e| Error::Server(e.to_string()))?;
    info!("LLM provider: {}", config.llm.provider);

    let mut server_config = config.server.clone();
    if let Some(host) = host {
        server_config.host = host;
    }
    if let Some(port) = port {
        server_config.port = port;
    }

    let state = ApiState {
        workbench: Arc::new(workbench),
        adapter: Arc::new(adapter),
    };
    let server = ApiServer::new(server_config, state);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(server.start())
        .map_err(|e| Error::Server(e.to_string()))
}
