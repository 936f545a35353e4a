//! Tool mapping from a tool call to the data tool functions

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value as JsonValue};

use crate::data_tools::{
    self, compare, compose_report, cost_analysis, DataStore, ExpectedCostPolicy, Filters,
    Findings, RankedOption, ResolutionOption, TimelineEvent, TimelineSummary, DEFAULT_ID_COLUMN,
};
use crate::execution_engine::errors::ExecutionError;

type Args = Map<String, JsonValue>;

/// Everything a tool call may read besides its arguments
pub struct ToolContext<'a> {
    pub store: &'a DataStore,
    pub policy: ExpectedCostPolicy,
    pub prepared_by: &'a str,
    pub now: DateTime<Utc>,
}

/// Invoke a tool by name
///
/// Returns the tool's JSON payload; every failure is an [`ExecutionError`]
/// that the workbench turns into an error result.
pub fn invoke_tool(ctx: &ToolContext, name: &str, args: &Args) -> Result<JsonValue, ExecutionError> {
    match name {
        "list_sources" => invoke_list_sources(ctx),
        "query" => invoke_query(ctx, args),
        "build_timeline" => invoke_build_timeline(ctx, args),
        "compare_costs" => invoke_compare_costs(ctx, args),
        "cost_analysis" => invoke_cost_analysis(ctx, args),
        "compose_report" => invoke_compose_report(ctx, args),
        _ => Err(ExecutionError::ToolNotFound(name.to_string())),
    }
}

fn invoke_list_sources(ctx: &ToolContext) -> Result<JsonValue, ExecutionError> {
    let sources = ctx.store.list_sources()?;
    Ok(json!({
        "data_directory": ctx.store.root().display().to_string(),
        "total_sources": sources.len(),
        "sources": sources,
    }))
}

fn invoke_query(ctx: &ToolContext, args: &Args) -> Result<JsonValue, ExecutionError> {
    let table = required_str("query", args, "table")?;
    let filters = Filters::from_json(args.get("filters"))?;
    let limit = optional_usize("query", args, "limit")?;

    let result = ctx.store.query_source(table, &filters, limit)?;
    Ok(serde_json::to_value(result)?)
}

fn invoke_build_timeline(ctx: &ToolContext, args: &Args) -> Result<JsonValue, ExecutionError> {
    let id = required_str("build_timeline", args, "shipment_id")?;
    let id_column = optional_str("build_timeline", args, "id_column")?.unwrap_or(DEFAULT_ID_COLUMN);

    let events = data_tools::build_timeline(ctx.store, id, id_column)?;
    Ok(serde_json::to_value(TimelineSummary::new(id, id_column, events))?)
}

fn invoke_compare_costs(ctx: &ToolContext, args: &Args) -> Result<JsonValue, ExecutionError> {
    let options: Vec<ResolutionOption> = decode("compare_costs", args, "options", None)?;
    let ranking = compare(&options, ctx.policy)?;
    Ok(json!({
        "policy": ctx.policy,
        "ranking": ranking,
    }))
}

fn invoke_cost_analysis(ctx: &ToolContext, args: &Args) -> Result<JsonValue, ExecutionError> {
    let id = required_str("cost_analysis", args, "shipment_id")?;
    let analysis = cost_analysis(ctx.store, id, ctx.policy)?;
    Ok(serde_json::to_value(analysis)?)
}

fn invoke_compose_report(ctx: &ToolContext, args: &Args) -> Result<JsonValue, ExecutionError> {
    const TOOL: &str = "compose_report";
    let id = required_str(TOOL, args, "shipment_id")?;
    // Accept the build_timeline / compare_costs payloads as well as bare arrays
    let timeline: Vec<TimelineEvent> = decode(TOOL, args, "timeline", Some("timeline"))?;
    let ranking: Vec<RankedOption> = decode(TOOL, args, "cost_ranking", Some("ranking"))?;
    let mut findings: Findings = match args.get("findings") {
        None | Some(JsonValue::Null) => Findings::default(),
        Some(_) => decode(TOOL, args, "findings", None)?,
    };
    if findings.accountability.is_empty() {
        findings.accountability = data_tools::compute_accountability(&timeline);
    }

    let report = compose_report(id, timeline, ranking, findings, ctx.prepared_by, ctx.now);
    Ok(serde_json::to_value(report)?)
}

fn required_str<'a>(tool: &str, args: &'a Args, name: &str) -> Result<&'a str, ExecutionError> {
    optional_str(tool, args, name)?.ok_or_else(|| ExecutionError::MissingArgument {
        tool: tool.to_string(),
        argument: name.to_string(),
    })
}

fn optional_str<'a>(tool: &str, args: &'a Args, name: &str) -> Result<Option<&'a str>, ExecutionError> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) if s.trim().is_empty() => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(invalid(tool, name, "expected a string")),
    }
}

fn optional_usize(tool: &str, args: &Args, name: &str) -> Result<Option<usize>, ExecutionError> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| invalid(tool, name, "expected a non-negative integer")),
    }
}

/// Deserialize a required argument, optionally unwrapping `{field: ...}`
fn decode<T: DeserializeOwned>(
    tool: &str,
    args: &Args,
    name: &str,
    wrapped_field: Option<&str>,
) -> Result<T, ExecutionError> {
    let mut value = match args.get(name) {
        None | Some(JsonValue::Null) => {
            return Err(ExecutionError::MissingArgument {
                tool: tool.to_string(),
                argument: name.to_string(),
            })
        }
        Some(v) => v,
    };
    if let (Some(field), JsonValue::Object(map)) = (wrapped_field, value) {
        if let Some(inner) = map.get(field) {
            value = inner;
        }
    }

    T::deserialize(value).map_err(|e| invalid(tool, name, &e.to_string()))
}

fn invalid(tool: &str, argument: &str, reason: &str) -> ExecutionError {
    ExecutionError::InvalidArgument {
        tool: tool.to_string(),
        argument: argument.to_string(),
        reason: reason.to_string(),
    }
}
