//! System prompts
//!
//! Fixed prompt text handed to models. Nothing here decides which tool runs
//! next; the host's model does that from these instructions.

use std::path::Path;

/// System prompt for the investigation agent
///
/// Names the workbench tools and the order an investigation usually takes.
pub fn investigation_system_prompt() -> String {
    "You are a pharmaceutical supply chain investigation specialist with direct access to local CSV data.

TOOLS:
1. list_sources() - every data source with its columns and a sample row
2. query(table, filters, limit) - rows of one source matching column filters
   Example: query(table=\"sensor_alerts\", filters={\"shipment_id\": \"SHP-001-1\"}, limit=10)
3. build_timeline(shipment_id) - chronological events for one shipment across all sources, with owners
4. cost_analysis(shipment_id) - conditional release vs reject-and-reship, priced from quarantine history
5. compare_costs(options) - rank your own resolution options by expected cost
6. compose_report(shipment_id, timeline, cost_ranking, findings) - draft investigation report

WORKFLOW:
1. Call list_sources() first to learn what data exists.
2. Query the relevant sources for the shipment:
   - temperature excursions: sensor_alerts
   - shipment details: logistics_shipments
   - quality holds: wms_quarantine_log
3. Build the timeline and identify where responsibility sits.
4. Price the resolution options.
5. Present findings backed by the returned records.
6. Ask a human to approve any release, rejection or CAPA decision.

RULES:
- Retrieve data with the tools; never ask the user for data the tools can return.
- Do not announce that you will retrieve data. Call the tool.
- Quote identifiers, timestamps and values exactly as the tools return them.
- If a tool returns an error, read its message and available_columns before retrying."
        .to_string()
}

/// Agent description advertised to the host's router
pub fn agent_description(data_dir: &Path) -> String {
    format!(
        "Pharmaceutical supply chain investigation specialist with LOCAL DATA ACCESS to CSV data in {}. \
         Handles shipment investigations, temperature excursions, delays, quality deviations, \
         CAPA and root cause analysis, accountability tracking and cost-benefit analysis. \
         Queries sensor_alerts, logistics_shipments, wms_quarantine_log and the other local sources directly; \
         do not use web search for shipment data.",
        data_dir.display()
    )
}

/// System prompt for transcript critique
pub fn transcript_system_prompt() -> String {
    "You review transcripts of an AI agent solving a task and explain its score.

Reply with exactly one JSON object and nothing else:
{\"reason\": \"<why the final answer earned this score>\", \"suggestion\": \"<the single most useful change to the agent's approach>\"}

Be specific: cite the step where the agent went wrong or right."
        .to_string()
}

/// User prompt embedding the transcript under review
pub fn transcript_user_prompt(transcript: &str, final_answer: &str, score: &str) -> String {
    format!(
        "TRANSCRIPT:\n{}\n\nFINAL ANSWER:\n{}\n\nSCORE: {}\n\nExplain the score and suggest an improvement as JSON.",
        transcript.trim(),
        final_answer.trim(),
        score
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_investigation_prompt_names_every_tool() {
        let prompt = investigation_system_prompt();
        for tool in crate::execution_engine::default_tools() {
            assert!(prompt.contains(&tool.name), "prompt missing {}", tool.name);
        }
    }

    #[test]
    fn test_agent_description_mentions_data_dir() {
        let desc = agent_description(Path::new("/srv/pharma"));
        assert!(desc.contains("/srv/pharma"));
    }

    #[test]
    fn test_transcript_prompts() {
        assert!(transcript_system_prompt().contains("\"suggestion\""));
        let user = transcript_user_prompt("  step 1\nstep 2 ", "42", "0.5");
        assert!(user.starts_with("TRANSCRIPT:\nstep 1\nstep 2\n"));
        assert!(user.contains("FINAL ANSWER:\n42"));
        assert!(user.contains("SCORE: 0.5"));
    }
}
